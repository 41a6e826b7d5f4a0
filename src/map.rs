use std::fmt::{self, Debug, Display, Formatter};

use crate::data::{MapCell, Pos};
use crate::map_formatter::MapFormatter;
use crate::state::State;
use crate::vec2d::Vec2d;

/// The static part of a level - walls and goals.
///
/// Never changes during a search so all states of one puzzle share it.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    pub(crate) grid: Vec2d<MapCell>,
    pub(crate) goals: Vec<Pos>,
}

impl Board {
    pub(crate) fn new(grid: Vec2d<MapCell>, goals: Vec<Pos>) -> Self {
        Board { grid, goals }
    }

    pub fn width(&self) -> u8 {
        self.grid.cols()
    }

    pub fn height(&self) -> u8 {
        self.grid.rows()
    }

    pub fn goals(&self) -> &[Pos] {
        &self.goals
    }

    pub fn is_wall(&self, pos: Pos) -> bool {
        self.grid[pos] == MapCell::Wall
    }

    pub fn is_goal(&self, pos: Pos) -> bool {
        self.grid[pos] == MapCell::Goal
    }

    /// Cells the player can walk to from `start` without moving any box.
    pub(crate) fn reachable(&self, boxes: &Vec2d<bool>, start: Pos) -> Reachable {
        let mut cells = self.grid.scratchpad();
        cells[start] = true;
        let mut top_left = start;

        let mut to_visit = vec![start];
        while let Some(cur) = to_visit.pop() {
            for &next in &cur.neighbors() {
                if cells[next] || boxes[next] || self.grid[next] == MapCell::Wall {
                    continue;
                }
                cells[next] = true;
                if next < top_left {
                    top_left = next;
                }
                to_visit.push(next);
            }
        }

        Reachable { cells, top_left }
    }

    pub(crate) fn box_grid(&self, boxes: &[Pos]) -> Vec2d<bool> {
        let mut grid = self.grid.scratchpad();
        for &b in boxes {
            grid[b] = true;
        }
        grid
    }

    pub fn xsb(&self) -> MapFormatter<'_> {
        MapFormatter::new(&self.grid, None)
    }

    pub fn xsb_with_state<'a>(&'a self, state: &'a State) -> MapFormatter<'a> {
        MapFormatter::new(&self.grid, Some(state))
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.xsb())
    }
}

impl Debug for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.xsb())
    }
}

#[derive(Debug)]
pub(crate) struct Reachable {
    pub(crate) cells: Vec2d<bool>,
    /// The smallest reachable position in row-major order,
    /// identifies the whole area.
    pub(crate) top_left: Pos,
}

#[cfg(test)]
mod tests {
    use crate::level::Level;

    use super::*;

    #[test]
    fn formatting_map() {
        let xsb_level: &str = r"
*###*
#@$.#
*###*#
"
        .trim_start_matches('\n');
        let xsb_map: &str = "
.###.
#  .#
.###.#
"
        .trim_start_matches('\n');

        let level: Level = xsb_level.parse().unwrap();
        assert_eq!(format!("{}", level.board), xsb_map);
        assert_eq!(format!("{:?}", level.board), xsb_map);
        assert_eq!(level.board.width(), 6);
        assert_eq!(level.board.height(), 3);
        assert_eq!(level.board.goals().len(), 5);
    }

    #[test]
    fn reachable_area() {
        let level: Level = r"
#######
#@ #  #
#  $  #
#######
"
        .parse()
        .unwrap();
        let boxes = level.board.box_grid(&level.state.boxes);
        let reachable = level.board.reachable(&boxes, level.state.player_pos);
        assert_eq!(
            reachable.cells.to_string(),
            "0000000\n0110000\n0110000\n0000000\n"
        );
        assert_eq!(reachable.top_left, Pos::new(1, 1));

        let other_side = level.board.reachable(&boxes, Pos::new(2, 5));
        assert_eq!(other_side.top_left, Pos::new(1, 4));
    }
}
