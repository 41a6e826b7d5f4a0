use crate::data::{Dir, Pos};
use crate::map::Board;
use crate::solver::StaticData;
use crate::state::State;
use crate::vec2d::Vec2d;

/// Cells from which no box can ever be pushed onto any goal.
///
/// Walls are marked too so a single lookup answers "can a box ever be here".
pub(crate) fn dead_squares(
    board: &Board,
    closest_push_dists: &Vec2d<Option<u16>>,
) -> Vec2d<bool> {
    let mut dead = board.grid.scratchpad();
    for pos in board.grid.positions() {
        dead[pos] = board.is_wall(pos) || closest_push_dists[pos].is_none();
    }
    dead
}

/// True if the state provably can't be solved.
///
/// Only checks patterns which can't produce false positives:
/// boxes on dead squares and frozen boxes that are not on goals.
pub(crate) fn is_deadlocked(sd: &StaticData, state: &State) -> bool {
    if state.boxes.iter().any(|&b| sd.dead_squares[b]) {
        return true;
    }

    let box_grid = sd.board.box_grid(&state.boxes);
    let mut assumed_walls = sd.board.grid.scratchpad();
    state
        .boxes
        .iter()
        .filter(|&&b| !sd.board.is_goal(b))
        .any(|&b| is_frozen(sd, &box_grid, &mut assumed_walls, b))
}

fn is_frozen(
    sd: &StaticData,
    boxes: &Vec2d<bool>,
    assumed_walls: &mut Vec2d<bool>,
    pos: Pos,
) -> bool {
    // while checking the neighbors this box can't move
    assumed_walls[pos] = true;
    let frozen = is_blocked(sd, boxes, assumed_walls, pos, Dir::Left, Dir::Right)
        && is_blocked(sd, boxes, assumed_walls, pos, Dir::Up, Dir::Down);
    assumed_walls[pos] = false;
    frozen
}

fn is_blocked(
    sd: &StaticData,
    boxes: &Vec2d<bool>,
    assumed_walls: &mut Vec2d<bool>,
    pos: Pos,
    dir1: Dir,
    dir2: Dir,
) -> bool {
    let (side1, side2) = (pos + dir1, pos + dir2);

    let is_wall = |p: Pos| sd.board.is_wall(p) || assumed_walls[p];
    if is_wall(side1) || is_wall(side2) {
        return true;
    }

    // pushing along this axis would put it on a dead square
    if sd.dead_squares[side1] && sd.dead_squares[side2] {
        return true;
    }

    (boxes[side1] && is_frozen(sd, boxes, assumed_walls, side1))
        || (boxes[side2] && is_frozen(sd, boxes, assumed_walls, side2))
}

#[cfg(test)]
mod tests {
    use crate::level::Level;
    use crate::solver::StaticData;

    use super::*;

    fn static_data(level: &str) -> (StaticData, State) {
        let level: Level = level.parse().unwrap();
        StaticData::new(&level).unwrap()
    }

    #[test]
    fn dead_squares_one_goal() {
        let (sd, _) = static_data(
            r"
#####
##@##
##$##
#  .#
#####
",
        );
        assert_eq!(
            sd.dead_squares.to_string(),
            "11111\n11111\n11011\n11001\n11111\n"
        );
    }

    #[test]
    fn corner_box() {
        let (sd, state) = static_data(
            r"
#####
#$  #
# @.#
#####
",
        );
        assert!(is_deadlocked(&sd, &state));
    }

    #[test]
    fn two_boxes_against_wall() {
        let level = r"
#######
#     #
# $$  #
#.  @.#
#######
";
        // neither box is on a dead square alone
        let (sd, state) = static_data(level);
        assert!(!is_deadlocked(&sd, &state));

        let frozen = State::new(Pos::new(1, 1), vec![Pos::new(3, 2), Pos::new(3, 3)]);
        assert!(!sd.dead_squares[Pos::new(3, 2)]);
        assert!(!sd.dead_squares[Pos::new(3, 3)]);
        assert!(is_deadlocked(&sd, &frozen));
    }

    #[test]
    fn frozen_on_goals_is_fine() {
        let (sd, _) = static_data(
            r"
######
#    #
# ** #
#  @ #
######
",
        );
        let state = State::new(Pos::new(3, 3), vec![Pos::new(2, 2), Pos::new(2, 3)]);
        assert!(!is_deadlocked(&sd, &state));

        // square of boxes, two of them off goal
        let square = State::new(
            Pos::new(3, 4),
            vec![Pos::new(1, 2), Pos::new(1, 3), Pos::new(2, 2), Pos::new(2, 3)],
        );
        assert!(is_deadlocked(&sd, &square));
    }

    #[test]
    fn frozen_pair_along_wall() {
        let (sd, _) = static_data(
            r"
#######
#     #
#     #
#.. @ #
#######
",
        );
        // the box on the goal can't move while the other one holds it in place
        let pair = State::new(Pos::new(1, 1), vec![Pos::new(3, 2), Pos::new(3, 3)]);
        assert!(is_deadlocked(&sd, &pair));

        // the upper box is free to move sideways
        let stacked = State::new(Pos::new(1, 1), vec![Pos::new(2, 2), Pos::new(3, 2)]);
        assert!(!is_deadlocked(&sd, &stacked));
    }
}
