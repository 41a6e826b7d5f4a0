use std::fmt::{self, Debug, Display, Formatter};

use crate::map::Board;
use crate::map_formatter::MapFormatter;
use crate::moves::Moves;
use crate::solution_formatter::SolutionFormatter;
use crate::state::State;

#[derive(Clone)]
pub struct Level {
    pub board: Board,
    pub state: State,
}

impl Level {
    pub fn new(board: Board, state: State) -> Self {
        Level { board, state }
    }

    pub fn xsb(&self) -> MapFormatter<'_> {
        self.board.xsb_with_state(&self.state)
    }

    pub fn xsb_solution<'a>(&'a self, moves: &'a Moves, include_steps: bool) -> SolutionFormatter<'a> {
        SolutionFormatter::new(&self.board, &self.state, moves, include_steps)
    }

    /// Plays the moves from the initial state.
    ///
    /// Returns the final state or the index of the first move that's not possible.
    pub fn replay(&self, moves: &Moves) -> Result<State, usize> {
        let mut state = self.state.clone();
        for (i, mov) in moves.iter().enumerate() {
            match state.apply(&self.board, mov.dir) {
                Some((new_state, is_push)) if is_push == mov.is_push => state = new_state,
                _ => return Err(i),
            }
        }
        Ok(state)
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.xsb())
    }
}

impl Debug for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.xsb())
    }
}

#[cfg(test)]
mod tests {
    use crate::data::Dir;
    use crate::moves::Move;

    use super::*;

    #[test]
    fn formatting_level() {
        let xsb: &str = r"
*###*
#@$.#
*###*#
"
        .trim_start_matches('\n');

        let level: Level = xsb.parse().unwrap();
        assert_eq!(level.to_string(), xsb);
        assert_eq!(level.xsb().to_string(), xsb);
        assert_eq!(format!("{:?}", level), xsb);
        assert_eq!(level.board.xsb_with_state(&level.state).to_string(), xsb);
    }

    #[test]
    fn replaying() {
        let level: Level = r"
#######
#@ $ .#
#######
"
        .parse()
        .unwrap();

        let good = Moves::new(vec![
            Move::new(Dir::Right, false),
            Move::new(Dir::Right, true),
            Move::new(Dir::Right, true),
        ]);
        let end = level.replay(&good).unwrap();
        assert!(end.is_solved(&level.board));

        // marked as a step but it's a push
        let mislabeled = Moves::new(vec![
            Move::new(Dir::Right, false),
            Move::new(Dir::Right, false),
        ]);
        assert_eq!(level.replay(&mislabeled), Err(1));

        let into_wall = Moves::new(vec![Move::new(Dir::Up, false)]);
        assert_eq!(level.replay(&into_wall), Err(0));
    }
}
