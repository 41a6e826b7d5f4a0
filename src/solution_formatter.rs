use std::fmt::{self, Debug, Display, Formatter};

use crate::map::Board;
use crate::moves::Moves;
use crate::state::State;

/// Prints the initial state and then the state after every push
/// (or after every move if `include_steps`).
pub struct SolutionFormatter<'a> {
    board: &'a Board,
    initial_state: &'a State,
    moves: &'a Moves,
    include_steps: bool,
}

impl<'a> SolutionFormatter<'a> {
    pub(crate) fn new(
        board: &'a Board,
        initial_state: &'a State,
        moves: &'a Moves,
        include_steps: bool,
    ) -> Self {
        Self {
            board,
            initial_state,
            moves,
            include_steps,
        }
    }
}

impl Display for SolutionFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board.xsb_with_state(&self.initial_state))?;
        let mut last_state = self.initial_state.clone();
        for mov in self.moves {
            let new_state = match last_state.apply(self.board, mov.dir) {
                Some((new_state, _)) => new_state,
                None => {
                    // moves from a different level
                    writeln!(f, "Invalid move: {}", mov)?;
                    return Ok(());
                }
            };
            if mov.is_push || self.include_steps {
                writeln!(f, "{}", self.board.xsb_with_state(&new_state))?;
            }
            last_state = new_state;
        }
        Ok(())
    }
}

impl Debug for SolutionFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
