use crate::data::DIRECTIONS;
use crate::moves::Push;
use crate::solver::deadlock;
use crate::solver::StaticData;
use crate::state::State;

/// All states reachable by walking around and doing exactly one push.
///
/// Every push costs 1. Boxes are tried in sorted order, directions in `DIRECTIONS` order.
/// Pushes into deadlocks are left out.
pub(crate) fn expand(sd: &StaticData, state: &State) -> Vec<(Push, State)> {
    let mut new_states = Vec::new();

    let box_grid = sd.board.box_grid(&state.boxes);
    let reachable = sd.board.reachable(&box_grid, state.player_pos);

    for &box_pos in &state.boxes {
        for &dir in &DIRECTIONS {
            let push = Push::new(box_pos, dir);
            if !reachable.cells[push.player_pos()] {
                continue;
            }

            let push_dest = box_pos + dir;
            if sd.dead_squares[push_dest] || box_grid[push_dest] {
                // dead squares include walls
                continue;
            }

            let new_state = state.push(push);
            if deadlock::is_deadlocked(sd, &new_state) {
                continue;
            }
            new_states.push((push, new_state));
        }
    }

    new_states
}
