use std::collections::VecDeque;
use std::hash::Hash;

use fnv::FnvHashMap;

use crate::data::Pos;
use crate::map::Board;
use crate::moves::{Move, Moves, Push};
use crate::state::State;

/// Turns pushes into a full list of moves by adding the steps between them.
///
/// The player's walk before each push is the shortest one,
/// preferring directions in `DIRECTIONS` order.
pub(crate) fn reconstruct_moves(board: &Board, initial_state: &State, pushes: &[Push]) -> Moves {
    let mut moves = Moves::default();
    let mut state = initial_state.clone();

    for &push in pushes {
        let steps = player_steps(board, &state, state.player_pos, push.player_pos());
        moves.extend(&steps);
        moves.add(Move::new(push.dir, true));
        state = state.push(push);
    }

    moves
}

fn player_steps(board: &Board, state: &State, src_pos: Pos, dest_pos: Pos) -> Moves {
    if src_pos == dest_pos {
        // because it's not a proper BFS with an open set
        return Moves::default();
    }

    let box_grid = board.box_grid(&state.boxes);

    let mut prevs = FnvHashMap::default();
    prevs.insert(src_pos, src_pos);

    let mut to_visit = VecDeque::new();
    to_visit.push_back(src_pos);

    'bfs: loop {
        let player_pos = to_visit
            .pop_front()
            .expect("Couldn't find a path to the pushing position");

        for &new_player_pos in &player_pos.neighbors() {
            if board.is_wall(new_player_pos)
                || box_grid[new_player_pos]
                || prevs.contains_key(&new_player_pos)
            {
                continue;
            }

            prevs.insert(new_player_pos, player_pos);
            if new_player_pos == dest_pos {
                break 'bfs;
            }
            to_visit.push_back(new_player_pos);
        }
    }

    let positions = backtrack_prevs(&prevs, dest_pos);

    let mut moves = Moves::default();
    let mut iter = positions.iter();
    let mut cur = iter.next().expect("There must be at least one position");
    for next in iter {
        moves.add(Move::new(cur.dir_to(*next), false));
        cur = next;
    }

    moves
}

fn backtrack_prevs<T: Copy + Eq + Hash>(prevs: &FnvHashMap<T, T>, last: T) -> Vec<T> {
    let mut path = Vec::new();
    let mut cur = last;
    loop {
        path.push(cur);
        let prev = prevs[&cur];
        if prev == cur {
            path.reverse();
            return path;
        }
        cur = prev;
    }
}
