use std::collections::VecDeque;

use crate::data::{MapCell, Pos, DIRECTIONS};
use crate::level::Level;
use crate::map::Board;
use crate::solver::SolverErr;
use crate::state::State;
use crate::vec2d::Vec2d;

/// Turns everything the player can't reach into walls and drops goals and boxes
/// that can never take part in the game.
pub(crate) fn check_reachability(level: &Level) -> Result<(Board, State), SolverErr> {
    let grid = &level.board.grid;

    // make sure the level is surrounded by wall
    let mut visited = grid.scratchpad();
    visited[level.state.player_pos] = true;

    let mut to_visit = vec![level.state.player_pos];
    while let Some(cur) = to_visit.pop() {
        let (r, c) = (i32::from(cur.r), i32::from(cur.c));
        let neighbors = [(r - 1, c), (r, c + 1), (r + 1, c), (r, c - 1)];
        for &(nr, nc) in &neighbors {
            // this is the only place in the solver where we need to check bounds (using signed types)
            // everything after that will be surrounded by walls
            if nr < 0 || nc < 0 || nr >= i32::from(grid.rows()) || nc >= i32::from(grid.cols()) {
                // we got out of bounds without hitting a wall
                return Err(SolverErr::IncompleteBorder);
            }

            let new_pos = Pos::new(nr as u8, nc as u8);
            if !visited[new_pos] && grid[new_pos] != MapCell::Wall {
                visited[new_pos] = true;
                to_visit.push(new_pos);
            }
        }
    }

    // boxes don't block here - they can be pushed out of the way
    let mut boxes = Vec::new();
    for &pos in &level.state.boxes {
        if visited[pos] {
            boxes.push(pos);
        } else if grid[pos] != MapCell::Goal {
            return Err(SolverErr::UnreachableBoxes);
        }
    }

    let mut goals = Vec::new();
    for &pos in &level.board.goals {
        if visited[pos] {
            goals.push(pos);
        } else if !level.state.boxes.contains(&pos) {
            warn!("Ignoring unreachable goal at {}", pos);
        }
    }

    // make sure all non-reachable cells are walls
    // to avoid errors with code that iterates through all non-walls
    let mut processed_grid = grid.clone();
    for pos in processed_grid.positions() {
        if !visited[pos] {
            processed_grid[pos] = MapCell::Wall;
        }
    }

    if boxes.len() != goals.len() {
        debug!("{} boxes and {} goals", boxes.len(), goals.len());
    }

    Ok((
        Board::new(processed_grid, goals),
        State::new(level.state.player_pos, boxes),
    ))
}

/// For every goal, the minimum number of pushes to get a box from each cell onto it.
///
/// Other boxes are ignored and the player is assumed to be able to get anywhere
/// so the result is a lower bound.
#[inline(never)] // this is called only once and this way it's easier to see in callgrind
pub(crate) fn push_dists(board: &Board) -> Vec<Vec2d<Option<u16>>> {
    board
        .goals
        .iter()
        .map(|&goal| pull_dists(board, goal))
        .collect()
}

/// BFS of pulls fanning out from the goal.
fn pull_dists(board: &Board, goal: Pos) -> Vec2d<Option<u16>> {
    let mut dists = board.grid.scratchpad();
    dists[goal] = Some(0);

    let mut to_visit = VecDeque::new();
    to_visit.push_back((goal, 0));

    while let Some((box_pos, dist)) = to_visit.pop_front() {
        for &dir in &DIRECTIONS {
            // pulling means the box moves where the player stood
            // and the player steps back one more cell
            let new_box_pos = box_pos + dir;
            let new_player_pos = new_box_pos + dir;
            if board.is_wall(new_box_pos) || board.is_wall(new_player_pos) {
                continue;
            }
            if dists[new_box_pos].is_none() {
                dists[new_box_pos] = Some(dist + 1);
                to_visit.push_back((new_box_pos, dist + 1));
            }
        }
    }

    dists
}

pub(crate) fn closest_push_dists(
    board: &Board,
    push_dists: &[Vec2d<Option<u16>>],
) -> Vec2d<Option<u16>> {
    let mut closest = board.grid.scratchpad();

    for pos in board.grid.positions() {
        closest[pos] = push_dists.iter().filter_map(|dists| dists[pos]).min();
    }

    closest
}
