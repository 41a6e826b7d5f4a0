use crate::data::{Dir, Pos};
use crate::map::Board;
use crate::moves::Push;

#[derive(Debug, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct State {
    pub player_pos: Pos,
    pub boxes: Vec<Pos>,
}

impl State {
    pub fn new(player_pos: Pos, mut boxes: Vec<Pos>) -> State {
        // sort to detect equal states when we reorder boxes
        boxes.sort();
        State { player_pos, boxes }
    }

    /// Identifies all states which differ only in where exactly the player stands
    /// inside the area reachable without pushing.
    pub fn canonical_key(&self, board: &Board) -> CanonicalKey {
        let box_grid = board.box_grid(&self.boxes);
        let reachable = board.reachable(&box_grid, self.player_pos);
        CanonicalKey {
            boxes: self.boxes.clone(),
            area: reachable.top_left,
        }
    }

    pub fn is_solved(&self, board: &Board) -> bool {
        // boxes on goals, not goals with boxes - there can be more goals
        self.boxes.iter().all(|&b| board.is_goal(b))
    }

    /// The player walks from the cell behind the box into its old position.
    pub(crate) fn push(&self, push: Push) -> State {
        let new_boxes = self
            .boxes
            .iter()
            .map(|&b| if b == push.box_pos { b + push.dir } else { b })
            .collect();
        State::new(push.box_pos, new_boxes)
    }

    /// One step or push in `dir`, `None` if it's not allowed.
    pub(crate) fn apply(&self, board: &Board, dir: Dir) -> Option<(State, bool)> {
        let new_player_pos = self.player_pos + dir;
        if board.is_wall(new_player_pos) {
            return None;
        }
        if !self.boxes.contains(&new_player_pos) {
            return Some((State::new(new_player_pos, self.boxes.clone()), false));
        }

        let push_dest = new_player_pos + dir;
        if board.is_wall(push_dest) || self.boxes.contains(&push_dest) {
            return None;
        }
        let push = Push::new(new_player_pos, dir);
        Some((self.push(push), true))
    }
}

/// Boxes plus the top-left cell of the player's area.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalKey {
    boxes: Vec<Pos>,
    area: Pos,
}

#[cfg(test)]
mod tests {
    use crate::level::Level;

    use super::*;

    #[test]
    fn canonical_keys() {
        let level: Level = r"
#######
#@ #  #
#  $ .#
#######
"
        .parse()
        .unwrap();
        let board = &level.board;
        let state = &level.state;

        let same_area = State::new(Pos::new(2, 2), state.boxes.clone());
        let other_area = State::new(Pos::new(1, 5), state.boxes.clone());
        assert_ne!(state, &same_area);
        assert_eq!(state.canonical_key(board), same_area.canonical_key(board));
        assert_ne!(state.canonical_key(board), other_area.canonical_key(board));

        let pushed = state.push(Push::new(Pos::new(2, 3), Dir::Right));
        assert_eq!(pushed.player_pos, Pos::new(2, 3));
        assert_eq!(pushed.boxes, vec![Pos::new(2, 4)]);
        assert_ne!(state.canonical_key(board), pushed.canonical_key(board));
    }

    #[test]
    fn applying_moves() {
        let level: Level = r"
######
#@$$.#
######
"
        .parse()
        .unwrap();
        let board = &level.board;
        let state = &level.state;

        assert_eq!(state.apply(board, Dir::Up), None);
        assert_eq!(state.apply(board, Dir::Left), None);
        // two boxes in a row can't be pushed
        assert_eq!(state.apply(board, Dir::Right), None);

        let (stepped, pushed) = State::new(Pos::new(1, 1), vec![Pos::new(1, 3)])
            .apply(board, Dir::Right)
            .unwrap();
        assert!(!pushed);
        assert_eq!(stepped.player_pos, Pos::new(1, 2));

        let (after_push, pushed) = stepped.apply(board, Dir::Right).unwrap();
        assert!(pushed);
        assert!(after_push.is_solved(board));
    }
}
