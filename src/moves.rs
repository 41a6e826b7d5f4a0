use std::fmt::{self, Debug, Display, Formatter};

use crate::data::{Dir, Pos};

// Terminology:
// move = changing player position by one cell
// push = a move that changes a box position
// step = a move that doesn't change a box position

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub dir: Dir,
    pub is_push: bool,
}

impl Move {
    pub(crate) fn new(dir: Dir, is_push: bool) -> Self {
        Move { dir, is_push }
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_push {
            write!(f, "{}", self.dir.to_string().to_uppercase())?;
        } else {
            write!(f, "{}", self.dir)?;
        }
        Ok(())
    }
}

impl Debug for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// A full plan in LURD notation - steps are lowercase, pushes uppercase.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Moves(Vec<Move>);

impl Moves {
    #[cfg(test)]
    pub(crate) fn new(moves: Vec<Move>) -> Self {
        Moves(moves)
    }

    pub fn move_cnt(&self) -> usize {
        self.0.len()
    }

    pub fn push_cnt(&self) -> usize {
        self.0.iter().filter(|m| m.is_push).count()
    }

    pub(crate) fn add(&mut self, mov: Move) {
        self.0.push(mov);
    }

    pub(crate) fn extend(&mut self, moves: &Moves) {
        self.0.extend_from_slice(&moves.0);
    }

    pub fn iter(&self) -> ::std::slice::Iter<'_, Move> {
        self.0.iter()
    }
}

impl IntoIterator for Moves {
    type Item = Move;
    type IntoIter = ::std::vec::IntoIter<Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Moves {
    type Item = &'a Move;
    type IntoIter = ::std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for Moves {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for mov in self {
            write!(f, "{}", mov)?;
        }
        Ok(())
    }
}

impl Debug for Moves {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// The abstract action searched over - which box goes where,
/// ignoring how the player gets behind it.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Push {
    pub box_pos: Pos,
    pub dir: Dir,
}

impl Push {
    pub(crate) fn new(box_pos: Pos, dir: Dir) -> Self {
        Push { box_pos, dir }
    }

    /// Where the player has to stand.
    pub(crate) fn player_pos(self) -> Pos {
        self.box_pos - self.dir
    }
}

impl Display for Push {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.box_pos, self.dir.to_string().to_uppercase())
    }
}

impl Debug for Push {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatting_moves() {
        let moves = Moves::new(vec![
            Move::new(Dir::Up, false),
            Move::new(Dir::Right, false),
            Move::new(Dir::Down, false),
            Move::new(Dir::Left, false),
            Move::new(Dir::Up, true),
            Move::new(Dir::Right, true),
            Move::new(Dir::Down, true),
            Move::new(Dir::Left, true),
        ]);
        assert_eq!(moves.to_string(), "urdlURDL");
    }

    #[test]
    fn extending_and_counting() {
        let mut moves1 = Moves::new(vec![
            Move::new(Dir::Up, true),
            Move::new(Dir::Right, true),
            Move::new(Dir::Down, true),
        ]);

        let moves2 = Moves::new(vec![Move::new(Dir::Up, false), Move::new(Dir::Left, false)]);

        assert_eq!(moves1.move_cnt(), 3);
        assert_eq!(moves1.push_cnt(), 3);
        assert_eq!(moves2.push_cnt(), 0);

        moves1.extend(&moves2);
        moves1.add(Move::new(Dir::Left, true));

        assert_eq!(moves1.move_cnt(), 6);
        assert_eq!(moves1.push_cnt(), 4);
        assert_eq!(moves1.to_string(), "URDulL");
    }

    #[test]
    fn pushes() {
        let push = Push::new(Pos::new(2, 3), Dir::Left);
        assert_eq!(push.player_pos(), Pos::new(2, 4));
        assert_eq!(push.to_string(), "[2, 3]L");
    }
}
