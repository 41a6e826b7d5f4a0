use std::fmt::{self, Display, Formatter};
use std::ops::{Add, Sub};

/// Positions are stored as `u8`s.
pub(crate) const MAX_SIZE: usize = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MapCell {
    Empty,
    Wall,
    Goal,
}

impl Display for MapCell {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            MapCell::Empty => write!(f, " "),
            MapCell::Wall => write!(f, "#"),
            MapCell::Goal => write!(f, "."),
        }
    }
}

impl Default for MapCell {
    fn default() -> Self {
        MapCell::Empty
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Contents {
    Empty,
    Box,
    Player,
}

impl Default for Contents {
    fn default() -> Self {
        Contents::Empty
    }
}

/// Order matters: it's the expansion order and the walking priority
/// so changing it changes which of equally good plans is returned.
pub(crate) const DIRECTIONS: [Dir; 4] = [Dir::Up, Dir::Right, Dir::Down, Dir::Left];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dir {
    Up,
    Right,
    Down,
    Left,
}

impl Dir {
    pub(crate) fn inverse(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Right => Dir::Left,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
        }
    }

    fn offset(self) -> (i16, i16) {
        match self {
            Dir::Up => (-1, 0),
            Dir::Right => (0, 1),
            Dir::Down => (1, 0),
            Dir::Left => (0, -1),
        }
    }
}

impl Display for Dir {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Dir::Up => write!(f, "u"),
            Dir::Right => write!(f, "r"),
            Dir::Down => write!(f, "d"),
            Dir::Left => write!(f, "l"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub r: u8,
    pub c: u8,
}

impl Pos {
    pub fn new(r: u8, c: u8) -> Pos {
        Pos { r, c }
    }

    pub(crate) fn neighbors(self) -> [Pos; 4] {
        [
            self + DIRECTIONS[0],
            self + DIRECTIONS[1],
            self + DIRECTIONS[2],
            self + DIRECTIONS[3],
        ]
    }

    /// Only valid for adjacent positions.
    pub(crate) fn dir_to(self, new_pos: Pos) -> Dir {
        match (
            i16::from(new_pos.r) - i16::from(self.r),
            i16::from(new_pos.c) - i16::from(self.c),
        ) {
            (-1, 0) => Dir::Up,
            (0, 1) => Dir::Right,
            (1, 0) => Dir::Down,
            (0, -1) => Dir::Left,
            _ => unreachable!("Positions {:?} and {:?} are not adjacent", self, new_pos),
        }
    }
}

impl Display for Pos {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.r, self.c)
    }
}

// The player's area is checked to be surrounded by walls before searching
// so nothing reachable ever steps outside the grid. Wrapping keeps
// the arithmetic total for cells outside that area.
impl Add<Dir> for Pos {
    type Output = Pos;

    fn add(self, dir: Dir) -> Pos {
        let (dr, dc) = dir.offset();
        Pos {
            r: (i16::from(self.r) + dr) as u8,
            c: (i16::from(self.c) + dc) as u8,
        }
    }
}

impl Sub<Dir> for Pos {
    type Output = Pos;

    fn sub(self, dir: Dir) -> Pos {
        self + dir.inverse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moving_around() {
        let pos = Pos::new(3, 5);
        assert_eq!(pos + Dir::Up, Pos::new(2, 5));
        assert_eq!(pos + Dir::Right, Pos::new(3, 6));
        assert_eq!(pos - Dir::Right, Pos::new(3, 4));
        assert_eq!(pos.dir_to(pos + Dir::Down), Dir::Down);
        for &dir in &DIRECTIONS {
            assert_eq!(pos + dir - dir, pos);
            assert_eq!(dir.inverse().inverse(), dir);
        }
    }
}
