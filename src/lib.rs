// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
// Additional warnings that are allow by default (`rustc -W help`)
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unused)]
// Clippy
#![warn(clippy::all)]

#[macro_use]
extern crate log;

pub mod config;
pub mod level;
pub mod map_formatter;
pub mod moves;
pub mod solution_formatter;
pub mod solver;

mod data;
mod fs;
mod map;
mod parser;
mod state;
mod vec2d;

use std::error::Error;
use std::path::Path;

use crate::config::SolverConfig;
use crate::level::Level;
use crate::solver::{Outcome, SolverErr};

pub use crate::data::{Dir, Pos};
pub use crate::map::Board;
pub use crate::parser::ParserErr;
pub use crate::state::{CanonicalKey, State};

pub trait LoadLevel {
    fn load_level(&self) -> Result<Level, Box<dyn Error>>;

    /// All levels of a collection file.
    fn load_levels(&self) -> Result<Vec<Level>, Box<dyn Error>>;
}

impl<P: AsRef<Path>> LoadLevel for P {
    fn load_level(&self) -> Result<Level, Box<dyn Error>> {
        let text = fs::read_file(self)?;
        Ok(parser::parse(&text)?)
    }

    fn load_levels(&self) -> Result<Vec<Level>, Box<dyn Error>> {
        let text = fs::read_file(self)?;
        Ok(parser::parse_collection(&text)?)
    }
}

pub trait Solve {
    fn solve(&self, config: &SolverConfig) -> Result<Outcome, SolverErr>;
}
