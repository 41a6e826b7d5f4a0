use std::fmt::{self, Debug, Display, Formatter};
use std::time::Duration;

use prettytable::{format, Cell, Row, Table};
use separator::Separatable;

/// Counts by depth (number of pushes from the initial state).
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Stats {
    created: Vec<u64>,
    expanded: Vec<u64>,
    duplicates: Vec<u64>,
    elapsed: Duration,
}

impl Stats {
    pub(crate) fn new() -> Self {
        Stats::default()
    }

    /// Nodes examined - popped, descended into or stood on.
    pub fn expansions(&self) -> u64 {
        self.expanded.iter().sum()
    }

    pub fn created(&self) -> u64 {
        self.created.iter().sum()
    }

    pub fn duplicates(&self) -> u64 {
        self.duplicates.iter().sum()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn max_depth(&self) -> usize {
        self.expanded.len().saturating_sub(1)
    }

    pub(crate) fn add_created(&mut self, depth: u16) -> bool {
        Self::add(&mut self.created, depth)
    }

    /// Returns true if this is the first expansion at this depth.
    pub(crate) fn add_expanded(&mut self, depth: u16) -> bool {
        Self::add(&mut self.expanded, depth)
    }

    pub(crate) fn add_duplicate(&mut self, depth: u16) -> bool {
        Self::add(&mut self.duplicates, depth)
    }

    pub(crate) fn set_elapsed(&mut self, elapsed: Duration) {
        self.elapsed = elapsed;
    }

    fn add(counts: &mut Vec<u64>, depth: u16) -> bool {
        let depth = usize::from(depth);
        let mut ret = false;

        // while because some depths might be skipped - e.g. only duplicates there
        while depth >= counts.len() {
            counts.push(0);
            ret = true;
        }
        counts[depth] += 1;
        ret
    }

    fn depth_table(&self) -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_CLEAN);
        table.set_titles(Row::new(vec![
            Cell::new("Depth"),
            Cell::new("Created"),
            Cell::new("Expanded"),
            Cell::new("Duplicates"),
        ]));

        let depths = self
            .created
            .len()
            .max(self.expanded.len())
            .max(self.duplicates.len());
        for depth in 0..depths {
            let get = |counts: &Vec<u64>| counts.get(depth).cloned().unwrap_or(0);
            table.add_row(Row::new(vec![
                Cell::new(&format!("{}:", depth)),
                Cell::new(&get(&self.created).separated_string()),
                Cell::new(&get(&self.expanded).separated_string()),
                Cell::new(&get(&self.duplicates).separated_string()),
            ]));
        }
        table
    }
}

impl Debug for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "created by depth: {:?}", self.created)?;
        writeln!(f, "expanded by depth: {:?}", self.expanded)?;
        writeln!(f, "duplicates by depth: {:?}", self.duplicates)?;
        writeln!(f, "total created: {}", self.created().separated_string())?;
        writeln!(f, "total expanded: {}", self.expansions().separated_string())?;
        writeln!(f, "total duplicates: {}", self.duplicates().separated_string())
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "States created total: {}", self.created().separated_string())?;
        writeln!(f, "Expansions total: {}", self.expansions().separated_string())?;
        writeln!(f, "Reached duplicates total: {}", self.duplicates().separated_string())?;
        // separator doesn't support u128
        writeln!(f, "Elapsed: {} ms", (self.elapsed.as_millis() as u64).separated_string())?;
        writeln!(f)?;
        write!(f, "{}", self.depth_table())
    }
}
