mod a_star;
mod backtracking;
mod deadlock;
mod expand;
#[cfg(feature = "graph")]
mod graph;
mod heuristic;
mod hill_climbing;
mod ida_star;
mod preprocessing;
mod rbfs;
mod stats;

use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::time::Instant;

use crate::config::{Budget, HeuristicKind, Method, SolverConfig};
use crate::level::Level;
use crate::map::Board;
use crate::moves::{Moves, Push};
use crate::state::State;
use crate::vec2d::Vec2d;
use crate::Solve;

pub use self::stats::Stats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverErr {
    IncompleteBorder,
    UnreachableBoxes,
    BadWeight,
}

impl Display for SolverErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            SolverErr::IncompleteBorder => write!(f, "Incomplete border"),
            SolverErr::UnreachableBoxes => write!(
                f,
                "Unreachable boxes - some boxes are not on goal but can't be reached"
            ),
            SolverErr::BadWeight => write!(f, "Heuristic weight must be at least 1"),
        }
    }
}

impl Error for SolverErr {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Solved,
    Unsolved,
    BudgetExceeded,
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Status::Solved => write!(f, "solved"),
            Status::Unsolved => write!(f, "unsolved"),
            Status::BudgetExceeded => write!(f, "budget-exceeded"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Solved { moves: Moves, cost: u32, stats: Stats },
    /// The whole (reachable, non-deadlocked) state space was searched
    /// or the method gave up - hill climbing can't prove there's no solution.
    Exhausted(Stats),
    BudgetExceeded(Stats),
}

impl Outcome {
    pub fn status(&self) -> Status {
        match *self {
            Outcome::Solved { .. } => Status::Solved,
            Outcome::Exhausted(_) => Status::Unsolved,
            Outcome::BudgetExceeded(_) => Status::BudgetExceeded,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.status() == Status::Solved
    }

    pub fn stats(&self) -> &Stats {
        match *self {
            Outcome::Solved { ref stats, .. } => stats,
            Outcome::Exhausted(ref stats) | Outcome::BudgetExceeded(ref stats) => stats,
        }
    }

    pub fn moves(&self) -> Option<&Moves> {
        match *self {
            Outcome::Solved { ref moves, .. } => Some(moves),
            _ => None,
        }
    }

    /// Number of pushes.
    pub fn cost(&self) -> Option<u32> {
        match *self {
            Outcome::Solved { cost, .. } => Some(cost),
            _ => None,
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Outcome::Solved {
                ref moves, cost, ..
            } => writeln!(f, "Solved: {} pushes, {} moves", cost, moves.move_cnt())?,
            Outcome::Exhausted(_) => writeln!(f, "No solution")?,
            Outcome::BudgetExceeded(_) => writeln!(f, "Budget exceeded")?,
        }
        write!(f, "{}", self.stats())
    }
}

impl Solve for Level {
    fn solve(&self, config: &SolverConfig) -> Result<Outcome, SolverErr> {
        Solver::new(self)?.solve(config)
    }
}

/// Everything about a level that doesn't change during a search.
#[derive(Debug)]
pub(crate) struct StaticData {
    pub(crate) board: Board,
    /// Per goal, in the same order as `board.goals`.
    pub(crate) push_dists: Vec<Vec2d<Option<u16>>>,
    pub(crate) closest_push_dists: Vec2d<Option<u16>>,
    pub(crate) dead_squares: Vec2d<bool>,
}

impl StaticData {
    /// Also returns the initial state cleaned of boxes which can never move.
    pub(crate) fn new(level: &Level) -> Result<(StaticData, State), SolverErr> {
        let (board, state) = preprocessing::check_reachability(level)?;
        let push_dists = preprocessing::push_dists(&board);
        let closest_push_dists = preprocessing::closest_push_dists(&board, &push_dists);
        let dead_squares = deadlock::dead_squares(&board, &closest_push_dists);
        let sd = StaticData {
            board,
            push_dists,
            closest_push_dists,
            dead_squares,
        };
        Ok((sd, state))
    }
}

/// A preprocessed level ready to be solved any number of times with different configs.
#[derive(Debug)]
pub struct Solver {
    sd: StaticData,
    initial_state: State,
}

impl Solver {
    pub fn new(level: &Level) -> Result<Self, SolverErr> {
        debug!("Processing level...");
        let (sd, initial_state) = StaticData::new(level)?;
        debug!("Processed level");
        Ok(Solver { sd, initial_state })
    }

    pub fn solve(&self, config: &SolverConfig) -> Result<Outcome, SolverErr> {
        // also catches NaN
        if !(config.weight() >= 1.0) {
            return Err(SolverErr::BadWeight);
        }

        debug!(
            "Search called: {}, {} heuristic, weight {}",
            config.method,
            config.heuristic(),
            config.weight()
        );
        let mut ctx = SearchCtx::new(&self.sd, config);
        let result = self.search(&mut ctx, config);
        ctx.stats.set_elapsed(ctx.started.elapsed());
        let stats = ctx.stats;

        let outcome = match result {
            SearchResult::Found(pushes) => {
                debug!("Solved, backtracking path");
                let moves =
                    backtracking::reconstruct_moves(&self.sd.board, &self.initial_state, &pushes);
                assert_eq!(
                    moves.push_cnt(),
                    pushes.len(),
                    "Reconstructed moves don't match the found pushes"
                );
                Outcome::Solved {
                    moves,
                    cost: pushes.len() as u32,
                    stats,
                }
            }
            SearchResult::Exhausted => Outcome::Exhausted(stats),
            SearchResult::BudgetExceeded => Outcome::BudgetExceeded(stats),
        };
        info!(
            "{}: {} after {} expansions",
            config.method,
            outcome.status(),
            outcome.stats().expansions()
        );
        Ok(outcome)
    }

    fn search(&self, ctx: &mut SearchCtx<'_>, config: &SolverConfig) -> SearchResult {
        let initial_state = &self.initial_state;

        // looking at the initial state is an expansion too
        // so even trivial levels report some work
        if ctx.out_of_budget() {
            return SearchResult::BudgetExceeded;
        }
        if initial_state.is_solved(&self.sd.board) {
            ctx.stats.add_created(0);
            ctx.expanded(0);
            return SearchResult::Found(Vec::new());
        }
        let initial_h = if deadlock::is_deadlocked(&self.sd, initial_state) {
            None
        } else {
            ctx.estimate(initial_state)
        };
        let initial_h = match initial_h {
            Some(h) => h,
            None => {
                debug!("Initial state is deadlocked");
                ctx.stats.add_created(0);
                ctx.expanded(0);
                return SearchResult::Exhausted;
            }
        };

        match config.method {
            Method::AStar | Method::WeightedAStar => a_star::search(ctx, initial_state, initial_h),
            Method::IdaStar => ida_star::search(ctx, initial_state, initial_h),
            Method::Rbfs => rbfs::search(ctx, initial_state, initial_h),
            Method::HillClimbing => {
                hill_climbing::search(ctx, initial_state, initial_h, &config.params)
            }
        }
    }
}

pub(crate) enum SearchResult {
    /// Pushes from the initial state to a solved state.
    Found(Vec<Push>),
    Exhausted,
    BudgetExceeded,
}

/// A successor together with its heuristic.
#[derive(Debug)]
pub(crate) struct Child {
    pub(crate) push: Push,
    pub(crate) state: State,
    pub(crate) h: u16,
}

/// Per-call state shared by all methods.
pub(crate) struct SearchCtx<'a> {
    pub(crate) sd: &'a StaticData,
    heuristic: HeuristicKind,
    weight: f64,
    budget: Budget,
    started: Instant,
    pub(crate) stats: Stats,
}

impl<'a> SearchCtx<'a> {
    fn new(sd: &'a StaticData, config: &SolverConfig) -> Self {
        SearchCtx {
            sd,
            heuristic: config.heuristic(),
            weight: config.weight(),
            budget: config.budget,
            started: Instant::now(),
            stats: Stats::new(),
        }
    }

    pub(crate) fn estimate(&self, state: &State) -> Option<u16> {
        heuristic::estimate(self.sd, self.heuristic, state)
    }

    pub(crate) fn f(&self, dist: u16, h: u16) -> f64 {
        f64::from(dist) + self.weight * f64::from(h)
    }

    pub(crate) fn is_solved(&self, state: &State) -> bool {
        state.is_solved(&self.sd.board)
    }

    /// Checked before every expansion.
    pub(crate) fn out_of_budget(&self) -> bool {
        if let Some(max) = self.budget.max_expansions {
            if self.stats.expansions() >= max {
                return true;
            }
        }
        if let Some(limit) = self.budget.time_limit {
            if self.started.elapsed() >= limit {
                return true;
            }
        }
        false
    }

    pub(crate) fn expanded(&mut self, depth: u16) {
        if self.stats.add_expanded(depth) {
            debug!("Expanded new depth: {}", depth);
            trace!("{:?}", self.stats);
        }
    }

    /// Successors at `depth` with their heuristic, unsolvable ones are left out.
    pub(crate) fn successors(&mut self, state: &State, depth: u16) -> Vec<Child> {
        let successors = expand::expand(self.sd, state);
        let mut children = Vec::with_capacity(successors.len());
        for (push, state) in successors {
            if let Some(h) = self.estimate(&state) {
                self.stats.add_created(depth);
                children.push(Child { push, state, h });
            }
        }
        children
    }
}
