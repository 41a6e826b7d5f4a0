use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    AStar,
    WeightedAStar,
    IdaStar,
    Rbfs,
    HillClimbing,
}

impl Method {
    pub const ALL: [Method; 5] = [
        Method::AStar,
        Method::WeightedAStar,
        Method::IdaStar,
        Method::Rbfs,
        Method::HillClimbing,
    ];

    /// Greedy is good enough for a method which doesn't guarantee optimality anyway.
    pub fn default_heuristic(self) -> HeuristicKind {
        match self {
            Method::HillClimbing => HeuristicKind::Greedy,
            _ => HeuristicKind::Assignment,
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Method::AStar => write!(f, "a-star"),
            Method::WeightedAStar => write!(f, "weighted-a-star"),
            Method::IdaStar => write!(f, "ida-star"),
            Method::Rbfs => write!(f, "rbfs"),
            Method::HillClimbing => write!(f, "hill-climbing"),
        }
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "a-star" | "astar" => Ok(Method::AStar),
            "weighted-a-star" | "wastar" => Ok(Method::WeightedAStar),
            "ida-star" | "ida" => Ok(Method::IdaStar),
            "rbfs" => Ok(Method::Rbfs),
            "hill-climbing" | "hill" => Ok(Method::HillClimbing),
            _ => Err(format!("Unknown method: {}", s)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeuristicKind {
    /// Sum of push distances of each box to its nearest goal.
    Greedy,
    /// Minimum cost matching of boxes to goals using push distances.
    Assignment,
}

impl Display for HeuristicKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            HeuristicKind::Greedy => write!(f, "greedy"),
            HeuristicKind::Assignment => write!(f, "assignment"),
        }
    }
}

impl FromStr for HeuristicKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "greedy" => Ok(HeuristicKind::Greedy),
            "assignment" => Ok(HeuristicKind::Assignment),
            _ => Err(format!("Unknown heuristic: {}", s)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Params {
    /// Multiplies the heuristic - used by weighted A*, IDA* and RBFS.
    pub weight: f64,
    /// Consecutive moves which don't improve the heuristic hill climbing is allowed to make.
    pub sideways_limit: u32,
    /// Maximum pushes hill climbing makes before giving up.
    pub max_steps: u16,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            weight: 1.0,
            sideways_limit: 0,
            max_steps: 2000,
        }
    }
}

/// Limits checked before every expansion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Budget {
    pub max_expansions: Option<u64>,
    pub time_limit: Option<Duration>,
}

impl Budget {
    pub fn unlimited() -> Self {
        Budget::default()
    }

    pub fn expansions(max_expansions: u64) -> Self {
        Budget {
            max_expansions: Some(max_expansions),
            time_limit: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverConfig {
    pub method: Method,
    /// `None` means the method's default.
    pub heuristic: Option<HeuristicKind>,
    pub params: Params,
    pub budget: Budget,
}

impl SolverConfig {
    pub fn new(method: Method) -> Self {
        SolverConfig {
            method,
            heuristic: None,
            params: Params::default(),
            budget: Budget::unlimited(),
        }
    }

    pub fn heuristic(&self) -> HeuristicKind {
        self.heuristic.unwrap_or_else(|| self.method.default_heuristic())
    }

    /// Plain A* never weighs the heuristic.
    pub fn weight(&self) -> f64 {
        match self.method {
            Method::AStar => 1.0,
            _ => self.params.weight,
        }
    }

    pub fn with_heuristic(mut self, heuristic: HeuristicKind) -> Self {
        self.heuristic = Some(heuristic);
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.params.weight = weight;
        self
    }

    pub fn with_sideways_limit(mut self, sideways_limit: u32) -> Self {
        self.params.sideways_limit = sideways_limit;
        self
    }

    pub fn with_max_steps(mut self, max_steps: u16) -> Self {
        self.params.max_steps = max_steps;
        self
    }

    pub fn with_budget(mut self, budget: Budget) -> Self {
        self.budget = budget;
        self
    }
}
