use fnv::FnvHashSet;

use crate::config::Params;
use crate::solver::{Child, SearchCtx, SearchResult};
use crate::state::{CanonicalKey, State};

/// Greedy local search, always goes to the successor with the lowest h.
///
/// Can't prove there's no solution, getting stuck just means giving up.
pub(crate) fn search(
    ctx: &mut SearchCtx<'_>,
    initial_state: &State,
    initial_h: u16,
    params: &Params,
) -> SearchResult {
    let sd = ctx.sd;
    ctx.stats.add_created(0);

    let mut visited = FnvHashSet::default();
    visited.insert(initial_state.canonical_key(&sd.board));

    let mut pushes = Vec::new();
    let mut state = initial_state.clone();
    let mut h = initial_h;
    let mut sideways = 0;

    // the exclusive range keeps `depth + 1` within u16
    for depth in 0..params.max_steps {
        if ctx.out_of_budget() {
            return SearchResult::BudgetExceeded;
        }
        ctx.expanded(depth);

        let mut best: Option<(Child, CanonicalKey)> = None;
        for child in ctx.successors(&state, depth + 1) {
            let key = child.state.canonical_key(&sd.board);
            if visited.contains(&key) {
                ctx.stats.add_duplicate(depth + 1);
                continue;
            }
            // strictly lower so the first of equal successors wins
            let better = best
                .as_ref()
                .map_or(true, |(best_child, _)| child.h < best_child.h);
            if better {
                best = Some((child, key));
            }
        }

        let (child, key) = match best {
            Some(best) => best,
            None => {
                debug!("Hill climbing stuck after {} pushes", pushes.len());
                return SearchResult::Exhausted;
            }
        };

        if child.h < h {
            sideways = 0;
        } else if child.h == h && sideways < params.sideways_limit {
            sideways += 1;
        } else {
            debug!("Hill climbing reached a local minimum with h {}", h);
            return SearchResult::Exhausted;
        }

        visited.insert(key);
        pushes.push(child.push);
        state = child.state;
        h = child.h;

        if ctx.is_solved(&state) {
            return SearchResult::Found(pushes);
        }
    }

    debug!("Hill climbing ran out of steps");
    SearchResult::Exhausted
}

#[cfg(test)]
mod tests {
    use crate::config::{Method, SolverConfig};
    use crate::level::Level;
    use crate::solver::Status;
    use crate::Solve;

    #[test]
    fn straight_to_goal() {
        let level: Level = r"
########
#@$   .#
########
"
        .parse()
        .unwrap();
        let outcome = level.solve(&SolverConfig::new(Method::HillClimbing)).unwrap();
        assert_eq!(outcome.cost(), Some(4));
        assert_eq!(outcome.moves().unwrap().to_string(), "RRRR");
        assert_eq!(outcome.stats().expansions(), 4);
    }

    #[test]
    fn step_limit() {
        let level: Level = r"
########
#@$   .#
########
"
        .parse()
        .unwrap();
        let config = SolverConfig::new(Method::HillClimbing).with_max_steps(3);
        let outcome = level.solve(&config).unwrap();
        assert_eq!(outcome.status(), Status::Unsolved);
        assert_eq!(outcome.stats().expansions(), 3);
    }

    #[test]
    fn largest_step_limit() {
        let level: Level = r"
########
#@$   .#
########
"
        .parse()
        .unwrap();
        let config = SolverConfig::new(Method::HillClimbing)
            .with_max_steps(u16::max_value())
            .with_sideways_limit(u32::max_value());
        let outcome = level.solve(&config).unwrap();
        assert_eq!(outcome.cost(), Some(4));
    }

    #[test]
    fn sideways_moves() {
        // the first push can't lower the estimate
        let level: Level = r"
######
#   .#
# $$.#
#@ ###
#   ##
######
"
        .parse()
        .unwrap();

        let config = SolverConfig::new(Method::HillClimbing);
        let outcome = level.solve(&config).unwrap();
        assert_eq!(outcome.status(), Status::Unsolved);
        assert_eq!(outcome.stats().expansions(), 1);

        let config = config.with_sideways_limit(1);
        let outcome = level.solve(&config).unwrap();
        assert_eq!(outcome.cost(), Some(4));
        let end = level.replay(outcome.moves().unwrap()).unwrap();
        assert!(end.is_solved(&level.board));
    }
}
