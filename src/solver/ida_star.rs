use std::iter;
use std::vec;

use fnv::FnvHashSet;

use crate::moves::Push;
use crate::solver::{Child, SearchCtx, SearchResult};
use crate::state::{CanonicalKey, State};

struct Frame {
    state: State,
    key: CanonicalKey,
    dist: u16,
    push: Option<Push>,
    children: vec::IntoIter<Child>,
}

enum Iteration {
    Found(Vec<Push>),
    BudgetExceeded,
    /// Smallest f that was over the bound, `None` if nothing was cut off.
    NextBound(Option<f64>),
}

/// Iterative deepening on f. Only the current path is remembered,
/// states on it are not entered again.
pub(crate) fn search(ctx: &mut SearchCtx<'_>, initial_state: &State, initial_h: u16) -> SearchResult {
    ctx.stats.add_created(0);

    let mut bound = ctx.f(0, initial_h);
    loop {
        debug!("IDA* bound: {}", bound);
        match iteration(ctx, initial_state, bound) {
            Iteration::Found(pushes) => return SearchResult::Found(pushes),
            Iteration::BudgetExceeded => return SearchResult::BudgetExceeded,
            Iteration::NextBound(Some(next_bound)) => bound = next_bound,
            Iteration::NextBound(None) => return SearchResult::Exhausted,
        }
    }
}

fn iteration(ctx: &mut SearchCtx<'_>, initial_state: &State, bound: f64) -> Iteration {
    let sd = ctx.sd;
    let mut next_bound: Option<f64> = None;

    if ctx.out_of_budget() {
        return Iteration::BudgetExceeded;
    }
    ctx.expanded(0);

    let root_key = initial_state.canonical_key(&sd.board);
    let mut path_keys = FnvHashSet::default();
    path_keys.insert(root_key.clone());

    let mut stack = vec![Frame {
        children: ordered(ctx.successors(initial_state, 1)),
        state: initial_state.clone(),
        key: root_key,
        dist: 0,
        push: None,
    }];

    while let Some(frame) = stack.last_mut() {
        let child = match frame.children.next() {
            Some(child) => child,
            None => {
                let done = stack.pop().expect("stack can't be empty here");
                path_keys.remove(&done.key);
                continue;
            }
        };

        let dist = frame.dist + 1;
        let f = ctx.f(dist, child.h);
        if f > bound {
            next_bound = Some(next_bound.map_or(f, |b| b.min(f)));
            continue;
        }

        let key = child.state.canonical_key(&sd.board);
        if path_keys.contains(&key) {
            ctx.stats.add_duplicate(dist);
            continue;
        }

        if ctx.is_solved(&child.state) {
            let pushes = stack
                .iter()
                .filter_map(|frame| frame.push)
                .chain(iter::once(child.push))
                .collect();
            return Iteration::Found(pushes);
        }

        if ctx.out_of_budget() {
            return Iteration::BudgetExceeded;
        }
        ctx.expanded(dist);

        let children = ordered(ctx.successors(&child.state, dist + 1));
        path_keys.insert(key.clone());
        stack.push(Frame {
            state: child.state,
            key,
            dist,
            push: Some(child.push),
            children,
        });
    }

    Iteration::NextBound(next_bound)
}

/// Most promising first, ties keep the expansion order.
fn ordered(mut children: Vec<Child>) -> vec::IntoIter<Child> {
    children.sort_by_key(|child| child.h);
    children.into_iter()
}

#[cfg(test)]
mod tests {
    use crate::config::{Budget, Method, SolverConfig};
    use crate::level::Level;
    use crate::solver::Status;
    use crate::Solve;

    #[test]
    fn around_pillar() {
        // the box has to go around the pillar
        let level: Level = r"
#######
#  .  #
#  #  #
#  $  #
#  @  #
#######
"
        .parse()
        .unwrap();
        let outcome = level.solve(&SolverConfig::new(Method::IdaStar)).unwrap();
        assert_eq!(outcome.cost(), Some(4));
        let end = level.replay(outcome.moves().unwrap()).unwrap();
        assert!(end.is_solved(&level.board));
    }

    #[test]
    fn pocket_is_exhausted() {
        let level: Level = r"
#######
#.   @#
###$###
  # #
  # #
  ###
"
        .parse()
        .unwrap();
        let outcome = level.solve(&SolverConfig::new(Method::IdaStar)).unwrap();
        assert_eq!(outcome.status(), Status::Unsolved);
    }

    #[test]
    fn budget_is_respected() {
        let level: Level = r"
#######
#  .  #
#  #  #
#  $  #
#  @  #
#######
"
        .parse()
        .unwrap();
        let config = SolverConfig::new(Method::IdaStar).with_budget(Budget::expansions(3));
        let outcome = level.solve(&config).unwrap();
        assert_eq!(outcome.status(), Status::BudgetExceeded);
        assert_eq!(outcome.stats().expansions(), 3);
    }
}
