use std::f64::INFINITY;
use std::iter;

use fnv::FnvHashSet;

use crate::moves::Push;
use crate::solver::{Child, SearchCtx, SearchResult};
use crate::state::{CanonicalKey, State};

/// A child with its backed-up f.
struct Node {
    child: Child,
    f: f64,
}

struct Frame {
    state: State,
    key: CanonicalKey,
    dist: u16,
    push: Option<Push>,
    limit: f64,
    nodes: Vec<Node>,
    /// Which of the parent's nodes this frame was entered from.
    from: usize,
}

/// Recursive best-first search with an explicit stack.
///
/// Each frame keeps only its children. When the best child exceeds the frame's limit
/// the frame is dropped and its best f is backed up into the parent.
pub(crate) fn search(ctx: &mut SearchCtx<'_>, initial_state: &State, initial_h: u16) -> SearchResult {
    let sd = ctx.sd;
    ctx.stats.add_created(0);

    if ctx.out_of_budget() {
        return SearchResult::BudgetExceeded;
    }
    ctx.expanded(0);

    let root_f = ctx.f(0, initial_h);
    let successors = ctx.successors(initial_state, 1);
    let root_nodes = nodes(ctx, successors, 1, root_f);
    let root_key = initial_state.canonical_key(&sd.board);
    let mut path_keys = FnvHashSet::default();
    path_keys.insert(root_key.clone());

    let mut stack = vec![Frame {
        state: initial_state.clone(),
        key: root_key,
        dist: 0,
        push: None,
        limit: INFINITY,
        nodes: root_nodes,
        from: 0,
    }];

    loop {
        let frame = stack.last().expect("root is never popped");
        let (best, best_f, alternative) = best_two(&frame.nodes);

        if best.is_none() || best_f.is_infinite() || best_f > frame.limit {
            // back up
            let done = stack.pop().expect("stack can't be empty here");
            path_keys.remove(&done.key);
            match stack.last_mut() {
                Some(parent) => parent.nodes[done.from].f = best_f,
                None => return SearchResult::Exhausted,
            }
            continue;
        }
        let best = best.expect("checked above");

        let dist = frame.dist + 1;
        let limit = frame.limit.min(alternative);
        let child = &frame.nodes[best].child;

        let key = child.state.canonical_key(&sd.board);
        if path_keys.contains(&key) {
            ctx.stats.add_duplicate(dist);
            stack
                .last_mut()
                .expect("root is never popped")
                .nodes[best]
                .f = INFINITY;
            continue;
        }

        if ctx.is_solved(&child.state) {
            let pushes = stack
                .iter()
                .filter_map(|frame| frame.push)
                .chain(iter::once(child.push))
                .collect();
            return SearchResult::Found(pushes);
        }

        if ctx.out_of_budget() {
            return SearchResult::BudgetExceeded;
        }
        ctx.expanded(dist);

        let state = child.state.clone();
        let push = child.push;
        let best_f = frame.nodes[best].f;
        let successors = ctx.successors(&state, dist + 1);
        let child_nodes = nodes(ctx, successors, dist + 1, best_f);
        path_keys.insert(key.clone());
        stack.push(Frame {
            state,
            key,
            dist,
            push: Some(push),
            limit,
            nodes: child_nodes,
            from: best,
        });
    }
}

/// Children inherit the parent's backed-up f if it's higher than their own.
fn nodes(ctx: &SearchCtx<'_>, children: Vec<Child>, dist: u16, parent_f: f64) -> Vec<Node> {
    children
        .into_iter()
        .map(|child| {
            let f = ctx.f(dist, child.h).max(parent_f);
            Node { child, f }
        })
        .collect()
}

/// Index of the node with the lowest f (first one on ties), its f
/// and the second lowest f.
fn best_two(nodes: &[Node]) -> (Option<usize>, f64, f64) {
    let mut best = None;
    let mut best_f = INFINITY;
    let mut alternative = INFINITY;
    for (i, node) in nodes.iter().enumerate() {
        if best.is_none() || node.f < best_f {
            alternative = best_f;
            best = Some(i);
            best_f = node.f;
        } else if node.f < alternative {
            alternative = node.f;
        }
    }
    (best, best_f, alternative)
}

#[cfg(test)]
mod tests {
    use crate::config::{Budget, Method, SolverConfig};
    use crate::data::{Dir, Pos};
    use crate::level::Level;
    use crate::solver::Status;
    use crate::Solve;

    use super::*;

    fn node(f: f64) -> Node {
        Node {
            child: Child {
                push: Push::new(Pos::new(1, 1), Dir::Up),
                state: State::new(Pos::new(0, 0), Vec::new()),
                h: 0,
            },
            f,
        }
    }

    #[test]
    fn choosing_best() {
        assert_eq!(best_two(&[]), (None, INFINITY, INFINITY));
        assert_eq!(best_two(&[node(3.0)]), (Some(0), 3.0, INFINITY));
        assert_eq!(
            best_two(&[node(4.0), node(2.0), node(2.0), node(3.0)]),
            (Some(1), 2.0, 2.0)
        );
        assert_eq!(
            best_two(&[node(2.0), node(5.0), node(3.0)]),
            (Some(0), 2.0, 3.0)
        );
    }

    #[test]
    fn around_pillar() {
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
        let outcome = level.solve(&SolverConfig::new(Method::Rbfs)).unwrap();
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
        let config = SolverConfig::new(Method::Rbfs).with_budget(Budget::expansions(1000));
        let outcome = level.solve(&config).unwrap();
        assert_eq!(outcome.status(), Status::Unsolved);
        assert_eq!(outcome.stats().expansions(), 2);
    }
}
