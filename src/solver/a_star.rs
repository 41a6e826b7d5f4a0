use std::cmp::Ordering;
use std::collections::BinaryHeap;

use fnv::FnvHashMap;
use typed_arena::Arena;

use crate::moves::Push;
use crate::solver::{SearchCtx, SearchResult};
use crate::state::{CanonicalKey, State};

#[cfg(feature = "graph")]
use crate::solver::graph::Graph;

#[derive(Debug, Clone, Copy)]
pub(crate) struct SearchNode<'a> {
    pub(crate) state: &'a State,
    pub(crate) prev: Option<usize>,
    pub(crate) push: Option<Push>,
    pub(crate) dist: u16,
    #[cfg_attr(not(feature = "graph"), allow(dead_code))]
    pub(crate) h: u16,
}

/// Entry of the open heap, the node itself lives in the node vector.
#[derive(Debug)]
struct Open {
    f: f64,
    dist: u16,
    seq: usize,
    index: usize,
}

impl PartialEq for Open {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Open {}

impl PartialOrd for Open {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Open {
    fn cmp(&self, other: &Self) -> Ordering {
        // intentionally reversed for BinaryHeap:
        // lowest f first, then deepest, then oldest
        other
            .f
            .total_cmp(&self.f)
            .then(self.dist.cmp(&other.dist))
            .then(other.seq.cmp(&self.seq))
    }
}

/// A* or weighted A* depending on the weight in `ctx`.
pub(crate) fn search(ctx: &mut SearchCtx<'_>, initial_state: &State, initial_h: u16) -> SearchResult {
    let sd = ctx.sd;
    let arena = Arena::new();
    let mut nodes: Vec<SearchNode<'_>> = Vec::new();
    let mut keys: Vec<CanonicalKey> = Vec::new();

    let mut to_visit = BinaryHeap::new();
    // best known distance of every expanded canonical state
    let mut closed: FnvHashMap<CanonicalKey, u16> = FnvHashMap::default();

    #[cfg(feature = "graph")]
    let mut graph = Graph::new(&sd.board);

    let start = SearchNode {
        state: arena.alloc(initial_state.clone()),
        prev: None,
        push: None,
        dist: 0,
        h: initial_h,
    };
    keys.push(start.state.canonical_key(&sd.board));
    nodes.push(start);
    ctx.stats.add_created(0);
    to_visit.push(Open {
        f: ctx.f(0, initial_h),
        dist: 0,
        seq: 0,
        index: 0,
    });

    #[cfg(feature = "graph")]
    graph.add(start, None);

    while let Some(Open { index, .. }) = to_visit.pop() {
        let cur_node = nodes[index];

        if let Some(&closed_dist) = closed.get(&keys[index]) {
            if closed_dist <= cur_node.dist {
                ctx.stats.add_duplicate(cur_node.dist);
                #[cfg(feature = "graph")]
                graph.mark_duplicate(index);
                continue;
            }
        }

        if ctx.out_of_budget() {
            return SearchResult::BudgetExceeded;
        }

        // insert here and not as soon as we discover it
        // otherwise we overwrite the shortest path with longer ones
        closed.insert(keys[index].clone(), cur_node.dist);
        ctx.expanded(cur_node.dist);
        #[cfg(feature = "graph")]
        graph.mark_expanded(index);

        if ctx.is_solved(cur_node.state) {
            #[cfg(feature = "graph")]
            graph.draw_states();
            return SearchResult::Found(backtrack_pushes(&nodes, index));
        }

        let new_dist = cur_node.dist + 1;
        for child in ctx.successors(cur_node.state, new_dist) {
            let key = child.state.canonical_key(&sd.board);
            if let Some(&closed_dist) = closed.get(&key) {
                if closed_dist <= new_dist {
                    ctx.stats.add_duplicate(new_dist);
                    continue;
                }
            }

            let next_node = SearchNode {
                state: arena.alloc(child.state),
                prev: Some(index),
                push: Some(child.push),
                dist: new_dist,
                h: child.h,
            };
            let next_index = nodes.len();
            nodes.push(next_node);
            keys.push(key);
            to_visit.push(Open {
                f: ctx.f(new_dist, child.h),
                dist: new_dist,
                seq: next_index,
                index: next_index,
            });

            #[cfg(feature = "graph")]
            graph.add(next_node, Some(index));
        }
    }

    #[cfg(feature = "graph")]
    graph.draw_states();

    SearchResult::Exhausted
}

fn backtrack_pushes(nodes: &[SearchNode<'_>], last: usize) -> Vec<Push> {
    let mut pushes = Vec::new();
    let mut cur = &nodes[last];
    while let (Some(push), Some(prev)) = (cur.push, cur.prev) {
        pushes.push(push);
        cur = &nodes[prev];
    }
    pushes.reverse();
    pushes
}

#[cfg(test)]
mod tests {
    use fnv::FnvHashSet;

    use crate::config::{HeuristicKind, Method, SolverConfig};
    use crate::level::Level;
    use crate::solver::{deadlock, expand, Outcome, Solver, StaticData};
    use crate::Solve;

    use super::*;

    #[test]
    fn ordering() {
        let open = |f, dist, seq| Open {
            f,
            dist,
            seq,
            index: seq,
        };
        let mut heap = BinaryHeap::new();
        heap.push(open(5.0, 1, 0));
        heap.push(open(4.0, 1, 1));
        heap.push(open(4.0, 3, 2));
        heap.push(open(4.0, 3, 3));
        let order: Vec<_> = ::std::iter::from_fn(|| heap.pop()).map(|o| o.seq).collect();
        assert_eq!(order, vec![2, 3, 1, 0]);
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
        let outcome = level.solve(&SolverConfig::new(Method::AStar)).unwrap();
        assert_eq!(outcome.cost(), None);
        assert_eq!(outcome.stats().expansions(), 2);
    }

    #[test]
    fn every_canonical_state_expanded_once() {
        // 2 boxes, 1 goal - unsolvable but the state space is small and has lots of duplicates
        let level: Level = r"
#######
#@    #
# $ $ #
#    .#
#######
"
        .parse()
        .unwrap();

        let solver = Solver::new(&level).unwrap();
        let config = SolverConfig::new(Method::AStar).with_heuristic(HeuristicKind::Greedy);
        let outcome = solver.solve(&config).unwrap();
        let stats = match outcome {
            Outcome::Exhausted(stats) => stats,
            _ => panic!("Expected no solution"),
        };
        assert!(stats.duplicates() > 0);

        // count canonical states reachable from the initial state
        let (sd, initial_state) = StaticData::new(&level).unwrap();
        let mut seen = FnvHashSet::default();
        seen.insert(initial_state.canonical_key(&sd.board));
        let mut to_visit = vec![initial_state];
        while let Some(state) = to_visit.pop() {
            for (_, new_state) in expand::expand(&sd, &state) {
                assert!(!deadlock::is_deadlocked(&sd, &new_state));
                if seen.insert(new_state.canonical_key(&sd.board)) {
                    to_visit.push(new_state);
                }
            }
        }
        assert_eq!(stats.expansions(), seen.len() as u64);
    }
}
