use crate::config::HeuristicKind;
use crate::solver::StaticData;
use crate::state::State;

/// Lower bound on the number of pushes left, `None` if the boxes can't be matched to goals.
pub(crate) fn estimate(sd: &StaticData, kind: HeuristicKind, state: &State) -> Option<u16> {
    match kind {
        HeuristicKind::Greedy => greedy(sd, state),
        HeuristicKind::Assignment => assignment(sd, state),
    }
}

fn greedy(sd: &StaticData, state: &State) -> Option<u16> {
    let mut goal_dist_sum = 0;
    for &box_pos in &state.boxes {
        goal_dist_sum += sd.closest_push_dists[box_pos]?;
    }
    Some(goal_dist_sum)
}

fn assignment(sd: &StaticData, state: &State) -> Option<u16> {
    if state.boxes.len() > sd.push_dists.len() {
        return None;
    }

    let costs: Vec<Vec<Option<u16>>> = state
        .boxes
        .iter()
        .map(|&box_pos| sd.push_dists.iter().map(|dists| dists[box_pos]).collect())
        .collect();
    min_cost_matching(&costs)
}

/// Hungarian algorithm (potentials variant) for an `n x m` matrix with `n <= m`.
///
/// Every row gets a distinct column. `None` entries can't be used,
/// if there's no matching without them the result is `None`.
pub(crate) fn min_cost_matching(costs: &[Vec<Option<u16>>]) -> Option<u16> {
    // larger than any sum of real costs so a single forbidden edge shows up in the total
    const FORBIDDEN: i64 = 1 << 40;

    let n = costs.len();
    if n == 0 {
        return Some(0);
    }
    let m = costs[0].len();
    assert!(n <= m, "More rows than columns");

    let cost = |i: usize, j: usize| costs[i - 1][j - 1].map_or(FORBIDDEN, i64::from);

    // 1-based, row 0 and column 0 are sentinels
    let mut u = vec![0i64; n + 1];
    let mut v = vec![0i64; m + 1];
    // p[j] = row matched to column j
    let mut p = vec![0usize; m + 1];
    let mut way = vec![0usize; m + 1];

    for i in 1..=n {
        p[0] = i;
        let mut j0 = 0;
        let mut min_v = vec![i64::max_value(); m + 1];
        let mut used = vec![false; m + 1];

        loop {
            used[j0] = true;
            let i0 = p[j0];
            let mut delta = i64::max_value();
            let mut j1 = 0;
            for j in 1..=m {
                if used[j] {
                    continue;
                }
                let cur = cost(i0, j) - u[i0] - v[j];
                if cur < min_v[j] {
                    min_v[j] = cur;
                    way[j] = j0;
                }
                if min_v[j] < delta {
                    delta = min_v[j];
                    j1 = j;
                }
            }
            for j in 0..=m {
                if used[j] {
                    u[p[j]] += delta;
                    v[j] -= delta;
                } else {
                    min_v[j] -= delta;
                }
            }
            j0 = j1;
            if p[j0] == 0 {
                break;
            }
        }

        // flip the augmenting path
        loop {
            let j1 = way[j0];
            p[j0] = p[j1];
            j0 = j1;
            if j0 == 0 {
                break;
            }
        }
    }

    let mut total = 0;
    for j in 1..=m {
        if p[j] != 0 {
            total += i64::from(costs[p[j] - 1][j - 1]?);
        }
    }
    Some(total as u16)
}

#[cfg(test)]
mod tests {
    use crate::data::Pos;
    use crate::level::Level;

    use super::*;

    #[test]
    fn matching_square() {
        let costs = vec![
            vec![Some(4), Some(1), Some(3)],
            vec![Some(2), Some(0), Some(5)],
            vec![Some(3), Some(2), Some(2)],
        ];
        assert_eq!(min_cost_matching(&costs), Some(5));
    }

    #[test]
    fn matching_rectangular() {
        let costs = vec![vec![Some(7), Some(2), Some(9)], vec![Some(3), Some(1), Some(8)]];
        // 2 + 3
        assert_eq!(min_cost_matching(&costs), Some(5));
        assert_eq!(min_cost_matching(&[]), Some(0));
    }

    #[test]
    fn matching_forbidden_edges() {
        let costs = vec![vec![Some(1), None], vec![Some(1), None]];
        assert_eq!(min_cost_matching(&costs), None);

        let costs = vec![vec![None, Some(6)], vec![Some(9), Some(1)]];
        assert_eq!(min_cost_matching(&costs), Some(15));
    }

    #[test]
    fn greedy_vs_assignment() {
        let level: Level = r"
#######
#@    #
#.$$ .#
#######
"
        .parse()
        .unwrap();
        let (sd, state) = StaticData::new(&level).unwrap();

        assert_eq!(estimate(&sd, HeuristicKind::Greedy, &state), Some(1 + 2));
        assert_eq!(estimate(&sd, HeuristicKind::Assignment, &state), Some(1 + 2));

        // a box in the top row can never reach a goal
        let stuck = State::new(Pos::new(1, 1), vec![Pos::new(1, 3), Pos::new(2, 3)]);
        assert_eq!(estimate(&sd, HeuristicKind::Greedy, &stuck), None);
        assert_eq!(estimate(&sd, HeuristicKind::Assignment, &stuck), None);

        let solved = State::new(Pos::new(1, 1), vec![Pos::new(2, 1), Pos::new(2, 5)]);
        assert_eq!(estimate(&sd, HeuristicKind::Greedy, &solved), Some(0));
        assert_eq!(estimate(&sd, HeuristicKind::Assignment, &solved), Some(0));
    }

    #[test]
    fn assignment_is_at_least_greedy() {
        let level: Level = r"
########
#@     #
# $$   #
#.    .#
########
"
        .parse()
        .unwrap();
        let (sd, state) = StaticData::new(&level).unwrap();
        let greedy = estimate(&sd, HeuristicKind::Greedy, &state).unwrap();
        let assignment = estimate(&sd, HeuristicKind::Assignment, &state).unwrap();
        // both boxes are closest to the left goal
        assert_eq!(greedy, 5);
        assert_eq!(assignment, 6);
    }
}
