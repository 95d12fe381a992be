//! Referral-graph analyzer
//!
//! Builds the referrer -> referred graph from REFER_USER actions and
//! computes a transitive referral count for every node it reaches. Cycles
//! are detected during traversal; all cycle members end up sharing one
//! normalized value.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::debug;

use crate::model::{Action, ActionType, UserId};

/// DFS coloring for a node during traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeState {
    Unvisited,
    OnPath,
    Finalized,
}

/// One frame of the explicit DFS stack
struct Frame {
    user: UserId,
    /// Index of the next outgoing referral to process
    next_child: usize,
    /// Accumulated count for this node so far
    count: u64,
}

/// Per-call traversal context. All bookkeeping lives here so concurrent
/// calls never share state.
struct Traversal {
    /// referrer -> referred users, duplicates preserved. Ordered so that
    /// roots are visited in ascending user id and results are
    /// deterministic.
    adjacency: BTreeMap<UserId, Vec<UserId>>,
    state: HashMap<UserId, NodeState>,
    index: HashMap<UserId, u64>,
    /// Members of every cycle found anywhere in the run
    in_cycle: HashSet<UserId>,
}

/// Transitive referral count per user, computed from the REFER_USER
/// actions in `actions` (order-insensitive).
///
/// index(u) = Σ over each direct referral r of u of (1 + index(r)), with
/// memoization; a referral chain that closes back on the active path is a
/// cycle and stops the descent. After the whole traversal, every user that
/// was on an active path when a cycle was found is overwritten with
/// `cycle members - 1`, counting members across all cycles in the graph.
///
/// The result has an entry for every referrer and for every referred user
/// the traversal reached; users with no referral edges at all are absent.
pub fn referral_index(actions: &[Action]) -> HashMap<UserId, u64> {
    let mut adjacency: BTreeMap<UserId, Vec<UserId>> = BTreeMap::new();
    for action in actions {
        if action.kind != ActionType::ReferUser {
            continue;
        }
        // A REFER_USER action without a referred user carries no edge
        if let Some(target) = action.target_user {
            adjacency.entry(action.user_id).or_default().push(target);
        }
    }

    let mut traversal = Traversal {
        adjacency,
        state: HashMap::new(),
        index: HashMap::new(),
        in_cycle: HashSet::new(),
    };

    let roots: Vec<UserId> = traversal.adjacency.keys().copied().collect();
    for root in roots {
        if traversal.node_state(root) == NodeState::Unvisited {
            traversal.traverse(root);
        }
    }

    // Global correction: every cycle member shares one value derived from
    // the combined membership set, even across disjoint cycles.
    if !traversal.in_cycle.is_empty() {
        let shared = traversal.in_cycle.len() as u64 - 1;
        debug!(
            "normalizing {} referral cycle members to index {}",
            traversal.in_cycle.len(),
            shared
        );
        for &user in &traversal.in_cycle {
            traversal.index.insert(user, shared);
        }
    }

    traversal.index
}

impl Traversal {
    fn node_state(&self, user: UserId) -> NodeState {
        self.state
            .get(&user)
            .copied()
            .unwrap_or(NodeState::Unvisited)
    }

    /// Depth-first walk from `root` with an explicit frame stack, so deep
    /// referral chains cannot exhaust the thread stack. Finalizes an index
    /// for every node it reaches.
    fn traverse(&mut self, root: UserId) {
        self.state.insert(root, NodeState::OnPath);
        let mut stack = vec![Frame {
            user: root,
            next_child: 0,
            count: 0,
        }];

        while let Some(top) = stack.last() {
            let user = top.user;
            let child = self
                .adjacency
                .get(&user)
                .and_then(|refs| refs.get(top.next_child))
                .copied();

            let Some(referred) = child else {
                // All referrals of this node processed: finalize it and
                // fold its count into the parent edge.
                let frame = stack.pop().unwrap();
                self.state.insert(frame.user, NodeState::Finalized);
                self.index.insert(frame.user, frame.count);
                if let Some(parent) = stack.last_mut() {
                    parent.count += 1 + frame.count;
                }
                continue;
            };

            stack.last_mut().unwrap().next_child += 1;
            match self.node_state(referred) {
                NodeState::OnPath => {
                    // Cycle: everyone currently on the active path is a
                    // member. The edge still counts; the descent stops.
                    for frame in &stack {
                        self.in_cycle.insert(frame.user);
                    }
                    stack.last_mut().unwrap().count += 1;
                }
                NodeState::Finalized => {
                    stack.last_mut().unwrap().count += 1 + self.index[&referred];
                }
                NodeState::Unvisited => {
                    self.state.insert(referred, NodeState::OnPath);
                    stack.push(Frame {
                        user: referred,
                        next_child: 0,
                        count: 0,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn refer(referrer: UserId, referred: UserId) -> Action {
        Action {
            id: 0,
            kind: ActionType::ReferUser,
            user_id: referrer,
            target_user: Some(referred),
            created_at: Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn other(user_id: UserId) -> Action {
        Action {
            id: 0,
            kind: ActionType::ViewContacts,
            user_id,
            target_user: None,
            created_at: Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_dag_counts_transitive_reach() {
        let actions = vec![refer(1, 2), refer(1, 3), refer(2, 4), refer(3, 5)];

        let index = referral_index(&actions);
        assert_eq!(index[&1], 4);
        assert_eq!(index[&2], 1);
        assert_eq!(index[&3], 1);
        assert_eq!(index[&4], 0);
        assert_eq!(index[&5], 0);
    }

    #[test]
    fn test_chain_counts_depth() {
        let actions = vec![refer(1, 2), refer(2, 3), refer(3, 4)];

        let index = referral_index(&actions);
        assert_eq!(index[&1], 3);
        assert_eq!(index[&2], 2);
        assert_eq!(index[&3], 1);
        assert_eq!(index[&4], 0);
    }

    #[test]
    fn test_cycle_members_share_normalized_value() {
        let actions = vec![refer(1, 2), refer(2, 3), refer(3, 1)];

        let index = referral_index(&actions);
        assert_eq!(index[&1], 2);
        assert_eq!(index[&2], 2);
        assert_eq!(index[&3], 2);
    }

    #[test]
    fn test_self_referral_is_one_node_cycle() {
        let actions = vec![refer(7, 7)];

        let index = referral_index(&actions);
        assert_eq!(index[&7], 0);
    }

    #[test]
    fn test_two_disjoint_cycles_share_one_correction() {
        // Known quirk kept on purpose: the correction uses the combined
        // membership count across all cycles, so both two-node cycles get
        // 4 - 1 = 3.
        let actions = vec![refer(1, 2), refer(2, 1), refer(3, 4), refer(4, 3)];

        let index = referral_index(&actions);
        for user in 1..=4 {
            assert_eq!(index[&user], 3, "user {}", user);
        }
    }

    #[test]
    fn test_parallel_edges_each_count() {
        // 1 refers 2 twice: both edges contribute
        let actions = vec![refer(1, 2), refer(1, 2)];

        let index = referral_index(&actions);
        assert_eq!(index[&1], 2);
        assert_eq!(index[&2], 0);
    }

    #[test]
    fn test_non_referral_actions_are_ignored() {
        let actions = vec![other(1), refer(1, 2), other(2), other(3)];

        let index = referral_index(&actions);
        assert_eq!(index[&1], 1);
        assert_eq!(index[&2], 0);
        assert!(!index.contains_key(&3));
    }

    #[test]
    fn test_referral_without_target_creates_no_edge() {
        // A REFER_USER action missing its referred user contributes
        // nothing: no edge, no entry for either side.
        let dangling = Action {
            target_user: None,
            ..refer(1, 0)
        };
        let actions = vec![dangling, refer(2, 3)];

        let index = referral_index(&actions);
        assert!(!index.contains_key(&1));
        assert!(!index.contains_key(&0));
        assert_eq!(index[&2], 1);
        assert_eq!(index[&3], 0);
    }

    #[test]
    fn test_no_referrals_yields_empty_index() {
        let actions = vec![other(1), other(2)];
        assert!(referral_index(&actions).is_empty());
    }

    #[test]
    fn test_memoized_subtree_is_reused_across_roots() {
        // 5 -> 1 -> {2, 3}; root order is ascending, so 1's subtree is
        // finalized before 5 reaches it and its memoized index is reused.
        let actions = vec![refer(5, 1), refer(1, 2), refer(1, 3)];

        let index = referral_index(&actions);
        assert_eq!(index[&1], 2);
        assert_eq!(index[&5], 3);
    }

    #[test]
    fn test_deep_chain_does_not_overflow_stack() {
        let actions: Vec<Action> = (0..100_000).map(|i| refer(i, i + 1)).collect();

        let index = referral_index(&actions);
        assert_eq!(index[&0], 100_000);
        assert_eq!(index[&100_000], 0);
    }

    #[test]
    fn test_idempotent_over_same_input() {
        let actions = vec![refer(1, 2), refer(2, 3), refer(3, 1), refer(4, 1)];

        let first = referral_index(&actions);
        let second = referral_index(&actions);
        assert_eq!(first, second);
    }
}
