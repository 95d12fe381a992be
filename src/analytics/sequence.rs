//! Next-action probability estimator
//!
//! Infers a first-order transition model from the sorted action sequence:
//! given an action type, what does a user tend to do next? Counts are
//! pooled across all users.

use std::collections::HashMap;

use crate::model::{Action, ActionType};

/// Probability distribution over the action types users perform after
/// `target`, estimated from `sorted` (the full log sorted by user id, then
/// timestamp; see `ActionStore::sorted_actions`).
///
/// Each occurrence of `target` contributes the entire unbroken run of
/// non-`target` actions by the same user that immediately follows it, not
/// just the single next action. A run ends at a user boundary or at the
/// next occurrence of `target` (which starts its own run and is not
/// counted). Pooled per-type counts are divided by the pooled total and
/// rounded to 2 decimal places; types never observed are absent from the
/// result. An empty map is returned when nothing follows any occurrence.
pub fn next_action_probabilities(
    sorted: &[Action],
    target: ActionType,
) -> HashMap<ActionType, f64> {
    let mut counts: HashMap<ActionType, u64> = HashMap::new();
    let mut total = 0u64;

    for (i, action) in sorted.iter().enumerate() {
        if action.kind != target {
            continue;
        }
        for follower in &sorted[i + 1..] {
            // Run ends at a user boundary or when the conditioning type
            // repeats; the repeat starts its own run.
            if follower.user_id != action.user_id || follower.kind == target {
                break;
            }
            *counts.entry(follower.kind).or_insert(0) += 1;
            total += 1;
        }
    }

    if total == 0 {
        return HashMap::new();
    }

    counts
        .into_iter()
        .map(|(kind, count)| (kind, round2(count as f64 / total as f64)))
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
