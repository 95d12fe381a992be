//! Action store - read-only accessors over the loaded action log

use std::path::Path;

use crate::model::{Action, UserId};

use super::StoreError;

#[derive(Debug)]
pub struct ActionStore {
    actions: Vec<Action>,
}

impl ActionStore {
    /// Load the action log from a JSON array file
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Io(format!("{}: {}", path.display(), e)))?;
        let actions: Vec<Action> = serde_json::from_str(&content)
            .map_err(|e| StoreError::Parse(format!("{}: {}", path.display(), e)))?;

        Ok(Self { actions })
    }

    #[cfg(test)]
    pub fn from_actions(actions: Vec<Action>) -> Self {
        Self { actions }
    }

    /// All actions in load order
    pub fn all_actions(&self) -> &[Action] {
        &self.actions
    }

    /// All actions sorted by user id, then timestamp within each user.
    /// The sort is stable: actions with equal timestamps keep their load
    /// order, so "next action" analysis is reproducible.
    pub fn sorted_actions(&self) -> Vec<Action> {
        let mut sorted = self.actions.clone();
        sorted.sort_by(|a, b| {
            a.user_id
                .cmp(&b.user_id)
                .then(a.created_at.cmp(&b.created_at))
        });
        sorted
    }

    /// Whether a user appears as the actor of at least one action
    pub fn user_exists(&self, user_id: UserId) -> bool {
        self.actions.iter().any(|a| a.user_id == user_id)
    }

    /// Number of actions performed by a user
    pub fn count_actions_by_user(&self, user_id: UserId) -> usize {
        self.actions.iter().filter(|a| a.user_id == user_id).count()
    }
}
