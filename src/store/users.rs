//! User store - read-only lookup over the loaded user records

use std::path::Path;

use crate::model::{User, UserId};

use super::StoreError;

#[derive(Debug)]
pub struct UserStore {
    users: Vec<User>,
}

impl UserStore {
    /// Load user records from a JSON array file
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Io(format!("{}: {}", path.display(), e)))?;
        let users: Vec<User> = serde_json::from_str(&content)
            .map_err(|e| StoreError::Parse(format!("{}: {}", path.display(), e)))?;

        Ok(Self { users })
    }

    #[cfg(test)]
    pub fn from_users(users: Vec<User>) -> Self {
        Self { users }
    }

    /// Look up a user by id
    pub fn user_by_id(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Number of loaded users
    pub fn len(&self) -> usize {
        self.users.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn store_from(json: &str) -> UserStore {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        UserStore::load(file.path()).expect("store loads")
    }

    #[test]
    fn test_load_and_lookup() {
        let store = store_from(
            r#"[
                {"id": 1, "name": "Ada", "createdAt": "2020-01-01T00:00:00Z"},
                {"id": 2, "name": "Grace", "createdAt": "2020-06-01T00:00:00Z"}
            ]"#,
        );

        assert_eq!(store.len(), 2);
        assert_eq!(store.user_by_id(2).unwrap().name, "Grace");
        assert!(store.user_by_id(99).is_none());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = UserStore::load(Path::new("/nonexistent/users.json")).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{not json").unwrap();
        let err = UserStore::load(file.path()).unwrap_err();
        assert!(matches!(err, StoreError::Parse(_)));
    }
}
