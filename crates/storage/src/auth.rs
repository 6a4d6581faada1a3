use std::collections::HashSet;

use crate::error::{Result, StorageError};

/// Proof that the caller presented a valid admin secret.
///
/// Only [`AdminKeys::authorize`] can create one, so every write operation
/// that takes `&AdminCapability` is unreachable without authorization.
#[derive(Debug, Clone, Copy)]
pub struct AdminCapability {
    _private: (),
}

/// The shared admin secrets accepted by this instance
#[derive(Clone)]
pub struct AdminKeys {
    keys: HashSet<String>,
}

impl AdminKeys {
    pub fn from_comma_separated(keys_str: &str) -> Self {
        let keys = keys_str
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        Self { keys }
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn is_valid(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn authorize(&self, candidate: &str) -> Result<AdminCapability> {
        if self.is_valid(candidate) {
            Ok(AdminCapability { _private: () })
        } else {
            Err(StorageError::Unauthorized)
        }
    }
}

impl std::fmt::Debug for AdminKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminKeys")
            .field("count", &self.keys.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorize_accepts_configured_key() {
        let keys = AdminKeys::from_comma_separated("maglen2025");
        assert!(keys.authorize("maglen2025").is_ok());
    }

    #[test]
    fn test_authorize_rejects_wrong_key() {
        let keys = AdminKeys::from_comma_separated("maglen2025");
        assert!(matches!(
            keys.authorize("guess"),
            Err(StorageError::Unauthorized)
        ));
    }

    #[test]
    fn test_multiple_keys_are_trimmed() {
        let keys = AdminKeys::from_comma_separated(" first , second,,");
        assert!(keys.is_valid("first"));
        assert!(keys.is_valid("second"));
        assert!(!keys.is_valid(""));
    }

    #[test]
    fn test_empty_configuration_rejects_everything() {
        let keys = AdminKeys::from_comma_separated("");
        assert!(keys.is_empty());
        assert!(keys.authorize("").is_err());
    }

    #[test]
    fn test_debug_does_not_leak_keys() {
        let keys = AdminKeys::from_comma_separated("secret");
        assert!(!format!("{:?}", keys).contains("secret"));
    }
}
