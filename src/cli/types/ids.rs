//! Identifier types for upstream accounts.

use crate::error::{Result, TrackerError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for an upstream handle.
///
/// Guarantees the handle is non-empty and safe to splice into a URL path:
/// ASCII alphanumerics plus `_ - .`, and never made of dots alone.
///
/// # Examples
///
/// ```rust
/// use cp_tracker::Username;
///
/// let user = Username::new(" tourist ").unwrap();
/// assert_eq!(user.as_str(), "tourist");
/// assert!(Username::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and wrap a handle.
    pub fn new(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let valid = !trimmed.is_empty()
            && trimmed
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
            // `.` and `..` are path segments, not handles
            && !trimmed.chars().all(|c| c == '.');
        if valid {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(TrackerError::InvalidUsername)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Username {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for Username {
    type Error = TrackerError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_trims_and_accepts_handles() {
        assert_eq!(Username::new("  gennady.korotkevich ").unwrap().as_str(), "gennady.korotkevich");
        assert_eq!(Username::new("user_01-x").unwrap().to_string(), "user_01-x");
    }

    #[test]
    fn test_username_rejects_empty_and_path_characters() {
        assert!(matches!(Username::new(""), Err(TrackerError::InvalidUsername)));
        assert!(matches!(Username::new("   "), Err(TrackerError::InvalidUsername)));
        assert!(Username::new("../admin").is_err());
        assert!(Username::new("a/b").is_err());
        assert!(Username::new("a b").is_err());
        assert!(Username::new("name?x=1").is_err());
    }

    #[test]
    fn test_username_rejects_dot_segments() {
        assert!(matches!(Username::new("."), Err(TrackerError::InvalidUsername)));
        assert!(matches!(Username::new(".."), Err(TrackerError::InvalidUsername)));
        assert!(Username::new(" ... ").is_err());
        assert_eq!(Username::new("a.b").unwrap().as_str(), "a.b");
        assert_eq!(Username::new(".chef").unwrap().as_str(), ".chef");
    }

    #[test]
    fn test_username_from_str_and_serde() {
        let user: Username = "chef_42".parse().unwrap();
        assert_eq!(serde_json::to_value(&user).unwrap(), serde_json::json!("chef_42"));

        let back: Username = serde_json::from_value(serde_json::json!("chef_42")).unwrap();
        assert_eq!(back, user);
        assert!(serde_json::from_value::<Username>(serde_json::json!("")).is_err());
        assert!(serde_json::from_value::<Username>(serde_json::json!("..")).is_err());
    }
}
