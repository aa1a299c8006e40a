//! Command implementations for the tracker CLI

pub mod analysis;
pub mod contests;
pub mod profile;

use serde::Serialize;

use crate::{ErrorKind, Result, TrackerError};

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?); // tarpaulin::skip
    Ok(())
}

/// One-line message for a failed command, as shown to the user.
pub fn describe_error(err: &TrackerError) -> String {
    match err.kind() {
        ErrorKind::NotFound => format!("not found: {err}"),
        _ => format!("failed: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_not_found() {
        let err = TrackerError::NotFound("User not found on CodeChef".to_string());
        assert_eq!(describe_error(&err), "not found: User not found on CodeChef");
    }

    #[test]
    fn test_describe_other_failures_keep_message() {
        let err = TrackerError::Unavailable("CodeChef is down".to_string());
        assert_eq!(describe_error(&err), "failed: CodeChef is down");

        let err = TrackerError::ParseFailure("Failed to extract contest graph".to_string());
        assert_eq!(describe_error(&err), "failed: Failed to extract contest graph");
    }
}
