//! Result type alias
//!
//! Convenience alias using [`RelayError`] as the error type; use this for
//! all fallible operations in the crate.

use super::errors::RelayError;

/// Result type alias for receipt-relay operations
pub type Result<T> = std::result::Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::RelayError;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(RelayError::Io("disk".to_string()));
        assert!(result.is_err());
    }
}
