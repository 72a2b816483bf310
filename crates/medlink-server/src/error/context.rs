//! Error context utilities.

use super::types::ApiError;

/// Extension trait for adding context to errors.
pub trait ErrorContext<T> {
    /// Add context to an error, converting to an internal `ApiError`.
    fn context(self, context: impl Into<String>) -> Result<T, ApiError>;
}

impl<T, E: std::error::Error + Send + Sync + 'static> ErrorContext<T> for Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T, ApiError> {
        self.map_err(|e| ApiError::Internal(anyhow::Error::from(e).context(context.into())))
    }
}

/// Extension trait turning a missing value into `NotFound`.
pub trait OptionExt<T> {
    fn not_found(self, message: impl Into<String>) -> Result<T, ApiError>;
}

impl<T> OptionExt<T> for Option<T> {
    fn not_found(self, message: impl Into<String>) -> Result<T, ApiError> {
        self.ok_or_else(|| ApiError::NotFound(message.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_not_found() {
        let missing: Option<u32> = None;
        let err = missing.not_found("Medication not found").unwrap_err();
        assert!(matches!(err, ApiError::NotFound(ref m) if m == "Medication not found"));
    }

    #[test]
    fn test_option_present_passes_through() {
        assert_eq!(Some(7).not_found("Request not found").unwrap(), 7);
    }

    #[test]
    fn test_result_context_keeps_cause() {
        let failed: Result<u32, std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::Other, "socket closed"));
        let err = failed.context("Failed to load request").unwrap_err();
        assert_eq!(
            err.details().as_deref(),
            Some("Failed to load request: socket closed")
        );
    }
}
