use thiserror::Error;

/// Every failure the workspace can surface in its error slot.
///
/// The `Display` output is the exact message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Failed to generate cover letter")]
    GenerateFailed,

    #[error("Failed to modify cover letter")]
    ModifyFailed,

    #[error("{0}")]
    Transport(String),

    #[error("Failed to parse response: {0}")]
    InvalidResponse(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Operation failed: {0}")]
    Decode(String),

    #[error("Failed to export cover letter: {0}")]
    Export(String),
}

impl From<AppError> for String {
    fn from(err: AppError) -> Self {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_failures_use_fixed_messages() {
        assert_eq!(
            AppError::GenerateFailed.to_string(),
            "Failed to generate cover letter"
        );
        assert_eq!(
            AppError::ModifyFailed.to_string(),
            "Failed to modify cover letter"
        );
    }

    #[test]
    fn test_validation_message_is_passed_through() {
        let msg: String = AppError::Validation("Please enter modification notes".into()).into();
        assert_eq!(msg, "Please enter modification notes");
    }
}
