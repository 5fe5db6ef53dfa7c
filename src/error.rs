use thiserror::Error;

/// Error taxonomy for voxnote.
///
/// Every error is terminal at its point of detection: callers convert it to a
/// user-visible notification (HTTP status, log line) rather than retrying.
#[derive(Error, Debug)]
pub enum NoteError {
    /// The host offers no speech-recognition capability. Fatal to the
    /// listening feature only; surfaced once at initialization.
    #[error("Speech recognition capability unavailable: {message}")]
    CapabilityUnavailable { message: String },

    /// Mid-session recognition error (audio failure, no-speech timeout,
    /// network failure for cloud-backed engines). Non-fatal, logged, no
    /// automatic retry.
    #[error("Recognition error: {message}")]
    Recognition { message: String },

    /// Missing sender name, recipient email, or empty transcript at delivery
    /// time. Recovered locally; no external call is attempted.
    #[error("Missing required field: {field}")]
    Validation { field: &'static str },

    /// The external delivery capability rejected the request or the call
    /// itself failed. Reported, logged, not retried.
    #[error("Delivery failed: {reason}")]
    DeliveryFailed { reason: String },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, NoteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_unavailable_display() {
        let error = NoteError::CapabilityUnavailable {
            message: "no engine linked".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Speech recognition capability unavailable: no engine linked"
        );
    }

    #[test]
    fn test_validation_display() {
        let error = NoteError::Validation { field: "to_email" };
        assert_eq!(error.to_string(), "Missing required field: to_email");
    }

    #[test]
    fn test_delivery_failed_display() {
        let error = NoteError::DeliveryFailed {
            reason: "HTTP 403".to_string(),
        };
        assert_eq!(error.to_string(), "Delivery failed: HTTP 403");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let error: NoteError = io.into();
        assert!(matches!(error, NoteError::Io(_)));
    }
}
