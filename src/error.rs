//! Error types and handling for Couloir

/// Result type alias for Couloir operations
pub type Result<T> = std::result::Result<T, CouloirError>;

/// Error types for the bounded buffer and its worker roles
#[derive(Debug, thiserror::Error)]
pub enum CouloirError {
    /// Invalid parameters or configuration
    #[error("Invalid parameter: {parameter} - {message}")]
    InvalidParameter { parameter: String, message: String },

    /// A synchronization primitive was left in an unusable state
    /// (a thread panicked while holding an internal lock)
    #[error("Concurrency error: {message}")]
    Concurrency { message: String },

    /// The buffer was closed and accepts no further items
    #[error("Buffer closed")]
    Closed,

    /// Thread lifecycle failure (spawn or join)
    #[error("Thread error during {operation}: {message}")]
    Thread { operation: String, message: String },
}

impl CouloirError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Create a concurrency error
    pub fn concurrency(message: impl Into<String>) -> Self {
        Self::Concurrency {
            message: message.into(),
        }
    }

    /// Create a thread lifecycle error
    pub fn thread(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Thread {
            operation: operation.into(),
            message: message.into(),
        }
    }
}
