//! Error types for the semiotrace library.
//!
//! The instrumentation engine itself is generic over any
//! [`std::error::Error`] and never interprets failures beyond Ok/Err: every
//! failure raised by the underlying client reaches the caller unchanged,
//! with span tagging as the only side effect. [`StoreError`] is the shared
//! failure surface of the *backend traits* in [`crate::objects`], used by
//! backends and tests; a real client adapter maps its native errors into it.

/// Errors that can occur when a backend executes a data-store operation.
///
/// This captures the common failure modes of a key-value store client
/// (connectivity, timeouts, contention). The traced decorators forward
/// these verbatim; they never wrap or translate them.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Failed to reach the backing store or execute the call.
    #[error("Store connection failed during {operation}")]
    ConnectionFailed {
        /// Description of the operation that failed (e.g. "get k1")
        operation: String,
        /// The underlying client error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The operation did not complete within the client's deadline.
    #[error("Store operation timed out: {operation}")]
    Timeout {
        /// Description of the operation that timed out
        operation: String,
    },

    /// A lock or permit could not be taken while a blocking acquire was
    /// requested.
    #[error("Resource unavailable: {name}")]
    Unavailable {
        /// The logical name of the contended object
        name: String,
    },

    /// The caller supplied an argument the store rejects.
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// Why the argument was rejected
        reason: String,
    },

    /// Any other backend-reported failure.
    #[error("Store operation failed: {message}")]
    Backend {
        /// The backend's own description of the failure
        message: String,
    },
}

impl StoreError {
    /// Helper to create a `ConnectionFailed` error from any error type.
    pub fn connection_failed(
        operation: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        StoreError::ConnectionFailed {
            operation: operation.into(),
            source: Box::new(source),
        }
    }

    /// Helper to create a `Timeout` error.
    pub fn timeout(operation: impl Into<String>) -> Self {
        StoreError::Timeout {
            operation: operation.into(),
        }
    }

    /// Helper to create a `Backend` error from a message.
    pub fn backend(message: impl Into<String>) -> Self {
        StoreError::Backend {
            message: message.into(),
        }
    }
}
