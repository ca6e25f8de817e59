//! Error types for Okta API operations.
//!
//! The taxonomy distinguishes the one benign class (not-found, which
//! existence checks and membership removal treat as an answer rather than
//! a failure) from transport-class errors, which always abort the current
//! pass and propagate to the caller unchanged.

use thiserror::Error;

/// Error that can occur while talking to the Okta API.
#[derive(Debug, Error)]
pub enum OktaError {
    /// The requested object or relationship does not exist remotely.
    ///
    /// Benign for existence checks and for membership removal; fatal
    /// anywhere it is unexpected.
    #[error("not found: {resource}")]
    NotFound { resource: String },

    /// The API rejected the request with 429.
    #[error("rate limited by the Okta API")]
    RateLimited {
        /// Parsed `Retry-After` header value, if the response carried one.
        retry_after_secs: Option<u64>,
    },

    /// Authentication failed (401): bad or expired API token.
    #[error("authentication failed: {message}")]
    Unauthorized { message: String },

    /// Any other non-success response from the API.
    #[error("okta api error (HTTP {status}): {detail}")]
    Api { status: u16, detail: String },

    /// Failed to reach the API at the transport level.
    #[error("network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A response body could not be decoded.
    #[error("invalid response payload: {message}")]
    Serialization { message: String },

    /// Client or directory configuration is invalid.
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// A retryable operation kept failing until the retry budget ran out.
    #[error("max retries exceeded after {attempts} attempt(s): {message}")]
    MaxRetriesExceeded { attempts: u32, message: String },

    /// Multiple independent operations failed; see [`AggregateError`].
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
}

impl OktaError {
    /// Whether this error means the target object is absent.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, OktaError::NotFound { .. })
    }

    /// Whether this error is transient and worth retrying at the
    /// transport layer (rate limiting, network failures).
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            OktaError::RateLimited { .. } | OktaError::Network { .. }
        )
    }

    /// Whether this is a server-side (5xx) API error.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, OktaError::Api { status, .. } if *status >= 500)
    }

    // Convenience constructors

    /// Create a not-found error naming the absent resource.
    pub fn not_found(resource: impl Into<String>) -> Self {
        OktaError::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        OktaError::Network {
            message: message.into(),
            source: None,
        }
    }

    /// Create a network error with an underlying source.
    pub fn network_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        OktaError::Network {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a serialization error.
    pub fn serialization(message: impl Into<String>) -> Self {
        OktaError::Serialization {
            message: message.into(),
        }
    }

    /// Create an invalid-configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        OktaError::InvalidConfiguration {
            message: message.into(),
        }
    }
}

/// Result type for Okta API operations.
pub type OktaResult<T> = Result<T, OktaError>;

/// An ordered collection of failures from independent operations.
///
/// Used by sweep-style cleanup paths where every operation targets a
/// distinct object and stopping at the first failure would hide the rest.
/// This is the inverse of the reconciler's policy, which aborts a pass on
/// the first fatal error because its mutations belong to one resource.
#[derive(Debug, Default)]
pub struct AggregateError {
    errors: Vec<OktaError>,
}

impl AggregateError {
    /// Create an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure.
    pub fn push(&mut self, error: OktaError) {
        self.errors.push(error);
    }

    /// Number of recorded failures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether no failures were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// The recorded failures, in the order they occurred.
    #[must_use]
    pub fn errors(&self) -> &[OktaError] {
        &self.errors
    }

    /// Collapse the collector: `Ok(())` if nothing failed, otherwise one
    /// [`OktaError::Aggregate`] carrying every failure.
    pub fn into_result(self) -> OktaResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(OktaError::Aggregate(self))
        }
    }
}

impl std::fmt::Display for AggregateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} operation(s) failed: ", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for AggregateError {}
