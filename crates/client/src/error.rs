use storefront_core::error::FieldError;

/// Errors from the storefront API client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with an error envelope or a non-2xx status.
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        /// Field-level validation failures, when the server sent any.
        errors: Vec<FieldError>,
    },

    /// A 2xx response whose body did not match the expected shape.
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The endpoint needs a signed-in session and there is none.
    #[error("Not signed in")]
    NotAuthenticated,
}

impl ClientError {
    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
