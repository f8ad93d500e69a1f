use thiserror::Error;

/// Every way a submit cycle can end without a result.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Please enter some text")]
    EmptyTranscript,

    /// Non-2xx response. `message` is the server's `error` field or a generic
    /// status line.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// 2xx response whose envelope reported failure or carried no data.
    #[error("{0}")]
    Rejected(String),

    #[error("Invalid JSON in response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Request failed: {0}")]
    Network(String),
}

impl SubmitError {
    /// True for failures that never left the client.
    pub fn is_validation(&self) -> bool {
        matches!(self, SubmitError::EmptyTranscript)
    }
}
