use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("customer name is required to start a trip")]
    MissingCustomerName,
    #[error("trip service request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("malformed trip service payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// Validation failures are already reported to the user through the view.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::MissingCustomerName)
    }
}
