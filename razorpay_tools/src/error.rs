use thiserror::Error;

#[derive(Debug, Error)]
pub enum RazorpayApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("Invalid REST response: {0}")]
    RestResponseError(String),
    #[error("Could not deserialize JSON: {0}")]
    JsonError(String),
    #[error("Query failed. Error {status}. {message}")]
    QueryError { status: u16, message: String },
}

impl RazorpayApiError {
    /// True if the provider answered but refused the request, as opposed to the request never getting an answer.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::QueryError { status, .. } if *status < 500)
    }
}
