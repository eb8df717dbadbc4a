use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use deal_engine::{deal_types::UnknownPlatform, DealSourceError, UnlockApiError};
use razorpay_tools::RazorpayApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("Could not read request query: {0}")]
    InvalidQuery(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("{0}")]
    UnsupportedPlatform(#[from] UnknownPlatform),
    #[error("Failed to create payment order")]
    PaymentProviderError(String),
    #[error("Invalid payment signature")]
    InvalidPaymentSignature,
    #[error("The data was not found. {0}")]
    NoRecordFound(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            Self::InvalidPaymentSignature => StatusCode::BAD_REQUEST,
            Self::UnsupportedPlatform(_) => StatusCode::NOT_FOUND,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::PaymentProviderError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "error": self.to_string() }).to_string())
    }
}

impl From<UnlockApiError> for ServerError {
    fn from(e: UnlockApiError) -> Self {
        match e {
            UnlockApiError::MissingDealReference => Self::InvalidRequestBody(e.to_string()),
            UnlockApiError::OrderFailed(e) => Self::PaymentProviderError(e.to_string()),
            UnlockApiError::InvalidSignature(_) => Self::InvalidPaymentSignature,
            UnlockApiError::DealNotFound { .. } => Self::NoRecordFound(e.to_string()),
            UnlockApiError::NoProductLink(_) => Self::NoRecordFound(e.to_string()),
        }
    }
}

impl From<DealSourceError> for ServerError {
    fn from(e: DealSourceError) -> Self {
        Self::BackendError(e.to_string())
    }
}

impl From<RazorpayApiError> for ServerError {
    fn from(e: RazorpayApiError) -> Self {
        Self::InitializeError(e.to_string())
    }
}
