use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use thiserror::Error;
use trader_account_engine::{traits::AccountStoreError, AccountApiError};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Invalid account owner. {0}")]
    InvalidOwner(String),
    #[error("Duplicate account. {0}")]
    DuplicateAccount(String),
    #[error("Write conflict. {0}")]
    WriteConflict(String),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("Invalid query parameters. {0}")]
    InvalidQueryParams(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
    #[error("The data was not found. {0}")]
    NoRecordFound(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidOwner(_) => StatusCode::BAD_REQUEST,
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::InvalidQueryParams(_) => StatusCode::BAD_REQUEST,
            Self::DuplicateAccount(_) => StatusCode::CONFLICT,
            Self::WriteConflict(_) => StatusCode::CONFLICT,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "error": self.to_string() }).to_string())
    }
}

impl From<AccountApiError> for ServerError {
    fn from(e: AccountApiError) -> Self {
        let msg = e.to_string();
        match e {
            AccountApiError::InvalidOwner(_) => Self::InvalidOwner(msg),
            AccountApiError::DuplicateOwner(_) => Self::DuplicateAccount(msg),
            AccountApiError::NotFound(_) => Self::NoRecordFound(msg),
            AccountApiError::UnresolvedConflict(_) => Self::WriteConflict(msg),
            AccountApiError::Store(AccountStoreError::QueryError(q)) => Self::InvalidQueryParams(q),
            AccountApiError::Store(_) => Self::BackendError(msg),
        }
    }
}
