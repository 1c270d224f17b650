use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing one or more required fields.")]
    MissingFields,

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Weather service unavailable: {0}")]
    Upstream(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Upstream(err.to_string())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingFields | ApiError::InvalidFormat(_) | ApiError::InvalidCoordinate(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(shared::ErrorBody {
            error: self.to_string(),
        })
    }
}
