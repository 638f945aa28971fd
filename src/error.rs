//! 统一的 API 错误类型与 JSON 响应转换。

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

#[derive(Debug)]
pub enum ApiError {
    MalformedRequest,
    ServerMisconfigured,
    MissingCredential,
    InvalidCredential,
    NotFound(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedRequest | ApiError::MissingCredential => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredential => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::ServerMisconfigured | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::MalformedRequest => "Bad request".into(),
            ApiError::ServerMisconfigured => {
                "Server not configured: set SITE_PASSWORD1 and/or SITE_PASSWORD2".into()
            }
            ApiError::MissingCredential => "Password required".into(),
            ApiError::InvalidCredential => "Invalid password".into(),
            ApiError::NotFound(msg) | ApiError::Internal(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            message: self.message(),
        };
        (self.status(), Json(body)).into_response()
    }
}
