use axum::{
    http::{
        header::{CONTENT_TYPE, RETRY_AFTER},
        HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    error::FplError,
    render::{render_instructions, ErrorBody},
    OutputFormat,
};

/// A failed standings request, answered in the caller's requested format.
///
/// A bad league id always gets the instructions page with the error. Other
/// failures give JSON callers `{"error": true, ...}` with 429 or 500; every
/// other format gets the instructions page with status 200.
#[derive(Debug)]
pub struct ServerError {
    pub error: FplError,
    pub format: OutputFormat,
}

impl ServerError {
    pub fn new(error: FplError, format: OutputFormat) -> Self {
        Self { error, format }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message, retry_after) = match &self.error {
            FplError::InvalidInput { .. } => {
                return instructions_page(StatusCode::OK, Some(&self.error.to_string()));
            }
            FplError::RateLimited { retry_after_secs } => (
                StatusCode::TOO_MANY_REQUESTS,
                self.error.to_string(),
                Some(*retry_after_secs),
            ),
            err => {
                tracing::error!(error = %err, "Failed to serve standings");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to fetch standings: {err}"),
                    None,
                )
            }
        };

        let mut response = match self.format {
            OutputFormat::Json => {
                let body = match retry_after {
                    Some(secs) => ErrorBody::rate_limited(message, secs),
                    None => ErrorBody::new(message),
                };
                (status, Json(body)).into_response()
            }
            _ => instructions_page(StatusCode::OK, Some(&message)),
        };

        if let Some(secs) = retry_after {
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from(secs));
        }
        response
    }
}

/// The instructions page with `status`, optionally showing `message`.
pub fn instructions_page(status: StatusCode, message: Option<&str>) -> Response {
    match render_instructions(message) {
        Ok(body) => (status, [(CONTENT_TYPE, OutputFormat::Html.content_type())], body).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Failed to render instructions page");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
