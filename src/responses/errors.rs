use crate::errors::ServerError;
use astra::{Body, Response, ResponseBuilder};
use serde_json::json;

pub type ResultResp = Result<Response, ServerError>;

pub fn status_for(err: &ServerError) -> u16 {
    match err {
        ServerError::NotFound => 404,
        ServerError::BadRequest(_) => 400,
        ServerError::Conflict(_) => 409,
        ServerError::DbError(_) | ServerError::ConfigError(_) | ServerError::InternalError => 500,
    }
}

/// Convert a ServerError into a JSON error response.
/// Store and internal details are logged, not sent to the client.
pub fn error_to_response(err: ServerError) -> Response {
    let status = status_for(&err);
    let message = if status >= 500 {
        tracing::error!(error = %err, "request failed");
        "Internal Server Error".to_string()
    } else {
        tracing::debug!(error = %err, status, "request rejected");
        err.to_string()
    };

    let body = json!({ "error": message }).to_string();

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .body(Body::from(body))
        .unwrap_or_else(|_| Response::new(Body::empty()))
}
