//! Error responses.
//!
//! Routing errors are rendered as JSON with a status chosen by kind:
//! unknown paths and names are 404, bad reverse parameters are 400, and a
//! route whose handler is missing is a server-side 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::routing::RoutingError;

/// JSON body for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

/// HTTP status for a routing error.
pub fn status_for(err: &RoutingError) -> StatusCode {
    match err {
        RoutingError::NotFound(_) | RoutingError::UnknownName(_) => StatusCode::NOT_FOUND,
        RoutingError::MissingParam { .. }
        | RoutingError::UnexpectedParam { .. }
        | RoutingError::InvalidParam { .. } => StatusCode::BAD_REQUEST,
        RoutingError::NotReversible { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        RoutingError::HandlerNotRegistered(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn kind(err: &RoutingError) -> &'static str {
    match err {
        RoutingError::NotFound(_) => "route_not_found",
        RoutingError::UnknownName(_) => "unknown_route_name",
        RoutingError::MissingParam { .. } => "missing_param",
        RoutingError::UnexpectedParam { .. } => "unexpected_param",
        RoutingError::InvalidParam { .. } => "invalid_param",
        RoutingError::NotReversible { .. } => "not_reversible",
        RoutingError::HandlerNotRegistered(_) => "handler_not_registered",
    }
}

impl IntoResponse for RoutingError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: kind(&self),
            message: self.to_string(),
        };
        (status_for(&self), Json(body)).into_response()
    }
}
