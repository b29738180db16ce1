use axum::{Json, http::StatusCode, response::{IntoResponse, Response}};
use sip2_protocol::ErrorEnvelope;

pub type HttpResponse = Response;
pub type HttpResult<T = ()> = Result<T, HttpResponse>;

pub(crate) fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> HttpResponse {
    (status, Json(ErrorEnvelope::new(code, message))).into_response()
}

pub fn bad_request(message: impl Into<String>) -> HttpResponse {
    json_error(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
}

pub fn unknown_method(message: impl Into<String>) -> HttpResponse {
    json_error(StatusCode::NOT_FOUND, "UNKNOWN_METHOD", message)
}

pub fn gateway_timeout(message: impl Into<String>) -> HttpResponse {
    json_error(StatusCode::GATEWAY_TIMEOUT, "ACS_TIMEOUT", message)
}

pub fn bad_gateway(message: impl Into<String>) -> HttpResponse {
    json_error(StatusCode::BAD_GATEWAY, "ACS_PROTOCOL_ERROR", message)
}
