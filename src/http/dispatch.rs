//! `POST /sip2`: the one HTTP endpoint that turns a JSON request envelope
//! into a SIP2 exchange with the ACS and turns the decoded response back
//! into JSON.

use axum::{Json, extract::State};
use sip2_pool::reliable_communicate;
use sip2_protocol::{RequestEnvelope, SuccessEnvelope, request_schema_by_method, values_from_json, values_to_json};
use tracing::{error, warn};

use crate::http::response::{HttpResult, bad_gateway, bad_request, gateway_timeout, unknown_method};
use crate::state::AppState;

pub async fn handle_sip2(
    State(state): State<AppState>,
    Json(envelope): Json<RequestEnvelope>,
) -> HttpResult<Json<SuccessEnvelope>> {
    let schema = request_schema_by_method(&envelope.header.method)
        .ok_or_else(|| unknown_method(format!("no SIP2 request is registered for method {:?}", envelope.header.method)))?;

    let values = values_from_json(schema.fields, &envelope.data)
        .map_err(|err| bad_request(format!("invalid request body for {:?}: {err}", envelope.header.method)))?;

    let request_bytes = sip2_protocol::encode_request(schema, &values)
        .map_err(|err| bad_request(format!("request for {:?} is missing a required field: {err}", envelope.header.method)))?;

    let (_response_schema, response_values) = reliable_communicate(&state.pool, &request_bytes, &state.communicator)
        .await
        .map_err(|err| translate_communicator_error(&envelope.header.method, &err))?;

    Ok(Json(SuccessEnvelope::new(values_to_json(&response_values))))
}

fn translate_communicator_error(method: &str, err: &sip2_pool::CommunicatorError) -> axum::response::Response {
    use sip2_pool::CommunicatorError;
    match err {
        CommunicatorError::Write(_) | CommunicatorError::Read(_) => {
            warn!(method, %err, "ACS did not answer in time");
            gateway_timeout(format!("ACS did not respond to {method}"))
        }
        CommunicatorError::Reconnect(_) => {
            warn!(method, %err, "could not reconnect to ACS");
            gateway_timeout(format!("could not reach ACS for {method}"))
        }
        CommunicatorError::Checksum(_) | CommunicatorError::Frame(_) => {
            error!(method, %err, "ACS sent a malformed response");
            bad_gateway(format!("ACS returned a malformed response to {method}"))
        }
    }
}
