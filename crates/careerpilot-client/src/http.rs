//! Shared HTTP error mapping for the backend collaborators.

use careerpilot_core::CareerError;
use reqwest::StatusCode;

/// Maps a transport-level failure (connect, timeout, protocol) to the
/// engine's error taxonomy.
pub(crate) fn transport_error(what: &str, err: reqwest::Error) -> CareerError {
    tracing::warn!(target: "careerpilot::client", "{what} failed in transport: {err}");
    if err.is_connect() || err.is_timeout() {
        CareerError::remote(format!("{what}: backend unreachable ({err})"))
    } else {
        CareerError::remote(format!("{what}: request failed ({err})"))
    }
}

/// Maps a non-success HTTP status to the engine's error taxonomy.
///
/// A 404 becomes `NotFound` for the named entity; everything else is a
/// `Remote` error carrying the status and a body snippet.
pub(crate) fn status_error(
    what: &str,
    entity_type: &'static str,
    entity_id: &str,
    status: StatusCode,
    body: String,
) -> CareerError {
    if status == StatusCode::NOT_FOUND {
        return CareerError::not_found(entity_type, entity_id);
    }
    let snippet: String = body.chars().take(200).collect();
    CareerError::remote(format!("{what}: HTTP {status} - {snippet}"))
}

/// Maps a response-body decode failure.
pub(crate) fn decode_error(what: &str, err: reqwest::Error) -> CareerError {
    CareerError::Serialization {
        format: "JSON".to_string(),
        message: format!("{what}: {err}"),
    }
}
