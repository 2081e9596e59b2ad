//! Extractor configuration mapping body and query failures to domain errors.
//!
//! Without these, Actix answers malformed payloads with plain-text 400s;
//! with them every failure uses the JSON error envelope.

use actix_web::web;
use tracing::debug;

use crate::domain::Error;

const MAX_BODY_BYTES: usize = 16 * 1024;

fn invalid_body(detail: &dyn std::fmt::Display) -> actix_web::Error {
    debug!(error = %detail, "rejected request body");
    Error::invalid_request("request body must be JSON or URL-encoded form data").into()
}

/// JSON body limits and error mapping.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(MAX_BODY_BYTES)
        .error_handler(|err, _req| invalid_body(&err))
}

/// URL-encoded form limits and error mapping.
#[must_use]
pub fn form_config() -> web::FormConfig {
    web::FormConfig::default()
        .limit(MAX_BODY_BYTES)
        .error_handler(|err, _req| invalid_body(&err))
}

/// Query string error mapping.
#[must_use]
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "rejected query string");
        Error::invalid_request("malformed query string").into()
    })
}
