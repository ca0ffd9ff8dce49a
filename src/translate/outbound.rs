//! Origin response → gateway response.

use crate::models::{
    BodyEncoding, GatewayHeaders, GatewayResponse, InternalResponse, RouterError, RouterResult,
};

const CONTENT_TYPE: &str = "Content-Type";

/// Builds the gateway response for `response` without modifying it.
///
/// Only the first entry of each header list is kept, written under that
/// entry's own name so its canonical casing wins over the map key.
///
/// # Errors
///
/// Returns `RouterError::InvalidStatus` if the status is not an integer status code.
pub fn to_gateway_response(response: &InternalResponse) -> RouterResult<GatewayResponse> {
    let status_code = response
        .status
        .trim()
        .parse::<u16>()
        .map_err(|_| RouterError::InvalidStatus(response.status.clone()))?;

    let mut headers = GatewayHeaders::new();
    for (map_key, values) in &response.headers {
        let Some(first) = values.first() else {
            continue;
        };
        let name = first
            .key
            .clone()
            .unwrap_or_else(|| canonical_fallback_name(map_key));
        headers.insert(name, first.value.clone());
    }

    Ok(GatewayResponse {
        status_code,
        headers,
        body: response.body.clone().unwrap_or_default(),
        is_base64_encoded: response.body_encoding == BodyEncoding::Base64,
    })
}

// Name used when a header entry carries no key of its own.
fn canonical_fallback_name(map_key: &str) -> String {
    if map_key.eq_ignore_ascii_case(CONTENT_TYPE) {
        CONTENT_TYPE.to_string()
    } else {
        map_key.to_string()
    }
}
