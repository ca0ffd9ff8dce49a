//! API Gateway HTTP API (payload v2) request/response models.
//!
//! Only the fields the router reads or writes are modelled. Every inbound field
//! is optional on the wire so that a sparse event still deserializes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Single-valued header map as delivered by the gateway.
pub type GatewayHeaders = BTreeMap<String, String>;

/// Inbound gateway event.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct GatewayRequest {
    pub raw_path: String,
    pub raw_query_string: String,
    pub headers: GatewayHeaders,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub is_base64_encoded: bool,
    pub request_context: RequestContext,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http: Option<HttpDescription>,
}

/// The `requestContext.http` block carrying method and caller identity.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct HttpDescription {
    pub method: String,
    pub source_ip: String,
}

impl GatewayRequest {
    /// HTTP method from the request context, empty when the context is absent.
    #[must_use]
    pub fn method(&self) -> &str {
        self.request_context
            .http
            .as_ref()
            .map_or("", |http| http.method.as_str())
    }

    /// Caller IP from the request context, empty when the context is absent.
    #[must_use]
    pub fn source_ip(&self) -> &str {
        self.request_context
            .http
            .as_ref()
            .map_or("", |http| http.source_ip.as_str())
    }
}

/// Outbound gateway response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub status_code: u16,
    pub headers: GatewayHeaders,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl GatewayResponse {
    /// Hand-built response used when even the synthesized error response
    /// cannot be translated.
    #[must_use]
    pub fn internal_error() -> Self {
        Self {
            status_code: 500,
            headers: GatewayHeaders::new(),
            body: "Internal Server Error".to_string(),
            is_base64_encoded: false,
        }
    }
}
