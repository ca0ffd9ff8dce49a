//! Origin event models consumed and produced by the role handlers.
//!
//! These follow the CloudFront origin-request / origin-response shape: headers
//! are keyed maps of ordered `{key, value}` lists, and the request optionally
//! carries an S3 origin descriptor.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Header map in the internal schema. Multiple values per key keep their order.
pub type Headers = BTreeMap<String, Vec<Header>>;

/// A single header entry. `key` carries the canonical header name.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Header {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub value: String,
}

impl Header {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: value.into(),
        }
    }
}

/// Phase tag of an internal event.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    /// Before the origin is consulted; handlers may answer or modify the request.
    OriginRequest,
    /// After the origin answered; handlers see the fetched response.
    OriginResponse,
}

/// Body encoding tag shared by request and response bodies.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BodyEncoding {
    #[default]
    Text,
    Base64,
}

impl From<bool> for BodyEncoding {
    fn from(is_base64: bool) -> Self {
        if is_base64 { Self::Base64 } else { Self::Text }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InternalEvent {
    pub event_type: EventType,
    pub request: Request,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<InternalResponse>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Request {
    pub headers: Headers,
    /// Path only, never the query string.
    pub uri: String,
    pub querystring: String,
    pub method: String,
    pub client_ip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<RequestBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<Origin>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BodyAction {
    #[default]
    ReadOnly,
    Replace,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    #[serde(default)]
    pub action: BodyAction,
    pub data: String,
    pub encoding: BodyEncoding,
    #[serde(default)]
    pub input_truncated: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Origin {
    S3(S3Origin),
}

impl Origin {
    #[must_use]
    pub const fn s3(&self) -> &S3Origin {
        match self {
            Self::S3(s3) => s3,
        }
    }
}

/// Blob-store origin descriptor. Domain and region come from static
/// configuration, never from the request.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct S3Origin {
    pub domain_name: String,
    pub region: String,
    pub path: String,
    pub auth_method: AuthMethod,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum AuthMethod {
    /// No credential header; the function's execution role grants access.
    None,
    OriginAccessIdentity,
}

/// Response produced by a role handler or by the blob fetcher.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InternalResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_description: Option<String>,
    #[serde(default)]
    pub headers: Headers,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default)]
    pub body_encoding: BodyEncoding,
}

impl InternalResponse {
    pub fn new(status: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            status_description: Some(description.into()),
            headers: Headers::new(),
            body: None,
            body_encoding: BodyEncoding::Text,
        }
    }

    /// Appends a header value under `map_key`, naming it `name`.
    #[must_use]
    pub fn with_header(mut self, map_key: &str, name: &str, value: impl Into<String>) -> Self {
        self.headers
            .entry(map_key.to_string())
            .or_default()
            .push(Header::new(name, value));
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>, encoding: BodyEncoding) -> Self {
        self.body = Some(body.into());
        self.body_encoding = encoding;
        self
    }

    /// First value of the header whose map key matches `name` ignoring ASCII case.
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .and_then(|(_, values)| values.first())
            .map(|header| header.value.as_str())
    }
}
