//! Gateway request → origin event.

use crate::config::Config;
use crate::models::{
    AuthMethod, BodyAction, EventType, GatewayRequest, Header, Headers, InternalEvent, Origin,
    Request, RequestBody, S3Origin,
};

/// Builds the internal event for `request`.
///
/// Never fails: a missing request context leaves method and client IP empty.
/// The S3 origin descriptor is attached only in the origin-request phase and is
/// derived from `config`, never from the request.
#[must_use]
pub fn to_internal_event(
    request: &GatewayRequest,
    config: &Config,
    event_type: EventType,
) -> InternalEvent {
    let headers: Headers = request
        .headers
        .iter()
        .map(|(name, value)| (name.clone(), vec![Header::new(name.clone(), value.clone())]))
        .collect();

    let body = request.body.as_ref().map(|data| RequestBody {
        action: BodyAction::ReadOnly,
        data: data.clone(),
        encoding: request.is_base64_encoded.into(),
        input_truncated: false,
    });

    let origin = (event_type == EventType::OriginRequest).then(|| {
        Origin::S3(S3Origin {
            domain_name: config.bucket_domain(),
            region: config.region.clone(),
            path: config.base_path.clone(),
            auth_method: AuthMethod::None,
        })
    });

    InternalEvent {
        event_type,
        request: Request {
            headers,
            uri: request.raw_path.clone(),
            querystring: request.raw_query_string.clone(),
            method: request.method().to_string(),
            client_ip: request.source_ip().to_string(),
            body,
            origin,
        },
        response: None,
    }
}
