//! Stateless translation between the gateway schema and the origin event schema.

pub mod encoding;
pub mod inbound;
pub mod outbound;

pub use encoding::normalize_body_encoding;
pub use inbound::to_internal_event;
pub use outbound::to_gateway_response;
