use anyhow::anyhow;
use async_trait::async_trait;

use super::{HandlerOutcome, Role, RoleHandler};
use crate::models::{BodyEncoding, EventType, InternalEvent, InternalResponse};

/// Default role that serves everything from the origin unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct OriginPassthrough;

#[async_trait]
impl RoleHandler for OriginPassthrough {
    async fn handle(&self, event: InternalEvent) -> anyhow::Result<HandlerOutcome> {
        match event.event_type {
            EventType::OriginRequest => Ok(HandlerOutcome::ContinueToOrigin(event.request)),
            EventType::OriginResponse => event.response.map(HandlerOutcome::Responded).ok_or_else(
                || anyhow!("origin-response event for {} has no response", event.request.uri),
            ),
        }
    }
}

/// Stand-in for a role whose handler is not deployed.
#[derive(Debug, Clone, Copy)]
pub struct Unavailable {
    role: Role,
}

impl Unavailable {
    #[must_use]
    pub const fn new(role: Role) -> Self {
        Self { role }
    }
}

#[async_trait]
impl RoleHandler for Unavailable {
    async fn handle(&self, _event: InternalEvent) -> anyhow::Result<HandlerOutcome> {
        Ok(HandlerOutcome::Responded(
            InternalResponse::new("501", "Not Implemented")
                .with_header("content-type", "Content-Type", "text/plain")
                .with_body(
                    format!("{} handler is not deployed", self.role.name()),
                    BodyEncoding::Text,
                ),
        ))
    }
}
