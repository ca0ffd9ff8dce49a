//! Role handlers: the api, image and default stages that run behind the router.

pub mod passthrough;

use std::sync::Arc;

use async_trait::async_trait;

use crate::models::{InternalEvent, InternalResponse, Request};

pub use passthrough::{OriginPassthrough, Unavailable};

/// What a role handler decided to do with an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerOutcome {
    /// A complete response; the origin is not consulted.
    Responded(InternalResponse),
    /// A possibly modified request to be served by the origin.
    ContinueToOrigin(Request),
}

/// A request/response stage written against the origin event schema.
#[async_trait]
pub trait RoleHandler: Send + Sync {
    /// Handles one origin-request or origin-response event.
    ///
    /// # Errors
    ///
    /// Any error is reported to the caller as a 500 response.
    async fn handle(&self, event: InternalEvent) -> anyhow::Result<HandlerOutcome>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Api,
    Image,
    Default,
}

impl Role {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Image => "image",
            Self::Default => "default",
        }
    }
}

/// The three role handlers, each selected by `Role`.
#[derive(Clone)]
pub struct Roles {
    api: Arc<dyn RoleHandler>,
    image: Arc<dyn RoleHandler>,
    default: Arc<dyn RoleHandler>,
}

impl Roles {
    #[must_use]
    pub fn new(
        api: Arc<dyn RoleHandler>,
        image: Arc<dyn RoleHandler>,
        default: Arc<dyn RoleHandler>,
    ) -> Self {
        Self { api, image, default }
    }

    /// Roles used when no application handlers are linked in: the default role
    /// serves straight from the origin, api and image answer 501.
    #[must_use]
    pub fn origin_only() -> Self {
        Self::new(
            Arc::new(Unavailable::new(Role::Api)),
            Arc::new(Unavailable::new(Role::Image)),
            Arc::new(OriginPassthrough),
        )
    }

    #[must_use]
    pub fn get(&self, role: Role) -> &dyn RoleHandler {
        match role {
            Role::Api => self.api.as_ref(),
            Role::Image => self.image.as_ref(),
            Role::Default => self.default.as_ref(),
        }
    }
}
