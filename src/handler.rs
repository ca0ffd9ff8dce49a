use lambda_runtime::tracing::{debug, error, info};
use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;

use crate::config::Config;
use crate::models::{
    BodyEncoding, EventType, GatewayRequest, GatewayResponse, InternalEvent, InternalResponse,
    RouterError, RouterResult,
};
use crate::origin::BlobFetcher;
use crate::roles::{HandlerOutcome, Role, Roles};
use crate::translate::{normalize_body_encoding, to_gateway_response, to_internal_event};

/// Which branch of the router serves a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Build assets; normally served by the CDN before reaching the router.
    Static,
    Api,
    Image,
    /// Pages, `/_next/data/` and everything else.
    Default,
}

impl Route {
    /// Classifies a request path into the branch that serves it.
    ///
    /// # Arguments
    ///
    /// * `path` - The raw request path, including any stage or base-path prefix
    ///
    /// # Returns
    ///
    /// The route of the first marker found, checked in order: static
    /// (`/_next/static/`, `/static/`), api (`/api/`), image (`/_next/image`).
    /// Paths with no marker go to `Route::Default`.
    #[must_use]
    pub fn classify(path: &str) -> Self {
        if path.contains("/_next/static/") || path.contains("/static/") {
            Self::Static
        } else if path.contains("/api/") {
            Self::Api
        } else if path.contains("/_next/image") {
            Self::Image
        } else {
            Self::Default
        }
    }
}

/// Routes gateway requests to the role handlers and the blob-store origin.
///
/// Built once at cold start; holds no per-request state, so one instance
/// serves concurrent invocations.
pub struct Router {
    config: Config,
    roles: Roles,
    fetcher: BlobFetcher,
}

impl Router {
    #[must_use]
    pub fn new(config: Config, roles: Roles, fetcher: BlobFetcher) -> Self {
        Self {
            config,
            roles,
            fetcher,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Parses a raw invocation payload and routes it.
    ///
    /// A payload that is not a gateway event produces a 500 response.
    pub async fn handle_payload(&self, payload: Value) -> GatewayResponse {
        match serde_json::from_value::<GatewayRequest>(payload) {
            Ok(request) => self.handle(&request).await,
            Err(e) => self.error_response(&RouterError::from(e)),
        }
    }

    /// Routes one request.
    ///
    /// # Arguments
    ///
    /// * `request` - The parsed gateway request
    ///
    /// # Returns
    ///
    /// The gateway response. Never fails: any error becomes a 500 response
    /// with a `text/plain` body describing it.
    pub async fn handle(&self, request: &GatewayRequest) -> GatewayResponse {
        match self.dispatch(request).await {
            Ok(response) => response,
            Err(e) => self.error_response(&e),
        }
    }

    async fn dispatch(&self, request: &GatewayRequest) -> RouterResult<GatewayResponse> {
        let route = Route::classify(&request.raw_path);
        info!(path = %request.raw_path, route = ?route, "Routing request");

        match route {
            Route::Static => self.serve_static(request).await,
            Route::Api => self.serve_api(request).await,
            Route::Image => self.serve_image(request).await,
            Route::Default => self.serve_default(request).await,
        }
    }

    // Static assets go straight to the origin, no role involved.
    async fn serve_static(&self, request: &GatewayRequest) -> RouterResult<GatewayResponse> {
        let event = to_internal_event(request, &self.config, EventType::OriginRequest);
        let response = self.fetcher.fetch(&event.request).await?;
        self.finish(&response)
    }

    async fn serve_api(&self, request: &GatewayRequest) -> RouterResult<GatewayResponse> {
        let event = to_internal_event(request, &self.config, EventType::OriginRequest);
        let mut response = match self.invoke(Role::Api, event).await? {
            HandlerOutcome::Responded(response) => response,
            HandlerOutcome::ContinueToOrigin(_) => {
                return Err(RouterError::RequestedOrigin(Role::Api.name()));
            }
        };
        normalize_body_encoding(&mut response)?;
        self.finish(&response)
    }

    async fn serve_image(&self, request: &GatewayRequest) -> RouterResult<GatewayResponse> {
        let event = to_internal_event(request, &self.config, EventType::OriginRequest);
        match self.invoke(Role::Image, event).await? {
            HandlerOutcome::Responded(response) => self.finish(&response),
            HandlerOutcome::ContinueToOrigin(_) => {
                Err(RouterError::RequestedOrigin(Role::Image.name()))
            }
        }
    }

    // Ask the default role, fetch the origin if it did not answer, then let it
    // shape the fetched response.
    async fn serve_default(&self, request: &GatewayRequest) -> RouterResult<GatewayResponse> {
        let event = to_internal_event(request, &self.config, EventType::OriginRequest);
        let origin_request = match self.invoke(Role::Default, event).await? {
            HandlerOutcome::Responded(response) => return self.finish(&response),
            HandlerOutcome::ContinueToOrigin(origin_request) => origin_request,
        };

        let fetched = self.fetcher.fetch(&origin_request).await?;
        let event = InternalEvent {
            event_type: EventType::OriginResponse,
            request: origin_request,
            response: Some(fetched),
        };

        let mut response = match self.invoke(Role::Default, event).await? {
            HandlerOutcome::Responded(response) => response,
            HandlerOutcome::ContinueToOrigin(_) => {
                return Err(RouterError::ResponsePhaseNotAnswered);
            }
        };
        normalize_body_encoding(&mut response)?;
        self.finish(&response)
    }

    async fn invoke(&self, role: Role, event: InternalEvent) -> RouterResult<HandlerOutcome> {
        debug!(
            role = role.name(),
            event_type = ?event.event_type,
            uri = %event.request.uri,
            "Invoking role handler"
        );
        self.roles
            .get(role)
            .handle(event)
            .await
            .map_err(|source| RouterError::Handler {
                role: role.name(),
                source,
            })
    }

    fn finish(&self, response: &InternalResponse) -> RouterResult<GatewayResponse> {
        let gateway = to_gateway_response(response)?;
        if !self.config.env_level.is_prod() {
            debug!(response = ?gateway, "Sending translated response");
        }
        Ok(gateway)
    }

    // The translator only rejects unparseable status codes, so the
    // `internal_error` fallback is unreachable for the fixed "500" built here.
    fn error_response(&self, failure: &RouterError) -> GatewayResponse {
        error!(error = %failure, "Request failed");

        let response = InternalResponse::new("500", "Internal Server Error")
            .with_header("content-type", "Content-Type", "text/plain")
            .with_body(failure.to_string(), BodyEncoding::Text);

        self.finish(&response).unwrap_or_else(|e| {
            error!(error = %e, "Failed to translate error response");
            GatewayResponse::internal_error()
        })
    }
}

/// Lambda event handler. Logs the invocation and hands the payload to `router`.
///
/// # Errors
///
/// Never returns an error; failures are reported as 500 responses.
pub async fn function_handler(
    router: &Router,
    event: LambdaEvent<Value>,
) -> Result<GatewayResponse, Error> {
    let (payload, context) = event.into_parts();
    debug!(request_id = %context.request_id, "Handling gateway event");

    Ok(router.handle_payload(payload).await)
}
