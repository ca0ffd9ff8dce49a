pub mod error;
pub mod event;
pub mod gateway;

pub use error::{RouterError, RouterResult};
pub use event::*;
pub use gateway::{GatewayHeaders, GatewayRequest, GatewayResponse, HttpDescription, RequestContext};
