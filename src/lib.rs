//! Runs Next.js serverless role handlers (api, image, default) behind an API
//! Gateway HTTP API, translating between the gateway's payload and the
//! CloudFront origin event schema the handlers are written against, with S3 as
//! the fallback origin.

pub mod config;
pub mod handler;
pub mod models;
pub mod origin;
pub mod roles;
pub mod translate;
pub mod utils;

pub use config::Config;
pub use handler::{Route, Router, function_handler};
