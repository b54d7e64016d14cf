//! # Entity Gateway
//!
//! Everything that talks to the zoo backend lives here. The rest of the
//! crate sees only the [`EntityGateway`] trait and the request/payload
//! vocabulary in [`request`].

pub mod client;
pub mod http;
pub mod request;

pub use client::{EntityGateway, GatewayError};
pub use http::{DEFAULT_BASE_URL, HttpGateway};
pub use request::{ApiPayload, ApiRequest, TriFilter, execute};
