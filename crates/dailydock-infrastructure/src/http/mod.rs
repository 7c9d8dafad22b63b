mod client;
mod endpoints;
mod gateway;
mod retry;

pub use client::{HttpClient, TransportError, USER_AGENT};
pub use endpoints::{ServiceEndpoints, DEFAULT_BASE_URL};
pub use gateway::GladosGateway;
pub use retry::{RetryExhausted, RetryPolicy};
