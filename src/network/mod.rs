//! HTTP client and outbound request pacing

mod client;
mod throttle;

pub use client::{HttpClient, HttpResponse};
pub use throttle::{FixedDelay, NoDelay, Throttle};
