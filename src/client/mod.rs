//! HTTP plumbing for the billing add-on endpoint.

pub mod http;
pub mod proxy;
