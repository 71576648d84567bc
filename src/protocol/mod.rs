//! Billing protocol types.

pub mod models;
