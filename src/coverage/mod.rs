//! MUnit coverage ingestion.
//!
//! The line hits produced here are synthetic: only the number of covered
//! processors per file is known, so the lowest line numbers are marked hit
//! first. Do not read more into them than the aggregate count.

pub mod counter;
pub mod publish;
pub mod report;
pub mod schema;
pub mod sensor;
