//! Per-file processor coverage counter.

/// Processor totals for one source file, summed over its flows.
///
/// `covered_processors <= processors` is expected but not enforced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlowCoverageCounter {
    processors: u64,
    covered_processors: u64,
}

impl FlowCoverageCounter {
    /// Create an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a flow's processor count.
    pub fn add_processors(&mut self, count: u64) {
        self.processors = self.processors.saturating_add(count);
    }

    /// Add a flow's covered processor count.
    pub fn add_covered_processors(&mut self, count: u64) {
        self.covered_processors = self.covered_processors.saturating_add(count);
    }

    /// Total instrumented processors.
    pub fn processors(&self) -> u64 {
        self.processors
    }

    /// Total covered processors.
    pub fn covered_processors(&self) -> u64 {
        self.covered_processors
    }
}
