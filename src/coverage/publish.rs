//! Line-hit synthesis and the host coverage sink.

use crate::coverage::counter::FlowCoverageCounter;
use crate::coverage::report::{base_name, CoverageMap};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A source file offered by the host.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InputFile {
    path: PathBuf,
}

impl InputFile {
    /// Wrap a host file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Full path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Base file name, used to match report entries.
    pub fn filename(&self) -> &str {
        self.path
            .to_str()
            .map(base_name)
            .unwrap_or_default()
    }
}

/// Hit state of one synthetic line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineHit {
    /// 1-based line number.
    pub line: u64,
    /// Whether the line counts as covered.
    pub hit: bool,
}

/// Host-side receiver of per-file line coverage.
pub trait CoverageSink {
    /// Record the line hits of one file.
    fn save(&mut self, file: &InputFile, hits: Vec<LineHit>);
}

/// Coverage collected in memory, keyed by input file.
#[derive(Debug, Default)]
pub struct InMemoryCoverage {
    files: BTreeMap<InputFile, Vec<LineHit>>,
}

impl InMemoryCoverage {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Line hits saved for `path`, if any.
    pub fn hits_for(&self, path: impl AsRef<Path>) -> Option<&[LineHit]> {
        self.files
            .iter()
            .find(|(file, _)| file.path() == path.as_ref())
            .map(|(_, hits)| hits.as_slice())
    }

    /// Number of files with coverage.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether no coverage was saved.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl CoverageSink for InMemoryCoverage {
    fn save(&mut self, file: &InputFile, hits: Vec<LineHit>) {
        self.files.insert(file.clone(), hits);
    }
}

/// Spread a counter's covered count over lines `1..=processors`.
///
/// The lowest lines are marked hit until the covered budget runs out. A
/// covered count above the processor count is not clamped; every line is
/// simply hit.
pub fn synthesize_line_hits(counter: &FlowCoverageCounter) -> Vec<LineHit> {
    let mut budget = counter.covered_processors();
    (1..=counter.processors())
        .map(|line| {
            let hit = budget > 0;
            budget = budget.saturating_sub(1);
            LineHit { line, hit }
        })
        .collect()
}

/// Save synthesized line hits for every file with a matching report entry.
///
/// Files without an entry are left untouched. Returns how many files got
/// coverage.
pub fn publish_coverage<'a, I>(
    coverage: &CoverageMap,
    files: I,
    sink: &mut dyn CoverageSink,
) -> usize
where
    I: IntoIterator<Item = &'a InputFile>,
{
    let mut published = 0;
    for file in files {
        let Some(counter) = coverage.get(file.filename()) else {
            continue;
        };
        debug!("Saving coverage for {}", file.path().display());
        sink.save(file, synthesize_line_hits(counter));
        published += 1;
    }
    published
}
