//! User-curated set of backtest runs shown together on one chart and table.

mod color;
mod id;

pub use color::{ColorPolicy, DEFAULT_PALETTE, PaletteCycle, RandomHue};
pub use id::{RunId, RunIdGenerator};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::Series;
use crate::error::{ChartError, ChartResult};
use crate::payload::{BacktestPayload, RunParams, RunSummary};
use crate::render::Color;

/// A completed backtest the user asked to keep for comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRun {
    pub id: RunId,
    pub label: String,
    pub source_params: RunParams,
    pub payload: BacktestPayload,
}

impl NewRun {
    /// Uses `label` when it is non-blank, the parameters' default label otherwise.
    #[must_use]
    pub fn new(
        id: RunId,
        label: impl Into<String>,
        source_params: RunParams,
        payload: BacktestPayload,
    ) -> Self {
        let label = label.into();
        let label = if label.trim().is_empty() {
            source_params.default_label()
        } else {
            label.trim().to_owned()
        };
        Self {
            id,
            label,
            source_params,
            payload,
        }
    }
}

/// One member of a comparison set. The color is fixed at insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    id: RunId,
    label: String,
    source_params: RunParams,
    series: Series,
    summary: RunSummary,
    color: Color,
}

impl Run {
    #[must_use]
    pub fn id(&self) -> &RunId {
        &self.id
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn source_params(&self) -> &RunParams {
        &self.source_params
    }

    #[must_use]
    pub fn series(&self) -> &Series {
        &self.series
    }

    #[must_use]
    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }
}

/// Ordered, id-keyed collection of runs.
///
/// `add` and `remove` are the only mutators. Insertion order is preserved
/// across removals.
#[derive(Debug)]
pub struct ComparisonSet {
    runs: IndexMap<RunId, Run>,
    color_policy: Box<dyn ColorPolicy>,
    accepted: u64,
}

impl Default for ComparisonSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ComparisonSet {
    #[must_use]
    pub fn new() -> Self {
        Self::with_color_policy(PaletteCycle::default())
    }

    #[must_use]
    pub fn with_color_policy(policy: impl ColorPolicy + 'static) -> Self {
        Self {
            runs: IndexMap::new(),
            color_policy: Box::new(policy),
            accepted: 0,
        }
    }

    /// Appends a run and assigns its color.
    ///
    /// A colliding id is a caller bug; the set is left unchanged and
    /// `DuplicateRunId` is returned.
    pub fn add(&mut self, run: NewRun) -> ChartResult<&Run> {
        if self.runs.contains_key(&run.id) {
            warn!(id = %run.id, "rejected run with duplicate id");
            return Err(ChartError::DuplicateRunId {
                id: run.id.to_string(),
            });
        }

        let color = self.color_policy.color_for(self.accepted);
        self.accepted += 1;

        let NewRun {
            id,
            label,
            source_params,
            payload,
        } = run;
        let stored = Run {
            id: id.clone(),
            label,
            source_params,
            series: payload.series(),
            summary: payload.summary(),
            color,
        };
        debug!(
            id = %id,
            samples = stored.series.len(),
            color = %color.to_hex(),
            "added run to comparison set"
        );

        let (index, _) = self.runs.insert_full(id, stored);
        Ok(&self.runs[index])
    }

    /// Removes the run with `id`; absent ids are a no-op.
    pub fn remove(&mut self, id: &RunId) -> Option<Run> {
        let removed = self.runs.shift_remove(id);
        if removed.is_some() {
            debug!(id = %id, remaining = self.runs.len(), "removed run from comparison set");
        }
        removed
    }

    /// Ordered view of the current runs.
    ///
    /// Chart, legend and table for one frame should all render from a single
    /// snapshot so they cannot disagree.
    #[must_use]
    pub fn list(&self) -> ComparisonSnapshot<'_> {
        ComparisonSnapshot {
            runs: self.runs.values().collect(),
        }
    }

    #[must_use]
    pub fn get(&self, id: &RunId) -> Option<&Run> {
        self.runs.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &RunId) -> bool {
        self.runs.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

/// Borrowed, ordered list of runs taken from a `ComparisonSet`.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonSnapshot<'a> {
    runs: Vec<&'a Run>,
}

impl<'a> ComparisonSnapshot<'a> {
    #[must_use]
    pub fn runs(&self) -> &[&'a Run] {
        &self.runs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Run> + '_ {
        self.runs.iter().copied()
    }

    #[must_use]
    pub fn ids(&self) -> Vec<&'a RunId> {
        self.runs.iter().map(|run| &run.id).collect()
    }

    #[must_use]
    pub fn series(&self) -> Vec<&'a Series> {
        self.runs.iter().map(|run| &run.series).collect()
    }
}
