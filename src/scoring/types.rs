//! Data types produced by the scoring pipeline.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::document::ResortResult;

/// Key of the synthetic composite entry in [`ResortAverages`].
pub const COMPOSITE: &str = "composite";
/// Key under which a rating's top-level confidence is averaged.
pub const CONFIDENCE: &str = "confidence";
/// Snow depth is measured in inches, not on the 1-10 scale.
pub const SNOW_DEPTH: &str = "snow_depth_inches";

/// Which averaged fields are left out of the composite score.
///
/// The default excludes only [`SNOW_DEPTH`]. `composite` is always excluded,
/// whatever the configured set says.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositePolicy {
    excluded: BTreeSet<String>,
}

impl Default for CompositePolicy {
    fn default() -> Self {
        Self {
            excluded: BTreeSet::from([SNOW_DEPTH.to_string()]),
        }
    }
}

impl CompositePolicy {
    /// Policy excluding exactly the given fields (plus `composite`).
    pub fn new<I, S>(excluded: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            excluded: excluded.into_iter().map(Into::into).collect(),
        }
    }

    /// Adds another excluded field, keeping the existing ones.
    pub fn with_excluded(mut self, field: impl Into<String>) -> Self {
        self.excluded.insert(field.into());
        self
    }

    pub fn excludes(&self, field: &str) -> bool {
        field == COMPOSITE || self.excluded.contains(field)
    }

    pub fn excluded(&self) -> impl Iterator<Item = &str> {
        self.excluded.iter().map(String::as_str)
    }
}

/// Per-field means for one resort plus the composite score.
///
/// Serializes as a flat object: `{ "<field>": mean, ..., "composite": score }`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ResortAverages {
    #[serde(flatten)]
    fields: BTreeMap<String, f64>,
    composite: f64,
}

impl ResortAverages {
    pub(crate) fn new(fields: BTreeMap<String, f64>, composite: f64) -> Self {
        Self { fields, composite }
    }

    /// Averages for a resort without a single rated camera: `{ composite: 0 }`.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn composite(&self) -> f64 {
        self.composite
    }

    pub fn confidence(&self) -> Option<f64> {
        self.fields.get(CONFIDENCE).copied()
    }

    /// Looks up any averaged field, `composite` included.
    pub fn get(&self, field: &str) -> Option<f64> {
        if field == COMPOSITE {
            Some(self.composite)
        } else {
            self.fields.get(field).copied()
        }
    }

    /// All averaged fields in key order, confidence included, composite not.
    pub fn fields(&self) -> impl Iterator<Item = (&str, f64)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Averaged rating categories only: neither confidence nor composite.
    pub fn categories(&self) -> impl Iterator<Item = (&str, f64)> {
        self.fields().filter(|(k, _)| *k != CONFIDENCE)
    }

    /// True when no field was averaged, i.e. only `composite` is present.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// One resort in ranked order, ready for presentation.
#[derive(Debug, Clone, Serialize)]
pub struct RankedResort<'a> {
    pub rank: usize,
    pub averages: ResortAverages,
    pub rated_cameras: usize,
    #[serde(flatten)]
    pub resort: &'a ResortResult,
}

/// Ranked view over a whole results document.
#[derive(Debug, Clone, Serialize)]
pub struct RankedDocument<'a> {
    pub updated_at: &'a str,
    pub generated_at: DateTime<Utc>,
    pub resorts: Vec<RankedResort<'a>>,
}

impl RankedDocument<'_> {
    /// The best resort, if any resort was ranked.
    pub fn top(&self) -> Option<&RankedResort<'_>> {
        self.resorts.first()
    }

    pub fn find(&self, resort_key: &str) -> Option<&RankedResort<'_>> {
        self.resorts.iter().find(|r| r.resort.resort_key == resort_key)
    }
}
