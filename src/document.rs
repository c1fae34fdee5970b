//! The analysis results document produced by the webcam rating pipeline.
//!
//! Every optional piece of the document defaults when absent so that a
//! partially written document (a resort without cameras, a camera that was
//! never rated) still deserializes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Top-level results document, one per acquisition cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsDocument {
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub resorts: Vec<ResortResult>,
}

/// All camera outcomes for one resort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResortResult {
    pub resort_name: String,
    pub resort_key: String,
    #[serde(default)]
    pub cameras: Vec<CameraResult>,
}

/// One webcam's outcome: rated, errored, or still pending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraResult {
    pub camera_name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_base64: bool,
    #[serde(default)]
    pub rating: Option<CameraRating>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Vision-model output for a single image.
///
/// Values are kept as raw JSON so that a null or non-numeric entry is
/// representable and can be skipped during aggregation instead of failing
/// the whole document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CameraRating {
    #[serde(default)]
    pub confidence: Option<Value>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub categories: BTreeMap<String, Value>,
}

impl CameraResult {
    pub fn is_rated(&self) -> bool {
        self.rating.is_some()
    }
}

impl CameraRating {
    /// Confidence as a number, if the model reported one.
    pub fn confidence_value(&self) -> Option<f64> {
        self.confidence.as_ref().and_then(Value::as_f64)
    }
}

impl ResortResult {
    /// Number of cameras that carry a rating.
    pub fn rated_cameras(&self) -> usize {
        self.cameras.iter().filter(|c| c.is_rated()).count()
    }
}
