//! Plain-text rendering of a ranking.
//!
//! Scores are shown with one decimal place; everything else is passed through
//! from the results document as-is.

use std::fmt;

use crate::document::CameraResult;
use crate::scoring::types::{RankedDocument, RankedResort, SNOW_DEPTH};

/// Cameras at or above this confidence are flagged as reliable.
pub const CONFIDENT_AT: f64 = 6.0;

pub fn format_score(value: f64) -> String {
    format!("{value:.1}")
}

/// `snow_quality` -> `Snow Quality`.
pub fn field_label(key: &str) -> String {
    key.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Formats an averaged value with its unit: inches for snow depth, the
/// 1-10 scale otherwise.
pub fn format_field(key: &str, value: f64) -> String {
    if key == SNOW_DEPTH {
        format!("{}\"", format_score(value))
    } else {
        format!("{}/10", format_score(value))
    }
}

pub fn confidence_level(confidence: f64) -> &'static str {
    if confidence >= CONFIDENT_AT { "high" } else { "low" }
}

/// Full ranking, optionally cut to the best `top` resorts.
pub struct RankingReport<'d, 'a> {
    document: &'d RankedDocument<'a>,
    top: Option<usize>,
}

impl<'d, 'a> RankingReport<'d, 'a> {
    pub fn new(document: &'d RankedDocument<'a>) -> Self {
        Self {
            document,
            top: None,
        }
    }

    pub fn top(mut self, top: usize) -> Self {
        self.top = Some(top);
        self
    }
}

impl fmt::Display for RankingReport<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(70);
        writeln!(f, "{rule}")?;
        writeln!(f, "SKI RESORT RANKINGS - CURRENT CONDITIONS")?;
        writeln!(f, "Updated: {}", self.document.updated_at)?;
        writeln!(f, "{rule}")?;

        let shown = self.top.unwrap_or(self.document.resorts.len());
        for resort in self.document.resorts.iter().take(shown) {
            writeln!(f)?;
            write!(f, "{}", ResortReport(resort))?;
        }

        writeln!(f)?;
        writeln!(f, "{rule}")?;
        match self.document.top() {
            Some(best) => writeln!(
                f,
                "RECOMMENDATION: {} (Score: {}/10)",
                best.resort.resort_name,
                format_score(best.averages.composite())
            )?,
            None => writeln!(f, "No resorts were analyzed.")?,
        }
        writeln!(f, "{rule}")
    }
}

/// One resort's block: scores, camera coverage, and per-camera outcome.
pub struct ResortReport<'r, 'a>(pub &'r RankedResort<'a>);

impl fmt::Display for ResortReport<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ranked = self.0;
        let resort = ranked.resort;

        writeln!(f, "#{} {}", ranked.rank, resort.resort_name)?;
        writeln!(
            f,
            "   Composite Score: {}/10",
            format_score(ranked.averages.composite())
        )?;
        writeln!(
            f,
            "   Cameras analyzed: {}/{}",
            ranked.rated_cameras,
            resort.cameras.len()
        )?;

        for (field, value) in ranked.averages.fields() {
            writeln!(f, "   ├── {}: {}", field_label(field), format_field(field, value))?;
        }

        if resort.cameras.is_empty() {
            writeln!(f, "   No camera data available for this resort.")?;
        }
        for camera in &resort.cameras {
            write_camera(f, camera)?;
        }

        Ok(())
    }
}

fn write_camera(f: &mut fmt::Formatter<'_>, camera: &CameraResult) -> fmt::Result {
    match (&camera.rating, &camera.error) {
        (Some(rating), _) => {
            write!(f, "   Camera {}: {}", camera.camera_name, rating.notes)?;
            if let Some(confidence) = rating.confidence_value() {
                write!(
                    f,
                    " (confidence {}/10, {})",
                    format_score(confidence),
                    confidence_level(confidence)
                )?;
            }
            writeln!(f)
        }
        (None, Some(error)) => {
            writeln!(f, "   Camera {}: Analysis failed: {}", camera.camera_name, error)
        }
        (None, None) => writeln!(f, "   Camera {}: not yet analyzed", camera.camera_name),
    }
}
