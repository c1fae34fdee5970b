use tracing::trace;

use crate::document::CameraResult;
use crate::scoring::types::{COMPOSITE, CONFIDENCE};

/// Extracts the `(field, value)` pairs one camera contributes to its resort's
/// averages.
///
/// A camera without a rating contributes nothing. Null and non-numeric
/// values are skipped rather than counted as zero, so they never lower a
/// field's mean. A category named `confidence` is shadowed by the rating's
/// own confidence, and `composite` is reserved for the aggregate.
pub fn contributions(camera: &CameraResult) -> Vec<(&str, f64)> {
    let Some(rating) = &camera.rating else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(rating.categories.len() + 1);

    if let Some(confidence) = rating.confidence_value() {
        out.push((CONFIDENCE, confidence));
    }

    for (name, value) in &rating.categories {
        if name == COMPOSITE || name == CONFIDENCE {
            trace!(camera = %camera.camera_name, category = %name, "Ignoring reserved category name");
            continue;
        }

        match value.as_f64() {
            Some(v) => out.push((name.as_str(), v)),
            None => {
                trace!(camera = %camera.camera_name, category = %name, "Category not rated");
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn camera(value: serde_json::Value) -> CameraResult {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_unrated_camera_contributes_nothing() {
        let errored = camera(json!({ "camera_name": "Summit", "error": "HTTP 503" }));
        let pending = camera(json!({ "camera_name": "Summit" }));

        assert!(contributions(&errored).is_empty());
        assert!(contributions(&pending).is_empty());
    }

    #[test]
    fn test_rated_camera_contributes_confidence_and_categories() {
        let cam = camera(json!({
            "camera_name": "Courtyard",
            "rating": {
                "confidence": 8,
                "notes": "Clear morning",
                "categories": { "snow_quality": 7, "visibility": 9.5 }
            }
        }));

        assert_eq!(
            contributions(&cam),
            vec![("confidence", 8.0), ("snow_quality", 7.0), ("visibility", 9.5)]
        );
    }

    #[test]
    fn test_null_and_non_numeric_values_are_skipped() {
        let cam = camera(json!({
            "camera_name": "Night Cam",
            "rating": {
                "confidence": null,
                "notes": "Too dark",
                "categories": {
                    "visibility": null,
                    "activity": "unknown",
                    "weather_conditions": true,
                    "snow_quality": 3
                }
            }
        }));

        assert_eq!(contributions(&cam), vec![("snow_quality", 3.0)]);
    }

    #[test]
    fn test_reserved_category_names_are_ignored() {
        let cam = camera(json!({
            "camera_name": "Odd",
            "rating": {
                "confidence": 6,
                "notes": "",
                "categories": { "composite": 10, "confidence": 1, "weather_conditions": 4 }
            }
        }));

        assert_eq!(
            contributions(&cam),
            vec![("confidence", 6.0), ("weather_conditions", 4.0)]
        );
    }
}
