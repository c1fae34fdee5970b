use crate::document::{CameraResult, ResortResult};
use crate::scoring::normalize::contributions;
use crate::scoring::types::{CompositePolicy, ResortAverages};
use crate::scoring::utility::mean;
use std::collections::BTreeMap;
use tracing::debug;

/// Computes [`ResortAverages`] for one resort.
pub fn resort_averages(resort: &ResortResult, policy: &CompositePolicy) -> ResortAverages {
    let averages = aggregate_cameras(&resort.cameras, policy);
    debug!(
        resort = %resort.resort_key,
        cameras = resort.cameras.len(),
        rated = resort.rated_cameras(),
        composite = averages.composite(),
        "Resort averages computed"
    );
    averages
}

/// Averages every field over the cameras that reported it, then averages the
/// per-field means into the composite.
///
/// The composite is a mean of means: a field reported by one camera weighs
/// as much as a field reported by ten. Fields excluded by `policy` keep
/// their own average but do not enter the composite.
pub fn aggregate_cameras(cameras: &[CameraResult], policy: &CompositePolicy) -> ResortAverages {
    let mut field_series: BTreeMap<&str, Vec<f64>> = BTreeMap::new();

    for camera in cameras {
        for (field, value) in contributions(camera) {
            field_series.entry(field).or_default().push(value);
        }
    }

    if field_series.is_empty() {
        return ResortAverages::empty();
    }

    let fields: BTreeMap<String, f64> = field_series
        .iter()
        .map(|(name, series)| (name.to_string(), mean(series)))
        .collect();

    let scored: Vec<f64> = fields
        .iter()
        .filter(|(name, _)| !policy.excludes(name))
        .map(|(_, avg)| *avg)
        .collect();

    ResortAverages::new(fields, mean(&scored))
}
