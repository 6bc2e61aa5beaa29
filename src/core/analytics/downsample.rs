//! Display-only density changes for time series: striding downsample and
//! linear interpolation. Neither is ever applied to values used for
//! summary metrics.

use crate::models::series::TimeSeriesPoint;

pub const DEFAULT_MAX_POINTS: usize = 100;
pub const DEFAULT_INTERPOLATION_FACTOR: usize = 3;
/// Upper bound on points inserted between two neighbours.
pub const MAX_INTERPOLATION_FACTOR: usize = 100;

/// What happens to the last point when striding skips it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EndpointPolicy {
    /// Keep indices `0, factor, 2*factor, ...` only; the last point may be lost.
    #[default]
    Stride,
    /// Same stride, then append the original last point if it was dropped.
    KeepLast,
}

/// Reduce `points` to roughly `max_points` by keeping every `factor`-th
/// point, always starting at index 0.
///
/// Series no longer than `max_points` are returned unchanged.
pub fn simplify(points: &[TimeSeriesPoint], max_points: usize) -> Vec<TimeSeriesPoint> {
    simplify_with(points, max_points, EndpointPolicy::Stride)
}

pub fn simplify_with(
    points: &[TimeSeriesPoint],
    max_points: usize,
    policy: EndpointPolicy,
) -> Vec<TimeSeriesPoint> {
    let max_points = max_points.max(1);
    if points.len() <= max_points {
        return points.to_vec();
    }

    let factor = points.len().div_ceil(max_points);
    let mut out: Vec<TimeSeriesPoint> = points.iter().step_by(factor).copied().collect();

    let last_index = points.len() - 1;
    if policy == EndpointPolicy::KeepLast && last_index % factor != 0 {
        out.push(points[last_index]);
    }

    out
}

/// Insert `factor` evenly spaced, linearly interpolated points between each
/// consecutive pair. Fewer than two points are returned unchanged.
///
/// `factor` is capped at [`MAX_INTERPOLATION_FACTOR`].
pub fn interpolate(points: &[TimeSeriesPoint], factor: usize) -> Vec<TimeSeriesPoint> {
    if points.len() < 2 {
        return points.to_vec();
    }

    let factor = factor.min(MAX_INTERPOLATION_FACTOR);
    let steps = (factor + 1) as f64;
    let inserted = (points.len() - 1).saturating_mul(factor);
    let mut out = Vec::with_capacity(points.len().saturating_add(inserted));

    for pair in points.windows(2) {
        let (current, next) = (pair[0], pair[1]);
        out.push(current);

        let time_step = (next.timestamp - current.timestamp) as f64 / steps;
        for j in 1..=factor {
            let progress = j as f64 / steps;
            let timestamp = current.timestamp + (time_step * j as f64).round() as i64;
            let value = current.value + (next.value - current.value) * progress;
            out.push(TimeSeriesPoint::new(timestamp, value));
        }
    }

    if let Some(last) = points.last() {
        out.push(*last);
    }
    out
}
