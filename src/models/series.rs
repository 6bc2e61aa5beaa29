use serde::Serialize;

/// A `(timestamp, cumulative value)` pair. Timestamps are epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeSeriesPoint {
    pub timestamp: i64,
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(timestamp: i64, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// The four running totals built from one ordered session snapshot.
/// All four vectors always have the same length.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CumulativeSeries {
    pub earnings: Vec<TimeSeriesPoint>,
    pub deliveries: Vec<TimeSeriesPoint>,
    pub active_time: Vec<TimeSeriesPoint>,
    pub dash_time: Vec<TimeSeriesPoint>,
}

impl CumulativeSeries {
    pub fn len(&self) -> usize {
        self.earnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.earnings.is_empty()
    }

    /// Apply the same transformation to each of the four series.
    pub fn map<F>(&self, f: F) -> CumulativeSeries
    where
        F: Fn(&[TimeSeriesPoint]) -> Vec<TimeSeriesPoint>,
    {
        CumulativeSeries {
            earnings: f(&self.earnings),
            deliveries: f(&self.deliveries),
            active_time: f(&self.active_time),
            dash_time: f(&self.dash_time),
        }
    }

    /// Keep only the points at or after `cutoff` (epoch ms).
    pub fn since(&self, cutoff: i64) -> CumulativeSeries {
        self.map(|points| {
            points
                .iter()
                .filter(|p| p.timestamp >= cutoff)
                .copied()
                .collect()
        })
    }
}
