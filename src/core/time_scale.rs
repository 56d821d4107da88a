use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AxisError, AxisResult};

/// Epoch-millisecond domain mapped linearly onto a pixel range.
///
/// A scale is immutable for the duration of one render pass. `dy` is the
/// usable pixel length along the axis, independent of range direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TimeScaleFields")]
pub struct TimeScale {
    domain_start_ms: i64,
    domain_end_ms: i64,
    range_start_px: f64,
    range_end_px: f64,
}

/// Unvalidated wire form; deserialization goes through [`TimeScale::new`].
#[derive(Deserialize)]
struct TimeScaleFields {
    domain_start_ms: i64,
    domain_end_ms: i64,
    range_start_px: f64,
    range_end_px: f64,
}

impl TryFrom<TimeScaleFields> for TimeScale {
    type Error = AxisError;

    fn try_from(fields: TimeScaleFields) -> AxisResult<Self> {
        Self::new(
            (fields.domain_start_ms, fields.domain_end_ms),
            (fields.range_start_px, fields.range_end_px),
        )
    }
}

impl TimeScale {
    /// Creates a scale from an epoch-millisecond domain and a pixel range.
    ///
    /// A reversed domain is a caller contract violation and fails fast instead
    /// of producing an empty axis.
    pub fn new(domain: (i64, i64), range: (f64, f64)) -> AxisResult<Self> {
        let (start, end) = domain;
        if start > end {
            return Err(AxisError::InvalidDomain { start, end });
        }
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(AxisError::InvalidData(
                "time scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start_ms: start,
            domain_end_ms: end,
            range_start_px: range.0,
            range_end_px: range.1,
        })
    }

    pub fn from_datetimes(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        range: (f64, f64),
    ) -> AxisResult<Self> {
        Self::new((start.timestamp_millis(), end.timestamp_millis()), range)
    }

    #[must_use]
    pub fn domain(self) -> (i64, i64) {
        (self.domain_start_ms, self.domain_end_ms)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start_px, self.range_end_px)
    }

    #[must_use]
    pub fn dy(self) -> f64 {
        (self.range_end_px - self.range_start_px).abs()
    }

    #[must_use]
    pub fn span_ms(self) -> i64 {
        self.domain_end_ms - self.domain_start_ms
    }

    /// Maps an epoch timestamp to a pixel coordinate in range space.
    ///
    /// A zero-length domain maps every timestamp to the range start.
    #[must_use]
    pub fn map(self, epoch_ms: i64) -> f64 {
        let span = self.span_ms();
        if span == 0 {
            return self.range_start_px;
        }
        let normalized = (epoch_ms - self.domain_start_ms) as f64 / span as f64;
        self.range_start_px + normalized * (self.range_end_px - self.range_start_px)
    }

    /// Evenly spaced domain values for the sibling linear axis.
    #[must_use]
    pub fn ticks(self, max_count: usize) -> Vec<i64> {
        match max_count {
            0 => Vec::new(),
            1 => vec![self.domain_start_ms],
            _ => {
                let span = self.span_ms() as f64;
                let denominator = (max_count - 1) as f64;
                let mut values: Vec<i64> = (0..max_count)
                    .map(|index| {
                        let ratio = (index as f64) / denominator;
                        self.domain_start_ms + (span * ratio).round() as i64
                    })
                    .collect();
                values.dedup();
                values
            }
        }
    }
}
