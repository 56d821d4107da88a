use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AxisError, AxisResult};
use crate::render::Color;

/// Upper bound on ticks generated for one grain before it is excluded.
pub const DEFAULT_MAX_TICKS_PER_GRAIN: usize = 500;
/// The axis never shows more than three simultaneous calendar granularities.
pub const MAX_ROWS: usize = 3;

/// Timezone alignment used for grain boundaries and label components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TimeAxisTimeZone {
    #[default]
    Utc,
    FixedOffsetMinutes {
        minutes: i16,
    },
}

impl TimeAxisTimeZone {
    #[must_use]
    pub fn offset_minutes(self) -> i16 {
        match self {
            Self::Utc => 0,
            Self::FixedOffsetMinutes { minutes } => minutes,
        }
    }

    #[must_use]
    pub fn fixed_offset(self) -> FixedOffset {
        let seconds = i32::from(self.offset_minutes()) * 60;
        FixedOffset::east_opt(seconds).unwrap_or_else(|| Utc.fix())
    }
}

/// Side of the plot the axis sits on. Rows grow away from the plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TimeAxisPlacement {
    #[default]
    Bottom,
    Top,
}

impl TimeAxisPlacement {
    /// Vertical direction in which rows stack, in pixel space.
    #[must_use]
    pub(crate) fn direction(self) -> f64 {
        match self {
            Self::Bottom => 1.0,
            Self::Top => -1.0,
        }
    }
}

/// Layout tuning for the multi-row calendar axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeAxisConfig {
    /// Gap kept on each side of a label inside its slot.
    pub label_padding_px: f64,
    /// Below this per-slot width a group's labels are hidden.
    pub min_label_width_px: f64,
    /// Minimum gap between adjacent hash marks of a non-outer group.
    pub min_hash_spacing_px: f64,
    /// Hash length of row 1; row `n` is `n` times as long. Also the row band height.
    pub smallest_hash_mark_px: f64,
    /// Share of the axis length the outer row's labels may cover.
    pub outer_label_fill_ratio: f64,
    pub max_ticks_per_grain: usize,
    pub max_rows: usize,
    /// Font sizes of rows 1 and 2 when they are not the outermost row.
    pub inner_font_sizes_px: [f64; 2],
    pub timezone: TimeAxisTimeZone,
    pub placement: TimeAxisPlacement,
}

impl Default for TimeAxisConfig {
    fn default() -> Self {
        Self {
            label_padding_px: 4.0,
            min_label_width_px: 10.0,
            min_hash_spacing_px: 5.0,
            smallest_hash_mark_px: 14.0,
            outer_label_fill_ratio: 0.7,
            max_ticks_per_grain: DEFAULT_MAX_TICKS_PER_GRAIN,
            max_rows: MAX_ROWS,
            inner_font_sizes_px: [9.0, 10.0],
            timezone: TimeAxisTimeZone::Utc,
            placement: TimeAxisPlacement::Bottom,
        }
    }
}

impl TimeAxisConfig {
    pub fn validate(self) -> AxisResult<Self> {
        for (name, value) in [
            ("label_padding_px", self.label_padding_px),
            ("min_label_width_px", self.min_label_width_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(AxisError::InvalidData(format!(
                    "time axis `{name}` must be finite and >= 0"
                )));
            }
        }
        for (name, value) in [
            ("min_hash_spacing_px", self.min_hash_spacing_px),
            ("smallest_hash_mark_px", self.smallest_hash_mark_px),
            ("inner_font_sizes_px[0]", self.inner_font_sizes_px[0]),
            ("inner_font_sizes_px[1]", self.inner_font_sizes_px[1]),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(AxisError::InvalidData(format!(
                    "time axis `{name}` must be finite and > 0"
                )));
            }
        }
        if !self.outer_label_fill_ratio.is_finite()
            || self.outer_label_fill_ratio <= 0.0
            || self.outer_label_fill_ratio > 1.0
        {
            return Err(AxisError::InvalidData(
                "time axis outer label fill ratio must be in (0, 1]".to_owned(),
            ));
        }
        if self.max_ticks_per_grain == 0 {
            return Err(AxisError::InvalidData(
                "time axis tick cap must be > 0".to_owned(),
            ));
        }
        if !(1..=MAX_ROWS).contains(&self.max_rows) {
            return Err(AxisError::InvalidData(format!(
                "time axis max rows must be in 1..={MAX_ROWS}"
            )));
        }
        if i32::from(self.timezone.offset_minutes()).abs() >= 24 * 60 {
            return Err(AxisError::InvalidData(
                "time axis fixed offset must be within +/-24h".to_owned(),
            ));
        }
        Ok(self)
    }

    /// Font size for `row` of `num_rows`. The outermost row uses `outer_font_size_px`.
    #[must_use]
    pub fn font_size_for_row(self, row: usize, num_rows: usize, outer_font_size_px: f64) -> f64 {
        if row == num_rows {
            return outer_font_size_px;
        }
        match row {
            1 => self.inner_font_sizes_px[0],
            2 => self.inner_font_sizes_px[1],
            _ => outer_font_size_px,
        }
    }
}

/// Label text style supplied by the surrounding chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Largest configured size; used by the outermost row and for planning.
    pub font_size: f64,
    pub color: Color,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            color: Color::rgb(0.28, 0.31, 0.36),
        }
    }
}

/// Stroke style shared by hash marks and the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisLineStyle {
    pub stroke_style: Color,
    pub line_width: f64,
    pub opacity: f64,
}

impl Default for AxisLineStyle {
    fn default() -> Self {
        Self {
            stroke_style: Color::rgb(0.55, 0.58, 0.62),
            line_width: 1.0,
            opacity: 1.0,
        }
    }
}

impl AxisLineStyle {
    /// Stroke colour with `opacity` folded into alpha.
    #[must_use]
    pub fn effective_color(self) -> Color {
        Color {
            alpha: self.stroke_style.alpha * self.opacity,
            ..self.stroke_style
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{TimeAxisConfig, TimeAxisTimeZone};

    #[test]
    fn default_config_is_valid() {
        assert!(TimeAxisConfig::default().validate().is_ok());
    }

    #[test]
    fn four_rows_are_rejected() {
        let config = TimeAxisConfig {
            max_rows: 4,
            ..TimeAxisConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn row_font_sizes_put_largest_on_outer_row() {
        let config = TimeAxisConfig::default();
        assert_eq!(config.font_size_for_row(3, 3, 12.0), 12.0);
        assert_eq!(config.font_size_for_row(2, 3, 12.0), 10.0);
        assert_eq!(config.font_size_for_row(1, 3, 12.0), 9.0);
        assert_eq!(config.font_size_for_row(1, 1, 12.0), 12.0);
    }

    #[test]
    fn fixed_offset_resolves_minutes() {
        let tz = TimeAxisTimeZone::FixedOffsetMinutes { minutes: -330 };
        assert_eq!(tz.fixed_offset().local_minus_utc(), -330 * 60);
    }
}
