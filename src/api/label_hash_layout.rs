use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{Grain, Point, TimeScale};
use crate::text::TextMeasurer;

use super::axis_config::TimeAxisConfig;
use super::label_format::format_tick_label;
use super::tick_generator::Tick;
use super::tick_group_planner::{TickGroup, TickPlan};

/// Tick label with its final text, size and position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLabel {
    pub key: String,
    pub grain: Grain,
    pub epoch_ms: i64,
    pub text: String,
    pub truncate_index: usize,
    pub font_size: f64,
    pub width: f64,
    pub x: f64,
    pub y: f64,
    pub row: usize,
    pub num_rows: usize,
}

/// Vertical tick line. At most one exists per epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HashMark {
    pub key: String,
    pub grain: Grain,
    pub epoch_ms: i64,
    pub row: usize,
    pub x: f64,
    pub y0: f64,
    pub y1: f64,
}

/// Positioned labels and deduplicated hash marks for one render pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisLayout {
    pub plan: TickPlan,
    pub labels: Vec<AxisLabel>,
    pub hashes: Vec<HashMark>,
    /// Subsampling interval applied to the outermost row's labels.
    pub skip_stride: usize,
}

/// Minimal stride `s >= 1` so `n / s` outer labels of width `label_width_px`
/// plus padding cover at most `fill_ratio * dy`.
///
/// Falls back to `tick_count` (first label only) when even one label exceeds
/// the budget.
#[must_use]
pub fn skip_stride(
    label_width_px: f64,
    tick_count: usize,
    dy: f64,
    label_padding_px: f64,
    fill_ratio: f64,
) -> usize {
    if tick_count <= 1 {
        return 1;
    }
    let ink_px = label_width_px + 2.0 * label_padding_px;
    let budget_px = fill_ratio * dy;
    (1..tick_count)
        .find(|stride| ink_px * (tick_count as f64 / *stride as f64) <= budget_px)
        .unwrap_or(tick_count)
}

/// Converts a [`TickPlan`] into positioned labels and hash marks.
#[derive(Debug)]
pub struct LabelHashLayout<'a, M: TextMeasurer + ?Sized> {
    config: &'a TimeAxisConfig,
    measurer: &'a M,
    scale: TimeScale,
    origin: Point,
    outer_font_size_px: f64,
}

impl<'a, M: TextMeasurer + ?Sized> LabelHashLayout<'a, M> {
    #[must_use]
    pub fn new(
        config: &'a TimeAxisConfig,
        measurer: &'a M,
        scale: TimeScale,
        origin: Point,
        outer_font_size_px: f64,
    ) -> Self {
        Self {
            config,
            measurer,
            scale,
            origin,
            outer_font_size_px,
        }
    }

    /// The outermost group's `width_of_largest_label` is replaced by the
    /// full-label width the skip stride was computed from.
    pub fn layout(&self, mut plan: TickPlan) -> AxisLayout {
        let Some((outer, inner)) = plan.groups.split_last() else {
            return AxisLayout {
                plan,
                skip_stride: 1,
                ..AxisLayout::default()
            };
        };

        let mut labels = Vec::new();
        for group in inner.iter().filter(|group| !group.labels_cannot_fit) {
            let Some(level) = group.truncate_index else {
                continue;
            };
            let font_size =
                self.config
                    .font_size_for_row(group.row, group.num_rows, self.outer_font_size_px);
            labels.extend(
                group
                    .ticks
                    .iter()
                    .filter(|tick| group.has_label(tick))
                    .filter_map(|tick| self.label_for(tick, group, level, font_size)),
            );
        }

        let outer_font_size = self.outer_font_size_px;
        let widest_outer = outer
            .ticks
            .iter()
            .filter_map(|tick| format_tick_label(tick.grain, 0, &tick.components))
            .map(|text| self.measurer.measure_width(&text, outer_font_size))
            .fold(0.0, f64::max);
        let stride = skip_stride(
            widest_outer,
            outer.ticks.len(),
            self.scale.dy(),
            self.config.label_padding_px,
            self.config.outer_label_fill_ratio,
        );
        trace!(
            grain = %outer.grain,
            ticks = outer.ticks.len(),
            widest_outer,
            skip_stride = stride,
            "outer row subsampled"
        );
        let selected_outer: Vec<&Tick> = outer.ticks.iter().step_by(stride).collect();
        labels.extend(
            selected_outer
                .iter()
                .filter_map(|tick| self.label_for(tick, outer, 0, outer_font_size)),
        );

        let mut hashes: IndexMap<i64, HashMark> = IndexMap::new();
        for group in inner.iter().rev().filter(|group| !group.dont_draw_hashes) {
            for tick in &group.ticks {
                hashes
                    .entry(tick.epoch_ms)
                    .or_insert_with(|| self.hash_for(tick, group.row));
            }
        }
        for tick in selected_outer {
            hashes.insert(tick.epoch_ms, self.hash_for(tick, outer.row));
        }

        if let Some(outer) = plan.groups.last_mut() {
            outer.width_of_largest_label = widest_outer;
        }

        AxisLayout {
            labels,
            hashes: hashes.into_values().collect(),
            skip_stride: stride,
            plan,
        }
    }

    fn label_for(
        &self,
        tick: &Tick,
        group: &TickGroup,
        level: usize,
        font_size: f64,
    ) -> Option<AxisLabel> {
        let text = format_tick_label(tick.grain, level, &tick.components)?;
        let width = self.measurer.measure_width(&text, font_size);
        let offset = self.offset_along_axis(tick.epoch_ms) + self.config.label_padding_px;
        if offset + width > self.scale.dy() {
            return None;
        }

        let band = self.config.smallest_hash_mark_px;
        let depth = group.row.saturating_sub(1) as f64 * band + self.config.label_padding_px;
        Some(AxisLabel {
            key: tick.key(),
            grain: tick.grain,
            epoch_ms: tick.epoch_ms,
            text,
            truncate_index: level,
            font_size,
            width,
            x: self.origin.x + self.scale.map(tick.epoch_ms) + self.config.label_padding_px,
            y: self.origin.y + self.config.placement.direction() * depth,
            row: group.row,
            num_rows: group.num_rows,
        })
    }

    fn hash_for(&self, tick: &Tick, row: usize) -> HashMark {
        let x = self.origin.x + self.scale.map(tick.epoch_ms);
        let length = self.config.smallest_hash_mark_px * row as f64;
        HashMark {
            key: format!("hash-{}-{}", tick.grain, tick.epoch_ms),
            grain: tick.grain,
            epoch_ms: tick.epoch_ms,
            row,
            x,
            y0: self.origin.y,
            y1: self.origin.y + self.config.placement.direction() * length,
        }
    }

    fn offset_along_axis(&self, epoch_ms: i64) -> f64 {
        (self.scale.map(epoch_ms) - self.scale.range().0).abs()
    }
}
