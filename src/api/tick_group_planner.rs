use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::Grain;
use crate::text::TextMeasurer;

use super::axis_config::{MAX_ROWS, TimeAxisConfig};
use super::label_format::format_tick_label;
use super::tick_generator::Tick;

/// Ticks of one grain plus the layout decisions applied uniformly to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickGroup {
    pub grain: Grain,
    pub ticks: Vec<Tick>,
    /// 1 is the innermost (finest) row, `num_rows` the outermost.
    pub row: usize,
    pub num_rows: usize,
    /// Shared abbreviation level: the deepest level any fitting tick needs.
    /// `None` when no tick fits at any level.
    pub truncate_index: Option<usize>,
    pub width_of_largest_label: f64,
    pub dont_draw_hashes: bool,
    pub labels_cannot_fit: bool,
    /// Epochs of ticks that fit at no level, ascending. Their labels are skipped.
    #[serde(default)]
    pub unfit_ticks: Vec<i64>,
}

impl TickGroup {
    fn new(grain: Grain, ticks: Vec<Tick>) -> Self {
        Self {
            grain,
            ticks,
            row: 0,
            num_rows: 0,
            truncate_index: None,
            width_of_largest_label: 0.0,
            dont_draw_hashes: false,
            labels_cannot_fit: false,
            unfit_ticks: Vec::new(),
        }
    }

    /// Whether `tick` has a label at the group's shared level.
    #[must_use]
    pub fn has_label(&self, tick: &Tick) -> bool {
        !self.labels_cannot_fit && self.unfit_ticks.binary_search(&tick.epoch_ms).is_err()
    }

    #[must_use]
    pub fn is_outermost(&self) -> bool {
        self.row == self.num_rows
    }
}

/// Why a grain is absent from the rendered axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropReason {
    /// Generation hit the per-grain tick cap.
    TickCapExceeded,
    /// The domain start has no calendar representation.
    OutOfRange,
    /// Only the domain start tick; no grain boundary falls inside the domain.
    NoFullUnit,
    /// Leading group with neither fitting labels nor hash marks.
    Invisible,
    /// Finer than the three coarsest surviving groups.
    RowCap,
}

/// Planner output: surviving groups innermost first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TickPlan {
    pub groups: SmallVec<[TickGroup; MAX_ROWS]>,
    pub dropped: Vec<(Grain, DropReason)>,
}

impl TickPlan {
    #[must_use]
    pub fn outermost(&self) -> Option<&TickGroup> {
        self.groups.last()
    }

    #[must_use]
    pub fn grains(&self) -> Vec<Grain> {
        self.groups.iter().map(|group| group.grain).collect()
    }
}

/// Chooses rows, truncation and hash suppression for candidate grains.
#[derive(Debug)]
pub struct TickGroupPlanner<'a, M: TextMeasurer + ?Sized> {
    config: &'a TimeAxisConfig,
    measurer: &'a M,
    dy: f64,
    font_size_px: f64,
}

impl<'a, M: TextMeasurer + ?Sized> TickGroupPlanner<'a, M> {
    #[must_use]
    pub fn new(config: &'a TimeAxisConfig, measurer: &'a M, dy: f64, font_size_px: f64) -> Self {
        Self {
            config,
            measurer,
            dy,
            font_size_px,
        }
    }

    /// Plans the candidates that survived tick generation, finest grain first.
    pub fn plan(&self, candidates: impl IntoIterator<Item = (Grain, Vec<Tick>)>) -> TickPlan {
        let mut dropped = Vec::new();
        let mut candidates: Vec<(Grain, Vec<Tick>)> = candidates.into_iter().collect();
        candidates.sort_by_key(|(grain, _)| *grain);

        let spans_full_unit = |ticks: &Vec<Tick>| ticks.len() >= 2;
        let mut groups: Vec<TickGroup> = if candidates.iter().any(|(_, t)| spans_full_unit(t)) {
            candidates
                .into_iter()
                .filter_map(|(grain, ticks)| {
                    if spans_full_unit(&ticks) {
                        Some(TickGroup::new(grain, ticks))
                    } else {
                        dropped.push((grain, DropReason::NoFullUnit));
                        None
                    }
                })
                .collect()
        } else {
            let mut iter = candidates.into_iter();
            let kept = iter.next().map(|(grain, ticks)| TickGroup::new(grain, ticks));
            dropped.extend(iter.map(|(grain, _)| (grain, DropReason::NoFullUnit)));
            kept.into_iter().collect()
        };

        self.suppress_hashes(&mut groups);
        for group in &mut groups {
            self.truncate(group);
        }

        let invisible = groups
            .iter()
            .take(groups.len().saturating_sub(1))
            .take_while(|group| group.labels_cannot_fit && group.dont_draw_hashes)
            .count();
        dropped.extend(
            groups
                .drain(..invisible)
                .map(|group| (group.grain, DropReason::Invisible)),
        );

        let max_rows = self.config.max_rows.clamp(1, MAX_ROWS);
        let excess = groups.len().saturating_sub(max_rows);
        dropped.extend(
            groups
                .drain(..excess)
                .map(|group| (group.grain, DropReason::RowCap)),
        );

        let num_rows = groups.len();
        for (index, group) in groups.iter_mut().enumerate() {
            group.row = index + 1;
            group.num_rows = num_rows;
        }

        let plan = TickPlan {
            groups: groups.into_iter().collect(),
            dropped,
        };
        debug!(
            grains = ?plan.grains(),
            dropped = ?plan.dropped,
            dy = self.dy,
            "planned time axis rows"
        );
        plan
    }

    fn suppress_hashes(&self, groups: &mut [TickGroup]) {
        let max_hashes = self.dy / self.config.min_hash_spacing_px;
        let Some((_, finer)) = groups.split_last_mut() else {
            return;
        };
        for group in finer {
            group.dont_draw_hashes = group.ticks.len() as f64 > max_hashes;
        }
    }

    fn truncate(&self, group: &mut TickGroup) {
        if group.ticks.is_empty() {
            group.labels_cannot_fit = true;
            return;
        }
        let max_label_width =
            self.dy / group.ticks.len() as f64 - 2.0 * self.config.label_padding_px;
        if max_label_width < self.config.min_label_width_px {
            group.labels_cannot_fit = true;
            return;
        }

        let mut shared_level = None;
        let mut unfit_ticks = Vec::new();
        for tick in &group.ticks {
            match self.fitting_level(tick, max_label_width) {
                Some(level) => shared_level = shared_level.max(Some(level)),
                None => unfit_ticks.push(tick.epoch_ms),
            }
        }
        let Some(shared_level) = shared_level else {
            group.labels_cannot_fit = true;
            group.truncate_index = None;
            group.unfit_ticks = unfit_ticks;
            trace!(grain = %group.grain, max_label_width, "no abbreviation fits");
            return;
        };

        group.truncate_index = Some(shared_level);
        group.width_of_largest_label = group
            .ticks
            .iter()
            .filter(|tick| unfit_ticks.binary_search(&tick.epoch_ms).is_err())
            .filter_map(|tick| format_tick_label(tick.grain, shared_level, &tick.components))
            .map(|text| self.measurer.measure_width(&text, self.font_size_px))
            .fold(0.0, f64::max);
        group.unfit_ticks = unfit_ticks;
        trace!(
            grain = %group.grain,
            truncate_index = shared_level,
            width = group.width_of_largest_label,
            unfit = group.unfit_ticks.len(),
            "group truncation resolved"
        );
    }

    /// Lowest abbreviation level whose text exists and fits `max_width`.
    fn fitting_level(&self, tick: &Tick, max_width: f64) -> Option<usize> {
        (0..)
            .map_while(|level| {
                format_tick_label(tick.grain, level, &tick.components).map(|text| (level, text))
            })
            .find(|(_, text)| self.measurer.measure_width(text, self.font_size_px) <= max_width)
            .map(|(level, _)| level)
    }
}

#[cfg(test)]
mod tests {
    use super::{DropReason, TickGroupPlanner};
    use crate::api::{TimeAxisConfig, generate_ticks};
    use crate::core::Grain;
    use crate::text::EstimatedTextMeasurer;

    #[test]
    fn coarsest_group_never_suppresses_hashes() {
        let config = TimeAxisConfig::default();
        let measurer = EstimatedTextMeasurer;
        // Tiny budget: every group is unfit, but the coarsest must survive.
        let planner = TickGroupPlanner::new(&config, &measurer, 20.0, 12.0);
        let seconds = generate_ticks(Grain::Second, (0, 120_000)).expect("ticks");
        let minutes = generate_ticks(Grain::Minute, (0, 120_000)).expect("ticks");

        let plan = planner.plan([(Grain::Second, seconds), (Grain::Minute, minutes)]);

        assert_eq!(plan.grains(), vec![Grain::Minute]);
        assert!(!plan.groups[0].dont_draw_hashes);
        assert_eq!(plan.dropped, vec![(Grain::Second, DropReason::Invisible)]);
    }

    #[test]
    fn single_start_ticks_keep_finest_grain() {
        let config = TimeAxisConfig::default();
        let measurer = EstimatedTextMeasurer;
        let planner = TickGroupPlanner::new(&config, &measurer, 400.0, 12.0);
        let candidates = Grain::ALL
            .into_iter()
            .filter_map(|grain| generate_ticks(grain, (250, 750)).map(|ticks| (grain, ticks)));

        let plan = planner.plan(candidates);

        assert_eq!(plan.grains(), vec![Grain::Second]);
        assert_eq!(plan.groups[0].row, 1);
        assert_eq!(plan.groups[0].num_rows, 1);
        assert_eq!(plan.dropped.len(), 5);
    }
}
