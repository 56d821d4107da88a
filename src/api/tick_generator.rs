use serde::{Deserialize, Serialize};

use crate::core::{CalendarComponents, Grain};

use super::axis_config::{DEFAULT_MAX_TICKS_PER_GRAIN, TimeAxisTimeZone};
use super::tick_group_planner::DropReason;

/// One calendar tick of a single grain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tick {
    pub epoch_ms: i64,
    pub grain: Grain,
    pub components: CalendarComponents,
}

impl Tick {
    #[must_use]
    pub fn key(&self) -> String {
        format!("tick-{}-{}", self.grain, self.epoch_ms)
    }
}

/// Bounded per-grain tick walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickGenerator {
    pub timezone: TimeAxisTimeZone,
    pub max_ticks: usize,
}

impl Default for TickGenerator {
    fn default() -> Self {
        Self {
            timezone: TimeAxisTimeZone::Utc,
            max_ticks: DEFAULT_MAX_TICKS_PER_GRAIN,
        }
    }
}

impl TickGenerator {
    #[must_use]
    pub fn new(timezone: TimeAxisTimeZone, max_ticks: usize) -> Self {
        Self {
            timezone,
            max_ticks,
        }
    }

    /// Ticks of `grain` inside `domain`, both ends inclusive.
    ///
    /// The first tick is always `domain.0` verbatim. Returns `None` when the
    /// grain is excluded from layout; [`TickGenerator::try_generate`] says why.
    #[must_use]
    pub fn generate(&self, grain: Grain, domain: (i64, i64)) -> Option<Vec<Tick>> {
        self.try_generate(grain, domain).ok()
    }

    /// Like [`TickGenerator::generate`], failing with
    /// [`DropReason::TickCapExceeded`] when the list would exceed `max_ticks`
    /// and [`DropReason::OutOfRange`] when the domain start has no calendar
    /// representation.
    pub fn try_generate(
        &self,
        grain: Grain,
        domain: (i64, i64),
    ) -> Result<Vec<Tick>, DropReason> {
        let (start, end) = domain;
        let offset = self.timezone.fixed_offset();
        let make_tick = |epoch_ms: i64| {
            CalendarComponents::from_epoch_ms(epoch_ms, offset).map(|components| Tick {
                epoch_ms,
                grain,
                components,
            })
        };

        if self.max_ticks == 0 {
            return Err(DropReason::TickCapExceeded);
        }
        let mut ticks = vec![make_tick(start).ok_or(DropReason::OutOfRange)?];
        let Some(mut cursor) = grain.floor(start, offset) else {
            return Ok(ticks);
        };

        while cursor <= end {
            if cursor > start {
                if ticks.len() >= self.max_ticks {
                    return Err(DropReason::TickCapExceeded);
                }
                match make_tick(cursor) {
                    Some(tick) => ticks.push(tick),
                    None => break,
                }
            }
            match grain.step(cursor, offset) {
                Some(next) if next > cursor => cursor = next,
                _ => break,
            }
        }

        Ok(ticks)
    }
}

/// [`TickGenerator::generate`] in UTC with the default 500-tick cap.
#[must_use]
pub fn generate_ticks(grain: Grain, domain: (i64, i64)) -> Option<Vec<Tick>> {
    TickGenerator::default().generate(grain, domain)
}

#[cfg(test)]
mod tests {
    use super::{TickGenerator, generate_ticks};
    use crate::api::{DropReason, TimeAxisTimeZone};
    use crate::core::Grain;

    #[test]
    fn unaligned_start_is_kept_verbatim() {
        let ticks = generate_ticks(Grain::Second, (1_500, 4_000)).expect("within cap");
        let epochs: Vec<i64> = ticks.iter().map(|tick| tick.epoch_ms).collect();
        assert_eq!(epochs, vec![1_500, 2_000, 3_000, 4_000]);
    }

    #[test]
    fn custom_cap_excludes_grain() {
        let generator = TickGenerator::new(TimeAxisTimeZone::Utc, 3);
        assert!(generator.generate(Grain::Second, (0, 2_000)).is_some());
        assert!(generator.generate(Grain::Second, (0, 3_000)).is_none());
        assert_eq!(
            generator.try_generate(Grain::Second, (0, 3_000)),
            Err(DropReason::TickCapExceeded)
        );
    }

    #[test]
    fn start_outside_calendar_range_is_out_of_range() {
        let generator = TickGenerator::default();
        assert_eq!(
            generator.try_generate(Grain::Year, (i64::MIN, i64::MIN)),
            Err(DropReason::OutOfRange)
        );
    }

    #[test]
    fn tick_key_encodes_grain_and_epoch() {
        let ticks = generate_ticks(Grain::Minute, (0, 0)).expect("single tick");
        assert_eq!(ticks[0].key(), "tick-minute-0");
    }
}
