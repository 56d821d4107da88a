use crate::core::{CalendarComponents, Grain};

type GrainFormatter = fn(usize, &CalendarComponents) -> Option<String>;

/// Abbreviation tables indexed by [`Grain::index`].
const FORMATTERS: [GrainFormatter; Grain::ALL.len()] = [
    format_second,
    format_minute,
    format_hour,
    format_day,
    format_month,
    format_year,
];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Formats a tick label at abbreviation level `truncate_index` (0 = longest).
///
/// `None` means the grain has no representation at that level; callers fall
/// back to the previous level or treat the tick as unrenderable.
#[must_use]
pub fn format_tick_label(
    grain: Grain,
    truncate_index: usize,
    components: &CalendarComponents,
) -> Option<String> {
    FORMATTERS[grain.index()](truncate_index, components)
}

fn format_second(level: usize, parts: &CalendarComponents) -> Option<String> {
    match level {
        0 => Some(format!("{}s", parts.second)),
        1 => Some(parts.second.to_string()),
        _ => None,
    }
}

fn format_minute(level: usize, parts: &CalendarComponents) -> Option<String> {
    match level {
        0 => Some(format!("{}m", parts.minute)),
        1 => Some(parts.minute.to_string()),
        _ => None,
    }
}

fn format_hour(level: usize, parts: &CalendarComponents) -> Option<String> {
    let hour12 = match parts.hour % 12 {
        0 => 12,
        hour => hour,
    };
    match level {
        0 => {
            let meridiem = if parts.hour < 12 { "am" } else { "pm" };
            Some(format!("{hour12}{meridiem}"))
        }
        1 => Some(hour12.to_string()),
        _ => None,
    }
}

fn format_day(level: usize, parts: &CalendarComponents) -> Option<String> {
    match level {
        0 => Some(format!("{}{}", parts.day, ordinal_suffix(parts.day))),
        1 => Some(parts.day.to_string()),
        _ => None,
    }
}

fn format_month(level: usize, parts: &CalendarComponents) -> Option<String> {
    let index = usize::try_from(parts.month.checked_sub(1)?).ok()?;
    let name = MONTH_NAMES.get(index)?;
    match level {
        0 => Some((*name).to_owned()),
        1 => Some(name.chars().take(3).collect()),
        2 => Some(name.chars().take(1).collect()),
        _ => None,
    }
}

fn format_year(level: usize, parts: &CalendarComponents) -> Option<String> {
    (level == 0).then(|| parts.year.to_string())
}

fn ordinal_suffix(day: u32) -> &'static str {
    if (11..=13).contains(&(day % 100)) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

#[cfg(test)]
mod tests {
    use super::ordinal_suffix;

    #[test]
    fn ordinal_suffix_handles_teens() {
        let suffixes: Vec<&str> = [1, 2, 3, 4, 11, 12, 13, 21, 22, 23, 31]
            .into_iter()
            .map(ordinal_suffix)
            .collect();
        assert_eq!(
            suffixes,
            vec!["st", "nd", "rd", "th", "th", "th", "th", "st", "nd", "rd", "st"]
        );
    }
}
