pub mod grain;
pub mod time_scale;
pub mod types;

pub use grain::{CalendarComponents, Grain};
pub use time_scale::TimeScale;
pub use types::Point;
