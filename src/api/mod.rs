//! Time-axis layout pipeline.
//!
//! Stages run in order on every render: [`TickGenerator`] per grain,
//! [`TickGroupPlanner`] for row survival and truncation, [`LabelHashLayout`]
//! for positioned labels and deduplicated hash marks, then a
//! [`RenderFrame`](crate::render::RenderFrame) drawn onto a surface.

mod axis_config;
mod json_contract;
mod label_format;
mod label_hash_layout;
mod tick_generator;
mod tick_group_planner;
mod time_axis;

pub use axis_config::{
    AxisLineStyle, DEFAULT_MAX_TICKS_PER_GRAIN, MAX_ROWS, TextStyle, TimeAxisConfig,
    TimeAxisPlacement, TimeAxisTimeZone,
};
pub use json_contract::{TIME_AXIS_CONFIG_JSON_SCHEMA_V1, TimeAxisConfigJsonContractV1};
pub use label_format::format_tick_label;
pub use label_hash_layout::{AxisLabel, AxisLayout, HashMark, LabelHashLayout, skip_stride};
pub use tick_generator::{Tick, TickGenerator, generate_ticks};
pub use tick_group_planner::{DropReason, TickGroup, TickGroupPlanner, TickPlan};
pub use time_axis::{TimeAxis, TimeAxisProps};
