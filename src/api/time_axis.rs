use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Grain, Point, TimeScale};
use crate::error::{AxisError, AxisResult};
use crate::render::{
    LinePrimitive, RenderFrame, RenderSurface, TextHAlign, TextPrimitive, TextVAlign, draw_frame,
};
use crate::text::TextMeasurer;

use super::axis_config::{AxisLineStyle, TextStyle, TimeAxisConfig, TimeAxisPlacement};
use super::label_hash_layout::{AxisLayout, LabelHashLayout};
use super::tick_generator::{Tick, TickGenerator};
use super::tick_group_planner::{DropReason, TickGroupPlanner, TickPlan};

/// Inputs consumed from the surrounding chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeAxisProps {
    pub origin: Point,
    pub scale: TimeScale,
    #[serde(default)]
    pub text_style: TextStyle,
    #[serde(default)]
    pub axis_line_style: AxisLineStyle,
}

impl TimeAxisProps {
    #[must_use]
    pub fn new(origin: Point, scale: TimeScale) -> Self {
        Self {
            origin,
            scale,
            text_style: TextStyle::default(),
            axis_line_style: AxisLineStyle::default(),
        }
    }

    #[must_use]
    pub fn with_text_style(mut self, text_style: TextStyle) -> Self {
        self.text_style = text_style;
        self
    }

    #[must_use]
    pub fn with_axis_line_style(mut self, axis_line_style: AxisLineStyle) -> Self {
        self.axis_line_style = axis_line_style;
        self
    }

    fn validate(self) -> AxisResult<Self> {
        if !self.origin.is_finite() {
            return Err(AxisError::InvalidData(
                "time axis origin must be finite".to_owned(),
            ));
        }
        if !self.text_style.font_size.is_finite() || self.text_style.font_size <= 0.0 {
            return Err(AxisError::InvalidData(
                "time axis font size must be finite and > 0".to_owned(),
            ));
        }
        self.text_style.color.validate()?;
        let line = self.axis_line_style;
        if !line.line_width.is_finite() || line.line_width <= 0.0 {
            return Err(AxisError::InvalidData(
                "axis line width must be finite and > 0".to_owned(),
            ));
        }
        if !line.opacity.is_finite() || !(0.0..=1.0).contains(&line.opacity) {
            return Err(AxisError::InvalidData(
                "axis line opacity must be in [0, 1]".to_owned(),
            ));
        }
        line.stroke_style.validate()?;
        Ok(self)
    }
}

/// Multi-row calendar time axis.
///
/// Every call recomputes the whole pipeline (tick generation, planning,
/// layout) from the props; nothing is cached between renders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeAxis {
    props: TimeAxisProps,
    config: TimeAxisConfig,
}

impl TimeAxis {
    pub fn new(props: TimeAxisProps, config: TimeAxisConfig) -> AxisResult<Self> {
        Ok(Self {
            props: props.validate()?,
            config: config.validate()?,
        })
    }

    #[must_use]
    pub fn props(&self) -> TimeAxisProps {
        self.props
    }

    #[must_use]
    pub fn config(&self) -> TimeAxisConfig {
        self.config
    }

    /// Generates ticks for every grain, splitting off grains that cannot be
    /// generated together with the reason.
    #[must_use]
    pub fn candidate_ticks(&self) -> (Vec<(Grain, Vec<Tick>)>, Vec<(Grain, DropReason)>) {
        let generator = TickGenerator::new(self.config.timezone, self.config.max_ticks_per_grain);
        let domain = self.props.scale.domain();
        let mut candidates = Vec::with_capacity(Grain::ALL.len());
        let mut excluded = Vec::new();
        for grain in Grain::ALL {
            match generator.try_generate(grain, domain) {
                Ok(ticks) => candidates.push((grain, ticks)),
                Err(reason) => {
                    debug!(
                        grain = %grain,
                        ?reason,
                        cap = self.config.max_ticks_per_grain,
                        "grain excluded from tick generation"
                    );
                    excluded.push((grain, reason));
                }
            }
        }
        (candidates, excluded)
    }

    pub fn plan<M: TextMeasurer + ?Sized>(&self, measurer: &M) -> TickPlan {
        let (candidates, excluded) = self.candidate_ticks();
        let planner = TickGroupPlanner::new(
            &self.config,
            measurer,
            self.props.scale.dy(),
            self.props.text_style.font_size,
        );
        let mut plan = planner.plan(candidates);
        plan.dropped.extend(excluded);
        plan.dropped.sort_by_key(|(grain, _)| *grain);
        plan
    }

    pub fn layout<M: TextMeasurer + ?Sized>(&self, measurer: &M) -> AxisLayout {
        let plan = self.plan(measurer);
        LabelHashLayout::new(
            &self.config,
            measurer,
            self.props.scale,
            self.props.origin,
            self.props.text_style.font_size,
        )
        .layout(plan)
    }

    pub fn build_render_frame<M: TextMeasurer + ?Sized>(
        &self,
        measurer: &M,
    ) -> AxisResult<RenderFrame> {
        let layout = self.layout(measurer);
        let frame = self.frame_from_layout(&layout);
        frame.validate()?;
        Ok(frame)
    }

    /// Lays out the axis and draws it onto `surface`.
    pub fn render<S, M>(&self, surface: &mut S, measurer: &M) -> AxisResult<()>
    where
        S: RenderSurface + ?Sized,
        M: TextMeasurer + ?Sized,
    {
        let frame = self.build_render_frame(measurer)?;
        draw_frame(surface, &frame)
    }

    #[must_use]
    pub fn frame_from_layout(&self, layout: &AxisLayout) -> RenderFrame {
        let TimeAxisProps {
            origin,
            scale,
            text_style,
            axis_line_style,
        } = self.props;
        let stroke_color = axis_line_style.effective_color();
        let v_align = match self.config.placement {
            TimeAxisPlacement::Bottom => TextVAlign::Top,
            TimeAxisPlacement::Top => TextVAlign::Bottom,
        };

        let mut frame = RenderFrame::new();
        for hash in &layout.hashes {
            frame = frame.with_line(LinePrimitive::new(
                hash.x,
                hash.y0,
                hash.x,
                hash.y1,
                axis_line_style.line_width,
                stroke_color,
            ));
        }
        let (range_start, range_end) = scale.range();
        frame = frame.with_line(LinePrimitive::new(
            origin.x + range_start,
            origin.y,
            origin.x + range_end,
            origin.y,
            axis_line_style.line_width,
            stroke_color,
        ));
        for label in &layout.labels {
            frame = frame.with_text(TextPrimitive::new(
                label.text.clone(),
                label.x,
                label.y,
                label.font_size,
                text_style.color,
                TextHAlign::Left,
                v_align,
            ));
        }
        frame
    }
}
