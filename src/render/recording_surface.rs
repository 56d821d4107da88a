use crate::error::{AxisError, AxisResult};
use crate::render::{Color, LinePrimitive, RenderSurface, TextPrimitive};

/// One call received by a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    SetStrokeStyle { color: Color, line_width: f64 },
    SetFillColor(Color),
    BeginPath,
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    Stroke,
    FillText(TextPrimitive),
}

/// Headless surface that records every drawing call for assertions.
///
/// Strokes are also resolved into [`LinePrimitive`]s using the style that was
/// current when they were issued.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
    pub stroked_lines: Vec<LinePrimitive>,
    pub drawn_texts: Vec<TextPrimitive>,
    state: SurfaceState,
    saved: Vec<SurfaceState>,
    path: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, Copy)]
struct SurfaceState {
    stroke_color: Color,
    line_width: f64,
    fill_color: Color,
}

impl Default for SurfaceState {
    fn default() -> Self {
        Self {
            stroke_color: Color::rgb(0.0, 0.0, 0.0),
            line_width: 1.0,
            fill_color: Color::rgb(0.0, 0.0, 0.0),
        }
    }
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `save` calls not yet matched by `restore`.
    #[must_use]
    pub fn save_depth(&self) -> usize {
        self.saved.len()
    }

    #[must_use]
    pub fn text_strings(&self) -> Vec<&str> {
        self.drawn_texts
            .iter()
            .map(|text| text.text.as_str())
            .collect()
    }
}

impl RenderSurface for RecordingSurface {
    fn save(&mut self) -> AxisResult<()> {
        self.commands.push(DrawCommand::Save);
        self.saved.push(self.state);
        Ok(())
    }

    fn restore(&mut self) -> AxisResult<()> {
        self.commands.push(DrawCommand::Restore);
        self.state = self.saved.pop().ok_or_else(|| {
            AxisError::Backend("restore called without matching save".to_owned())
        })?;
        Ok(())
    }

    fn set_stroke_style(&mut self, color: Color, line_width: f64) {
        self.commands
            .push(DrawCommand::SetStrokeStyle { color, line_width });
        self.state.stroke_color = color;
        self.state.line_width = line_width;
    }

    fn set_fill_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::SetFillColor(color));
        self.state.fill_color = color;
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
        self.path.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::MoveTo { x, y });
        self.path.push((x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::LineTo { x, y });
        self.path.push((x, y));
    }

    fn stroke(&mut self) -> AxisResult<()> {
        self.commands.push(DrawCommand::Stroke);
        for pair in self.path.windows(2) {
            self.stroked_lines.push(LinePrimitive::new(
                pair[0].0,
                pair[0].1,
                pair[1].0,
                pair[1].1,
                self.state.line_width,
                self.state.stroke_color,
            ));
        }
        Ok(())
    }

    fn fill_text(&mut self, text: &TextPrimitive) -> AxisResult<()> {
        self.commands.push(DrawCommand::FillText(text.clone()));
        self.drawn_texts.push(TextPrimitive {
            color: self.state.fill_color,
            ..text.clone()
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::RecordingSurface;
    use crate::error::AxisError;
    use crate::render::{Color, RenderSurface, with_saved_state};

    #[test]
    fn saved_state_scope_restores_after_failure() {
        let mut surface = RecordingSurface::new();
        let result: Result<(), AxisError> = with_saved_state(&mut surface, |surface| {
            surface.set_fill_color(Color::rgb(1.0, 0.0, 0.0));
            Err(AxisError::Backend("boom".to_owned()))
        });

        assert!(result.is_err());
        assert_eq!(surface.save_depth(), 0);
    }

    #[test]
    fn unmatched_restore_is_an_error() {
        let mut surface = RecordingSurface::new();
        assert!(surface.restore().is_err());
    }
}
