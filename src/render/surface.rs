use crate::error::AxisResult;
use crate::render::{Color, RenderFrame, TextPrimitive};

/// Immediate-mode drawing target, modelled on a 2D canvas context.
///
/// Style setters mutate surface state; callers bracket them with
/// [`with_saved_state`] so changes never leak between drawing calls.
pub trait RenderSurface {
    fn save(&mut self) -> AxisResult<()>;
    fn restore(&mut self) -> AxisResult<()>;
    fn set_stroke_style(&mut self, color: Color, line_width: f64);
    fn set_fill_color(&mut self, color: Color);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn stroke(&mut self) -> AxisResult<()>;
    /// Draws `text` with its own font size and alignment, using the current fill colour.
    fn fill_text(&mut self, text: &TextPrimitive) -> AxisResult<()>;
}

/// Runs `draw` between `save` and `restore`.
///
/// `restore` is issued even when `draw` fails; the draw error wins over a
/// restore error.
pub fn with_saved_state<S, T>(
    surface: &mut S,
    draw: impl FnOnce(&mut S) -> AxisResult<T>,
) -> AxisResult<T>
where
    S: RenderSurface + ?Sized,
{
    surface.save()?;
    let drawn = draw(surface);
    let restored = surface.restore();
    let value = drawn?;
    restored?;
    Ok(value)
}

/// Draws a validated frame: every line and label in its own saved-state scope.
pub fn draw_frame<S>(surface: &mut S, frame: &RenderFrame) -> AxisResult<()>
where
    S: RenderSurface + ?Sized,
{
    frame.validate()?;

    for line in &frame.lines {
        with_saved_state(surface, |surface| {
            surface.set_stroke_style(line.color, line.stroke_width);
            surface.begin_path();
            surface.move_to(line.x1, line.y1);
            surface.line_to(line.x2, line.y2);
            surface.stroke()
        })?;
    }

    for text in &frame.texts {
        with_saved_state(surface, |surface| {
            surface.set_fill_color(text.color);
            surface.fill_text(text)
        })?;
    }

    Ok(())
}
