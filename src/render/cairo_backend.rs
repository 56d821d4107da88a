use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;

use crate::error::{AxisError, AxisResult};
use crate::render::{Color, RenderSurface, TextHAlign, TextPrimitive, TextVAlign};

/// Cairo + Pango + PangoCairo rendering surface.
///
/// Wraps either an offscreen image surface or an external context (for
/// example a GTK `DrawingArea` callback). Cairo's own save/restore stack
/// backs [`RenderSurface::save`] and [`RenderSurface::restore`].
#[derive(Debug)]
pub struct CairoSurface {
    context: Context,
    fill_color: Color,
    fill_stack: Vec<Color>,
}

impl CairoSurface {
    pub fn offscreen(width: i32, height: i32) -> AxisResult<(Self, ImageSurface)> {
        if width <= 0 || height <= 0 {
            return Err(AxisError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let image = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        let context = Context::new(&image)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        Ok((Self::from_context(context), image))
    }

    #[must_use]
    pub fn from_context(context: Context) -> Self {
        Self {
            context,
            fill_color: Color::rgb(0.0, 0.0, 0.0),
            fill_stack: Vec::new(),
        }
    }

    #[must_use]
    pub fn context(&self) -> &Context {
        &self.context
    }
}

impl RenderSurface for CairoSurface {
    fn save(&mut self) -> AxisResult<()> {
        self.context
            .save()
            .map_err(|err| map_backend_error("failed to save cairo state", err))?;
        self.fill_stack.push(self.fill_color);
        Ok(())
    }

    fn restore(&mut self) -> AxisResult<()> {
        self.context
            .restore()
            .map_err(|err| map_backend_error("failed to restore cairo state", err))?;
        if let Some(color) = self.fill_stack.pop() {
            self.fill_color = color;
        }
        Ok(())
    }

    fn set_stroke_style(&mut self, color: Color, line_width: f64) {
        apply_color(&self.context, color);
        self.context.set_line_width(line_width);
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    fn begin_path(&mut self) {
        self.context.new_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.context.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.context.line_to(x, y);
    }

    fn stroke(&mut self) -> AxisResult<()> {
        self.context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke line", err))
    }

    fn fill_text(&mut self, text: &TextPrimitive) -> AxisResult<()> {
        let layout = pangocairo::functions::create_layout(&self.context);
        let font_description = FontDescription::from_string(&format!("Sans {}", text.font_size_px));
        layout.set_font_description(Some(&font_description));
        layout.set_text(&text.text);

        let (text_width, text_height) = layout.pixel_size();
        let x = match text.h_align {
            TextHAlign::Left => text.x,
            TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
            TextHAlign::Right => text.x - f64::from(text_width),
        };
        let y = match text.v_align {
            TextVAlign::Top => text.y,
            TextVAlign::Bottom => text.y - f64::from(text_height),
        };

        apply_color(&self.context, self.fill_color);
        self.context.move_to(x, y);
        pangocairo::functions::show_layout(&self.context, &layout);
        Ok(())
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> AxisError {
    AxisError::Backend(format!("{prefix}: {err}"))
}
