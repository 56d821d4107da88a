mod frame;
mod primitives;
mod recording_surface;
mod surface;

pub use frame::RenderFrame;
pub use primitives::{Color, LinePrimitive, TextHAlign, TextPrimitive, TextVAlign};
pub use recording_surface::{DrawCommand, RecordingSurface};
pub use surface::{RenderSurface, draw_frame, with_saved_state};

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::CairoSurface;
