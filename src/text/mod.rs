//! Text measurement hooks for axis layout.
//!
//! Layout needs label widths before anything is drawn. Shaping and glyph
//! rasterization stay with the rendering backend; layout only depends on the
//! small [`TextMeasurer`] interface below.

use serde::{Deserialize, Serialize};

/// Pixel metrics of one wrapped line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineMetrics {
    pub text: String,
    pub width_px: f64,
}

/// Wrapped-line metrics for one measured string.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextMetrics {
    pub lines: Vec<LineMetrics>,
    pub line_height_px: f64,
}

impl TextMetrics {
    /// Width of the widest wrapped line.
    #[must_use]
    pub fn max_line_width_px(&self) -> f64 {
        self.lines
            .iter()
            .map(|line| line.width_px)
            .fold(0.0, f64::max)
    }
}

/// Measures text for layout.
///
/// `max_width_px` is a wrapping budget: implementations break lines on
/// whitespace so no line exceeds it, unless a single word is wider.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font_size_px: f64, max_width_px: Option<f64>) -> TextMetrics;

    /// Unwrapped width of `text`.
    fn measure_width(&self, text: &str, font_size_px: f64) -> f64 {
        self.measure(text, font_size_px, None).max_line_width_px()
    }
}

/// Deterministic, backend-independent glyph-width estimate.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedTextMeasurer;

impl EstimatedTextMeasurer {
    fn line_width_px(text: &str, font_size_px: f64) -> f64 {
        let units = text.chars().fold(0.0, |acc, ch| {
            acc + match ch {
                '0'..='9' => 0.62,
                '.' | ',' => 0.34,
                '-' | '+' | '%' => 0.42,
                ' ' => 0.33,
                _ => 0.58,
            }
        });
        (units * font_size_px).max(font_size_px)
    }
}

impl TextMeasurer for EstimatedTextMeasurer {
    fn measure(&self, text: &str, font_size_px: f64, max_width_px: Option<f64>) -> TextMetrics {
        let line_height_px = font_size_px * 1.2;
        let Some(budget) = max_width_px.filter(|budget| budget.is_finite() && *budget > 0.0)
        else {
            return TextMetrics {
                lines: vec![LineMetrics {
                    text: text.to_owned(),
                    width_px: Self::line_width_px(text, font_size_px),
                }],
                line_height_px,
            };
        };

        let mut lines = Vec::new();
        let mut current = String::new();
        for word in text.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate = format!("{current} {word}");
            if Self::line_width_px(&candidate, font_size_px) <= budget {
                current = candidate;
            } else {
                let width_px = Self::line_width_px(&current, font_size_px);
                lines.push(LineMetrics {
                    text: std::mem::replace(&mut current, word.to_owned()),
                    width_px,
                });
            }
        }
        if !current.is_empty() || lines.is_empty() {
            let width_px = Self::line_width_px(&current, font_size_px);
            lines.push(LineMetrics {
                text: current,
                width_px,
            });
        }

        TextMetrics {
            lines,
            line_height_px,
        }
    }
}
