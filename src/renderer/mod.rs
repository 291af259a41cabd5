//! Rendering
//!
//! The simulation never draws directly. [`screen::draw_frame`] turns a
//! session into calls on a [`RenderBackend`]; backends decide how rectangles,
//! circles and text end up on screen.
//!
//! - `screen`: phase → draw plan, and the dispatcher that executes it
//! - `batch`: CPU backend collecting triangles and text labels
//! - `shapes` / `vertex`: tessellation into GPU vertices
//! - `pipeline`: WebGPU pipeline that presents a batch

pub mod batch;
pub mod pipeline;
pub mod screen;
pub mod shapes;
pub mod vertex;

pub use batch::{FrameBatch, TextLabel};
pub use pipeline::{RenderError, RenderState};
pub use screen::{DrawPlan, Overlay, draw_frame, plan_for};
pub use vertex::Vertex;

use glam::Vec2;

use crate::Color;
use crate::sim::Rect;

/// Relative text size; backends map these to fonts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    /// Screen titles
    Title,
    /// HUD and instructions
    Body,
    /// Small hints
    Hint,
}

impl TextSize {
    /// Nominal line height in field pixels
    pub fn px(&self) -> f32 {
        match self {
            TextSize::Title => 74.0,
            TextSize::Body => 36.0,
            TextSize::Hint => 24.0,
        }
    }
}

/// Horizontal alignment of text relative to its anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: TextSize,
    pub color: Color,
    pub align: Align,
}

/// Drawing surface the dispatcher renders into.
///
/// Coordinates are field pixels, y down. Text anchors mark the top of the
/// line; `align` says which horizontal point of the line sits on the anchor.
pub trait RenderBackend {
    /// Drawable size in field pixels
    fn screen_size(&self) -> (i32, i32);
    /// Start a new frame filled with `color`
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn draw_text(&mut self, text: &str, anchor: Vec2, style: TextStyle);
}
