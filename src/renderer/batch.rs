//! CPU-side frame batch
//!
//! Collects triangles for the GPU pipeline and text labels for whatever
//! text surface the frontend has (the DOM on web, the log natively).

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use super::{RenderBackend, TextStyle};
use crate::Color;
use crate::sim::Rect;

const DEFAULT_CIRCLE_SEGMENTS: u32 = 16;

/// A line of text queued for this frame
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub anchor: Vec2,
    pub style: TextStyle,
}

/// One frame's worth of geometry and text, in field pixels
#[derive(Debug, Clone)]
pub struct FrameBatch {
    pub size: (i32, i32),
    pub clear_color: Color,
    pub vertices: Vec<Vertex>,
    pub labels: Vec<TextLabel>,
    /// Triangles per circle
    pub circle_segments: u32,
}

impl FrameBatch {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            size: (width, height),
            clear_color: colors::BACKGROUND,
            vertices: Vec::with_capacity(1024),
            labels: Vec::new(),
            circle_segments: DEFAULT_CIRCLE_SEGMENTS,
        }
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    /// True if a label with exactly this text was queued
    pub fn has_text(&self, text: &str) -> bool {
        self.labels.iter().any(|l| l.text == text)
    }
}

impl RenderBackend for FrameBatch {
    fn screen_size(&self) -> (i32, i32) {
        self.size
    }

    fn clear(&mut self, color: Color) {
        self.clear_color = color;
        self.vertices.clear();
        self.labels.clear();
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let min = rect.pos.as_vec2();
        let max = min + rect.size.as_vec2();
        self.vertices.extend_from_slice(&shapes::rect(min, max, color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.vertices
            .extend(shapes::circle(center, radius, color, self.circle_segments));
    }

    fn draw_text(&mut self, text: &str, anchor: Vec2, style: TextStyle) {
        self.labels.push(TextLabel {
            text: text.to_string(),
            anchor,
            style,
        });
    }
}
