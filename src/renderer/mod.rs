//! Render sink interface
//!
//! The simulation knows nothing about drawing. After each frame every ball
//! is handed to a [`RenderSink`] as a filled disc. Two batching sinks are
//! provided for backends that want instances or plain triangles.

pub mod shapes;
pub mod vertex;

use glam::Vec2;

pub use vertex::{DiscInstance, Vertex};

use crate::palette::HexColor;
use crate::sim::Ball;

/// Receives one filled disc per ball per frame
pub trait RenderSink {
    fn draw_disc(&mut self, center: Vec2, radius: f32, color: &HexColor);
}

/// Draw every ball in list order (later balls on top)
pub fn render<S: RenderSink + ?Sized>(balls: &[Ball], sink: &mut S) {
    for ball in balls {
        sink.draw_disc(ball.pos, ball.radius(), ball.color());
    }
}

/// Collects [`DiscInstance`] records for instanced drawing
#[derive(Debug, Default)]
pub struct InstanceBatch {
    pub instances: Vec<DiscInstance>,
}

impl InstanceBatch {
    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Raw bytes ready for a vertex/storage buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl RenderSink for InstanceBatch {
    fn draw_disc(&mut self, center: Vec2, radius: f32, color: &HexColor) {
        self.instances
            .push(DiscInstance::new(center.to_array(), radius, color.to_rgba()));
    }
}

/// Collects triangle-list vertices, one fan per disc
#[derive(Debug, Default)]
pub struct VertexBatch {
    pub vertices: Vec<Vertex>,
}

impl VertexBatch {
    pub fn clear(&mut self) {
        self.vertices.clear();
    }
}

impl RenderSink for VertexBatch {
    fn draw_disc(&mut self, center: Vec2, radius: f32, color: &HexColor) {
        let segments = shapes::segments_for_radius(radius);
        self.vertices
            .extend(shapes::circle(center, radius, color.to_rgba(), segments));
    }
}
