//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Segment count that keeps edges under ~4 px long
pub fn segments_for_radius(radius: f32) -> u32 {
    ((2.0 * PI * radius / 4.0).ceil() as u32).clamp(12, 128)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_vertices_on_rim() {
        let center = Vec2::new(50.0, 60.0);
        let verts = circle(center, 10.0, [1.0; 4], 16);
        assert_eq!(verts.len(), 48);

        for tri in verts.chunks(3) {
            assert_eq!(tri[0].position, [50.0, 60.0]);
            for v in &tri[1..] {
                let d = Vec2::from(v.position).distance(center);
                assert!((d - 10.0).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_segments_scale_with_radius() {
        assert_eq!(segments_for_radius(1.0), 12);
        assert!(segments_for_radius(30.0) > segments_for_radius(15.0));
        assert_eq!(segments_for_radius(10_000.0), 128);
    }
}
