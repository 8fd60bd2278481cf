use kiss3d::renderer::LineRenderer;

use nalgebra::Point3;

/// Samples `f` at `num_segments + 1` evenly spaced parameters from `t_start`
/// to `t_end`, both ends included.
pub fn path_iter_parametric<F>(
    f: F,
    t_start: f32,
    t_end: f32,
    num_segments: usize,
) -> impl Iterator<Item = Point3<f32>>
where
    F: Fn(f32) -> Point3<f32>,
{
    let num_segments = num_segments.max(1);
    (0..=num_segments)
        .map(move |i| i as f32 / num_segments as f32)
        // u ranges from 0 to 1 (inclusive)
        .map(move |u| t_start + u * (t_end - t_start))
        .map(f)
}

pub fn draw_path<I: Iterator<Item = Point3<f32>>>(
    line_renderer: &mut LineRenderer,
    points: I,
    color: &Point3<f32>,
) {
    let mut prev_pt = None;
    for pt in points {
        if let Some(prev_pt) = prev_pt {
            line_renderer.draw_line(prev_pt, pt, *color);
        }
        prev_pt = Some(pt);
    }
}
