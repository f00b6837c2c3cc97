use glam::Vec2;

/// Map a position in pixels (origin top-left) to the pointer uniform range:
/// [-1, 1] on both axes with +y up. Degenerate surfaces report the center.
#[inline]
pub fn normalize_pointer(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    if width <= 0.0 || height <= 0.0 || !x.is_finite() || !y.is_finite() {
        return Vec2::ZERO;
    }
    let nx = (x / width) * 2.0 - 1.0;
    let ny = 1.0 - (y / height) * 2.0;
    Vec2::new(nx.clamp(-1.0, 1.0), ny.clamp(-1.0, 1.0))
}
