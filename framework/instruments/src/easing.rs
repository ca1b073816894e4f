/// Quadratic ease-in-out.
///
/// `t` is clamped to `[0, 1]`, so callers may pass raw elapsed fractions.
pub fn ease_in_out_quad(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - 2.0 * (1.0 - t) * (1.0 - t)
    }
}
