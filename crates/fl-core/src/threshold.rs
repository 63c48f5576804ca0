/// Soft indicator of the open interval `(a, b)`.
///
/// `0.5 * (tanh(s*(x-a)) * tanh(s*(b-x)) + 1)`: close to 1 inside the
/// interval, close to 0 outside, smooth everywhere. Converges to the boolean
/// indicator as `s` grows. `tanh` saturates, so any finite `x` is fine.
pub fn threshold(sharpness: f64, a: f64, b: f64, x: f64) -> f64 {
    0.5 * ((sharpness * (x - a)).tanh() * (sharpness * (b - x)).tanh() + 1.0)
}
