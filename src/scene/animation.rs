/// Spin state of one inner shape.
///
/// Each frame the Y angle advances by the frame delta and X is slaved to Y,
/// so the shape tumbles diagonally at one radian per second.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Spin {
    pub x: f64,
    pub y: f64,
}

impl Spin {
    /// Advance by `delta` seconds.
    pub fn advance(&mut self, delta: f64) {
        self.y += delta;
        self.x = self.y;
    }

    /// Current Euler rotation (x, y, z) in radians.
    pub fn euler(&self) -> [f64; 3] {
        [self.x, self.y, 0.0]
    }
}
