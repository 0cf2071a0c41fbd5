/// Axis-aligned bounding box in 3-D.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl BoundingBox {
    /// Scan a flat positions buffer (stride 3). `None` when it is empty.
    pub fn from_positions(positions: &[f32]) -> Option<BoundingBox> {
        if positions.len() < 3 {
            return None;
        }

        let mut min = [f64::INFINITY; 3];
        let mut max = [f64::NEG_INFINITY; 3];
        for p in positions.chunks_exact(3) {
            for i in 0..3 {
                min[i] = min[i].min(p[i] as f64);
                max[i] = max[i].max(p[i] as f64);
            }
        }

        Some(BoundingBox { min, max })
    }

    /// Centre point of the box.
    pub fn center(&self) -> [f64; 3] {
        [
            (self.min[0] + self.max[0]) * 0.5,
            (self.min[1] + self.max[1]) * 0.5,
            (self.min[2] + self.max[2]) * 0.5,
        ]
    }

    /// Length of the space diagonal.
    pub fn diagonal(&self) -> f64 {
        let dx = self.max[0] - self.min[0];
        let dy = self.max[1] - self.min[1];
        let dz = self.max[2] - self.min[2];
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Return the smallest box that contains both `self` and `other`.
    pub fn merge(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min: [
                self.min[0].min(other.min[0]),
                self.min[1].min(other.min[1]),
                self.min[2].min(other.min[2]),
            ],
            max: [
                self.max[0].max(other.max[0]),
                self.max[1].max(other.max[1]),
                self.max[2].max(other.max[2]),
            ],
        }
    }

    /// Min/max narrowed to f32, as glTF accessors store them.
    pub fn to_f32(&self) -> ([f32; 3], [f32; 3]) {
        (
            self.min.map(|v| v as f32),
            self.max.map(|v| v as f32),
        )
    }
}
