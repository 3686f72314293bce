use super::vec2::Vec2;

/// Position plus rotation. The rotation is stored as a cos/sin pair so
/// vertex transformation never calls trig functions; the angle is derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    cos: f64,
    sin: f64,
}

impl Transform {
    pub fn new(position: Vec2, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self { position, cos, sin }
    }

    pub fn identity() -> Self {
        Self {
            position: Vec2::ZERO,
            cos: 1.0,
            sin: 0.0,
        }
    }

    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    /// Rotation angle in radians, in `(-PI, PI]`.
    pub fn angle(&self) -> f64 {
        self.sin.atan2(self.cos)
    }

    pub fn cos(&self) -> f64 {
        self.cos
    }

    pub fn sin(&self) -> f64 {
        self.sin
    }

    pub fn set_angle(&mut self, angle: f64) {
        let (sin, cos) = angle.sin_cos();
        self.cos = cos;
        self.sin = sin;
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Rotates a direction without translating it.
    pub fn rotate_vector(&self, v: Vec2) -> Vec2 {
        v.rotate_by(self.cos, self.sin)
    }

    /// Local to world: rotation then translation.
    pub fn apply(&self, point: Vec2) -> Vec2 {
        self.rotate_vector(point) + self.position
    }

    /// World to local: inverse translation then inverse rotation.
    pub fn apply_inverse(&self, point: Vec2) -> Vec2 {
        (point - self.position).rotate_by(self.cos, -self.sin)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;
    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_transform_angle_roundtrip() {
        let t = Transform::new(Vec2::new(1.0, 2.0), PI / 4.0);
        assert!((t.angle() - PI / 4.0).abs() < EPSILON);
        assert!((t.cos() - (PI / 4.0).cos()).abs() < EPSILON);

        let mut t2 = Transform::identity();
        t2.set_angle(-PI / 3.0);
        assert!((t2.angle() + PI / 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_transform_apply_translation() {
        let t = Transform::from_position(Vec2::new(10.0, 5.0));
        let tp = t.apply(Vec2::new(1.0, 2.0));
        assert!((tp.x - 11.0).abs() < EPSILON);
        assert!((tp.y - 7.0).abs() < EPSILON);
    }

    #[test]
    fn test_transform_apply_combined() {
        // (1,0) rotates to (0,1), then moves to (10,6)
        let t = Transform::new(Vec2::new(10.0, 5.0), PI / 2.0);
        let tp = t.apply(Vec2::new(1.0, 0.0));
        assert!((tp.x - 10.0).abs() < EPSILON);
        assert!((tp.y - 6.0).abs() < EPSILON);
    }

    #[test]
    fn test_transform_apply_inverse() {
        let t = Transform::new(Vec2::new(10.0, 5.0), PI / 4.0);
        let local = Vec2::new(1.0, 1.0);
        let back = t.apply_inverse(t.apply(local));
        assert!((back.x - local.x).abs() < EPSILON);
        assert!((back.y - local.y).abs() < EPSILON);
    }

    #[test]
    fn test_transform_translate_keeps_rotation() {
        let mut t = Transform::new(Vec2::ZERO, 0.5);
        t.translate(Vec2::new(2.0, -1.0));
        assert_eq!(t.position, Vec2::new(2.0, -1.0));
        assert!((t.angle() - 0.5).abs() < EPSILON);
    }
}
