use crate::collision::sat::WorldShape;
use crate::collision::AABB;
use crate::error::ShapeError;
use crate::math::{Transform, Vec2};
use crate::shapes::{LineWidth, ShapeKind};

/// Stable body identity, assigned by whoever owns the bodies.
pub type BodyId = u32;

/// How the external solver moves a body. Detection only uses it to skip
/// pairs that can never respond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionKind {
    Static,
    #[default]
    Dynamic,
    Kinematic,
}

/// A body as seen by the collision core: identity, shape, transform and a
/// cache of world-space vertices.
///
/// Transform setters only mark the cache stale; `refresh_world_vertices`
/// recomputes it. Queries against a stale body are a caller bug and trip a
/// debug assertion.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    pub uid: BodyId,
    pub motion: MotionKind,
    shape: ShapeKind,
    transform: Transform,
    world_vertices: Vec<Vec2>,
    stale: bool,
}

impl RigidBody {
    /// Creates a new dynamic rigid body.
    ///
    /// # Arguments
    /// * `uid` - Caller-assigned id, copied into manifolds
    /// * `shape` - Local-space shape
    /// * `position` - World position of the shape's local origin
    /// * `angle` - Rotation in radians
    pub fn new(uid: BodyId, shape: ShapeKind, position: Vec2, angle: f64) -> Self {
        let transform = Transform::new(position, angle);
        let world_vertices = shape.world_vertices(&transform);
        Self {
            uid,
            motion: MotionKind::default(),
            shape,
            transform,
            world_vertices,
            stale: false,
        }
    }

    /// Creates a circle body centered on `center`.
    pub fn circle(uid: BodyId, radius: f64, center: Vec2) -> Result<Self, ShapeError> {
        Ok(Self::new(uid, ShapeKind::circle(radius)?, center, 0.0))
    }

    /// Creates a box body.
    ///
    /// # Arguments
    /// * `uid` - Caller-assigned id
    /// * `width`, `height` - Full extents before rotation
    /// * `center` - World position of the box center
    /// * `angle` - Rotation in radians
    pub fn rect(
        uid: BodyId,
        width: f64,
        height: f64,
        center: Vec2,
        angle: f64,
    ) -> Result<Self, ShapeError> {
        Ok(Self::new(uid, ShapeKind::rect(width, height)?, center, angle))
    }

    /// Creates a line-width body spanning two world points.
    ///
    /// # Arguments
    /// * `uid` - Caller-assigned id
    /// * `a`, `b` - World endpoints of the core segment
    /// * `half_width` - Thickness on each side of the segment
    pub fn line_between(
        uid: BodyId,
        a: Vec2,
        b: Vec2,
        half_width: f64,
    ) -> Result<Self, ShapeError> {
        let delta = b - a;
        let line = LineWidth::new(delta.magnitude() / 2.0, half_width)?;
        let angle = delta.y.atan2(delta.x);
        Ok(Self::new(
            uid,
            ShapeKind::LineWidth(line),
            (a + b) / 2.0,
            angle,
        ))
    }

    pub fn with_motion(mut self, motion: MotionKind) -> Self {
        self.motion = motion;
        self
    }

    pub fn is_dynamic(&self) -> bool {
        self.motion == MotionKind::Dynamic
    }

    pub fn shape(&self) -> &ShapeKind {
        &self.shape
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn position(&self) -> Vec2 {
        self.transform.position
    }

    pub fn angle(&self) -> f64 {
        self.transform.angle()
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
        self.stale = true;
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.transform.position = position;
        self.stale = true;
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.transform.translate(delta);
        self.stale = true;
    }

    pub fn set_angle(&mut self, angle: f64) {
        self.transform.set_angle(angle);
        self.stale = true;
    }

    pub fn rotate(&mut self, delta: f64) {
        self.set_angle(self.transform.angle() + delta);
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Recomputes the world vertex cache if the transform changed.
    pub fn refresh_world_vertices(&mut self) {
        if self.stale {
            self.shape
                .world_vertices_into(&self.transform, &mut self.world_vertices);
            self.stale = false;
        }
    }

    pub fn world_vertices(&self) -> &[Vec2] {
        debug_assert!(!self.stale, "body {} queried with stale vertices", self.uid);
        &self.world_vertices
    }

    /// See `ShapeKind::radius`.
    pub fn radius(&self) -> f64 {
        self.shape.radius()
    }

    /// World-space bounds: cached vertices inflated by the shape radius.
    pub fn aabb(&self) -> AABB {
        AABB::from_points(self.world_vertices())
            .unwrap_or_else(|| AABB::new(self.position(), self.position()))
            .inflate(self.radius())
    }

    /// Borrowed world-space view consumed by the narrow phase.
    pub fn world_shape(&self) -> WorldShape<'_> {
        let vertices = self.world_vertices();
        match &self.shape {
            ShapeKind::Circle(c) => WorldShape::Circle {
                center: self.transform.position,
                radius: c.radius,
            },
            ShapeKind::Polygon(_) => WorldShape::Polygon {
                vertices,
                center: self.transform.position,
            },
            ShapeKind::LineWidth(l) => WorldShape::LineWidth {
                endpoints: [vertices[0], vertices[1]],
                half_width: l.half_width,
            },
        }
    }
}
