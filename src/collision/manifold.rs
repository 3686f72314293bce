use crate::math::vec2::Vec2;
use crate::objects::BodyId;

/// Result of testing one candidate pair.
///
/// Detection fields are written by the narrow phase (`normal`, `depth`,
/// `is_intersecting`) and then the contact extractor (contact points). The
/// solver-owned fields (`impulse`, `enable_resolve_contact`) are reset by
/// `initialize` but never filled in by this crate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactManifold {
    /// Index of body A in the slice the pair was generated from.
    pub body_a_idx: usize,
    pub body_b_idx: usize,
    pub uid_a: BodyId,
    pub uid_b: BodyId,
    pub is_intersecting: bool,
    /// Unit collision normal, pointing from A towards B.
    pub normal: Vec2,
    /// Penetration along `normal`; non-negative when intersecting.
    pub depth: f64,
    contacts: [Vec2; 2],
    contact_count: usize,
    pub impulse: Vec2,
    pub enable_resolve_contact: bool,
}

impl ContactManifold {
    /// Creates a new, non-intersecting manifold for a pair of bodies.
    ///
    /// # Arguments
    /// * `body_a_idx`, `body_b_idx` - Slice indices of the two bodies
    /// * `uid_a`, `uid_b` - Their uids
    pub fn new(body_a_idx: usize, uid_a: BodyId, body_b_idx: usize, uid_b: BodyId) -> Self {
        let mut manifold = Self {
            body_a_idx: 0,
            body_b_idx: 0,
            uid_a: 0,
            uid_b: 0,
            is_intersecting: false,
            normal: Vec2::ZERO,
            depth: 0.0,
            contacts: [Vec2::ZERO; 2],
            contact_count: 0,
            impulse: Vec2::ZERO,
            enable_resolve_contact: false,
        };
        manifold.initialize(body_a_idx, uid_a, body_b_idx, uid_b);
        manifold
    }

    /// Rebinds the manifold to a new pair and clears every detection field,
    /// so pooled instances can be reused.
    pub fn initialize(&mut self, body_a_idx: usize, uid_a: BodyId, body_b_idx: usize, uid_b: BodyId) {
        self.body_a_idx = body_a_idx;
        self.body_b_idx = body_b_idx;
        self.uid_a = uid_a;
        self.uid_b = uid_b;
        self.is_intersecting = false;
        self.normal = Vec2::ZERO;
        self.depth = 0.0;
        self.contacts = [Vec2::ZERO; 2];
        self.contact_count = 0;
        self.impulse = Vec2::ZERO;
        self.enable_resolve_contact = true;
    }

    pub fn contact_count(&self) -> usize {
        self.contact_count
    }

    pub fn contact1(&self) -> Option<Vec2> {
        self.contact_points().first().copied()
    }

    pub fn contact2(&self) -> Option<Vec2> {
        self.contact_points().get(1).copied()
    }

    pub fn contact_points(&self) -> &[Vec2] {
        &self.contacts[..self.contact_count]
    }

    /// Replaces the contact points. Only the first two are kept.
    pub fn set_contacts(&mut self, points: &[Vec2]) {
        let count = points.len().min(2);
        self.contacts[..count].copy_from_slice(&points[..count]);
        self.contact_count = count;
    }
}

/// Reusable storage for the manifolds of one step.
///
/// `begin_step` forgets the previous step's results without freeing them;
/// `acquire` hands out the next slot, reinitialized for the given pair.
#[derive(Debug, Default)]
pub struct ManifoldPool {
    manifolds: Vec<ContactManifold>,
    active: usize,
}

impl ManifoldPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a pool with room for `capacity` manifolds before it grows.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            manifolds: Vec::with_capacity(capacity),
            active: 0,
        }
    }

    pub fn begin_step(&mut self) {
        self.active = 0;
    }

    pub fn acquire(
        &mut self,
        body_a_idx: usize,
        uid_a: BodyId,
        body_b_idx: usize,
        uid_b: BodyId,
    ) -> &mut ContactManifold {
        if self.active == self.manifolds.len() {
            self.manifolds
                .push(ContactManifold::new(body_a_idx, uid_a, body_b_idx, uid_b));
        } else {
            self.manifolds[self.active].initialize(body_a_idx, uid_a, body_b_idx, uid_b);
        }
        self.active += 1;
        &mut self.manifolds[self.active - 1]
    }

    /// Returns the most recently acquired slot to the pool.
    pub fn discard_last(&mut self) {
        self.active = self.active.saturating_sub(1);
    }

    pub fn active(&self) -> &[ContactManifold] {
        &self.manifolds[..self.active]
    }

    /// Slots allocated so far, active or not.
    pub fn capacity(&self) -> usize {
        self.manifolds.len()
    }
}
