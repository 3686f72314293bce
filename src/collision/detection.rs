use super::contacts;
use super::manifold::ContactManifold;
use super::sat;
use crate::objects::RigidBody;
use crate::shapes::ShapeTag;

/// Unordered shape-kind combination of a candidate pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PairKind {
    CircleCircle,
    CirclePolygon,
    CircleLine,
    PolygonPolygon,
    PolygonLine,
    LineLine,
}

// Indexed by `tag_index` of each side; symmetric.
const PAIR_TABLE: [[PairKind; 3]; 3] = [
    [PairKind::CircleCircle, PairKind::CirclePolygon, PairKind::CircleLine],
    [PairKind::CirclePolygon, PairKind::PolygonPolygon, PairKind::PolygonLine],
    [PairKind::CircleLine, PairKind::PolygonLine, PairKind::LineLine],
];

const fn tag_index(tag: ShapeTag) -> usize {
    match tag {
        ShapeTag::Circle => 0,
        ShapeTag::Polygon => 1,
        ShapeTag::LineWidth => 2,
    }
}

impl PairKind {
    pub fn of(a: ShapeTag, b: ShapeTag) -> Self {
        PAIR_TABLE[tag_index(a)][tag_index(b)]
    }

    /// Pairs whose contact point has a closed form (one side is a circle).
    pub fn involves_circle(self) -> bool {
        matches!(
            self,
            PairKind::CircleCircle | PairKind::CirclePolygon | PairKind::CircleLine
        )
    }
}

/// Full narrow phase for one pair: SAT, then contact points if the shapes
/// overlap. The manifold must already be initialized for this pair.
pub fn check_collision(
    body_a: &RigidBody,
    body_b: &RigidBody,
    manifold: &mut ContactManifold,
    contact_tolerance: f64,
) -> bool {
    let a = body_a.world_shape();
    let b = body_b.world_shape();
    if !sat::intersect(&a, &b, manifold) {
        return false;
    }
    contacts::find_contact_points(&a, &b, manifold, contact_tolerance);
    log::trace!(
        "bodies {} and {} intersect: depth={:.4}, normal={:?}, contacts={}",
        body_a.uid,
        body_b.uid,
        manifold.depth,
        manifold.normal,
        manifold.contact_count()
    );
    true
}
