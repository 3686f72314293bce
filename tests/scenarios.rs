use approx::assert_relative_eq;

use physics_collision::collision::check_collision;
use physics_collision::{
    CollisionConfig, CollisionPipeline, ContactManifold, MotionKind, RigidBody, Vec2, AABB,
};

const TOLERANCE: f64 = 5e-4;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn collide(a: &RigidBody, b: &RigidBody) -> Option<ContactManifold> {
    let mut m = ContactManifold::new(0, a.uid, 1, b.uid);
    check_collision(a, b, &mut m, TOLERANCE).then_some(m)
}

#[test]
fn overlapping_circles() {
    let a = RigidBody::circle(1, 5.0, Vec2::new(0.0, 0.0)).unwrap();
    let b = RigidBody::circle(2, 4.0, Vec2::new(8.0, 0.0)).unwrap();
    let m = collide(&a, &b).expect("circles overlap");
    assert!(m.is_intersecting);
    assert_relative_eq!(m.depth, 1.0, epsilon = 1e-9);
    assert_relative_eq!(m.normal.x, 1.0, epsilon = 1e-9);
    assert_relative_eq!(m.normal.y, 0.0, epsilon = 1e-9);
}

#[test]
fn distant_circles() {
    let a = RigidBody::circle(1, 5.0, Vec2::new(0.0, 0.0)).unwrap();
    let b = RigidBody::circle(2, 4.0, Vec2::new(20.0, 0.0)).unwrap();
    assert!(collide(&a, &b).is_none());
}

#[test]
fn overlapping_boxes() {
    let a = RigidBody::rect(1, 10.0, 10.0, Vec2::new(0.0, 0.0), 0.0).unwrap();
    let b = RigidBody::rect(2, 10.0, 10.0, Vec2::new(9.0, 0.0), 0.0).unwrap();
    let m = collide(&a, &b).expect("boxes overlap");
    assert_relative_eq!(m.depth, 1.0, epsilon = 1e-9);
    assert_relative_eq!(m.normal.x.abs(), 1.0, epsilon = 1e-9);
    assert_relative_eq!(m.normal.y, 0.0, epsilon = 1e-9);
}

#[test]
fn line_against_circles() {
    let line = RigidBody::line_between(1, Vec2::new(-10.0, 0.0), Vec2::new(10.0, 0.0), 1.0)
        .unwrap();
    let far = RigidBody::circle(2, 3.0, Vec2::new(0.0, 5.0)).unwrap();
    assert!(collide(&line, &far).is_none());

    let near = RigidBody::circle(3, 3.0, Vec2::new(0.0, 3.0)).unwrap();
    let m = collide(&line, &near).expect("circle rests in the line");
    assert_relative_eq!(m.depth, 1.0, epsilon = 1e-9);
    assert_relative_eq!(m.normal.y, 1.0, epsilon = 1e-9);
}

#[test]
fn nearly_coincident_boxes_have_two_contacts() {
    let a = RigidBody::rect(1, 10.0, 10.0, Vec2::new(0.0, 0.0), 0.0).unwrap();
    let b = RigidBody::rect(2, 10.0, 10.0, Vec2::new(0.1, 0.1), 0.0).unwrap();
    let m = collide(&a, &b).expect("boxes overlap");
    assert_eq!(m.contact_count(), 2);
    let (c1, c2) = (m.contact1().unwrap(), m.contact2().unwrap());
    assert!(!c1.nearly_equal(c2, TOLERANCE));
}

#[test]
fn pipeline_finds_pile_contacts() {
    init_logger();
    let config = CollisionConfig {
        bounds: AABB::new(Vec2::new(0.0, 0.0), Vec2::new(200.0, 200.0)),
        cell_size: 16.0,
        ..Default::default()
    };
    let mut pipeline = CollisionPipeline::new(config).unwrap();

    let mut bodies = vec![
        RigidBody::line_between(0, Vec2::new(10.0, 10.0), Vec2::new(190.0, 10.0), 2.0)
            .unwrap()
            .with_motion(MotionKind::Static),
        RigidBody::rect(1, 20.0, 20.0, Vec2::new(50.0, 21.0), 0.0).unwrap(),
        RigidBody::circle(2, 10.0, Vec2::new(100.0, 21.0)).unwrap(),
        RigidBody::rect(3, 20.0, 20.0, Vec2::new(50.0, 40.0), 0.0).unwrap(),
        RigidBody::circle(4, 5.0, Vec2::new(150.0, 150.0)).unwrap(),
    ];

    let uids: Vec<_> = pipeline
        .step(&mut bodies)
        .iter()
        .map(|m| (m.uid_a, m.uid_b))
        .collect();
    // Box and circle sink 1 into the ground; the top box sinks 1 into the
    // bottom one.
    assert_eq!(uids, vec![(0, 1), (0, 2), (1, 3)]);
    for m in pipeline.manifolds() {
        assert_relative_eq!(m.depth, 1.0, epsilon = 1e-9);
        assert_relative_eq!(m.normal.y, 1.0, epsilon = 1e-9);
        assert!(m.contact_count() >= 1);
    }
}
