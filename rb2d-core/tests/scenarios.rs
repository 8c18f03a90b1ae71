//! Whole-world scenarios: resting contacts, stacks and the drop test.

use rb2d_core::{
    Body, BoxCollider, CircleCollider, Collider, Material, RestThresholds, Vec2, World,
};

const DT: f64 = 1.0 / 60.0;

/// Screen-space world with a static floor whose top edge is at y = 530.
fn floor_world() -> World {
    let mut world = World::new();
    world.gravity = Vec2::new(0.0, 800.0);
    world.add(
        Body::new_static(Vec2::new(400.0, 550.0)),
        BoxCollider::new(400.0, 20.0),
    );
    world
}

#[test]
fn drop_circle_comes_to_rest_on_floor() {
    let mut world = floor_world();
    let ball = world.add(Body::new(Vec2::new(400.0, 100.0), 1.0), CircleCollider::new(20.0));

    for _ in 0..300 {
        world.step(DT);
    }

    let body = world.body(ball).unwrap();
    let resting_y = 530.0 - 20.0;
    let penetration = body.position.y - resting_y;
    assert!(
        penetration.abs() <= world.penetration_slop + 1e-3,
        "expected y ≈ {}, got {}",
        resting_y,
        body.position.y
    );
    assert!(body.velocity.y.abs() < 1e-6, "vy = {}", body.velocity.y);
    assert_eq!(body.position.x, 400.0);
}

#[test]
fn resting_circle_neither_bounces_nor_sinks() {
    let mut world = floor_world();
    let ball = world.add(Body::new(Vec2::new(200.0, 505.0), 1.0), CircleCollider::new(20.0));

    let mut history = Vec::new();
    for _ in 0..400 {
        world.step(DT);
        let b = world.body(ball).unwrap();
        history.push((b.position.y, b.velocity.y));
    }

    let tail = &history[300..];
    let max_speed = tail.iter().map(|&(_, vy)| vy.abs()).fold(0.0, f64::max);
    let min_y = tail.iter().map(|&(y, _)| y).fold(f64::INFINITY, f64::min);
    let max_y = tail.iter().map(|&(y, _)| y).fold(f64::NEG_INFINITY, f64::max);

    assert!(max_speed < 1e-6, "sustained bounce: |vy| up to {}", max_speed);
    assert!(max_y - min_y < 1e-6, "drifting between {} and {}", min_y, max_y);
    assert!(max_y - 510.0 <= world.penetration_slop + 1e-3, "sank to {}", max_y);
}

#[test]
fn overlapping_static_bodies_are_never_moved() {
    let mut world = World::new();
    world.gravity = Vec2::new(0.0, 800.0);
    let placements = [
        (Vec2::new(0.0, 0.0), Collider::from(BoxCollider::new(10.0, 10.0))),
        (Vec2::new(5.0, 5.0), Collider::from(BoxCollider::new(10.0, 10.0))),
        (Vec2::new(2.0, -3.0), Collider::from(CircleCollider::new(8.0))),
        (Vec2::new(2.0, -3.0), Collider::from(CircleCollider::new(4.0))),
    ];
    let handles: Vec<_> = placements
        .iter()
        .map(|(pos, collider)| world.add(Body::new_static(*pos), *collider))
        .collect();

    for _ in 0..100 {
        world.step(DT);
    }

    for (handle, (pos, _)) in handles.iter().zip(placements.iter()) {
        let body = world.body(*handle).unwrap();
        assert_eq!(body.position, *pos);
        assert_eq!(body.velocity, Vec2::ZERO);
        assert_eq!(body.rotation, 0.0);
        assert_eq!(body.angular_velocity, 0.0);
    }
}

#[test]
fn elastic_circles_exchange_velocities() {
    let mut world = World::new();
    world.gravity = Vec2::ZERO;
    let elastic = Material::new(1.0, 0.4, 0.2);
    let circle = CircleCollider::new(10.0).with_material(elastic);

    let left = world.add(Body::new(Vec2::new(0.0, 0.0), 1.0), circle);
    let right = world.add(Body::new(Vec2::new(20.5, 0.0), 1.0), circle);
    world.body_mut(left).unwrap().velocity = Vec2::new(60.0, 0.0);
    world.body_mut(right).unwrap().velocity = Vec2::new(-60.0, 0.0);

    world.step(DT);

    let l = world.body(left).unwrap();
    let r = world.body(right).unwrap();
    assert!((l.velocity.x - -60.0).abs() < 1e-9, "left vx = {}", l.velocity.x);
    assert!((r.velocity.x - 60.0).abs() < 1e-9, "right vx = {}", r.velocity.x);
    assert_eq!(l.angular_velocity, 0.0);
    assert_eq!(r.angular_velocity, 0.0);
}

#[test]
fn sideways_collision_under_gravity_stays_elastic() {
    let mut world = World::new();
    world.gravity = Vec2::new(0.0, 800.0);
    world.rest_thresholds = RestThresholds {
        circle_circle: 0.0,
        circle_box: 0.0,
        box_box: 0.0,
    };
    let elastic = Material::new(1.0, 0.4, 0.2);
    let circle = CircleCollider::new(10.0).with_material(elastic);

    let left = world.add(Body::new(Vec2::new(0.0, 0.0), 1.0), circle);
    let right = world.add(Body::new(Vec2::new(19.9, 0.0), 1.0), circle);
    world.body_mut(left).unwrap().velocity = Vec2::new(5.0, 0.0);
    world.body_mut(right).unwrap().velocity = Vec2::new(-5.0, 0.0);

    world.step(DT);

    let l = world.body(left).unwrap();
    let r = world.body(right).unwrap();
    assert!((l.velocity.x - -5.0).abs() < 1e-9, "left vx = {}", l.velocity.x);
    assert!((r.velocity.x - 5.0).abs() < 1e-9, "right vx = {}", r.velocity.x);
    // Both still fall together
    assert_eq!(l.velocity.y, r.velocity.y);
}

#[test]
fn box_stack_settles_in_place() {
    let mut world = floor_world();
    let stuck = Material::new(0.0, 0.6, 0.4);
    let crate_ = BoxCollider::new(30.0, 30.0).with_material(stuck);

    let bottom = world.add(Body::new(Vec2::new(400.0, 500.0), 1.0), crate_);
    let middle = world.add(Body::new(Vec2::new(400.0, 440.0), 1.0), crate_);
    let top = world.add(Body::new(Vec2::new(400.0, 380.0), 1.0), crate_);

    for _ in 0..600 {
        world.step(DT);
    }

    let b = world.body(bottom).unwrap();
    let m = world.body(middle).unwrap();
    let t = world.body(top).unwrap();

    assert!(b.position.y > m.position.y && m.position.y > t.position.y);
    for (body, rest_y) in [(b, 500.0), (m, 440.0), (t, 380.0)] {
        assert!(
            (body.position.y - rest_y).abs() < 3.0,
            "box expected near y={}, got {}",
            rest_y,
            body.position.y
        );
        assert_eq!(body.position.x, 400.0, "stack must not drift sideways");
        assert!(body.velocity.y.abs() < 20.0, "vy = {}", body.velocity.y);
        assert_eq!(body.rotation, 0.0, "box/box contacts never spin");
    }
}

#[test]
fn sliding_circle_starts_rolling() {
    let mut world = floor_world();
    let ball = world.add(Body::new(Vec2::new(100.0, 510.0), 1.0), CircleCollider::new(20.0));
    world.body_mut(ball).unwrap().velocity = Vec2::new(100.0, 0.0);

    for _ in 0..60 {
        world.step(DT);
    }

    let body = world.body(ball).unwrap();
    let radius = 20.0;
    let slip = body.velocity.x - radius * body.angular_velocity;
    assert!(slip.abs() < 2.0, "still slipping: {}", slip);
    // A solid disc keeps 2/3 of its sliding speed once it rolls
    assert!(
        (body.velocity.x - 100.0 * 2.0 / 3.0).abs() < 2.0,
        "vx = {}",
        body.velocity.x
    );
    assert!(body.rotation > 0.0);
}

#[test]
fn high_restitution_ball_bounces_lower_each_time() {
    let mut world = floor_world();
    let bouncy = Material::new(0.8, 0.4, 0.2);
    let ball = world.add(
        Body::new(Vec2::new(400.0, 100.0), 1.0),
        CircleCollider::new(20.0).with_material(bouncy),
    );

    // Track the apex (smallest y) between successive floor contacts
    let mut apexes = Vec::new();
    let mut apex = f64::INFINITY;
    let mut rising = false;
    for _ in 0..600 {
        world.step(DT);
        let b = world.body(ball).unwrap();
        if b.velocity.y < 0.0 {
            if !rising {
                rising = true;
                apex = b.position.y;
            }
            apex = apex.min(b.position.y);
        } else if rising && b.velocity.y > 0.0 {
            apexes.push(apex);
            rising = false;
        }
    }

    // Late bounces are shorter than one step of travel; compare the big ones
    assert!(apexes.len() >= 4, "expected several bounces, got {:?}", apexes);
    for pair in apexes.windows(2).take(3) {
        assert!(pair[1] > pair[0], "bounce grew: {:?}", apexes);
    }
    assert!(apexes[0] > 100.0, "no energy gain on the first bounce");
}
