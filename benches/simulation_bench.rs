use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use impulse_engine::{
    collision::find_collisions, EngineConfig, ForceField, PhysicsWorld, RigidBody, Shape,
    Rectangle, Vec2,
};

const DT: f64 = 1.0 / 60.0;
const STEPS: usize = 30;

fn ground(world: &mut PhysicsWorld, width: f64) {
    let shape = Shape::Rectangle(Rectangle::new(width, 1.0).unwrap());
    world.add_static_body(shape, Vec2::new(0.0, -0.5), 0.0).unwrap();
}

fn simulate(world: &mut PhysicsWorld) {
    for _ in 0..STEPS {
        black_box(world.step(black_box(DT)));
    }
}

fn circle_stack_world(num_circles: usize) -> PhysicsWorld {
    let radius = 0.5;
    let config = EngineConfig::default().with_solver_iterations(4);
    let mut world = PhysicsWorld::with_config(config).unwrap();
    world.add_field(ForceField::default_gravity());
    ground(&mut world, 4.0);

    for i in 0..num_circles {
        // Stack with a slight gap
        let y = radius + i as f64 * radius * 2.1;
        world.add_body(RigidBody::circle(radius, Vec2::new(0.0, y), 1.0).unwrap()).unwrap();
    }
    world
}

fn box_pile_world(num_boxes: usize) -> PhysicsWorld {
    let per_row = 10;
    let mut world = PhysicsWorld::new();
    world.add_field(ForceField::default_gravity());
    ground(&mut world, per_row as f64 * 1.2 + 2.0);

    for i in 0..num_boxes {
        let column = (i % per_row) as f64;
        let row = (i / per_row) as f64;
        let position = Vec2::new(column * 1.05 - per_row as f64 * 0.5, 0.5 + row * 1.05);
        let rotation = 0.05 * (i % 7) as f64;
        world
            .add_body(RigidBody::rectangle(1.0, 1.0, position, rotation, 1.0).unwrap())
            .unwrap();
    }
    world
}

// A stack of circles falling onto a static ground
fn bench_circle_stack(c: &mut Criterion) {
    let mut group = c.benchmark_group("circle_stack");

    for num_circles in [10, 100, 500].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(num_circles), num_circles, |b, &n| {
            b.iter(|| {
                let mut world = circle_stack_world(black_box(n));
                simulate(&mut world);
            });
        });
    }
    group.finish();
}

// A grid of slightly rotated boxes settling on the ground
fn bench_box_pile(c: &mut Criterion) {
    let mut group = c.benchmark_group("box_pile");

    for num_boxes in [10, 100, 500].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(num_boxes), num_boxes, |b, &n| {
            b.iter(|| {
                let mut world = box_pile_world(black_box(n));
                simulate(&mut world);
            });
        });
    }
    group.finish();
}

// Detection alone, on a fixed scene
fn bench_detection(c: &mut Criterion) {
    let mut group = c.benchmark_group("detection");

    for num_boxes in [10, 100, 500].iter() {
        let bodies = box_pile_world(*num_boxes).bodies().to_vec();
        group.bench_with_input(BenchmarkId::from_parameter(num_boxes), &bodies, |b, bodies| {
            b.iter(|| black_box(find_collisions(black_box(bodies))));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_circle_stack, bench_box_pile, bench_detection);
criterion_main!(benches);
