//! Debris world - rigid-body simulation of the tower and its falling fragments.
//!
//! Tower layers are kinematic cuboids: the active one sweeps across the tower every
//! frame and a cut teleports and shrinks the kept layer. Debris fragments are dynamic
//! cuboids that land on the tower or tumble past it, and leave the world once they
//! fall below the floor height.

use std::collections::BTreeMap;

use rapier3d::prelude::*;

use crate::collab::PhysicsWorld;
use crate::types::{DebrisId, Layer, Vec3, BOX_HEIGHT, DEBRIS_FLOOR_Y, GRAVITY};

/// Slivers still need a positive mass to be simulated.
const MIN_DEBRIS_MASS: f32 = 1e-3;

fn translation(layer: &Layer) -> Vector<Real> {
    vector![layer.position.x, layer.position.y, layer.position.z]
}

fn half_extents(layer: &Layer) -> Vector<Real> {
    vector![layer.width / 2.0, BOX_HEIGHT / 2.0, layer.depth / 2.0]
}

fn cuboid(layer: &Layer) -> ColliderBuilder {
    let h = half_extents(layer);
    ColliderBuilder::cuboid(h.x, h.y, h.z).restitution(0.0)
}

pub struct DebrisWorld {
    gravity: Vector<Real>,
    floor_y: f32,
    params: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    /// Tower layers by stack index.
    statics: BTreeMap<usize, RigidBodyHandle>,
    falling: BTreeMap<DebrisId, RigidBodyHandle>,
}

impl DebrisWorld {
    pub fn new() -> Self {
        Self::with_gravity(GRAVITY, DEBRIS_FLOOR_Y)
    }

    /// World with a custom vertical gravity and out-of-bounds height.
    pub fn with_gravity(gravity: f32, floor_y: f32) -> Self {
        Self {
            gravity: vector![0.0, gravity, 0.0],
            floor_y,
            params: IntegrationParameters::default(),
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            statics: BTreeMap::new(),
            falling: BTreeMap::new(),
        }
    }

    pub fn static_count(&self) -> usize {
        self.statics.len()
    }

    pub fn falling_count(&self) -> usize {
        self.falling.len()
    }

    /// Current centre of a tower layer.
    pub fn static_position(&self, index: usize) -> Option<Vec3> {
        let body = self.bodies.get(*self.statics.get(&index)?)?;
        let t = body.translation();
        Some(Vec3::new(t.x, t.y, t.z))
    }

    fn remove_body(&mut self, handle: RigidBodyHandle) {
        self.bodies.remove(
            handle,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }
}

impl Default for DebrisWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld for DebrisWorld {
    fn add_static(&mut self, index: usize, layer: &Layer) {
        if let Some(old) = self.statics.remove(&index) {
            self.remove_body(old);
        }
        let body = RigidBodyBuilder::kinematic_position_based()
            .translation(translation(layer))
            .build();
        let handle = self.bodies.insert(body);
        self.colliders
            .insert_with_parent(cuboid(layer).build(), handle, &mut self.bodies);
        self.statics.insert(index, handle);
    }

    fn update_static(&mut self, index: usize, layer: &Layer) {
        let Some(&handle) = self.statics.get(&index) else {
            self.add_static(index, layer);
            return;
        };
        let Some(body) = self.bodies.get_mut(handle) else {
            return;
        };

        let extents = half_extents(layer);
        let mut resized = false;
        for &collider in body.colliders() {
            let Some(collider) = self.colliders.get_mut(collider) else {
                continue;
            };
            let same = collider
                .shape()
                .as_cuboid()
                .is_some_and(|c| c.half_extents == extents);
            if !same {
                collider.set_shape(SharedShape::cuboid(extents.x, extents.y, extents.z));
                resized = true;
            }
        }

        // A cut jumps the layer to its kept position; ordinary motion sweeps.
        if resized {
            body.set_translation(translation(layer), true);
        } else {
            body.set_next_kinematic_translation(translation(layer));
        }
    }

    fn remove_static(&mut self, index: usize) {
        if let Some(handle) = self.statics.remove(&index) {
            self.remove_body(handle);
        }
    }

    fn add_falling(&mut self, id: DebrisId, layer: &Layer, mass: f32) {
        if let Some(old) = self.falling.remove(&id) {
            self.remove_body(old);
        }
        let body = RigidBodyBuilder::dynamic()
            .translation(translation(layer))
            .ccd_enabled(true)
            .can_sleep(false)
            .build();
        let handle = self.bodies.insert(body);
        let collider = cuboid(layer).mass(mass.max(MIN_DEBRIS_MASS)).build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        self.falling.insert(id, handle);
    }

    fn step(&mut self, dt_s: f32) {
        if dt_s <= 0.0 {
            return;
        }
        self.params.dt = dt_s;
        self.pipeline.step(
            &self.gravity,
            &self.params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            &(),
            &(),
        );
    }

    fn pose(&self, id: DebrisId) -> Option<Vec3> {
        let body = self.bodies.get(*self.falling.get(&id)?)?;
        let t = body.translation();
        Some(Vec3::new(t.x, t.y, t.z))
    }

    fn drain_out_of_bounds(&mut self, out: &mut Vec<DebrisId>) {
        let start = out.len();
        out.extend(
            self.falling
                .iter()
                .filter(|(_, handle)| {
                    self.bodies
                        .get(**handle)
                        .map_or(true, |b| b.translation().y < self.floor_y)
                })
                .map(|(&id, _)| id),
        );
        for id in &out[start..] {
            if let Some(handle) = self.falling.remove(id) {
                self.remove_body(handle);
            }
        }
    }

    fn clear(&mut self) {
        self.pipeline = PhysicsPipeline::new();
        self.islands = IslandManager::new();
        self.broad_phase = BroadPhaseBvh::new();
        self.narrow_phase = NarrowPhase::new();
        self.bodies = RigidBodySet::new();
        self.colliders = ColliderSet::new();
        self.impulse_joints = ImpulseJointSet::new();
        self.multibody_joints = MultibodyJointSet::new();
        self.ccd_solver = CCDSolver::new();
        self.statics.clear();
        self.falling.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Axis;

    const DT: f32 = 1.0 / 60.0;

    fn slab(x: f32, y: f32, width: f32) -> Layer {
        Layer::new(Vec3::new(x, y, 0.0), width, 3.0, Axis::X)
    }

    fn run(world: &mut DebrisWorld, seconds: f32) {
        let steps = (seconds / DT) as usize;
        for _ in 0..steps {
            world.step(DT);
        }
    }

    fn run_until_drained(world: &mut DebrisWorld, id: DebrisId) -> bool {
        let mut gone = Vec::new();
        for _ in 0..600 {
            world.step(DT);
            world.drain_out_of_bounds(&mut gone);
            if gone.contains(&id) {
                return true;
            }
        }
        false
    }

    #[test]
    fn falling_body_accelerates_down() {
        let mut world = DebrisWorld::new();
        world.add_falling(DebrisId(1), &slab(1.0, 5.0, 1.0), 1.0);

        run(&mut world, 0.25);
        let p1 = world.pose(DebrisId(1)).unwrap();
        run(&mut world, 0.25);
        let p2 = world.pose(DebrisId(1)).unwrap();

        assert!(p1.y < 5.0);
        assert!(5.0 - p1.y < p1.y - p2.y, "second interval should fall further");
        assert!((p2.x - 1.0).abs() < 1e-3);
        assert!(p2.z.abs() < 1e-3);
    }

    #[test]
    fn debris_lands_on_the_tower() {
        let mut world = DebrisWorld::new();
        world.add_static(0, &slab(0.0, 0.0, 3.0));
        world.add_falling(DebrisId(1), &slab(0.0, 2.0, 1.0), 1.0);

        run(&mut world, 2.0);

        let rest = world.pose(DebrisId(1)).unwrap();
        assert!((rest.y - BOX_HEIGHT).abs() < 0.1, "resting at {}", rest.y);
        let mut gone = Vec::new();
        world.drain_out_of_bounds(&mut gone);
        assert!(gone.is_empty());
    }

    #[test]
    fn debris_beside_the_tower_falls_out_of_bounds() {
        let mut world = DebrisWorld::new();
        world.add_static(0, &slab(0.0, 0.0, 3.0));
        world.add_falling(DebrisId(4), &slab(2.5, 0.0, 1.0), 1.0);

        assert!(run_until_drained(&mut world, DebrisId(4)));
        assert!(world.pose(DebrisId(4)).is_none());
        assert_eq!(world.falling_count(), 0);
        assert_eq!(world.static_count(), 1);
    }

    #[test]
    fn statics_do_not_move() {
        let mut world = DebrisWorld::new();
        world.add_static(0, &slab(0.0, 0.0, 3.0));
        run(&mut world, 1.0);
        assert_eq!(world.static_position(0), Some(Vec3::new(0.0, 0.0, 0.0)));
    }

    #[test]
    fn moving_a_static_follows_on_the_next_step() {
        let mut world = DebrisWorld::new();
        world.add_static(2, &slab(0.0, 2.0, 3.0));
        world.update_static(2, &slab(-0.5, 2.0, 3.0));
        world.step(DT);

        let p = world.static_position(2).unwrap();
        assert!((p.x + 0.5).abs() < 1e-4);
        assert_eq!(world.static_count(), 1);
    }

    #[test]
    fn cut_static_drops_what_rested_on_the_lost_part() {
        let mut world = DebrisWorld::new();
        world.add_static(0, &slab(0.0, 0.0, 3.0));
        world.add_falling(DebrisId(2), &slab(1.0, 1.0, 1.0), 1.0);
        run(&mut world, 0.5);
        assert!(world.pose(DebrisId(2)).unwrap().y > 0.5);

        // Keep only the left part of the slab; the fragment no longer has support.
        world.update_static(0, &slab(-1.0, 0.0, 1.0));
        assert!((world.static_position(0).unwrap().x + 1.0).abs() < 1e-4);
        assert!(run_until_drained(&mut world, DebrisId(2)));
    }

    #[test]
    fn removing_a_static_drops_its_load() {
        let mut world = DebrisWorld::new();
        world.add_static(0, &slab(0.0, 0.0, 3.0));
        world.add_falling(DebrisId(3), &slab(0.0, 1.0, 1.0), 1.0);
        run(&mut world, 0.5);

        world.remove_static(0);
        assert_eq!(world.static_count(), 0);
        assert!(run_until_drained(&mut world, DebrisId(3)));
    }

    #[test]
    fn zero_step_is_a_no_op() {
        let mut world = DebrisWorld::new();
        world.add_falling(DebrisId(7), &slab(0.0, 2.0, 1.0), 1.0);
        world.step(0.0);
        assert_eq!(world.pose(DebrisId(7)).unwrap().y, 2.0);
    }

    #[test]
    fn re_adding_an_index_replaces_the_body() {
        let mut world = DebrisWorld::new();
        world.add_static(1, &slab(0.0, 1.0, 3.0));
        world.add_static(1, &slab(2.0, 1.0, 3.0));
        assert_eq!(world.static_count(), 1);
        assert_eq!(world.static_position(1), Some(Vec3::new(2.0, 1.0, 0.0)));
    }

    #[test]
    fn clear_removes_everything() {
        let mut world = DebrisWorld::new();
        world.add_static(0, &slab(0.0, 0.0, 3.0));
        world.add_falling(DebrisId(1), &slab(0.0, 1.0, 1.0), 1.0);
        world.clear();
        assert_eq!(world.static_count(), 0);
        assert_eq!(world.falling_count(), 0);
        assert!(world.pose(DebrisId(1)).is_none());
    }
}
