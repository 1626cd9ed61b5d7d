//! Stack model - placed layers plus falling debris.
//!
//! Layers are ordered bottom to top; index is identity. Layer `i` rests at height
//! `i * BOX_HEIGHT`. Debris is unordered and keyed by [`DebrisId`].

use crate::types::{Axis, DebrisId, Layer, Vec3, BOX_HEIGHT, DEBRIS_BASE_MASS, SPAWN_OFFSET};

/// A layer fragment handed to the physics world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Debris {
    pub id: DebrisId,
    pub layer: Layer,
    pub mass: f32,
}

#[derive(Debug, Clone, Default)]
pub struct Stack {
    layers: Vec<Layer>,
    debris: Vec<Debris>,
    next_debris_id: u32,
    /// The top layer missed and now only exists as debris.
    fallen: bool,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard everything and lay the two-layer foundation.
    ///
    /// The foundation is static and centred; the first movable layer starts at the
    /// spawn offset on the x axis.
    pub fn reset(&mut self, base_size: f32) {
        self.layers.clear();
        self.debris.clear();
        self.fallen = false;
        self.push_layer(0.0, 0.0, base_size, base_size, Axis::Z);
        self.push_layer(SPAWN_OFFSET, 0.0, base_size, base_size, Axis::X);
    }

    /// Push a layer at the next height.
    pub fn push_layer(&mut self, x: f32, z: f32, width: f32, depth: f32, axis: Axis) -> usize {
        let y = BOX_HEIGHT * self.layers.len() as f32;
        self.layers
            .push(Layer::new(Vec3::new(x, y, z), width, depth, axis));
        self.layers.len() - 1
    }

    /// Mark the top layer as fallen and return it.
    ///
    /// The layer keeps its slot so the sequence (and the score derived from it) is
    /// unchanged, but it no longer stands; callers turn it into debris.
    pub fn fell(&mut self) -> Option<Layer> {
        if self.fallen {
            return None;
        }
        let top = *self.layers.last()?;
        self.fallen = true;
        Some(top)
    }

    pub fn top_fallen(&self) -> bool {
        self.fallen
    }

    /// Layers that still stand (everything except a fallen top).
    pub fn standing(&self) -> &[Layer] {
        if self.fallen {
            &self.layers[..self.layers.len() - 1]
        } else {
            &self.layers
        }
    }

    /// Add a debris fragment; mass scales with its footprint relative to the base size.
    pub fn add_debris(&mut self, layer: Layer, base_size: f32) -> Debris {
        let id = DebrisId(self.next_debris_id);
        self.next_debris_id = self.next_debris_id.wrapping_add(1);

        let mass = if base_size > 0.0 {
            DEBRIS_BASE_MASS * (layer.width / base_size) * (layer.depth / base_size)
        } else {
            DEBRIS_BASE_MASS
        };

        let piece = Debris { id, layer, mass };
        self.debris.push(piece);
        piece
    }

    /// Drop a debris fragment (it left the world).
    pub fn remove_debris(&mut self, id: DebrisId) -> bool {
        let before = self.debris.len();
        self.debris.retain(|d| d.id != id);
        self.debris.len() != before
    }

    pub fn debris_mut(&mut self) -> impl Iterator<Item = &mut Debris> {
        self.debris.iter_mut()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn debris(&self) -> &[Debris] {
        &self.debris
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn top(&self) -> Option<&Layer> {
        self.layers.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Layer> {
        self.layers.last_mut()
    }

    /// The layer directly beneath the top one.
    pub fn support(&self) -> Option<&Layer> {
        let n = self.layers.len();
        if n < 2 {
            return None;
        }
        self.layers.get(n - 2)
    }

    /// Layers placed above the two-layer foundation.
    pub fn placed_count(&self) -> u32 {
        self.layers.len().saturating_sub(2) as u32
    }

    /// Replace the top layer in place (used after a cut).
    pub fn replace_top(&mut self, layer: Layer) -> Option<usize> {
        let idx = self.layers.len().checked_sub(1)?;
        self.layers[idx] = layer;
        Some(idx)
    }
}
