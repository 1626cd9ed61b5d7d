//! Layer geometry - overlap measurement and cutting.
//!
//! When the active layer stops, it is compared against the layer beneath it along
//! its motion axis. The shared footprint survives; the overhang falls away.

use crate::types::{Layer, BOX_HEIGHT, SPAWN_OFFSET};

/// Measurement of the active layer against its support.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cut {
    /// Active offset minus support offset along the motion axis.
    pub delta: f32,
    /// Size of the active layer along its motion axis.
    pub size: f32,
    /// `|delta|`
    pub overhang: f32,
    /// `size - overhang`; non-positive means a miss.
    pub overlap: f32,
    /// Overlap as a rounded percentage, clamped at 0.
    pub overlap_percent: u32,
}

impl Cut {
    pub fn hits(&self) -> bool {
        self.overlap > 0.0
    }
}

/// Result of a successful cut.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// The active layer trimmed to the overlap and re-centred over its support.
    pub kept: Layer,
    /// The discarded side, if any overhung.
    pub debris: Option<Layer>,
    /// The next active layer, one level up, moving on the perpendicular axis.
    pub next: Layer,
}

/// Rounded overlap percentage, never negative.
///
/// # Examples
///
/// ```
/// use tui_stacker_core::geometry::overlap_percent;
///
/// assert_eq!(overlap_percent(2.0, 3.0), 67);
/// assert_eq!(overlap_percent(-1.0, 3.0), 0);
/// ```
pub fn overlap_percent(overlap: f32, size: f32) -> u32 {
    if size <= 0.0 {
        return 0;
    }
    let pct = (overlap / size * 100.0).round();
    if pct > 0.0 {
        pct as u32
    } else {
        0
    }
}

/// Measure `top` against `below` along `top`'s motion axis.
pub fn measure(top: &Layer, below: &Layer) -> Cut {
    let axis = top.axis;
    let size = top.size();
    let delta = top.position.get(axis) - below.position.get(axis);
    let overhang = delta.abs();
    let overlap = size - overhang;

    Cut {
        delta,
        size,
        overhang,
        overlap,
        overlap_percent: overlap_percent(overlap, size),
    }
}

/// Split `top` according to `cut`.
///
/// Returns `None` when nothing overlaps; the caller ends the run.
pub fn split(top: &Layer, cut: &Cut) -> Option<Placement> {
    if !cut.hits() {
        return None;
    }

    let axis = top.axis;

    let mut kept = *top;
    kept.set_size(cut.overlap);
    kept.position.add(axis, -cut.delta / 2.0);

    let debris = if cut.overhang > 0.0 {
        let shift = (cut.overlap / 2.0 + cut.overhang / 2.0) * cut.delta.signum();
        let mut piece = kept;
        piece.set_size(cut.overhang);
        piece.position.add(axis, shift);
        Some(piece)
    } else {
        None
    };

    let next_axis = axis.perpendicular();
    let mut next = Layer::new(kept.position, kept.width, kept.depth, next_axis);
    next.position.y += BOX_HEIGHT;
    next.position.set(next_axis, SPAWN_OFFSET);

    Some(Placement { kept, debris, next })
}
