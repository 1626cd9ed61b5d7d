//! Pointer mapping - mouse presses to hit targets.

use crate::types::{HitRegions, PointerTarget};
use crossterm::event::{MouseEvent, MouseEventKind};

/// Resolve a mouse event against the overlay hit regions.
///
/// Only button presses count; moves, drags, releases and scrolling map to nothing.
pub fn pointer_target(event: MouseEvent, regions: &HitRegions) -> Option<PointerTarget> {
    match event.kind {
        MouseEventKind::Down(_) => Some(regions.target_at(event.column, event.row)),
        _ => None,
    }
}
