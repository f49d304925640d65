//! Pointer repulsion with a damped spring back to rest.

use glyphwave_core::PhysicsParams;

use crate::grid::Cell;

/// Pointer location in logical grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub x: f32,
    pub y: f32,
}

impl Pointer {
    /// Sentinel for "no pointer": far enough that no cell is ever inside the radius.
    pub const FAR_AWAY: Pointer = Pointer {
        x: -1.0e6,
        y: -1.0e6,
    };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_far_away(&self) -> bool {
        *self == Self::FAR_AWAY
    }
}

impl Default for Pointer {
    fn default() -> Self {
        Self::FAR_AWAY
    }
}

/// Advance every cell by one frame.
///
/// Repulsion is measured from the pointer to the cell's rest position, not its
/// displaced position.
pub fn step(cells: &mut [Cell], pointer: Pointer, params: &PhysicsParams) {
    for cell in cells {
        let dx = cell.rest_x - pointer.x;
        let dy = cell.rest_y - pointer.y;
        let dist = (dx * dx + dy * dy).sqrt();

        if dist > 0.0 && dist < params.repel_radius {
            let force = (1.0 - dist / params.repel_radius) * params.repel_strength;
            cell.vx += dx / dist * force;
            cell.vy += dy / dist * force;
        }

        cell.vx += (cell.rest_x - cell.x) * params.spring;
        cell.vy += (cell.rest_y - cell.y) * params.spring;

        cell.vx *= params.damping;
        cell.vy *= params.damping;

        cell.x += cell.vx;
        cell.y += cell.vy;
    }
}
