//! One-time nearest-neighbour index for a fixed point set.
//!
//! The scan is O(N²) and runs once per field creation (startup, resize or a
//! backend being built), never per frame. With the default 20x20 grid that is
//! 160 000 distance evaluations amortized over the whole lifetime of the field.

use glam::Vec2;

use crate::types::PointId;

/// Maximum number of neighbours stored per point.
pub const NEIGHBOR_SLOTS: usize = 5;

/// Fixed-capacity, insertion-ordered list of neighbour ids.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NeighborSlots {
    ids: [u32; NEIGHBOR_SLOTS],
    len: u8,
}

impl NeighborSlots {
    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn get(&self, slot: usize) -> Option<PointId> {
        (slot < self.len()).then(|| self.ids[slot] as PointId)
    }

    pub fn iter(&self) -> impl Iterator<Item = PointId> + '_ {
        self.ids[..self.len()].iter().map(|&id| id as PointId)
    }

    /// Offers `candidate` at squared distance `d2` from the owning point.
    ///
    /// Empty slots are filled first. Once full, the first slot (in slot order)
    /// whose occupant is strictly farther than the candidate is overwritten.
    /// `dist2` returns the squared distance of an occupant to the owning point.
    #[inline]
    fn offer(&mut self, candidate: u32, d2: f32, dist2: impl Fn(u32) -> f32) {
        if self.len() < NEIGHBOR_SLOTS {
            self.ids[self.len()] = candidate;
            self.len += 1;
            return;
        }
        for slot in self.ids.iter_mut() {
            if d2 < dist2(*slot) {
                *slot = candidate;
                return;
            }
        }
    }
}

/// Computes the (approximate) nearest neighbours of every point.
///
/// For each point `p1`, all other points are offered in index order to a
/// [`NeighborSlots`] using squared Euclidean distance. The result is the same
/// first-found-wins selection the per-frame renderer expects: not sorted by
/// distance, and not guaranteed to be the exact k nearest.
///
/// ### Returns
/// One entry per point holding `min(NEIGHBOR_SLOTS, N - 1)` distinct ids, none
/// of them the point itself.
pub fn build_neighbor_index(positions: &[Vec2]) -> Vec<NeighborSlots> {
    debug_assert!(positions.len() <= u32::MAX as usize);

    positions
        .iter()
        .enumerate()
        .map(|(i, &p1)| {
            let mut slots = NeighborSlots::default();
            for (j, &p2) in positions.iter().enumerate() {
                if i == j {
                    continue;
                }
                let d2 = (p1 - p2).length_squared();
                slots.offer(j as u32, d2, |id| (p1 - positions[id as usize]).length_squared());
            }
            slots
        })
        .collect()
}
