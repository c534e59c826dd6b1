//! Fixed-capacity particle arena with active and free index lists.
//!
//! Slots are constructed lazily, one per emission, until `capacity` slots
//! exist. After that every emission reuses a retired slot. Both index lists
//! reserve `capacity` entries up front, so moving a particle between them
//! never reallocates.

use super::Particle;

/// Arena of particle slots split into disjoint active and free sets.
///
/// Invariant: `active.len() + free.len() == slots.len() <= capacity`, and
/// every slot index appears in exactly one of the two lists.
#[derive(Debug, Clone)]
pub struct ParticlePool {
    slots: Vec<Particle>,
    active: Vec<u32>,
    free: Vec<u32>,
    capacity: usize,
}

impl ParticlePool {
    /// Empty pool able to hold up to `capacity` particles.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            active: Vec::with_capacity(capacity),
            free: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Maximum number of slots this pool will ever construct.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of live particles.
    #[must_use]
    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    /// Number of retired slots waiting for reuse.
    #[must_use]
    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    /// Number of slots constructed so far. Never decreases.
    #[must_use]
    pub fn constructed(&self) -> usize {
        self.slots.len()
    }

    /// Whether no particle is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Activate a slot, preferring a retired one over constructing anew.
    ///
    /// Returns `None` when every slot is live and the pool is at capacity.
    /// The returned particle still holds whatever it held before; callers
    /// overwrite it.
    pub fn acquire(&mut self) -> Option<&mut Particle> {
        let index = if let Some(index) = self.free.pop() {
            index
        } else if self.slots.len() < self.capacity {
            self.slots.push(Particle::default());
            (self.slots.len() - 1) as u32
        } else {
            return None;
        };
        self.active.push(index);
        Some(&mut self.slots[index as usize])
    }

    /// Move every live particle matching `expired` to the free list.
    ///
    /// Visits each live particle once. Survivors keep their relative order.
    /// Returns the number retired.
    pub fn retire_where(
        &mut self,
        mut expired: impl FnMut(&Particle) -> bool,
    ) -> usize {
        let before = self.active.len();
        let slots = &self.slots;
        let free = &mut self.free;
        self.active.retain(|&index| {
            if expired(&slots[index as usize]) {
                free.push(index);
                false
            } else {
                true
            }
        });
        before - self.active.len()
    }

    /// Retire every live particle. Returns how many were live.
    pub fn retire_all(&mut self) -> usize {
        let count = self.active.len();
        self.free.extend(self.active.drain(..));
        count
    }

    /// Live particles in traversal order.
    pub fn iter_active(&self) -> impl Iterator<Item = &Particle> + '_ {
        self.active.iter().map(|&index| &self.slots[index as usize])
    }

    /// Apply `f` to every live particle in traversal order.
    pub fn for_each_active_mut(&mut self, mut f: impl FnMut(&mut Particle)) {
        for &index in &self.active {
            f(&mut self.slots[index as usize]);
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    fn assert_conserved(pool: &ParticlePool) {
        assert_eq!(pool.active_len() + pool.free_len(), pool.constructed());
        assert!(pool.constructed() <= pool.capacity());
    }

    #[test]
    fn acquire_constructs_until_capacity() {
        let mut pool = ParticlePool::with_capacity(3);
        for _ in 0..3 {
            assert!(pool.acquire().is_some());
        }
        assert!(pool.acquire().is_none());
        assert_eq!(pool.active_len(), 3);
        assert_eq!(pool.constructed(), 3);
        assert_conserved(&pool);
    }

    #[test]
    fn retired_slots_are_reused_before_constructing() {
        let mut pool = ParticlePool::with_capacity(4);
        for i in 0..2 {
            if let Some(p) = pool.acquire() {
                p.start_time = i as f32;
            }
        }
        assert_eq!(pool.retire_where(|p| p.start_time == 0.0), 1);
        assert_eq!(pool.free_len(), 1);

        let reused = pool.acquire().map(|p| p.start_time);
        // Contents survive retirement until the next emission overwrites
        // them.
        assert_eq!(reused, Some(0.0));
        assert_eq!(pool.constructed(), 2);
        assert_eq!(pool.free_len(), 0);
        assert_conserved(&pool);
    }

    #[test]
    fn retire_keeps_survivor_order() {
        let mut pool = ParticlePool::with_capacity(5);
        for i in 0..5 {
            if let Some(p) = pool.acquire() {
                p.position = Vec3::splat(i as f32);
            }
        }
        let retired = pool.retire_where(|p| p.position.x as u32 % 2 == 1);
        assert_eq!(retired, 2);
        let xs: Vec<f32> = pool.iter_active().map(|p| p.position.x).collect();
        assert_eq!(xs, vec![0.0, 2.0, 4.0]);
        assert_conserved(&pool);
    }

    #[test]
    fn retire_all_is_idempotent() {
        let mut pool = ParticlePool::with_capacity(8);
        for _ in 0..5 {
            let _ = pool.acquire();
        }
        assert_eq!(pool.retire_all(), 5);
        assert_eq!(pool.retire_all(), 0);
        assert!(pool.is_empty());
        assert_eq!(pool.free_len(), 5);
        assert_conserved(&pool);
    }

    #[test]
    fn for_each_active_mut_skips_free_slots() {
        let mut pool = ParticlePool::with_capacity(3);
        for _ in 0..3 {
            let _ = pool.acquire();
        }
        let _ = pool.retire_where(|_| true);
        let _ = pool.acquire();

        let mut visited = 0;
        pool.for_each_active_mut(|p| {
            p.velocity = Vec3::ONE;
            visited += 1;
        });
        assert_eq!(visited, 1);
    }
}
