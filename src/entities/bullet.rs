use super::entity::Entity;

pub const BULLET_WIDTH: i32 = 6;
pub const BULLET_HEIGHT: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Enemy,
}

/// A projectile. The sign of `speed` encodes the direction: negative moves
/// up (fired by the player), positive moves down (fired by an enemy).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bullet {
    pub entity: Entity,
    pub speed: i32,
}

impl Bullet {
    pub fn new(x: i32, y: i32, speed: i32) -> Self {
        Self {
            entity: Entity::new(x, y, BULLET_WIDTH, BULLET_HEIGHT),
            speed,
        }
    }

    /// Re-arm a recycled bullet
    fn reset(&mut self, x: i32, y: i32, speed: i32) {
        self.entity.x = x;
        self.entity.y = y;
        self.speed = speed;
    }

    pub fn update(&mut self) {
        self.entity.y += self.speed;
    }

    /// Zero speed never happens for pooled bullets; it reads as the player's
    pub fn owner(&self) -> BulletOwner {
        if self.speed > 0 {
            BulletOwner::Enemy
        } else {
            BulletOwner::Player
        }
    }

    /// True once the bullet has left the band between `min_y` and `max_y`
    pub fn is_out_of_bounds(&self, min_y: i32, max_y: i32) -> bool {
        self.entity.y < min_y || self.entity.y > max_y
    }
}

/// Handle to a slot in a [`BulletPool`].
///
/// The generation changes every time the slot is recycled, so a handle kept
/// after its bullet was returned never resolves to the slot's next tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BulletId {
    index: u32,
    generation: u32,
}

#[derive(Debug, Clone)]
struct Slot {
    bullet: Bullet,
    generation: u32,
    active: bool,
}

/// Arena of bullets. Holds both the bullets in flight and the recycled ones
/// waiting to be reused; a slot is never in both states at once.
#[derive(Debug, Clone, Default)]
pub struct BulletPool {
    slots: Vec<Slot>,
    free: Vec<u32>,
    active: usize,
}

impl BulletPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a bullet in flight, reusing a recycled slot when one exists.
    ///
    /// `speed` must be nonzero: its sign is the only record of who fired.
    pub fn spawn(&mut self, x: i32, y: i32, speed: i32) -> BulletId {
        debug_assert!(speed != 0, "bullet speed must be nonzero");
        self.active += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.bullet.reset(x, y, speed);
            slot.active = true;
            return BulletId {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            bullet: Bullet::new(x, y, speed),
            generation: 0,
            active: true,
        });
        BulletId {
            index,
            generation: 0,
        }
    }

    /// Return a bullet to the pool. Stale handles are ignored.
    pub fn recycle(&mut self, id: BulletId) -> bool {
        match self.slots.get_mut(id.index as usize) {
            Some(slot) if slot.active && slot.generation == id.generation => {
                slot.active = false;
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(id.index);
                self.active -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, id: BulletId) -> Option<&Bullet> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.active && slot.generation == id.generation)
            .map(|slot| &slot.bullet)
    }

    pub fn get_mut(&mut self, id: BulletId) -> Option<&mut Bullet> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.active && slot.generation == id.generation)
            .map(|slot| &mut slot.bullet)
    }

    pub fn contains(&self, id: BulletId) -> bool {
        self.get(id).is_some()
    }

    /// Bullets in flight, in slot order
    pub fn iter(&self) -> impl Iterator<Item = (BulletId, &Bullet)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.active)
            .map(|(index, slot)| {
                (
                    BulletId {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    &slot.bullet,
                )
            })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Bullet> {
        self.slots
            .iter_mut()
            .filter(|slot| slot.active)
            .map(|slot| &mut slot.bullet)
    }

    pub fn ids(&self) -> Vec<BulletId> {
        self.iter().map(|(id, _)| id).collect()
    }

    /// Number of bullets in flight
    pub fn len(&self) -> usize {
        self.active
    }

    pub fn is_empty(&self) -> bool {
        self.active == 0
    }

    /// Recycled slots ready for reuse
    pub fn free_slots(&self) -> usize {
        self.free.len()
    }

    /// Recycle every bullet in flight
    pub fn clear(&mut self) {
        for id in self.ids() {
            self.recycle(id);
        }
    }
}
