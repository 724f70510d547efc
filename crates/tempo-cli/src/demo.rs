//! Demo systems operating on a shared hecs world

use std::cell::RefCell;
use std::rc::Rc;
use tempo_convert::{ConversionMode, ConversionOptions};
use tempo_core::{Result, SystemState, TempoError};
use tempo_runtime::UpdateSystem;

pub type SharedWorld = Rc<RefCell<hecs::World>>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position(pub f32, pub f32);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Velocity(pub f32, pub f32);

/// Seconds left before the entity is despawned
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lifetime(pub f32);

/// Engine-side data that only converts when hybrid components are enabled
#[derive(Debug, Clone, PartialEq)]
pub struct Label(pub String);

/// Marks an entity whose source object was kept alive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceObject(pub usize);

/// A scene object waiting to be converted
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub position: Position,
    pub velocity: Velocity,
    pub lifetime: Option<f32>,
}

/// Converts pending scene objects into entities on its first run
pub struct ConversionSystem {
    world: SharedWorld,
    scene: Rc<RefCell<Vec<SceneObject>>>,
    options: ConversionOptions,
    converted: bool,
}

impl ConversionSystem {
    pub fn new(
        world: SharedWorld,
        scene: Rc<RefCell<Vec<SceneObject>>>,
        options: ConversionOptions,
    ) -> Self {
        Self {
            world,
            scene,
            options,
            converted: false,
        }
    }
}

impl UpdateSystem for ConversionSystem {
    fn update(&mut self, _state: &SystemState) -> Result<()> {
        if self.converted {
            return Ok(());
        }

        let mut world = self.world.borrow_mut();
        for (index, object) in self.scene.borrow().iter().enumerate() {
            let entity = world.spawn((object.position, object.velocity));
            if let Some(seconds) = object.lifetime {
                world
                    .insert_one(entity, Lifetime(seconds))
                    .map_err(|e| TempoError::system(e.to_string()))?;
            }
            if self.options.convert_hybrid_components {
                world
                    .insert_one(entity, Label(object.name.clone()))
                    .map_err(|e| TempoError::system(e.to_string()))?;
            }
            if self.options.mode == ConversionMode::ConvertAndInjectGameObject {
                world
                    .insert_one(entity, SourceObject(index))
                    .map_err(|e| TempoError::system(e.to_string()))?;
            }
        }
        self.converted = true;
        Ok(())
    }

    fn after_update(&mut self, _state: &SystemState) -> Result<()> {
        if self.converted && self.options.mode == ConversionMode::ConvertAndDestroy {
            self.scene.borrow_mut().clear();
        }
        Ok(())
    }
}

/// Integrates velocity into position
pub struct MovementSystem {
    world: SharedWorld,
}

impl MovementSystem {
    pub fn new(world: SharedWorld) -> Self {
        Self { world }
    }
}

impl UpdateSystem for MovementSystem {
    fn update(&mut self, state: &SystemState) -> Result<()> {
        let mut world = self.world.borrow_mut();
        for (_, (pos, vel)) in world.query_mut::<(&mut Position, &Velocity)>() {
            pos.0 += vel.0 * state.delta_time;
            pos.1 += vel.1 * state.delta_time;
        }
        Ok(())
    }
}

/// Counts lifetimes down and despawns expired entities
pub struct LifetimeSystem {
    world: SharedWorld,
    expired: Vec<hecs::Entity>,
    despawned: usize,
}

impl LifetimeSystem {
    pub fn new(world: SharedWorld) -> Self {
        Self {
            world,
            expired: Vec::new(),
            despawned: 0,
        }
    }

    pub fn despawned(&self) -> usize {
        self.despawned
    }
}

impl UpdateSystem for LifetimeSystem {
    fn update(&mut self, state: &SystemState) -> Result<()> {
        let mut world = self.world.borrow_mut();
        for (entity, lifetime) in world.query_mut::<&mut Lifetime>() {
            lifetime.0 -= state.delta_time;
            if lifetime.0 <= 0.0 {
                self.expired.push(entity);
            }
        }
        Ok(())
    }

    fn after_update(&mut self, _state: &SystemState) -> Result<()> {
        let mut world = self.world.borrow_mut();
        for entity in self.expired.drain(..) {
            if world.despawn(entity).is_ok() {
                self.despawned += 1;
            }
        }
        Ok(())
    }
}

/// Fails its update every `period` runs
pub struct FaultySystem {
    period: u64,
    runs: u64,
}

impl FaultySystem {
    pub fn new(period: u64) -> Self {
        Self {
            period: period.max(1),
            runs: 0,
        }
    }
}

impl UpdateSystem for FaultySystem {
    fn update(&mut self, _state: &SystemState) -> Result<()> {
        self.runs += 1;
        if self.runs % self.period == 0 {
            return Err(TempoError::system(format!("scheduled failure on run {}", self.runs)));
        }
        Ok(())
    }
}
