//! Update system trait

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tempo_core::{Result, SystemState};

/// A system driven by a phase runner.
///
/// Each run calls `before_update`, `update` and `after_update` in that order
/// with the same [`SystemState`]. A failure in one stage is reported and the
/// remaining stages still run.
pub trait UpdateSystem {
    /// Called first on every run
    fn before_update(&mut self, _state: &SystemState) -> Result<()> {
        Ok(())
    }

    /// Called once per run for the system's main work
    fn update(&mut self, state: &SystemState) -> Result<()>;

    /// Called last on every run
    fn after_update(&mut self, _state: &SystemState) -> Result<()> {
        Ok(())
    }

    /// Name used for profiling samples and failure reports
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Shared handle to a registered system.
///
/// Runners keep clones of the handle; whoever created the system owns its
/// lifetime. Identity is the allocation, so the same handle added twice runs
/// twice.
pub type SystemRef = Rc<RefCell<dyn UpdateSystem>>;

/// Wrap a system into a handle that can be registered with a runner
pub fn system_ref<S: UpdateSystem + 'static>(system: S) -> SystemRef {
    Rc::new(RefCell::new(system))
}

/// The three stages of a system run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleStage {
    BeforeUpdate,
    Update,
    AfterUpdate,
}

impl LifecycleStage {
    pub const ALL: [LifecycleStage; 3] = [
        LifecycleStage::BeforeUpdate,
        LifecycleStage::Update,
        LifecycleStage::AfterUpdate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LifecycleStage::BeforeUpdate => "before_update",
            LifecycleStage::Update => "update",
            LifecycleStage::AfterUpdate => "after_update",
        }
    }
}

impl fmt::Display for LifecycleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
