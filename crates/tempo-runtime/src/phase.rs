//! Frame-loop timing points

use std::fmt;
use std::str::FromStr;
use tempo_core::TempoError;

/// A named point in the per-frame update cycle at which systems run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlayerLoopTiming {
    Initialization,
    EarlyUpdate,
    FixedUpdate,
    PreUpdate,
    Update,
    PreLateUpdate,
    PostLateUpdate,
    TimeUpdate,
}

impl PlayerLoopTiming {
    /// Every timing point, in declaration order
    pub const ALL: [PlayerLoopTiming; 8] = [
        PlayerLoopTiming::Initialization,
        PlayerLoopTiming::EarlyUpdate,
        PlayerLoopTiming::FixedUpdate,
        PlayerLoopTiming::PreUpdate,
        PlayerLoopTiming::Update,
        PlayerLoopTiming::PreLateUpdate,
        PlayerLoopTiming::PostLateUpdate,
        PlayerLoopTiming::TimeUpdate,
    ];

    /// Order in which a frame visits the timing points. Time is advanced
    /// before anything else runs.
    pub const FRAME_ORDER: [PlayerLoopTiming; 8] = [
        PlayerLoopTiming::TimeUpdate,
        PlayerLoopTiming::Initialization,
        PlayerLoopTiming::EarlyUpdate,
        PlayerLoopTiming::FixedUpdate,
        PlayerLoopTiming::PreUpdate,
        PlayerLoopTiming::Update,
        PlayerLoopTiming::PreLateUpdate,
        PlayerLoopTiming::PostLateUpdate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PlayerLoopTiming::Initialization => "initialization",
            PlayerLoopTiming::EarlyUpdate => "early_update",
            PlayerLoopTiming::FixedUpdate => "fixed_update",
            PlayerLoopTiming::PreUpdate => "pre_update",
            PlayerLoopTiming::Update => "update",
            PlayerLoopTiming::PreLateUpdate => "pre_late_update",
            PlayerLoopTiming::PostLateUpdate => "post_late_update",
            PlayerLoopTiming::TimeUpdate => "time_update",
        }
    }

    /// Whether this phase reads the fixed-timestep time sources
    pub fn is_fixed(self) -> bool {
        self == PlayerLoopTiming::FixedUpdate
    }

    /// Position in [`PlayerLoopTiming::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for PlayerLoopTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlayerLoopTiming {
    type Err = TempoError;

    /// Accepts snake_case or kebab-case names, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        PlayerLoopTiming::ALL
            .into_iter()
            .find(|phase| phase.as_str() == normalized)
            .ok_or_else(|| TempoError::UnknownPhase(s.to_string()))
    }
}
