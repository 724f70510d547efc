//! Phases command — lists frame-loop timing points

use anyhow::Result;
use tempo_runtime::PlayerLoopTiming;

pub fn run() -> Result<()> {
    for (i, phase) in PlayerLoopTiming::FRAME_ORDER.iter().enumerate() {
        let note = if phase.is_fixed() {
            "  (fixed timestep, may run 0..n times)"
        } else {
            ""
        };
        println!("{}. {}{}", i + 1, phase, note);
    }
    Ok(())
}
