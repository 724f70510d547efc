//! Per-invocation time snapshot

/// Time values shared by every system invoked during one phase run.
///
/// Built once at the start of a run and handed out by reference, so all
/// systems in the same invocation observe identical values.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SystemState {
    /// Elapsed time in seconds, from the phase's time source
    pub elapsed_time: f64,
    /// Time step for this invocation in seconds
    pub delta_time: f32,
}

impl SystemState {
    pub fn new(elapsed_time: f64, delta_time: f32) -> Self {
        Self {
            elapsed_time,
            delta_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zeroed() {
        let state = SystemState::default();
        assert_eq!(state.elapsed_time, 0.0);
        assert_eq!(state.delta_time, 0.0);
    }

    #[test]
    fn test_new() {
        let state = SystemState::new(1.5, 0.02);
        assert_eq!(state, SystemState { elapsed_time: 1.5, delta_time: 0.02 });
    }
}
