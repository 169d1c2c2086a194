use crate::constants::MAX_FRAME_DT_SEC;
use instant::Instant;
use std::cell::Cell;
use std::rc::Rc;

/// Shared stop flag for the frame loop; clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct LoopControl {
    stopped: Rc<Cell<bool>>,
}

impl LoopControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.stopped.set(true);
    }

    pub fn is_running(&self) -> bool {
        !self.stopped.get()
    }
}

/// Measures the time between frames.
#[derive(Clone, Debug)]
pub struct FrameClock {
    last: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            last: Instant::now(),
        }
    }
}

impl FrameClock {
    /// Seconds since the previous tick, capped at `MAX_FRAME_DT_SEC`.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = (now - self.last).as_secs_f32();
        self.last = now;
        dt.min(MAX_FRAME_DT_SEC)
    }
}
