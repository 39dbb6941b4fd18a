use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Tick {
    pub frame: u64,
}

pub const TICK_MS: u64 = 20;

impl Tick {
    pub fn new() -> Self {
        Tick { frame: 0 }
    }

    pub fn next(&self) -> Self {
        Tick { frame: self.frame + 1 }
    }

    pub fn advanced_by(&self, ticks: u64) -> Self {
        Tick { frame: self.frame + ticks }
    }
}

impl Default for Tick {
    fn default() -> Self {
        Tick::new()
    }
}

/// Convert a wall-clock duration into a whole number of ticks.
/// Durations shorter than one tick still take a full tick, so a scheduled
/// transition never fires in the same step that requested it.
pub fn ticks_for_ms(ms: u64) -> u64 {
    ms.div_ceil(TICK_MS).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ms_conversion_rounds_up_and_never_hits_zero() {
        assert_eq!(ticks_for_ms(300), 15);
        assert_eq!(ticks_for_ms(500), 25);
        assert_eq!(ticks_for_ms(25), 2);
        assert_eq!(ticks_for_ms(0), 1);
    }
}
