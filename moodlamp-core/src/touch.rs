//! Touch-input state machine.
//!
//! The touch sensor is a noisy digital input that the firmware samples at a
//! fixed cadence. This machine debounces it and classifies each physical
//! press as a short tap or a long hold:
//!
//! ```text
//! Idle -> Pressed -> (Short | Long) -> WaitRelease/Cooldown -> Idle
//! ```
//!
//! A press shorter than the long-press threshold is classified `Short` on the
//! release edge. Once the threshold elapses the press is classified `Long`
//! immediately, without waiting for release. After either outcome the machine
//! waits for the input to go low (ignoring bounce highs) and then applies a
//! fixed cooldown before accepting the next press, so one lingering touch
//! cannot re-trigger.
//!
//! Timing resolution equals the firmware's poll interval; classification can
//! be late by at most one tick.

/// Thresholds in milliseconds. The poll cadence itself belongs to the caller.
#[derive(Debug, Clone, Copy)]
pub struct TouchConfig {
    /// Hold time after which a press counts as long.
    pub long_press_ms: u64,
    /// Quiet period after release before the next press is accepted.
    pub cooldown_ms: u64,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            long_press_ms: 1500,
            cooldown_ms: 500,
        }
    }
}

/// Classification of a completed press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressKind {
    Short,
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Pressed { since_ms: u64 },
    /// Long press already reported; wait for the finger to leave.
    WaitRelease,
    Cooldown { until_ms: u64 },
}

/// Debouncing press classifier, fed one sample per poll tick.
#[derive(Debug)]
pub struct TouchInput {
    config: TouchConfig,
    phase: Phase,
}

impl TouchInput {
    pub fn new(config: TouchConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
        }
    }

    /// Feed one sample. `pressed` is the current input level, `now_ms` a
    /// monotonic timestamp. Returns a classification on the tick that
    /// completes a press.
    pub fn update(&mut self, pressed: bool, now_ms: u64) -> Option<PressKind> {
        match self.phase {
            Phase::Idle => {
                if pressed {
                    self.phase = Phase::Pressed { since_ms: now_ms };
                }
                None
            }
            Phase::Pressed { since_ms } => {
                if !pressed {
                    self.phase = Phase::Cooldown {
                        until_ms: now_ms + self.config.cooldown_ms,
                    };
                    Some(PressKind::Short)
                } else if now_ms.saturating_sub(since_ms) > self.config.long_press_ms {
                    self.phase = Phase::WaitRelease;
                    Some(PressKind::Long)
                } else {
                    None
                }
            }
            Phase::WaitRelease => {
                if !pressed {
                    self.phase = Phase::Cooldown {
                        until_ms: now_ms + self.config.cooldown_ms,
                    };
                }
                None
            }
            Phase::Cooldown { until_ms } => {
                // Highs during cooldown are sensor bounce, not a new press.
                if now_ms >= until_ms && !pressed {
                    self.phase = Phase::Idle;
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK_MS: u64 = 50;

    /// Replay a level trace at the poll cadence, collecting emitted presses.
    fn replay(input: &mut TouchInput, levels: &[bool], start_ms: u64) -> std::vec::Vec<PressKind> {
        let mut out = std::vec::Vec::new();
        for (i, &level) in levels.iter().enumerate() {
            if let Some(kind) = input.update(level, start_ms + i as u64 * TICK_MS) {
                out.push(kind);
            }
        }
        out
    }

    #[test]
    fn short_tap_fires_on_release() {
        let mut input = TouchInput::new(TouchConfig::default());
        // 200ms press, then release.
        let presses = replay(&mut input, &[true, true, true, true, false], 0);
        assert_eq!(presses, [PressKind::Short]);
    }

    #[test]
    fn long_hold_fires_before_release() {
        let mut input = TouchInput::new(TouchConfig::default());
        // Held for 2.0s with a 1.5s threshold: Long must fire while the
        // finger is still down, and release must not add a Short.
        let mut levels = std::vec::Vec::new();
        levels.resize(40, true); // 2.0s at 50ms
        levels.push(false);
        let presses = replay(&mut input, &levels, 0);
        assert_eq!(presses, [PressKind::Long]);
    }

    #[test]
    fn press_never_classifies_both_ways() {
        for hold_ticks in 1..60u64 {
            let mut input = TouchInput::new(TouchConfig::default());
            let mut levels = std::vec::Vec::new();
            levels.resize(hold_ticks as usize, true);
            levels.push(false);
            let presses = replay(&mut input, &levels, 0);
            assert_eq!(presses.len(), 1, "hold of {hold_ticks} ticks");
        }
    }

    #[test]
    fn bounce_during_cooldown_is_ignored() {
        let mut input = TouchInput::new(TouchConfig::default());
        // Tap, then bouncy highs inside the 500ms cooldown window.
        let presses = replay(
            &mut input,
            &[true, false, true, false, true, false, true, false],
            0,
        );
        assert_eq!(presses, [PressKind::Short]);
    }

    #[test]
    fn new_press_accepted_after_cooldown() {
        let mut input = TouchInput::new(TouchConfig::default());
        assert_eq!(input.update(true, 0), None);
        assert_eq!(input.update(false, 100), Some(PressKind::Short));
        // Cooldown runs until 600ms.
        assert_eq!(input.update(false, 400), None);
        assert_eq!(input.update(false, 650), None); // back to Idle
        assert_eq!(input.update(true, 700), None);
        assert_eq!(input.update(false, 800), Some(PressKind::Short));
    }

    #[test]
    fn lingering_touch_after_long_press_does_not_retrigger() {
        let mut input = TouchInput::new(TouchConfig::default());
        let mut levels = std::vec::Vec::new();
        levels.resize(80, true); // held for 4s
        let presses = replay(&mut input, &levels, 0);
        assert_eq!(presses, [PressKind::Long]);
    }

    #[test]
    fn threshold_is_configurable() {
        let mut input = TouchInput::new(TouchConfig {
            long_press_ms: 100,
            cooldown_ms: 0,
        });
        assert_eq!(input.update(true, 0), None);
        assert_eq!(input.update(true, 150), Some(PressKind::Long));
    }
}
