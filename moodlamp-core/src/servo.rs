//! Servo sweep planning and duty-cycle math.
//!
//! A standard hobby servo expects a 50 Hz PWM signal whose pulse width maps
//! 500 us (0 degrees) to 2500 us (180 degrees).

use crate::state::SERVO_ANGLE_MAX;

/// Pulse width at 0 degrees.
pub const PULSE_MIN_US: u32 = 500;
/// Pulse width span across the full travel.
pub const PULSE_SPAN_US: u32 = 2000;
/// PWM period for 50 Hz.
pub const PERIOD_US: u32 = 20_000;

/// Pulse width in microseconds for a servo angle.
#[inline]
pub fn pulse_width_us(angle: u8) -> u32 {
    let angle = u32::from(angle.min(SERVO_ANGLE_MAX));
    PULSE_MIN_US + (angle * PULSE_SPAN_US) / u32::from(SERVO_ANGLE_MAX)
}

/// Convert a servo angle into a duty value for a timer with the given
/// maximum duty (e.g. 16383 for a 14-bit timer).
#[inline]
pub fn angle_to_duty(angle: u8, max_duty: u32) -> u32 {
    (pulse_width_us(angle) * max_duty) / PERIOD_US
}

/// Lazy sequence of intermediate angles for a smooth sweep.
///
/// Yields one-degree steps from `from` to `to` inclusive of both endpoints;
/// direction is inferred from the sign of `to - from`. One physical duty
/// write is expected per yielded angle.
#[derive(Debug, Clone)]
pub struct SweepPlan {
    next: u8,
    target: u8,
    done: bool,
}

impl SweepPlan {
    pub fn new(from: u8, to: u8) -> Self {
        Self {
            next: from.min(SERVO_ANGLE_MAX),
            target: to.min(SERVO_ANGLE_MAX),
            done: false,
        }
    }
}

impl Iterator for SweepPlan {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.done {
            return None;
        }
        let current = self.next;
        if current == self.target {
            self.done = true;
        } else if current < self.target {
            self.next = current + 1;
        } else {
            self.next = current - 1;
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulse_width_at_bounds() {
        assert_eq!(pulse_width_us(0), 500);
        assert_eq!(pulse_width_us(90), 1500);
        assert_eq!(pulse_width_us(180), 2500);
        // Out-of-range input saturates at full travel.
        assert_eq!(pulse_width_us(255), 2500);
    }

    #[test]
    fn duty_matches_16bit_reference() {
        // (500 + angle / 180 * 2000) * 65535 / 20000
        assert_eq!(angle_to_duty(0, 65535), 1638);
        assert_eq!(angle_to_duty(180, 65535), 8191);
    }

    #[test]
    fn duty_fits_14bit_timer() {
        for angle in 0..=180 {
            let duty = angle_to_duty(angle, (1 << 14) - 1);
            assert!(duty <= (1 << 14) - 1);
        }
    }

    #[test]
    fn sweep_ascending_is_inclusive() {
        let angles: std::vec::Vec<u8> = SweepPlan::new(0, 3).collect();
        assert_eq!(angles, [0, 1, 2, 3]);
    }

    #[test]
    fn sweep_descending_is_inclusive() {
        let angles: std::vec::Vec<u8> = SweepPlan::new(180, 177).collect();
        assert_eq!(angles, [180, 179, 178, 177]);
    }

    #[test]
    fn sweep_in_place_writes_once() {
        let angles: std::vec::Vec<u8> = SweepPlan::new(90, 90).collect();
        assert_eq!(angles, [90]);
    }

    #[test]
    fn full_sweep_has_181_steps() {
        assert_eq!(SweepPlan::new(0, 180).count(), 181);
    }
}
