//! Shared actuator state.
//!
//! One `ActuatorState` value exists per device. It records the *desired*
//! state of both actuators; the physical light output is always derived from
//! it (`output()`), never stored separately, so the two cannot drift apart.

use smart_leds::RGB8;

/// Upper bound of the servo travel in degrees.
pub const SERVO_ANGLE_MAX: u8 = 180;

/// Brightness is a percentage.
pub const BRIGHTNESS_MAX: u8 = 100;

/// Color the light comes up with at boot and after a plain `turn_on`.
pub const DEFAULT_COLOR: RGB8 = RGB8 { r: 255, g: 100, b: 0 };

/// Direction of the next servo toggle sweep.
///
/// Tracks which endpoint the last sweep went to, so that toggling alternates
/// between 0 and 180 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepDirection {
    Forward,
    Reverse,
}

/// Desired state of the servo and the light strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActuatorState {
    /// Current servo angle in degrees, always within `[0, SERVO_ANGLE_MAX]`.
    pub servo_angle: u8,
    /// Endpoint the next toggle sweep moves towards.
    pub servo_direction: SweepDirection,
    /// Whether the light is logically on.
    pub light_on: bool,
    /// Unscaled color. Survives brightness changes and off/on cycles.
    pub base_color: RGB8,
    /// Brightness percentage, `[0, BRIGHTNESS_MAX]`.
    pub brightness: u8,
}

impl ActuatorState {
    /// Power-on defaults: servo at 0 degrees, light on at full brightness in
    /// the default amber.
    pub const fn new() -> Self {
        Self {
            servo_angle: 0,
            servo_direction: SweepDirection::Forward,
            light_on: true,
            base_color: DEFAULT_COLOR,
            brightness: BRIGHTNESS_MAX,
        }
    }

    /// Set the servo angle, clamping out-of-range input to the nearest bound.
    ///
    /// Returns the clamped value that was stored.
    pub fn set_servo_angle(&mut self, angle: i16) -> u8 {
        let clamped = angle.clamp(0, i16::from(SERVO_ANGLE_MAX)) as u8;
        self.servo_angle = clamped;
        clamped
    }

    /// Replace the base color. Brightness and power are untouched.
    pub fn set_color(&mut self, r: u8, g: u8, b: u8) {
        self.base_color = RGB8 { r, g, b };
    }

    /// Set the brightness percentage, clamping to `BRIGHTNESS_MAX`.
    ///
    /// The base color is never mutated by a brightness change.
    pub fn set_brightness(&mut self, pct: u8) -> u8 {
        let clamped = pct.min(BRIGHTNESS_MAX);
        self.brightness = clamped;
        clamped
    }

    pub fn turn_on(&mut self) {
        self.light_on = true;
    }

    /// Turn the light off. The base color is kept so a later `turn_on`
    /// restores the exact previous look.
    pub fn turn_off(&mut self) {
        self.light_on = false;
    }

    pub fn toggle_light(&mut self) {
        self.light_on = !self.light_on;
    }

    /// Endpoint of the next toggle sweep, alternating 0 and 180 degrees.
    pub fn sweep_target(&self) -> u8 {
        match self.servo_direction {
            SweepDirection::Forward => SERVO_ANGLE_MAX,
            SweepDirection::Reverse => 0,
        }
    }

    /// Flip the sweep direction after a toggle sweep completed.
    pub fn reverse_sweep(&mut self) {
        self.servo_direction = match self.servo_direction {
            SweepDirection::Forward => SweepDirection::Reverse,
            SweepDirection::Reverse => SweepDirection::Forward,
        };
    }

    /// The color the strip must physically show right now.
    ///
    /// Base color scaled by brightness while on, black while off. This is the
    /// single source of truth for the frame written to the strip.
    pub fn output(&self) -> RGB8 {
        if !self.light_on {
            return RGB8::default();
        }
        RGB8 {
            r: scale_channel(self.base_color.r, self.brightness),
            g: scale_channel(self.base_color.g, self.brightness),
            b: scale_channel(self.base_color.b, self.brightness),
        }
    }
}

impl Default for ActuatorState {
    fn default() -> Self {
        Self::new()
    }
}

/// Scale one channel by a brightness percentage using truncating integer
/// math. The result never exceeds the input channel value.
#[inline]
pub fn scale_channel(value: u8, pct: u8) -> u8 {
    let pct = u16::from(pct.min(BRIGHTNESS_MAX));
    ((u16::from(value) * pct) / 100) as u8
}
