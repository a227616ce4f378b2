mod led_strip;
mod random;
mod servo_pwm;
pub mod wifi_ap;

pub use led_strip::LedStrip;
pub use servo_pwm::ServoPwm;
pub use wifi_ap::{ApConfig, start_wifi_ap};

/// An actuator write failed at the hardware layer.
///
/// There is no recovery path; the failed operation is aborted and logged by
/// the caller, and the desired state stays whatever was last recorded.
#[derive(Debug, Clone, Copy)]
pub struct HardwareFault;
