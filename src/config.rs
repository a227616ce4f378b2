//! Fixed device configuration.
//!
//! Pin assignments live in `src/bin/app.rs`: servo signal on GPIO0, touch
//! sensor on GPIO1, WS2812 data on GPIO21.

use embassy_net::Ipv4Address;
use embassy_time::Duration;

pub const AP_SSID: &str = "ESP32_HaazMoodlamp";
pub const AP_PASSWORD: &str = "12345678";
pub const AP_ADDRESS: Ipv4Address = Ipv4Address::new(192, 168, 4, 1);
pub const AP_PREFIX_LEN: u8 = 24;

pub const HTTP_PORT: u16 = 80;
pub const DNS_PORT: u16 = 53;

/// Number of pixels on the strip.
pub const LED_COUNT: usize = 32;

/// Touch sampling cadence. Also the debounce granularity and the long-press
/// timing resolution.
pub const TOUCH_POLL_INTERVAL: Duration = Duration::from_millis(50);
pub const TOUCH_LONG_PRESS: Duration = Duration::from_millis(1500);
pub const TOUCH_COOLDOWN: Duration = Duration::from_millis(500);

/// Delay between one-degree steps of a toggle sweep. A full 0-180 sweep
/// takes about 2.7 s, during which the coordinator lock is held.
pub const SWEEP_STEP_DELAY: Duration = Duration::from_millis(15);

/// Back-off before retrying a failed socket bind or accept.
pub const BIND_RETRY_DELAY: Duration = Duration::from_secs(2);
