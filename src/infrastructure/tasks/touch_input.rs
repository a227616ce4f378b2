//! Touch Input Task
//!
//! Samples the touch sensor at a fixed cadence and feeds the debouncing
//! state machine. A short tap toggles the servo sweep and then forces the
//! light on (always in that order); a long hold turns the light off and
//! leaves the servo alone.

use embassy_time::{Instant, Timer};
use esp_hal::gpio::Input;
use esp_println::println;

use moodlamp_core::touch::{PressKind, TouchConfig, TouchInput};

use crate::{
    config::{SWEEP_STEP_DELAY, TOUCH_COOLDOWN, TOUCH_LONG_PRESS, TOUCH_POLL_INTERVAL},
    coordinator::Coordinator,
};

#[embassy_executor::task]
pub async fn touch_input_task(touch: Input<'static>, coordinator: Coordinator) {
    let mut classifier = TouchInput::new(TouchConfig {
        long_press_ms: TOUCH_LONG_PRESS.as_millis(),
        cooldown_ms: TOUCH_COOLDOWN.as_millis(),
    });

    loop {
        let now_ms = Instant::now().as_millis();
        match classifier.update(touch.is_high(), now_ms) {
            Some(PressKind::Short) => {
                // The sweep runs inline here and blocks other actuator
                // operations for its duration.
                coordinator.toggle_servo_sweep(SWEEP_STEP_DELAY).await;
                if let Err(fault) = coordinator.turn_on().await {
                    println!("touch: light write failed: {:?}", fault);
                }
            }
            Some(PressKind::Long) => {
                if let Err(fault) = coordinator.turn_off().await {
                    println!("touch: light write failed: {:?}", fault);
                }
            }
            None => {}
        }
        Timer::after(TOUCH_POLL_INTERVAL).await;
    }
}
