//! Device-state coordinator.
//!
//! The one place allowed to touch the actuators. The touch-input task and
//! the HTTP server both hold a copy of [`Coordinator`] and call its
//! operations concurrently; an async mutex over the state record *and* both
//! drivers serializes them, so no two operations can interleave at the
//! granularity of a physical write. A strip frame (all pixels plus flush) is
//! one critical section — two concurrent color sets can never paint a mixed
//! frame, and the record is updated with last-writer-wins semantics.
//!
//! Locks are never held across network I/O. The single exception to "short
//! critical sections" is [`Coordinator::sweep_servo_to`], which keeps the
//! lock across its stepped animation; see its docs.

use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, mutex::Mutex};
use embassy_time::{Duration, Timer};
use static_cell::StaticCell;

use moodlamp_core::{ActuatorState, servo::SweepPlan};

use crate::infrastructure::drivers::{HardwareFault, LedStrip, ServoPwm};

struct Actuators {
    state: ActuatorState,
    servo: ServoPwm<'static>,
    strip: LedStrip<'static>,
}

impl Actuators {
    /// Push the derived light output to the strip. Must be called inside
    /// the critical section after any change that affects it.
    fn apply_light(&mut self) -> Result<(), HardwareFault> {
        self.strip.fill(self.state.output())
    }

    async fn run_sweep(&mut self, target: u8, step_delay: Duration) {
        for angle in SweepPlan::new(self.state.servo_angle, target) {
            self.servo.set_angle(angle);
            self.state.servo_angle = angle;
            Timer::after(step_delay).await;
        }
    }
}

static ACTUATORS: StaticCell<Mutex<CriticalSectionRawMutex, Actuators>> =
    StaticCell::new();

/// Cheap cloneable handle to the single shared actuator record.
#[derive(Clone, Copy)]
pub struct Coordinator {
    inner: &'static Mutex<CriticalSectionRawMutex, Actuators>,
}

impl Coordinator {
    /// Take ownership of both drivers and drive the hardware to the default
    /// state (servo at 0, amber light on) before anything can observe it.
    pub fn init(
        mut servo: ServoPwm<'static>,
        strip: LedStrip<'static>,
    ) -> Result<Self, HardwareFault> {
        let state = ActuatorState::new();
        servo.set_angle(state.servo_angle);
        let mut actuators = Actuators {
            state,
            servo,
            strip,
        };
        actuators.apply_light()?;

        Ok(Self {
            inner: ACTUATORS.init(Mutex::new(actuators)),
        })
    }

    /// Copy of the current desired state.
    pub async fn snapshot(&self) -> ActuatorState {
        self.inner.lock().await.state.clone()
    }

    /// Drive the servo straight to an angle, clamped to [0, 180].
    pub async fn set_servo_angle(&self, angle: i16) {
        let mut actuators = self.inner.lock().await;
        let clamped = actuators.state.set_servo_angle(angle);
        actuators.servo.set_angle(clamped);
    }

    /// Animate the servo to `target` in one-degree steps.
    ///
    /// Deliberately holds the coordinator lock for the whole animation: a
    /// sweep is one logical actuator operation, and letting other writers in
    /// mid-sweep would tear it. Every other operation blocks until the sweep
    /// ends, bounded by ~180 steps x `step_delay`. Simplicity is chosen over
    /// fairness here.
    pub async fn sweep_servo_to(&self, target: u8, step_delay: Duration) {
        let mut actuators = self.inner.lock().await;
        actuators.run_sweep(target, step_delay).await;
    }

    /// Sweep to the opposite endpoint (0 <-> 180), alternating per call.
    pub async fn toggle_servo_sweep(&self, step_delay: Duration) {
        let mut actuators = self.inner.lock().await;
        let target = actuators.state.sweep_target();
        actuators.run_sweep(target, step_delay).await;
        actuators.state.reverse_sweep();
    }

    /// Replace the base color. The strip is repainted only while on; the
    /// new color is remembered either way.
    pub async fn set_color(&self, r: u8, g: u8, b: u8) -> Result<(), HardwareFault> {
        let mut actuators = self.inner.lock().await;
        actuators.state.set_color(r, g, b);
        if actuators.state.light_on {
            actuators.apply_light()?;
        }
        Ok(())
    }

    /// Set brightness. State updates regardless of on/off; the physical
    /// write happens only while on, so the next `turn_on` picks it up.
    pub async fn set_brightness(&self, pct: u8) -> Result<(), HardwareFault> {
        let mut actuators = self.inner.lock().await;
        actuators.state.set_brightness(pct);
        if actuators.state.light_on {
            actuators.apply_light()?;
        }
        Ok(())
    }

    /// Turn the light on, restoring the remembered color and brightness.
    pub async fn turn_on(&self) -> Result<(), HardwareFault> {
        let mut actuators = self.inner.lock().await;
        actuators.state.turn_on();
        actuators.apply_light()
    }

    /// Turn the light off. The base color survives for the next `turn_on`.
    pub async fn turn_off(&self) -> Result<(), HardwareFault> {
        let mut actuators = self.inner.lock().await;
        actuators.state.turn_off();
        actuators.apply_light()
    }

    pub async fn toggle_light(&self) -> Result<(), HardwareFault> {
        let mut actuators = self.inner.lock().await;
        actuators.state.toggle_light();
        actuators.apply_light()
    }
}
