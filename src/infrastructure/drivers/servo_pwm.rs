use esp_hal::{
    gpio::interconnect::PeripheralOutput,
    ledc::{
        LSGlobalClkSource,
        Ledc,
        LowSpeed,
        channel::{self, ChannelHW as _, ChannelIFace as _},
        timer::{self, TimerIFace as _},
    },
    peripherals::LEDC,
    time::Rate,
};

use crate::mk_static;
use moodlamp_core::servo::angle_to_duty;

/// 14-bit duty resolution at 50 Hz gives ~1.2 us of pulse-width granularity,
/// well under one degree of servo travel.
const DUTY_MAX: u32 = (1 << 14) - 1;

/// Rotary servo driver over a 50 Hz LEDC PWM channel.
pub struct ServoPwm<'a> {
    channel: channel::Channel<'a, LowSpeed>,
}

impl ServoPwm<'static> {
    /// Configure LEDC timer 0 / channel 0 for the servo signal pin.
    pub fn new<O>(ledc: LEDC<'static>, pin: O) -> Self
    where
        O: PeripheralOutput<'static>,
    {
        let ledc = mk_static!(Ledc<'static>, Ledc::new(ledc));
        ledc.set_global_slow_clock(LSGlobalClkSource::APBClk);

        let pwm_timer = mk_static!(
            timer::Timer<'static, LowSpeed>,
            ledc.timer::<LowSpeed>(timer::Number::Timer0)
        );
        pwm_timer
            .configure(timer::config::Config {
                duty: timer::config::Duty::Duty14Bit,
                clock_source: timer::LSClockSource::APBClk,
                frequency: Rate::from_hz(50),
            })
            .expect("Failed to configure servo PWM timer");

        let mut pwm_channel = ledc.channel(channel::Number::Channel0, pin);
        pwm_channel
            .configure(channel::config::Config {
                timer: pwm_timer,
                duty_pct: 0,
                pin_config: channel::config::PinConfig::PushPull,
            })
            .expect("Failed to configure servo PWM channel");

        Self {
            channel: pwm_channel,
        }
    }

    /// Drive the servo to an angle. Angles above 180 saturate.
    pub fn set_angle(&mut self, angle: u8) {
        self.channel.set_duty_hw(angle_to_duty(angle, DUTY_MAX));
    }
}
