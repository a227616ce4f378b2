use esp_hal::xtensa_lx::interrupt;
use esp_hal::{gpio::interconnect::PeripheralOutput, peripherals::RMT, rmt::Rmt, time::Rate};
use esp_hal_smartled::{SmartLedsAdapter, buffer_size, smart_led_buffer};
use smart_leds::{RGB8, SmartLedsWrite as _};

use super::HardwareFault;
use crate::{config::LED_COUNT, mk_static};

/// WS2812 strip driver using the RMT peripheral.
///
/// The RMT generates the precise bit timing the strip requires; one call to
/// `fill` emits the whole frame back to back, so a frame is never visibly
/// torn by other pixel writes.
pub struct LedStrip<'a> {
    adapter: SmartLedsAdapter<'a, { buffer_size(LED_COUNT) }>,
}

impl LedStrip<'static> {
    /// Create the strip driver on the given GPIO data line.
    pub fn new<O>(rmt: RMT<'static>, pin: O) -> Self
    where
        O: PeripheralOutput<'static>,
    {
        let rmt = Rmt::new(rmt, Rate::from_mhz(80)).expect("Failed to initialize RMT");
        let rmt_buffer = mk_static!(
            [u32; buffer_size(LED_COUNT)],
            smart_led_buffer!(LED_COUNT)
        );
        let adapter = SmartLedsAdapter::new(rmt.channel0, pin, rmt_buffer);

        Self { adapter }
    }

    /// Write one solid-color frame to every pixel and flush it.
    ///
    /// Interrupts are masked for the duration of the RMT write; the WS2812
    /// protocol has no tolerance for gaps mid-frame.
    pub fn fill(&mut self, color: RGB8) -> Result<(), HardwareFault> {
        let frame = [color; LED_COUNT];
        interrupt::free(|| self.adapter.write(frame.iter().copied()))
            .map_err(|_| HardwareFault)
    }
}
