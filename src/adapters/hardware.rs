//! GPIO adapters — the only module that touches real pins.
//!
//! Bridges the ESP32 GPIO matrix to the [`IndicatorLine`], [`ButtonLine`]
//! and [`RotaryPort`] traits.  All items are ESP-IDF only; host-side tests
//! supply their own mock ports.
//!
//! The rotary lines are sampled when [`RotaryPort::position`] is called,
//! i.e. at control-tick cadence.  Spinning the dial faster than one detent
//! per tick can drop counts.

#![cfg(target_os = "espidf")]

use esp_idf_hal::gpio::{AnyIOPin, Input, Output, PinDriver, Pull};
use esp_idf_sys::EspError;

use crate::ports::{ButtonLine, IndicatorLine, RotaryPort};
use crate::rotary::RotaryDecoder;

/// One bargraph output line.  The common-anode column sinks current, so
/// the electrical level written here is raw; the lit/unlit inversion is
/// the bargraph driver's concern.
pub struct EspIndicatorLine {
    pin: PinDriver<'static, AnyIOPin, Output>,
}

impl EspIndicatorLine {
    pub fn new(gpio: i32) -> Result<Self, EspError> {
        // SAFETY: each bargraph GPIO number appears exactly once in
        // pins::BARGRAPH_GPIOS, so no pin is driven twice.
        let pin = PinDriver::output(unsafe { AnyIOPin::new(gpio) })?;
        Ok(Self { pin })
    }
}

impl IndicatorLine for EspIndicatorLine {
    fn set_level(&mut self, high: bool) {
        // GPIO writes cannot fail once the driver is constructed.
        let _ = if high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
    }
}

/// Power button input, pull-down bias.  The line reads LOW while pressed.
pub struct EspButton {
    pin: PinDriver<'static, AnyIOPin, Input>,
}

impl EspButton {
    pub fn new(gpio: i32) -> Result<Self, EspError> {
        // SAFETY: the button GPIO is claimed by this adapter alone.
        let mut pin = PinDriver::input(unsafe { AnyIOPin::new(gpio) })?;
        pin.set_pull(Pull::Down)?;
        Ok(Self { pin })
    }
}

impl ButtonLine for EspButton {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}

/// Rotary dial: two input lines feeding the bounded quadrature decoder.
pub struct EspRotary {
    clk: PinDriver<'static, AnyIOPin, Input>,
    dt: PinDriver<'static, AnyIOPin, Input>,
    decoder: RotaryDecoder,
}

impl EspRotary {
    pub fn new(
        clk_gpio: i32,
        dt_gpio: i32,
        min_val: u8,
        max_val: u8,
        reverse: bool,
    ) -> Result<Self, EspError> {
        // SAFETY: the encoder GPIOs are claimed by this adapter alone.
        let mut clk = PinDriver::input(unsafe { AnyIOPin::new(clk_gpio) })?;
        let mut dt = PinDriver::input(unsafe { AnyIOPin::new(dt_gpio) })?;
        clk.set_pull(Pull::Up)?;
        dt.set_pull(Pull::Up)?;
        Ok(Self {
            clk,
            dt,
            decoder: RotaryDecoder::new(min_val, max_val, reverse),
        })
    }
}

impl RotaryPort for EspRotary {
    fn position(&mut self) -> u8 {
        self.decoder.update(self.clk.is_high(), self.dt.is_high());
        self.decoder.value()
    }
}
