//! Port traits — the hexagonal boundary between the control core and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ bargraph / bringup / control (domain)
//! ```
//!
//! Driven adapters (GPIO lines, the WiFi driver, the MQTT client, the NVS
//! settings store, the reset vector) implement these traits.  The domain
//! core consumes them via generics, so it never touches hardware directly
//! and every piece of sequencing logic runs on the host under test.

use core::net::Ipv4Addr;

use crate::config::ConnectionSettings;
use crate::error::{BrokerError, LinkError, SettingsError};

// ───────────────────────────────────────────────────────────────
// Digital lines
// ───────────────────────────────────────────────────────────────

/// One raw binary output line of the bargraph.
///
/// This is the *electrical* level.  The lit/unlit inversion (LOW = lit on
/// the common-anode column) lives entirely inside
/// [`Bargraph`](crate::bargraph::Bargraph); nothing else in the system may
/// reason about raw levels.
pub trait IndicatorLine {
    fn set_level(&mut self, high: bool);
}

/// The power button's raw input level.  Bias is the adapter's concern;
/// the line reads LOW while the button is pressed.
pub trait ButtonLine {
    fn is_high(&self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Rotary position
// ───────────────────────────────────────────────────────────────

/// Bounded, clamped rotary position in `[0, 9]`.
///
/// Implementations clamp at the range edges (no wraparound) and may
/// logically reverse the rotation direction.
pub trait RotaryPort {
    fn position(&mut self) -> u8;
}

// ───────────────────────────────────────────────────────────────
// Connectivity
// ───────────────────────────────────────────────────────────────

/// Wireless station link.
pub trait LinkPort {
    /// Whether the driver currently reports an active session.
    fn is_connected(&self) -> bool;

    /// Issue one connect call.  A `Err` here is a driver fault, not a
    /// "not yet associated" condition — association latency is observed
    /// through [`is_connected`](Self::is_connected) polling instead.
    fn connect(&mut self, ssid: &str, password: &str) -> Result<(), LinkError>;

    /// Station address, used only for diagnostic logging.
    fn ip_address(&self) -> Option<Ipv4Addr>;
}

/// Message-broker session.
pub trait BrokerPort {
    fn connect(&mut self) -> Result<(), BrokerError>;
    fn publish(&mut self, topic: &str, payload: &str) -> Result<(), BrokerError>;
}

// ───────────────────────────────────────────────────────────────
// Process control
// ───────────────────────────────────────────────────────────────

/// Full device reset — the only recovery primitive for unrecoverable
/// bring-up states.
///
/// On hardware this never returns (`esp_restart`); mocks record the
/// invocation and return so exhaustion paths stay testable.  Callers must
/// not assume control continues past a `reset()` on the device.
pub trait ResetPort {
    fn reset(&mut self);
}

/// Blocking delay.  The whole process sleeps — there is no scheduler to
/// yield to.
pub trait DelayPort {
    fn delay_ms(&mut self, ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Settings provider
// ───────────────────────────────────────────────────────────────

/// Loads the immutable connection settings record, once, at startup.
/// Absence or malformation of any key is fatal.
pub trait SettingsPort {
    fn load(&self) -> Result<ConnectionSettings, SettingsError>;
}
