//! Blocking delay adapter.
//!
//! - **`target_os = "espidf"`** — `FreeRtos::delay_ms`, which suspends the
//!   main task without spinning the CPU.
//! - **`not(target_os = "espidf")`** — `std::thread::sleep` for host-side
//!   simulation.
//!
//! The whole process blocks for the duration; there is no other task to
//! yield to.

use crate::ports::DelayPort;

/// Zero-sized delay handle; create as many as convenient.
#[derive(Debug, Clone, Copy, Default)]
pub struct SysDelay;

impl DelayPort for SysDelay {
    #[cfg(target_os = "espidf")]
    fn delay_ms(&mut self, ms: u32) {
        esp_idf_hal::delay::FreeRtos::delay_ms(ms);
    }

    #[cfg(not(target_os = "espidf"))]
    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}
