//! Full device reset adapter.
//!
//! On ESP-IDF this calls `esp_restart()`, which does not return — the
//! platform reboots and bring-up runs again from scratch, discarding all
//! in-memory state.  The host simulation logs and returns so exhaustion
//! paths stay observable in tests.

use log::warn;

use crate::ports::ResetPort;

#[derive(Debug, Clone, Copy, Default)]
pub struct DeviceReset;

impl ResetPort for DeviceReset {
    #[cfg(target_os = "espidf")]
    fn reset(&mut self) {
        warn!("restarting device");
        unsafe { esp_idf_svc::sys::esp_restart() };
    }

    #[cfg(not(target_os = "espidf"))]
    fn reset(&mut self) {
        warn!("device reset requested (simulation: continuing)");
    }
}
