//! Settings provider adapter.
//!
//! Implements [`SettingsPort`] over the device's NVS partition: the
//! connection record is provisioned once as a JSON string under
//! `brightdial/conn` and read back at every boot.  The host simulation
//! holds the raw JSON in memory.
//!
//! A missing or malformed record is fatal at startup — there is nothing
//! sensible the dimmer can do without broker credentials.

use crate::config::ConnectionSettings;
use crate::error::SettingsError;
use crate::ports::SettingsPort;

const NVS_NAMESPACE: &str = "brightdial";
const NVS_KEY: &str = "conn";

/// Upper bound on the stored JSON record.
const MAX_RECORD_BYTES: usize = 512;

pub struct NvsSettings {
    #[cfg(target_os = "espidf")]
    nvs: esp_idf_svc::nvs::EspNvs<esp_idf_svc::nvs::NvsDefault>,
    #[cfg(not(target_os = "espidf"))]
    raw: Option<String>,
}

#[cfg(target_os = "espidf")]
impl NvsSettings {
    pub fn new(
        partition: esp_idf_svc::nvs::EspDefaultNvsPartition,
    ) -> Result<Self, SettingsError> {
        let nvs = esp_idf_svc::nvs::EspNvs::new(partition, NVS_NAMESPACE, false)
            .map_err(|_| SettingsError::StoreUnavailable)?;
        Ok(Self { nvs })
    }
}

#[cfg(not(target_os = "espidf"))]
impl NvsSettings {
    /// Simulation store seeded with a raw JSON record.
    pub fn with_json(raw: &str) -> Self {
        Self {
            raw: Some(raw.to_string()),
        }
    }

    /// Simulation store with no record provisioned (first boot).
    pub fn empty() -> Self {
        Self { raw: None }
    }
}

impl SettingsPort for NvsSettings {
    #[cfg(target_os = "espidf")]
    fn load(&self) -> Result<ConnectionSettings, SettingsError> {
        let mut buf = [0u8; MAX_RECORD_BYTES];
        let raw = self
            .nvs
            .get_str(NVS_KEY, &mut buf)
            .map_err(|_| SettingsError::StoreUnavailable)?
            .ok_or(SettingsError::NotFound)?;
        ConnectionSettings::from_json(raw)
    }

    #[cfg(not(target_os = "espidf"))]
    fn load(&self) -> Result<ConnectionSettings, SettingsError> {
        let raw = self.raw.as_deref().ok_or(SettingsError::NotFound)?;
        if raw.len() > MAX_RECORD_BYTES {
            return Err(SettingsError::Malformed);
        }
        ConnectionSettings::from_json(raw)
    }
}
