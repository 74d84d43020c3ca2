//! Connection settings record.
//!
//! Loaded once at startup through a [`SettingsPort`](crate::ports::SettingsPort)
//! implementation and immutable for the process lifetime.  The JSON key
//! names match the record provisioned into the device's settings store.

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// WiFi and MQTT connection parameters.
///
/// Every field is required: a record with a missing key fails
/// deserialization, which is fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionSettings {
    pub wifi_ssid: String,
    pub wifi_password: String,
    pub mqtt_broker: String,
    pub mqtt_port: u16,
    pub mqtt_user: String,
    pub mqtt_password: String,
    /// Topic prefix: publishes go to `{base}/power` and `{base}/brightness`.
    pub mqtt_base_topic: String,
}

impl ConnectionSettings {
    /// Parse and validate a settings record from its JSON form.
    pub fn from_json(raw: &str) -> Result<Self, SettingsError> {
        let settings: Self =
            serde_json::from_str(raw).map_err(|_| SettingsError::Malformed)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Range-check every field before any connectivity attempt.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.wifi_ssid.is_empty() || self.wifi_ssid.len() > 32 {
            return Err(SettingsError::ValidationFailed(
                "wifi_ssid must be 1-32 bytes",
            ));
        }
        if !is_printable_ascii(&self.wifi_ssid) {
            return Err(SettingsError::ValidationFailed(
                "wifi_ssid must be printable ASCII",
            ));
        }
        if self.wifi_password.len() > 64 {
            return Err(SettingsError::ValidationFailed(
                "wifi_password must be at most 64 bytes",
            ));
        }
        if self.mqtt_broker.is_empty() {
            return Err(SettingsError::ValidationFailed(
                "mqtt_broker must be non-empty",
            ));
        }
        if self.mqtt_port == 0 {
            return Err(SettingsError::ValidationFailed("mqtt_port must be non-zero"));
        }
        if self.mqtt_base_topic.is_empty() || self.mqtt_base_topic.ends_with('/') {
            return Err(SettingsError::ValidationFailed(
                "mqtt_base_topic must be non-empty without trailing slash",
            ));
        }
        Ok(())
    }
}

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}
