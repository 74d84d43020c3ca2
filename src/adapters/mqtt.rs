//! MQTT broker-session adapter.
//!
//! Implements [`BrokerPort`].  On ESP-IDF the session is an
//! `EspMqttClient` created in callback mode, so no event-drain thread is
//! needed — the process stays single-threaded.  The host simulation
//! records publishes and can be scripted to fail, which is how the
//! bring-up reset path is exercised end to end.

use crate::config::ConnectionSettings;
use crate::error::BrokerError;
use crate::ports::BrokerPort;

/// MQTT client identity announced to the broker.
pub const CLIENT_ID: &str = "brightdial_dimmer";

// ───────────────────────────────────────────────────────────────
// ESP-IDF implementation
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
mod esp {
    use super::{BrokerError, BrokerPort, ConnectionSettings, CLIENT_ID};
    use esp_idf_svc::mqtt::client::{EspMqttClient, MqttClientConfiguration, QoS};
    use log::{debug, error, info};

    pub struct MqttBroker {
        url: String,
        username: String,
        password: String,
        client: Option<EspMqttClient<'static>>,
    }

    impl MqttBroker {
        pub fn new(settings: &ConnectionSettings) -> Self {
            Self {
                url: format!("mqtt://{}:{}", settings.mqtt_broker, settings.mqtt_port),
                username: settings.mqtt_user.clone(),
                password: settings.mqtt_password.clone(),
                client: None,
            }
        }
    }

    impl BrokerPort for MqttBroker {
        fn connect(&mut self) -> Result<(), BrokerError> {
            let conf = MqttClientConfiguration {
                client_id: Some(CLIENT_ID),
                username: (!self.username.is_empty()).then_some(self.username.as_str()),
                password: (!self.password.is_empty()).then_some(self.password.as_str()),
                ..Default::default()
            };

            let client = EspMqttClient::new_cb(&self.url, &conf, |event| {
                debug!("mqtt event: {:?}", event.payload());
            })
            .map_err(|e| {
                error!("mqtt: session setup failed: {e}");
                BrokerError::ConnectFailed
            })?;

            info!("mqtt: session established with {}", self.url);
            self.client = Some(client);
            Ok(())
        }

        fn publish(&mut self, topic: &str, payload: &str) -> Result<(), BrokerError> {
            let client = self.client.as_mut().ok_or(BrokerError::PublishFailed)?;
            client
                .publish(topic, QoS::AtMostOnce, false, payload.as_bytes())
                .map_err(|e| {
                    error!("mqtt: publish to '{topic}' failed: {e}");
                    BrokerError::PublishFailed
                })?;
            Ok(())
        }
    }
}

#[cfg(target_os = "espidf")]
pub use esp::MqttBroker;

// ───────────────────────────────────────────────────────────────
// Host simulation
// ───────────────────────────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
pub struct MqttBroker {
    url: String,
    connected: bool,
    /// Scripted failure: when set, `connect` faults.
    pub fail_connect: bool,
    pub published: Vec<(String, String)>,
}

#[cfg(not(target_os = "espidf"))]
impl MqttBroker {
    pub fn new(settings: &ConnectionSettings) -> Self {
        Self {
            url: format!("mqtt://{}:{}", settings.mqtt_broker, settings.mqtt_port),
            connected: false,
            fail_connect: false,
            published: Vec::new(),
        }
    }
}

#[cfg(not(target_os = "espidf"))]
impl BrokerPort for MqttBroker {
    fn connect(&mut self) -> Result<(), BrokerError> {
        if self.fail_connect {
            return Err(BrokerError::ConnectFailed);
        }
        self.connected = true;
        log::info!("mqtt(sim): session established with {}", self.url);
        Ok(())
    }

    fn publish(&mut self, topic: &str, payload: &str) -> Result<(), BrokerError> {
        if !self.connected {
            return Err(BrokerError::PublishFailed);
        }
        self.published
            .push((topic.to_string(), payload.to_string()));
        Ok(())
    }
}
