//! WiFi station-mode adapter.
//!
//! Implements [`LinkPort`] — the hexagonal boundary for the wireless link.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real ESP-IDF WiFi driver calls via
//!   `esp_idf_svc::wifi::EspWifi`.  The connect call is non-blocking:
//!   association latency is observed by the bring-up poll loop through
//!   `is_connected()`.
//! - **all other targets**: a simulation stub with a fixed association
//!   latency, so the bounded poll loop is exercised on the host.

use core::net::Ipv4Addr;

#[cfg(not(target_os = "espidf"))]
use log::info;

use crate::error::LinkError;
use crate::ports::LinkPort;

// ───────────────────────────────────────────────────────────────
// ESP-IDF implementation
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
mod esp {
    use super::{Ipv4Addr, LinkError, LinkPort};
    use esp_idf_svc::eventloop::EspSystemEventLoop;
    use esp_idf_svc::hal::modem::Modem;
    use esp_idf_svc::nvs::EspDefaultNvsPartition;
    use esp_idf_svc::wifi::{AuthMethod, ClientConfiguration, Configuration, EspWifi};
    use log::{error, info};

    pub struct WifiLink {
        wifi: EspWifi<'static>,
    }

    impl WifiLink {
        pub fn new(
            modem: Modem,
            sysloop: EspSystemEventLoop,
            nvs: EspDefaultNvsPartition,
        ) -> anyhow::Result<Self> {
            let wifi = EspWifi::new(modem, sysloop, Some(nvs))?;
            Ok(Self { wifi })
        }
    }

    impl LinkPort for WifiLink {
        fn is_connected(&self) -> bool {
            self.wifi.is_connected().unwrap_or(false)
        }

        fn connect(&mut self, ssid: &str, password: &str) -> Result<(), LinkError> {
            let auth_method = if password.is_empty() {
                AuthMethod::None
            } else {
                AuthMethod::WPAWPA2Personal
            };
            let config = Configuration::Client(ClientConfiguration {
                ssid: ssid.try_into().map_err(|_| LinkError::ConnectFailed)?,
                password: password.try_into().map_err(|_| LinkError::ConnectFailed)?,
                auth_method,
                ..Default::default()
            });

            let started = self
                .wifi
                .set_configuration(&config)
                .and_then(|()| self.wifi.start())
                .and_then(|()| self.wifi.connect());
            match started {
                Ok(()) => {
                    info!("wifi: station started, associating with '{ssid}'");
                    Ok(())
                }
                Err(e) => {
                    error!("wifi: driver fault during connect: {e}");
                    Err(LinkError::ConnectFailed)
                }
            }
        }

        fn ip_address(&self) -> Option<Ipv4Addr> {
            let info = self.wifi.sta_netif().get_ip_info().ok()?;
            if info.ip.is_unspecified() {
                None
            } else {
                Some(info.ip)
            }
        }
    }
}

#[cfg(target_os = "espidf")]
pub use esp::WifiLink;

// ───────────────────────────────────────────────────────────────
// Host simulation
// ───────────────────────────────────────────────────────────────

/// Polls of `is_connected` the simulated radio stays down after a connect
/// call, exercising the breathing loop.
#[cfg(not(target_os = "espidf"))]
const SIM_ASSOC_LATENCY_POLLS: u32 = 3;

#[cfg(not(target_os = "espidf"))]
pub struct WifiLink {
    ssid: heapless::String<32>,
    connecting: bool,
    polls_remaining: core::cell::Cell<u32>,
}

#[cfg(not(target_os = "espidf"))]
impl WifiLink {
    pub fn new() -> Self {
        Self {
            ssid: heapless::String::new(),
            connecting: false,
            polls_remaining: core::cell::Cell::new(0),
        }
    }
}

#[cfg(not(target_os = "espidf"))]
impl Default for WifiLink {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_os = "espidf"))]
impl LinkPort for WifiLink {
    fn is_connected(&self) -> bool {
        if !self.connecting {
            return false;
        }
        let remaining = self.polls_remaining.get();
        if remaining > 0 {
            self.polls_remaining.set(remaining - 1);
            return false;
        }
        true
    }

    fn connect(&mut self, ssid: &str, _password: &str) -> Result<(), LinkError> {
        self.ssid.clear();
        self.ssid
            .push_str(ssid)
            .map_err(|_| LinkError::ConnectFailed)?;
        self.connecting = true;
        self.polls_remaining.set(SIM_ASSOC_LATENCY_POLLS);
        info!("wifi(sim): associating with '{}'", self.ssid);
        Ok(())
    }

    fn ip_address(&self) -> Option<Ipv4Addr> {
        self.is_connected().then(|| Ipv4Addr::new(192, 168, 4, 2))
    }
}

#[cfg(all(test, not(target_os = "espidf")))]
mod tests {
    use super::*;

    #[test]
    fn down_until_connect_is_called() {
        let link = WifiLink::new();
        assert!(!link.is_connected());
    }

    #[test]
    fn comes_up_after_simulated_latency() {
        let mut link = WifiLink::new();
        link.connect("TestNet", "password1").unwrap();
        let mut polls = 0;
        while !link.is_connected() {
            polls += 1;
            assert!(polls <= SIM_ASSOC_LATENCY_POLLS, "must come up eventually");
        }
        assert!(link.ip_address().is_some());
    }

    #[test]
    fn oversized_ssid_is_a_connect_fault() {
        let mut link = WifiLink::new();
        let long = "x".repeat(40);
        assert_eq!(
            link.connect(&long, "password1"),
            Err(LinkError::ConnectFailed)
        );
    }
}
