//! BrightDial firmware — main entry point.
//!
//! Startup sequence, in order:
//!
//! 1. ESP-IDF bootstrap and logger.
//! 2. Load and validate the connection settings from NVS (fatal if absent).
//! 3. Construct the bargraph and blink once to show we're alive.
//! 4. Connectivity bring-up: Stage A (WiFi link, bounded poll) then
//!    Stage B (broker session, single attempt, reset on failure).
//! 5. Enter the control loop — the only long-lived loop in the process.
//!
//! Everything below bring-up is single-threaded and cooperative: sleeps
//! and network calls block the whole process by design.

use core::sync::atomic::AtomicBool;

use anyhow::Result;
use log::{info, warn};

use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::prelude::Peripherals;
use esp_idf_svc::nvs::EspDefaultNvsPartition;

use brightdial::adapters::hardware::{EspButton, EspIndicatorLine, EspRotary};
use brightdial::adapters::mqtt::MqttBroker;
use brightdial::adapters::reset::DeviceReset;
use brightdial::adapters::settings::NvsSettings;
use brightdial::adapters::time::SysDelay;
use brightdial::adapters::wifi::WifiLink;
use brightdial::bargraph::Bargraph;
use brightdial::control::ControlState;
use brightdial::error::Error;
use brightdial::ports::{RotaryPort, SettingsPort};
use brightdial::{bringup, control, pins};

/// Rotary dial range and mounting direction.
const ROTARY_MIN: u8 = 0;
const ROTARY_MAX: u8 = 9;
const ROTARY_REVERSE: bool = true;

/// Startup liveness blink hold, milliseconds.
const LIVENESS_BLINK_MS: u32 = 200;

/// Cleared by nothing in production — the loop runs until reset.
static RUNNING: AtomicBool = AtomicBool::new(true);

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("BrightDial v{}", env!("CARGO_PKG_VERSION"));

    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs_partition = EspDefaultNvsPartition::take()?;

    // ── 2. Connection settings (fatal if missing or invalid) ──
    let settings = NvsSettings::new(nvs_partition.clone())
        .map_err(Error::Settings)?
        .load()
        .map_err(Error::Settings)?;
    info!(
        "settings loaded: ssid='{}' broker={}:{} base_topic='{}'",
        settings.wifi_ssid, settings.mqtt_broker, settings.mqtt_port, settings.mqtt_base_topic
    );

    // ── 3. Bargraph + liveness blink ──────────────────────────
    let lines = pins::BARGRAPH_GPIOS
        .iter()
        .map(|&gpio| EspIndicatorLine::new(gpio))
        .collect::<Result<Vec<_>, _>>()?;
    let mut bargraph = Bargraph::new(lines, SysDelay);
    bargraph.blink(1, LIVENESS_BLINK_MS);

    let mut delay = SysDelay;
    let mut reset = DeviceReset;

    // ── 4. Connectivity bring-up ──────────────────────────────
    let mut link = WifiLink::new(peripherals.modem, sysloop, nvs_partition)?;
    if let Err(e) = bringup::acquire_link(&mut link, &settings, &mut bargraph, &mut delay, &mut reset)
    {
        // Exhaustion deliberately flows on: the broker stage fails next
        // and resets the device.  A connect fault has already reset.
        warn!("link bring-up failed ({e}); proceeding to broker stage");
    }

    let mut broker = MqttBroker::new(&settings);
    bringup::acquire_session(&mut broker, &mut bargraph, &mut delay, &mut reset)
        .map_err(Error::Broker)?;

    // ── 5. Control loop ───────────────────────────────────────
    let button = EspButton::new(pins::BUTTON_GPIO)?;
    let mut rotary = EspRotary::new(
        pins::ROTARY_CLK_GPIO,
        pins::ROTARY_DT_GPIO,
        ROTARY_MIN,
        ROTARY_MAX,
        ROTARY_REVERSE,
    )?;

    let mut state = ControlState::new(rotary.position());
    info!("system ready, entering control loop");

    control::run(
        &mut state,
        &button,
        &mut rotary,
        &mut broker,
        &mut bargraph,
        &mut delay,
        &settings.mqtt_base_topic,
        &RUNNING,
    )
    .map_err(Error::Broker)?;

    Ok(())
}
