//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements             | Connects to               |
//! |------------|------------------------|---------------------------|
//! | `hardware` | IndicatorLine          | ESP32 GPIO (active-low)   |
//! |            | ButtonLine             | ESP32 GPIO (pull-down)    |
//! |            | RotaryPort             | ESP32 GPIO + decoder      |
//! | `wifi`     | LinkPort               | ESP-IDF WiFi STA          |
//! | `mqtt`     | BrokerPort             | ESP-IDF MQTT client       |
//! | `settings` | SettingsPort           | NVS / in-memory store     |
//! | `time`     | DelayPort              | FreeRTOS / host sleep     |
//! | `reset`    | ResetPort              | esp_restart               |

pub mod hardware;
pub mod mqtt;
pub mod reset;
pub mod settings;
pub mod time;
pub mod wifi;
