//! Unified error types for the BrightDial firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! top-level bring-up and control-loop error handling uniform.  All
//! variants are `Copy` so they pass through the bring-up state machine
//! without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Settings are missing, malformed, or failed validation.
    Settings(SettingsError),
    /// Wireless link acquisition failed.
    Link(LinkError),
    /// Broker session acquisition or publish failed.
    Broker(BrokerError),
    /// Peripheral initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Settings(e) => write!(f, "settings: {e}"),
            Self::Link(e) => write!(f, "link: {e}"),
            Self::Broker(e) => write!(f, "broker: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Settings errors
// ---------------------------------------------------------------------------

/// Fatal at startup: the process must not attempt connectivity with a
/// missing or invalid settings record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsError {
    /// No settings record exists in the backing store.
    NotFound,
    /// The record exists but is not valid JSON or is missing a key.
    Malformed,
    /// A field failed range validation; the message names the field.
    ValidationFailed(&'static str),
    /// The backing store could not be opened or read.
    StoreUnavailable,
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "settings record not found"),
            Self::Malformed => write!(f, "settings record malformed"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
            Self::StoreUnavailable => write!(f, "settings store unavailable"),
        }
    }
}

impl From<SettingsError> for Error {
    fn from(e: SettingsError) -> Self {
        Self::Settings(e)
    }
}

// ---------------------------------------------------------------------------
// Link errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkError {
    /// The connect call itself faulted (driver or credential error).
    /// Fatal: bring-up responds with a full device reset.
    ConnectFailed,
    /// The bounded poll loop ran out of attempts while the link stayed
    /// down.  Non-fatal at Stage A; Stage B is then expected to fail.
    RetriesExhausted,
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectFailed => write!(f, "connect call failed"),
            Self::RetriesExhausted => write!(f, "retries exhausted"),
        }
    }
}

impl From<LinkError> for Error {
    fn from(e: LinkError) -> Self {
        Self::Link(e)
    }
}

// ---------------------------------------------------------------------------
// Broker errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrokerError {
    /// Session establishment failed.  Always fatal: bring-up resets.
    ConnectFailed,
    /// A publish call failed after the session was established.
    PublishFailed,
}

impl fmt::Display for BrokerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectFailed => write!(f, "session connect failed"),
            Self::PublishFailed => write!(f, "publish failed"),
        }
    }
}

impl From<BrokerError> for Error {
    fn from(e: BrokerError) -> Self {
        Self::Broker(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
