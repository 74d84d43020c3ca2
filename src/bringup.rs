//! Connectivity bring-up — bounded-retry acquisition of the wireless link
//! and the broker session, with the bargraph as the only human-visible
//! status surface.
//!
//! Two sequential stages:
//!
//! * **Stage A** (link): tolerate transient radio latency with a bounded
//!   poll loop (breathing animation per attempt).  A fault from the
//!   connect call itself aborts via device reset; plain exhaustion does
//!   NOT reset — control flows on and Stage B fails in turn.
//! * **Stage B** (broker): single attempt.  Any failure is terminal — the
//!   device resets and the platform's restart-on-reset behaviour re-runs
//!   bring-up from scratch.  No partial-session cleanup is ever needed.
//!
//! The Stage A / Stage B reset asymmetry is deliberate; do not "fix" it.

use log::{error, info, warn};

use crate::bargraph::{Bargraph, BLINK_MS, FADE_STEP_MS};
use crate::config::ConnectionSettings;
use crate::error::{BrokerError, LinkError};
use crate::ports::{BrokerPort, DelayPort, IndicatorLine, LinkPort, ResetPort};

/// Bounded poll budget for Stage A.
pub const MAX_LINK_ATTEMPTS: u32 = 20;
/// Hold between breathing half-cycles, milliseconds.
pub const BREATH_PAUSE_MS: u32 = 200;
/// Short heartbeat blink on Stage A entry.
pub const HEARTBEAT_BLINK_MS: u32 = 30;
/// Rapid cadence for failure blinks.
pub const ERROR_BLINK_MS: u32 = 20;

const STATUS_BLINKS: u32 = 2;
const ERROR_BLINKS: u32 = 6;

/// One breathing cycle: fade in (reverse) to two short of the top, hold,
/// fade back out, hold.
fn breathe<L, D, P>(bargraph: &mut Bargraph<L, D>, delay: &mut P)
where
    L: IndicatorLine,
    D: DelayPort,
    P: DelayPort,
{
    let top = bargraph.len() - 2;
    bargraph.fade_in(top, FADE_STEP_MS, true);
    delay.delay_ms(BREATH_PAUSE_MS);
    bargraph.fade_out(top, FADE_STEP_MS);
    delay.delay_ms(BREATH_PAUSE_MS);
}

/// Stage A — acquire the wireless link.
///
/// Returns `Ok` once the driver reports an active session.  On a connect
/// call fault the reset port is invoked (no retry); on poll exhaustion it
/// returns [`LinkError::RetriesExhausted`] without resetting.
pub fn acquire_link<K, L, D, P, R>(
    link: &mut K,
    settings: &ConnectionSettings,
    bargraph: &mut Bargraph<L, D>,
    delay: &mut P,
    reset: &mut R,
) -> Result<(), LinkError>
where
    K: LinkPort,
    L: IndicatorLine,
    D: DelayPort,
    P: DelayPort,
    R: ResetPort,
{
    bargraph.blink(1, HEARTBEAT_BLINK_MS);

    if link.is_connected() {
        info!("link: already connected");
        bargraph.fade_in(bargraph.len(), FADE_STEP_MS, false);
        return Ok(());
    }

    info!("link: connecting to '{}'", settings.wifi_ssid);
    if let Err(e) = link.connect(&settings.wifi_ssid, &settings.wifi_password) {
        error!("link: connect call faulted ({e}) — resetting");
        bargraph.blink(ERROR_BLINKS, ERROR_BLINK_MS);
        reset.reset();
        return Err(LinkError::ConnectFailed);
    }

    let mut attempt = 0;
    while !link.is_connected() && attempt < MAX_LINK_ATTEMPTS {
        info!(
            "link: waiting for connection (attempt {} of {})",
            attempt, MAX_LINK_ATTEMPTS
        );
        breathe(bargraph, delay);
        attempt += 1;
    }

    if link.is_connected() {
        match link.ip_address() {
            Some(ip) => info!("link: connected, station address {ip}"),
            None => info!("link: connected"),
        }
        bargraph.blink(STATUS_BLINKS, BLINK_MS);
        bargraph.fade_in(bargraph.len(), FADE_STEP_MS, false);
        Ok(())
    } else {
        warn!("link: still down after {MAX_LINK_ATTEMPTS} attempts");
        bargraph.blink(ERROR_BLINKS, ERROR_BLINK_MS);
        Err(LinkError::RetriesExhausted)
    }
}

/// Stage B — acquire the broker session.
///
/// Single attempt.  Failure blinks, breathes once, then invokes the reset
/// port unconditionally.
pub fn acquire_session<B, L, D, P, R>(
    broker: &mut B,
    bargraph: &mut Bargraph<L, D>,
    delay: &mut P,
    reset: &mut R,
) -> Result<(), BrokerError>
where
    B: BrokerPort,
    L: IndicatorLine,
    D: DelayPort,
    P: DelayPort,
    R: ResetPort,
{
    match broker.connect() {
        Ok(()) => {
            info!("broker: session established");
            bargraph.blink(STATUS_BLINKS, BLINK_MS);
            Ok(())
        }
        Err(e) => {
            error!("broker: session connect failed ({e}) — resetting");
            bargraph.blink(ERROR_BLINKS, ERROR_BLINK_MS);
            breathe(bargraph, delay);
            reset.reset();
            Err(e)
        }
    }
}
