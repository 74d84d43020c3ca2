//! Bargraph driver — deterministic, time-sequenced rendering of an integer
//! level onto a column of N binary LED lines.
//!
//! ## Electrical convention
//!
//! The column is common-anode: a line sinks current when driven LOW, so
//! electrical LOW = lit.  That inversion is confined to this module —
//! every public operation speaks in logical lit/unlit terms and callers
//! never see raw levels.
//!
//! ## Render idiom
//!
//! The control loop renders the current level each tick with a pair of
//! calls, `switch_on_greater_than(level)` then
//! `switch_off_between_range(level)`, which together make the lit prefix
//! exactly `level` regardless of whatever was displayed before.  No prior
//! rendered state is tracked, so a missed tick costs nothing.
//!
//! ## Failure semantics
//!
//! Out-of-range indices are a caller-contract violation and panic via
//! slice indexing.  Line writes are synchronous and infallible at this
//! layer.

use crate::ports::{DelayPort, IndicatorLine};

/// Default pacing for fade steps, milliseconds.
pub const FADE_STEP_MS: u32 = 20;
/// Default pacing for blinks, milliseconds.
pub const BLINK_MS: u32 = 60;

/// Ordered column of binary output lines, index 0 at the bottom.
pub struct Bargraph<L: IndicatorLine, D: DelayPort> {
    lines: Vec<L>,
    delay: D,
}

impl<L: IndicatorLine, D: DelayPort> Bargraph<L, D> {
    /// Take ownership of the output lines and drive them all unlit.
    pub fn new(lines: Vec<L>, delay: D) -> Self {
        let mut bar = Self { lines, delay };
        bar.switch_off();
        bar
    }

    /// Number of lines in the column.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Drive one line to a logical state.  LOW = lit lives only here.
    fn set_lit(&mut self, index: usize, lit: bool) {
        self.lines[index].set_level(!lit);
    }

    fn pause(&mut self, delay_ms: u32) {
        if delay_ms > 0 {
            self.delay.delay_ms(delay_ms);
        }
    }

    /// Status heartbeat / error signal: `count` times, all lines lit for
    /// `delay_ms`, then all unlit for `delay_ms`.
    pub fn blink(&mut self, count: u32, delay_ms: u32) {
        for _ in 0..count {
            for i in 0..self.lines.len() {
                self.set_lit(i, true);
            }
            self.pause(delay_ms);
            for i in 0..self.lines.len() {
                self.set_lit(i, false);
            }
            self.pause(delay_ms);
        }
    }

    /// Sequentially light lines up to `value`.
    ///
    /// Forward lights indices `0..value`; reverse lights `value..=0`
    /// descending (so `value` must be a valid index in reverse mode).
    /// One line per `delay_ms` interval; zero delay burst-sets.
    pub fn fade_in(&mut self, value: usize, delay_ms: u32, reverse: bool) {
        if reverse {
            for i in (0..=value).rev() {
                self.set_lit(i, true);
                self.pause(delay_ms);
            }
        } else {
            for i in 0..value {
                self.set_lit(i, true);
                self.pause(delay_ms);
            }
        }
    }

    /// Sequentially unlight lines from `value` down to 0.
    pub fn fade_out(&mut self, value: usize, delay_ms: u32) {
        for i in (0..=value).rev() {
            self.set_lit(i, false);
            self.pause(delay_ms);
        }
    }

    /// Light indices `0..value`, optionally paced.  Used each control tick
    /// to render the currently active levels.
    pub fn switch_on_greater_than(&mut self, value: usize, delay_ms: u32) {
        for i in 0..value {
            self.set_lit(i, true);
            self.pause(delay_ms);
        }
    }

    /// Unlight from `start` to the top of the column (forward) or from
    /// `start` down to 0 (reverse).  No-op when `start` is past the top.
    pub fn switch_off_between_range(&mut self, start: usize, delay_ms: u32, reverse: bool) {
        if start >= self.lines.len() {
            return;
        }
        if reverse {
            for i in (0..=start).rev() {
                self.set_lit(i, false);
                self.pause(delay_ms);
            }
        } else {
            for i in start..self.lines.len() {
                self.set_lit(i, false);
                self.pause(delay_ms);
            }
        }
    }

    /// Unlight every line immediately, no pacing.
    pub fn switch_off(&mut self) {
        for i in 0..self.lines.len() {
            self.set_lit(i, false);
        }
    }
}
