//! GPIO pin assignments for the BrightDial board.
//!
//! Single source of truth — every adapter references this module rather
//! than hard-coding pin numbers.  Change a pin here and it propagates
//! everywhere.

// ---------------------------------------------------------------------------
// LED bargraph (10 discrete LEDs, common-anode — driven active LOW)
// ---------------------------------------------------------------------------

/// Bargraph LED pins, index 0 at the bottom of the column.
/// Each line sinks current: electrical LOW = lit.
pub const BARGRAPH_GPIOS: [i32; 10] = [19, 21, 22, 23, 18, 5, 17, 16, 4, 2];

// ---------------------------------------------------------------------------
// Rotary encoder (KY-040 style, bounded 0–9)
// ---------------------------------------------------------------------------

/// Encoder clock (A) line.
pub const ROTARY_CLK_GPIO: i32 = 33;
/// Encoder data (B) line.
pub const ROTARY_DT_GPIO: i32 = 32;

// ---------------------------------------------------------------------------
// Power button
// ---------------------------------------------------------------------------

/// Momentary push-button on the encoder shaft.  Pull-down bias;
/// the line reads LOW while pressed.
pub const BUTTON_GPIO: i32 = 15;
