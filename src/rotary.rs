//! Bounded quadrature decoder for the rotary dial.
//!
//! Pure logic: the adapter feeds raw CLK/DT levels in, the decoder steps a
//! bounded counter.  Range mode is bounded — the counter clamps at
//! `min_val`/`max_val` rather than wrapping — and the rotation direction
//! can be logically reversed to match how the dial is mounted.
//!
//! Counts once per detent, on the falling CLK edge: DT high at that edge
//! means clockwise.

/// Decoder state plus the bounded counter.
#[derive(Debug, Clone)]
pub struct RotaryDecoder {
    min_val: u8,
    max_val: u8,
    reverse: bool,
    value: u8,
    last_clk: bool,
}

impl RotaryDecoder {
    /// `min_val..=max_val` is the clamped output range; `reverse` flips
    /// the logical rotation direction.
    pub fn new(min_val: u8, max_val: u8, reverse: bool) -> Self {
        debug_assert!(min_val <= max_val);
        Self {
            min_val,
            max_val,
            reverse,
            value: min_val,
            last_clk: true,
        }
    }

    /// Feed one sample of the raw CLK/DT levels.
    pub fn update(&mut self, clk: bool, dt: bool) {
        let falling = self.last_clk && !clk;
        self.last_clk = clk;
        if !falling {
            return;
        }

        let clockwise = dt != self.reverse;
        if clockwise {
            if self.value < self.max_val {
                self.value += 1;
            }
        } else if self.value > self.min_val {
            self.value -= 1;
        }
    }

    /// Current bounded position.
    pub fn value(&self) -> u8 {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One clockwise detent: CLK falls with DT high, then both return high.
    fn detent_cw(dec: &mut RotaryDecoder) {
        dec.update(false, true);
        dec.update(true, true);
    }

    /// One counter-clockwise detent: CLK falls with DT low.
    fn detent_ccw(dec: &mut RotaryDecoder) {
        dec.update(false, false);
        dec.update(true, false);
    }

    #[test]
    fn starts_at_min() {
        let dec = RotaryDecoder::new(0, 9, false);
        assert_eq!(dec.value(), 0);
    }

    #[test]
    fn counts_one_per_detent() {
        let mut dec = RotaryDecoder::new(0, 9, false);
        detent_cw(&mut dec);
        assert_eq!(dec.value(), 1);
        detent_cw(&mut dec);
        detent_cw(&mut dec);
        assert_eq!(dec.value(), 3);
        detent_ccw(&mut dec);
        assert_eq!(dec.value(), 2);
    }

    #[test]
    fn clamps_at_range_edges_without_wrapping() {
        let mut dec = RotaryDecoder::new(0, 9, false);
        for _ in 0..20 {
            detent_cw(&mut dec);
        }
        assert_eq!(dec.value(), 9);
        for _ in 0..20 {
            detent_ccw(&mut dec);
        }
        assert_eq!(dec.value(), 0);
    }

    #[test]
    fn reverse_flips_direction() {
        let mut fwd = RotaryDecoder::new(0, 9, false);
        let mut rev = RotaryDecoder::new(0, 9, true);
        detent_cw(&mut fwd);
        detent_ccw(&mut rev);
        assert_eq!(fwd.value(), 1);
        assert_eq!(rev.value(), 1);
    }

    #[test]
    fn steady_levels_do_not_count() {
        let mut dec = RotaryDecoder::new(0, 9, false);
        detent_cw(&mut dec);
        // Holding the lines steady must not accumulate counts.
        for _ in 0..10 {
            dec.update(true, true);
        }
        assert_eq!(dec.value(), 1);
    }
}
