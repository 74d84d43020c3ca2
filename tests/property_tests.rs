//! Property tests for the bargraph render idiom and the brightness map.
//!
//! Runs on host (x86_64) only — proptest is not available for ESP32
//! targets.  On ESP32, these tests are compiled out.

#![cfg(not(target_os = "espidf"))]

use std::cell::RefCell;
use std::rc::Rc;

use brightdial::bargraph::Bargraph;
use brightdial::control::{brightness_for, map_range};
use brightdial::ports::{DelayPort, IndicatorLine};
use proptest::prelude::*;

type Levels = Rc<RefCell<Vec<bool>>>;

struct ProbeLine {
    levels: Levels,
    index: usize,
}

impl IndicatorLine for ProbeLine {
    fn set_level(&mut self, high: bool) {
        self.levels.borrow_mut()[self.index] = high;
    }
}

struct NoDelay;
impl DelayPort for NoDelay {
    fn delay_ms(&mut self, _ms: u32) {}
}

fn bargraph(n: usize) -> (Bargraph<ProbeLine, NoDelay>, Levels) {
    let levels: Levels = Rc::new(RefCell::new(vec![false; n]));
    let lines = (0..n)
        .map(|index| ProbeLine {
            levels: Rc::clone(&levels),
            index,
        })
        .collect();
    (Bargraph::new(lines, NoDelay), levels)
}

fn lit(levels: &Levels) -> Vec<bool> {
    levels.borrow().iter().map(|&high| !high).collect()
}

// ── Render idiom: prefix invariant ───────────────────────────

proptest! {
    /// After on-up-to / off-from for any sequence of levels, the lit
    /// segments are exactly the prefix `[0, level)`, regardless of what
    /// was rendered before.
    #[test]
    fn render_pair_always_leaves_an_exact_prefix(
        steps in proptest::collection::vec(0usize..=10, 1..=32),
    ) {
        let (mut bar, levels) = bargraph(10);
        for &level in &steps {
            bar.switch_on_greater_than(level, 0);
            bar.switch_off_between_range(level, 0, false);
        }
        let last = steps[steps.len() - 1];
        let lit = lit(&levels);
        prop_assert!(lit[..last].iter().all(|&on| on), "prefix lit up to {last}");
        prop_assert!(lit[last..].iter().all(|&on| !on), "suffix dark from {last}");
    }

    /// A fade in followed by a fade out of the same height restores the
    /// fully-dark state for any height the array can hold.
    #[test]
    fn fade_round_trip_restores_dark(height in 0usize..=9, reverse in any::<bool>()) {
        let (mut bar, levels) = bargraph(10);
        bar.fade_in(height, 0, reverse);
        bar.fade_out(height, 0);
        prop_assert!(lit(&levels).iter().all(|&on| !on));
    }
}

// ── Brightness map invariants ────────────────────────────────

proptest! {
    /// The map is monotone non-decreasing over the dial domain and its
    /// image stays inside the 8-bit brightness range.
    #[test]
    fn brightness_is_monotone_and_bounded(position in 0u8..=9) {
        let value = brightness_for(position);
        if position > 0 {
            prop_assert!(value >= brightness_for(position - 1));
        }
        // Endpoints pin both ends of the range.
        prop_assert!(brightness_for(9) == 255);
    }

    /// Floor semantics: the mapped value never exceeds the exact linear
    /// image and sits within one unit below it.
    #[test]
    fn map_floor_is_tight(value in 1.0f64..=10.0) {
        let exact = (value - 0.9) * 255.0 / 9.1;
        let mapped = map_range(value, 0.9, 10.0, 0.0, 255.0) as f64;
        prop_assert!(mapped <= exact);
        prop_assert!(exact - mapped < 1.0);
    }
}
