//! Fixed-cadence control loop: poll the button and the dial, mirror the
//! position on the bargraph, publish state changes to the broker.
//!
//! Single-threaded and cooperative — every tick runs to completion and
//! the process sleeps until the next one.  All loop state lives in an
//! explicit [`ControlState`] record; there are no process-wide singletons.

use core::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info};

use crate::bargraph::{Bargraph, FADE_STEP_MS};
use crate::error::BrokerError;
use crate::ports::{BrokerPort, ButtonLine, DelayPort, IndicatorLine, RotaryPort};

/// Poll cadence, milliseconds.  Not a hard real-time bound.
pub const TICK_MS: u32 = 60;

/// Linear range map with floor semantics.
///
/// Matches `(value - in_min) * (out_max - out_min) // (in_max - in_min)
/// + out_min` evaluated in double precision, so the bottom of the
/// brightness domain lands within rounding of 0 and the top exactly at
/// the output maximum.
pub fn map_range(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> i64 {
    (((value - in_min) * (out_max - out_min)) / (in_max - in_min)).floor() as i64 + out_min as i64
}

/// Brightness published for a rotary position: the position shifted into
/// the 1–10 dial domain, mapped onto `[0, 255]`.
pub fn brightness_for(position: u8) -> u8 {
    map_range(f64::from(position) + 1.0, 0.9, 10.0, 0.0, 255.0).clamp(0, 255) as u8
}

/// Per-loop mutable state: the power flag, the button latch, and the last
/// observed rotary position.
#[derive(Debug, Clone)]
pub struct ControlState {
    pub power_on: bool,
    button_held: bool,
    pub last_position: u8,
}

impl ControlState {
    /// Start powered on with the given initial rotary reading.
    pub fn new(initial_position: u8) -> Self {
        Self {
            power_on: true,
            button_held: false,
            last_position: initial_position,
        }
    }

    /// One control tick.  Publish failures propagate; the caller treats
    /// them as fatal.
    pub fn tick<B, Rt, C, L, D>(
        &mut self,
        button: &B,
        rotary: &mut Rt,
        broker: &mut C,
        bargraph: &mut Bargraph<L, D>,
        base_topic: &str,
    ) -> Result<(), BrokerError>
    where
        B: ButtonLine,
        Rt: RotaryPort,
        C: BrokerPort,
        L: IndicatorLine,
        D: DelayPort,
    {
        // Edge-detect with a held latch: one toggle per physical press,
        // however long the button stays down.  Release publishes nothing.
        if !button.is_high() && !self.button_held {
            self.button_held = true;
            self.power_on = !self.power_on;
            // The fade target is the *previous* rotary reading, not a
            // fresh sample; the next tick's change check handles any
            // brightness republish.
            if self.power_on {
                info!("power: on");
                broker.publish(&format!("{base_topic}/power"), "on")?;
                bargraph.fade_in(usize::from(self.last_position), FADE_STEP_MS, false);
            } else {
                info!("power: off");
                bargraph.fade_out(usize::from(self.last_position), FADE_STEP_MS);
                broker.publish(&format!("{base_topic}/power"), "off")?;
            }
        } else if button.is_high() && self.button_held {
            self.button_held = false;
        }

        if self.power_on {
            let position = rotary.position();
            if position != self.last_position {
                let value = brightness_for(position);
                broker.publish(&format!("{base_topic}/brightness"), &value.to_string())?;
                debug!("position changed: {position} (brightness {value})");
                self.last_position = position;
            }
            // Set both ends: the lit prefix becomes exactly position + 1
            // independent of whatever the previous tick rendered.
            let level = usize::from(position) + 1;
            bargraph.switch_on_greater_than(level, 0);
            bargraph.switch_off_between_range(level, 0, false);
        } else {
            bargraph.switch_off();
        }

        Ok(())
    }
}

/// Run ticks at [`TICK_MS`] cadence until `running` clears (the graceful
/// exit signal).  Outputs stay in their last rendered state on exit.
#[allow(clippy::too_many_arguments)]
pub fn run<B, Rt, C, L, D, P>(
    state: &mut ControlState,
    button: &B,
    rotary: &mut Rt,
    broker: &mut C,
    bargraph: &mut Bargraph<L, D>,
    delay: &mut P,
    base_topic: &str,
    running: &AtomicBool,
) -> Result<(), BrokerError>
where
    B: ButtonLine,
    Rt: RotaryPort,
    C: BrokerPort,
    L: IndicatorLine,
    D: DelayPort,
    P: DelayPort,
{
    while running.load(Ordering::Relaxed) {
        state.tick(button, rotary, broker, bargraph, base_topic)?;
        delay.delay_ms(TICK_MS);
    }
    info!("control loop stopped by request");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct NullLine;
    impl IndicatorLine for NullLine {
        fn set_level(&mut self, _high: bool) {}
    }

    struct NoDelay;
    impl DelayPort for NoDelay {
        fn delay_ms(&mut self, _ms: u32) {}
    }

    struct FakeButton {
        high: std::cell::Cell<bool>,
    }
    impl FakeButton {
        fn released() -> Self {
            Self {
                high: std::cell::Cell::new(true),
            }
        }
        fn press(&self) {
            self.high.set(false);
        }
        fn release(&self) {
            self.high.set(true);
        }
    }
    impl ButtonLine for FakeButton {
        fn is_high(&self) -> bool {
            self.high.get()
        }
    }

    struct FakeRotary {
        position: u8,
    }
    impl RotaryPort for FakeRotary {
        fn position(&mut self) -> u8 {
            self.position
        }
    }

    #[derive(Default)]
    struct RecordingBroker {
        published: Rc<RefCell<Vec<(String, String)>>>,
    }
    impl BrokerPort for RecordingBroker {
        fn connect(&mut self) -> Result<(), BrokerError> {
            Ok(())
        }
        fn publish(&mut self, topic: &str, payload: &str) -> Result<(), BrokerError> {
            self.published
                .borrow_mut()
                .push((topic.to_string(), payload.to_string()));
            Ok(())
        }
    }

    fn bargraph() -> Bargraph<NullLine, NoDelay> {
        Bargraph::new((0..10).map(|_| NullLine).collect(), NoDelay)
    }

    #[test]
    fn map_top_of_domain_is_full_scale() {
        assert_eq!(map_range(10.0, 0.9, 10.0, 0.0, 255.0), 255);
    }

    #[test]
    fn map_bottom_of_domain_is_near_zero() {
        // Floor semantics put value=1 at 2, within rounding of the 0 boundary.
        assert_eq!(map_range(1.0, 0.9, 10.0, 0.0, 255.0), 2);
    }

    #[test]
    fn map_is_monotone_over_the_dial_domain() {
        let mut prev = i64::MIN;
        for value in 1..=10 {
            let mapped = map_range(f64::from(value), 0.9, 10.0, 0.0, 255.0);
            assert!(mapped > prev, "value {value}");
            prev = mapped;
        }
    }

    #[test]
    fn brightness_endpoints() {
        assert_eq!(brightness_for(9), 255);
        assert_eq!(brightness_for(0), 2);
    }

    #[test]
    fn held_button_toggles_exactly_once() {
        let mut state = ControlState::new(3);
        let button = FakeButton::released();
        let mut rotary = FakeRotary { position: 3 };
        let mut broker = RecordingBroker::default();
        let mut bar = bargraph();

        button.press();
        for _ in 0..5 {
            state
                .tick(&button, &mut rotary, &mut broker, &mut bar, "fixture")
                .unwrap();
        }
        assert!(!state.power_on, "exactly one toggle while held");

        button.release();
        state
            .tick(&button, &mut rotary, &mut broker, &mut bar, "fixture")
            .unwrap();
        button.press();
        state
            .tick(&button, &mut rotary, &mut broker, &mut bar, "fixture")
            .unwrap();
        assert!(state.power_on, "next press toggles again");
    }

    #[test]
    fn release_publishes_nothing() {
        let mut state = ControlState::new(0);
        let button = FakeButton::released();
        let mut rotary = FakeRotary { position: 0 };
        let mut broker = RecordingBroker::default();
        let published = Rc::clone(&broker.published);
        let mut bar = bargraph();

        button.press();
        state
            .tick(&button, &mut rotary, &mut broker, &mut bar, "fixture")
            .unwrap();
        let after_press = published.borrow().len();
        button.release();
        state
            .tick(&button, &mut rotary, &mut broker, &mut bar, "fixture")
            .unwrap();
        assert_eq!(published.borrow().len(), after_press);
    }

    #[test]
    fn power_transitions_publish_on_then_off() {
        let mut state = ControlState::new(4);
        let button = FakeButton::released();
        let mut rotary = FakeRotary { position: 4 };
        let mut broker = RecordingBroker::default();
        let published = Rc::clone(&broker.published);
        let mut bar = bargraph();

        // On → off.
        button.press();
        state
            .tick(&button, &mut rotary, &mut broker, &mut bar, "fixture")
            .unwrap();
        button.release();
        state
            .tick(&button, &mut rotary, &mut broker, &mut bar, "fixture")
            .unwrap();
        // Off → on.
        button.press();
        state
            .tick(&button, &mut rotary, &mut broker, &mut bar, "fixture")
            .unwrap();

        let published = published.borrow();
        assert_eq!(published[0], ("fixture/power".into(), "off".into()));
        assert_eq!(published[1], ("fixture/power".into(), "on".into()));
    }

    #[test]
    fn brightness_publishes_only_on_change_while_on() {
        let mut state = ControlState::new(3);
        let button = FakeButton::released();
        let mut rotary = FakeRotary { position: 3 };
        let mut broker = RecordingBroker::default();
        let published = Rc::clone(&broker.published);
        let mut bar = bargraph();

        // Unchanged position: nothing published.
        state
            .tick(&button, &mut rotary, &mut broker, &mut bar, "fixture")
            .unwrap();
        assert!(published.borrow().is_empty());

        // Changed position: one brightness publish.
        rotary.position = 5;
        state
            .tick(&button, &mut rotary, &mut broker, &mut bar, "fixture")
            .unwrap();
        assert_eq!(
            *published.borrow(),
            vec![(
                "fixture/brightness".to_string(),
                brightness_for(5).to_string()
            )]
        );
        assert_eq!(state.last_position, 5);

        // Same position again: no republish.
        state
            .tick(&button, &mut rotary, &mut broker, &mut bar, "fixture")
            .unwrap();
        assert_eq!(published.borrow().len(), 1);
    }

    #[test]
    fn no_brightness_publish_while_off() {
        let mut state = ControlState::new(3);
        let button = FakeButton::released();
        let mut rotary = FakeRotary { position: 3 };
        let mut broker = RecordingBroker::default();
        let published = Rc::clone(&broker.published);
        let mut bar = bargraph();

        button.press();
        state
            .tick(&button, &mut rotary, &mut broker, &mut bar, "fixture")
            .unwrap();
        assert!(!state.power_on);

        rotary.position = 7;
        button.release();
        state
            .tick(&button, &mut rotary, &mut broker, &mut bar, "fixture")
            .unwrap();

        let published = published.borrow();
        // Only the power-off publish; the dial move while off is silent.
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].0, "fixture/power");
    }

    #[test]
    fn stop_flag_exits_the_loop() {
        let mut state = ControlState::new(0);
        let button = FakeButton::released();
        let mut rotary = FakeRotary { position: 0 };
        let mut broker = RecordingBroker::default();
        let mut bar = bargraph();
        let mut delay = NoDelay;
        let running = AtomicBool::new(false);

        // Already-cleared flag: run returns immediately without a tick.
        run(
            &mut state,
            &button,
            &mut rotary,
            &mut broker,
            &mut bar,
            &mut delay,
            "fixture",
            &running,
        )
        .unwrap();
        assert!(broker.published.borrow().is_empty());
    }
}
