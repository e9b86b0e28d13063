//! Application context and poll loop.
//!
//! [`App`] owns everything that changes while the device runs: the layout's
//! selection state, the previous touch sample and the keystroke transport.
//! One instance lives for the whole process.

use core::convert::Infallible;

use embedded_graphics::{pixelcolor::Rgb565, prelude::*};
use embedded_hal::delay::DelayNs;
use log::{info, trace, warn};

use crate::action::{ActionMap, Dispatcher};
use crate::config::Config;
use crate::error::Error;
use crate::input::{TouchSample, TouchSource};
use crate::keycode::{KeySink, Keycode};
use crate::layout::{Changes, Layout};
use crate::poller::{Edge, PollState, Poller};
use crate::ui::ButtonId;

/// Display transport.
///
/// Buffered panels push the frame in `flush`; direct-drawing panels keep the
/// default no-op.
pub trait Screen: DrawTarget<Color = Rgb565> {
    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// What one poll cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cycle {
    pub edge: Edge,
    /// Button selected by a rising edge.
    pub pressed: Option<ButtonId>,
    /// Key that reached the keystroke transport.
    pub sent: Option<Keycode>,
    /// Buttons whose visual state changed and need a redraw.
    pub changes: Changes,
}

/// Switcher application state.
pub struct App<K> {
    config: Config,
    layout: Layout,
    poller: Poller,
    dispatcher: Dispatcher<K>,
}

impl<K: KeySink> App<K> {
    /// Switcher surface with the standard layout and key mapping.
    pub fn new(config: Config, sink: K) -> Self {
        Self::with_layout(config, Layout::portal(), ActionMap::PORTAL, sink)
    }

    pub fn with_layout(config: Config, layout: Layout, actions: ActionMap, sink: K) -> Self {
        Self {
            config,
            layout,
            poller: Poller::new(),
            dispatcher: Dispatcher::new(sink, actions, config.send_codes),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn poll_state(&self) -> PollState {
        self.poller.state()
    }

    pub fn sink(&self) -> &K {
        self.dispatcher.sink()
    }

    pub fn sink_mut(&mut self) -> &mut K {
        self.dispatcher.sink_mut()
    }

    /// Enable or disable keystroke emission at runtime.
    pub fn set_send_codes(&mut self, send_codes: bool) {
        self.config.send_codes = send_codes;
        self.dispatcher.set_send_codes(send_codes);
    }

    /// Run one poll cycle on `sample`.
    ///
    /// On a rising edge the first button under the touch is selected, every
    /// other button is deselected and the mapped key is sent. On any other
    /// edge (including a sustained hold) only momentary buttons are cleared.
    ///
    /// # Errors
    ///
    /// Propagates the keystroke transport's error unchanged.
    pub fn tick(&mut self, sample: TouchSample) -> Result<Cycle, K::Error> {
        let edge = self.poller.cycle(sample);
        trace!("Poll cycle: {:?}", edge);

        let Edge::Rising(point) = edge else {
            return Ok(Cycle {
                edge,
                pressed: None,
                sent: None,
                changes: self.layout.release_momentary(),
            });
        };

        let (hit, changes) = self.layout.press_at(point.position());
        let pressed = hit.and_then(|index| self.layout.get(index)).map(|button| {
            info!("Button {} pressed.", button.display_label());
            button.id
        });

        let sent = match pressed {
            Some(id) => self.dispatcher.dispatch(id)?,
            None => {
                warn!("Touch at ({}, {}) missed every button", point.x, point.y);
                None
            }
        };

        Ok(Cycle {
            edge,
            pressed,
            sent,
            changes,
        })
    }

    /// Draw the whole surface.
    pub fn render<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        self.layout.render(display)
    }

    /// Redraw the buttons a cycle changed.
    pub fn render_changes<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        changes: Changes,
    ) -> Result<(), D::Error> {
        self.layout.render_changes(display, changes)
    }
}

/// Poll forever: sample, tick, redraw what changed, sleep.
///
/// Only returns when a transport fails; there is no other way to stop.
pub fn run<K, T, S, D>(
    app: &mut App<K>,
    touch: &mut T,
    screen: &mut S,
    delay: &mut D,
) -> Result<Infallible, Error<T::Error, K::Error, S::Error>>
where
    K: KeySink,
    T: TouchSource,
    S: Screen,
    D: DelayNs,
{
    app.render(screen).map_err(Error::Display)?;
    screen.flush().map_err(Error::Display)?;

    info!(
        "Starting poll loop: interval={}ms send_codes={}",
        app.config().poll_interval_ms,
        app.config().send_codes
    );

    loop {
        let sample = touch.touch_point().map_err(Error::Touch)?;
        let cycle = app.tick(sample).map_err(Error::Keys)?;

        if !cycle.changes.is_empty() {
            app.render_changes(screen, cycle.changes)
                .map_err(Error::Display)?;
            screen.flush().map_err(Error::Display)?;
        }

        delay.delay_ms(app.config().poll_interval_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::TouchPoint;
    use crate::test_display::TestDisplay;
    use alloc::collections::VecDeque;
    use alloc::vec;
    use alloc::vec::Vec;

    #[derive(Default)]
    struct Keys(Vec<Keycode>);

    impl KeySink for Keys {
        type Error = Infallible;

        fn send(&mut self, key: Keycode) -> Result<(), Infallible> {
            self.0.push(key);
            Ok(())
        }
    }

    struct Script(VecDeque<TouchSample>);

    #[derive(Debug, PartialEq)]
    struct Exhausted;

    impl TouchSource for Script {
        type Error = Exhausted;

        fn touch_point(&mut self) -> Result<TouchSample, Exhausted> {
            self.0.pop_front().ok_or(Exhausted)
        }
    }

    #[derive(Default)]
    struct Clock {
        elapsed_ns: u64,
    }

    impl DelayNs for Clock {
        fn delay_ns(&mut self, ns: u32) {
            self.elapsed_ns += ns as u64;
        }
    }

    const CAM_1: TouchSample = Some(TouchPoint::at(100, 150));
    const CUT: TouchSample = Some(TouchPoint::at(40, 40));

    #[test]
    fn rising_edge_selects_and_sends() {
        let mut app = App::new(Config::default(), Keys::default());
        let cycle = app.tick(CAM_1).unwrap();
        assert!(cycle.edge.is_rising());
        assert_eq!(cycle.pressed, Some(ButtonId::Camera1));
        assert_eq!(cycle.sent, Some(Keycode::One));
        assert_eq!(app.layout().selected(), vec![ButtonId::Camera1]);
        assert_eq!(app.poll_state(), PollState::Pressed);
    }

    #[test]
    fn held_touch_does_not_resend() {
        let mut app = App::new(Config::default(), Keys::default());
        app.tick(CAM_1).unwrap();
        let held = app.tick(CAM_1).unwrap();
        assert_eq!(held.pressed, None);
        assert_eq!(held.sent, None);
        assert_eq!(app.sink().0, [Keycode::One]);
    }

    #[test]
    fn hold_on_momentary_clears_after_one_cycle() {
        let mut app = App::new(Config::default(), Keys::default());
        app.tick(CUT).unwrap();
        assert_eq!(app.layout().selected(), vec![ButtonId::Cut]);

        let held = app.tick(CUT).unwrap();
        assert_eq!(held.changes.len(), 1);
        assert!(app.layout().selected().is_empty());
    }

    #[test]
    fn miss_deselects_without_sending() {
        let mut app = App::new(Config::default(), Keys::default());
        app.tick(CAM_1).unwrap();
        app.tick(None).unwrap();
        let miss = app.tick(Some(TouchPoint::at(500, 500))).unwrap();
        assert!(miss.edge.is_rising());
        assert_eq!(miss.pressed, None);
        assert_eq!(miss.sent, None);
        assert!(app.layout().selected().is_empty());
        assert_eq!(app.sink().0, [Keycode::One]);
    }

    #[test]
    fn send_codes_toggle_keeps_selection_behaviour() {
        let mut app = App::new(Config::default(), Keys::default());
        app.set_send_codes(false);
        let cycle = app.tick(CAM_1).unwrap();
        assert_eq!(cycle.pressed, Some(ButtonId::Camera1));
        assert_eq!(cycle.sent, None);
        assert!(!app.config().send_codes);
        assert!(app.sink().0.is_empty());
    }

    #[test]
    fn run_polls_until_touch_fails() {
        let config = Config::builder().poll_interval_ms(500).build().unwrap();
        let mut app = App::new(config, Keys::default());
        let mut touch = Script(VecDeque::from([None, CUT, CUT, None]));
        let mut screen = TestDisplay::default_size();
        let mut clock = Clock::default();

        let result = run(&mut app, &mut touch, &mut screen, &mut clock);

        assert!(matches!(result, Err(Error::Touch(Exhausted))));
        assert_eq!(app.sink().0, [Keycode::C]);
        assert_eq!(clock.elapsed_ns, 4 * 500 * 1_000_000);
        // Initial frame, cut selected, cut cleared.
        assert_eq!(screen.flushes(), 3);
        assert!(app.layout().selected().is_empty());
    }
}
