//! Tap recognition over a stream of down / end / cancel / click signals.
//!
//! The recognizer is host-agnostic: `T` identifies event targets and `S` is
//! whatever handle keeps the end listeners alive while a gesture is open. The
//! handle is created by the `subscribe` callback passed to
//! [`TapRecognizer::on_down`] and dropped on every return to idle.

use crate::clock::{Clock, SystemClock};
use crate::config::TapConfig;
use crate::model::{InputSignal, MouseButton, NormalizedSignal, PointerKind, Source, TapEvent};
use crate::state::{GestureState, LastTap, TouchMark, Tracking};

/// Why a signal was dropped without touching the gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ignored {
    Synthetic,
    NoTouchPoint,
    NonPrimaryButton,
    AlreadyTracking,
    Emulated,
    OtherPointer,
}

/// Why a resolved gesture did not produce a tap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    TooSlow,
    TooFar,
    MultiTouch,
    NotTracking,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DownOutcome {
    Tracking,
    Ignored(Ignored),
}

#[derive(Clone, Debug, PartialEq)]
pub enum EndOutcome<T> {
    Tap(TapEvent<T>),
    Rejected(Rejection),
    Ignored(Ignored),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CancelCause {
    /// The platform aborted the gesture (`touchcancel`).
    Platform,
    /// The gesture ended normally or the host shut down.
    Resolved,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CancelOutcome {
    /// The host should call `preventDefault` on the cancel signal.
    pub prevent_default: bool,
    pub was_tracking: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    Pass,
    /// Duplicate of the last tap: prevent its default and stop propagation.
    Suppress,
}

pub struct TapRecognizer<T, S> {
    config: TapConfig,
    clock: Box<dyn Clock>,
    state: GestureState<T, S>,
    last_tap: Option<LastTap<T>>,
    last_touch: Option<TouchMark>,
}

impl<T, S> TapRecognizer<T, S>
where
    T: Clone + PartialEq,
{
    pub fn new(config: TapConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }

    pub fn with_clock(config: TapConfig, clock: impl Clock + 'static) -> Self {
        Self {
            config,
            clock: Box::new(clock),
            state: GestureState::Idle,
            last_tap: None,
            last_touch: None,
        }
    }

    pub fn config(&self) -> &TapConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: TapConfig) {
        self.config = config;
    }

    pub fn is_tracking(&self) -> bool {
        self.state.is_tracking()
    }

    pub fn last_tap(&self) -> Option<&LastTap<T>> {
        self.last_tap.as_ref()
    }

    pub fn on_down<F>(&mut self, signal: &InputSignal<T>, subscribe: F) -> DownOutcome
    where
        F: FnOnce(PointerKind) -> S,
    {
        if signal.synthetic {
            return DownOutcome::Ignored(Ignored::Synthetic);
        }
        let Some(down) = signal.normalize(self.clock.now_ms()) else {
            return DownOutcome::Ignored(Ignored::NoTouchPoint);
        };

        if self.config.primary_button_only
            && !down.is_touch()
            && down.button != Some(MouseButton::Primary)
        {
            return DownOutcome::Ignored(Ignored::NonPrimaryButton);
        }

        if down.is_touch() {
            self.last_touch = Some(TouchMark::from_signal(&down));
        }

        if let Some(open) = self.state.tracking_mut() {
            // another finger joining an open touch gesture spoils it
            if down.is_touch() && open.origin.is_touch() {
                open.touch_count = open.touch_count.max(down.touch_count).max(2);
            }
            return DownOutcome::Ignored(Ignored::AlreadyTracking);
        }

        if !down.is_touch() && self.is_emulated(&down) {
            log::trace!("ignoring emulated mouse down at {:?}", down.coords.page);
            return DownOutcome::Ignored(Ignored::Emulated);
        }

        let subscription = subscribe(down.kind);
        self.state = GestureState::Tracking(Tracking {
            origin: down,
            target: signal.target.clone(),
            touch_count: down.touch_count,
            subscription,
        });
        log::debug!("tracking {:?} gesture at {:?}", down.kind, down.coords.page);
        DownOutcome::Tracking
    }

    pub fn on_end(&mut self, signal: &InputSignal<T>) -> EndOutcome<T> {
        if signal.synthetic {
            return EndOutcome::Ignored(Ignored::Synthetic);
        }
        let Some(end) = signal.normalize(self.clock.now_ms()) else {
            return EndOutcome::Ignored(Ignored::NoTouchPoint);
        };
        if let Some(open) = self.state.tracking() {
            if open.origin.kind != end.kind {
                return EndOutcome::Ignored(Ignored::OtherPointer);
            }
        }

        let outcome = match self.check_tap(&end) {
            Ok(target) => {
                let tap = TapEvent {
                    target,
                    coords: end.coords,
                    timestamp: end.timestamp,
                    pointer: end.kind,
                };
                log::debug!("tap at {:?}", tap.coords.page);
                self.last_tap = Some(LastTap::new(tap.clone()));
                EndOutcome::Tap(tap)
            }
            Err(reason) => {
                log::debug!("gesture rejected: {:?}", reason);
                EndOutcome::Rejected(reason)
            }
        };

        self.cancel(CancelCause::Resolved);
        outcome
    }

    /// Records whether a listener prevented the default of the tap that was
    /// just dispatched. Only a prevented tap swallows the following click.
    pub fn settle_tap(&mut self, default_prevented: bool) {
        if let Some(last) = self.last_tap.as_mut() {
            last.default_prevented = default_prevented;
        }
    }

    pub fn on_cancel(&mut self, cause: CancelCause) -> CancelOutcome {
        self.cancel(cause)
    }

    pub fn on_click(&mut self, signal: &InputSignal<T>) -> ClickOutcome {
        if signal.synthetic {
            return ClickOutcome::Pass;
        }
        let page = match &signal.source {
            Source::Mouse { coords, .. } => coords.page,
            Source::Touch { changed, .. } => match changed.first() {
                Some(c) => c.page,
                None => return ClickOutcome::Pass,
            },
        };
        let now = self.clock.now_ms();
        let duplicate = self
            .last_tap
            .as_ref()
            .is_some_and(|last| last.matches_click(&signal.target, page, now));
        if duplicate {
            log::debug!("suppressing click duplicating tap at {:?}", page);
            self.last_tap = None;
            ClickOutcome::Suppress
        } else {
            ClickOutcome::Pass
        }
    }

    /// Drops any open gesture and its end listeners.
    pub fn reset(&mut self) {
        self.cancel(CancelCause::Resolved);
    }

    fn cancel(&mut self, cause: CancelCause) -> CancelOutcome {
        let was_tracking = self.state.reset().is_some();
        CancelOutcome {
            prevent_default: cause == CancelCause::Platform,
            was_tracking,
        }
    }

    fn is_emulated(&self, down: &NormalizedSignal) -> bool {
        self.last_touch
            .is_some_and(|mark| mark.emulates(down, self.config.distance_threshold))
    }

    fn check_tap(&self, end: &NormalizedSignal) -> Result<T, Rejection> {
        let open = self.state.tracking().ok_or(Rejection::NotTracking)?;
        let origin = &open.origin;
        if end.timestamp - origin.timestamp >= self.config.time_threshold {
            return Err(Rejection::TooSlow);
        }
        if origin.coords.page.chebyshev(end.coords.page) >= self.config.distance_threshold {
            return Err(Rejection::TooFar);
        }
        if origin.is_touch() && open.touch_count != 1 {
            return Err(Rejection::MultiTouch);
        }
        Ok(open.target.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::clock::ManualClock;
    use crate::model::Coordinates;

    struct Probe(Rc<Cell<i32>>);

    impl Drop for Probe {
        fn drop(&mut self) {
            self.0.set(self.0.get() - 1);
        }
    }

    struct Rig {
        clock: ManualClock,
        live: Rc<Cell<i32>>,
        rec: TapRecognizer<&'static str, Probe>,
    }

    impl Rig {
        fn new() -> Self {
            let clock = ManualClock::new(1_000.0);
            Self {
                rec: TapRecognizer::with_clock(TapConfig::default(), clock.clone()),
                clock,
                live: Rc::new(Cell::new(0)),
            }
        }

        fn down(&mut self, signal: InputSignal<&'static str>) -> DownOutcome {
            let live = self.live.clone();
            self.rec.on_down(&signal, move |_| {
                live.set(live.get() + 1);
                Probe(live)
            })
        }
    }

    fn mouse(x: f64, y: f64) -> InputSignal<&'static str> {
        InputSignal::mouse("button", MouseButton::Primary, Coordinates::uniform(x, y))
    }

    fn touch(x: f64, y: f64, active: usize) -> InputSignal<&'static str> {
        InputSignal::touch("button", vec![Coordinates::uniform(x, y)], active)
    }

    #[test]
    fn quick_mouse_click_is_a_tap() {
        let mut rig = Rig::new();
        assert_eq!(rig.down(mouse(100.0, 100.0)), DownOutcome::Tracking);
        assert_eq!(rig.live.get(), 1);
        rig.clock.advance(150.0);
        match rig.rec.on_end(&mouse(103.0, 102.0)) {
            EndOutcome::Tap(tap) => {
                assert_eq!(tap.target, "button");
                assert_eq!(tap.coords.page, crate::model::Point::new(103.0, 102.0));
            }
            other => panic!("expected tap, got {:?}", other),
        }
        assert!(!rig.rec.is_tracking());
        assert_eq!(rig.live.get(), 0);
    }

    #[test]
    fn long_press_is_rejected() {
        let mut rig = Rig::new();
        rig.down(mouse(100.0, 100.0));
        rig.clock.advance(400.0);
        assert_eq!(
            rig.rec.on_end(&mouse(100.0, 100.0)),
            EndOutcome::Rejected(Rejection::TooSlow)
        );
        assert_eq!(rig.live.get(), 0);
    }

    #[test]
    fn drag_is_rejected_at_threshold() {
        let mut rig = Rig::new();
        rig.down(mouse(100.0, 100.0));
        rig.clock.advance(50.0);
        assert_eq!(
            rig.rec.on_end(&mouse(100.0, 110.0)),
            EndOutcome::Rejected(Rejection::TooFar)
        );
    }

    #[test]
    fn secondary_button_ignored_unless_configured() {
        let mut rig = Rig::new();
        let right = InputSignal::mouse("button", MouseButton::Secondary, Coordinates::uniform(1.0, 1.0));
        assert_eq!(rig.down(right.clone()), DownOutcome::Ignored(Ignored::NonPrimaryButton));
        rig.rec.set_config(TapConfig {
            primary_button_only: false,
            ..TapConfig::default()
        });
        assert_eq!(rig.down(right), DownOutcome::Tracking);
    }

    #[test]
    fn first_down_wins() {
        let mut rig = Rig::new();
        rig.down(mouse(10.0, 10.0));
        assert_eq!(rig.down(mouse(50.0, 50.0)), DownOutcome::Ignored(Ignored::AlreadyTracking));
        assert_eq!(rig.live.get(), 1);
        rig.clock.advance(20.0);
        assert!(matches!(rig.rec.on_end(&mouse(11.0, 10.0)), EndOutcome::Tap(_)));
    }

    #[test]
    fn second_finger_spoils_touch_tap() {
        let mut rig = Rig::new();
        assert_eq!(rig.down(touch(100.0, 100.0, 1)), DownOutcome::Tracking);
        rig.down(InputSignal::touch("button", vec![Coordinates::uniform(140.0, 100.0)], 1));
        rig.clock.advance(50.0);
        assert_eq!(
            rig.rec.on_end(&touch(100.0, 100.0, 0)),
            EndOutcome::Rejected(Rejection::MultiTouch)
        );
    }

    #[test]
    fn synthetic_signals_do_nothing() {
        let mut rig = Rig::new();
        assert_eq!(rig.down(mouse(1.0, 1.0).synthetic()), DownOutcome::Ignored(Ignored::Synthetic));
        rig.down(mouse(1.0, 1.0));
        assert_eq!(
            rig.rec.on_end(&mouse(1.0, 1.0).synthetic()),
            EndOutcome::Ignored(Ignored::Synthetic)
        );
        assert!(rig.rec.is_tracking());
    }

    #[test]
    fn end_without_down_is_rejected() {
        let mut rig = Rig::new();
        assert_eq!(
            rig.rec.on_end(&mouse(1.0, 1.0)),
            EndOutcome::Rejected(Rejection::NotTracking)
        );
    }

    #[test]
    fn platform_cancel_prevents_default_and_releases() {
        let mut rig = Rig::new();
        rig.down(touch(5.0, 5.0, 1));
        let out = rig.rec.on_cancel(CancelCause::Platform);
        assert!(out.prevent_default);
        assert!(out.was_tracking);
        assert_eq!(rig.live.get(), 0);
        rig.clock.advance(10.0);
        assert_eq!(
            rig.rec.on_end(&touch(5.0, 5.0, 0)),
            EndOutcome::Rejected(Rejection::NotTracking)
        );
    }

    #[test]
    fn mouse_end_does_not_close_touch_gesture() {
        let mut rig = Rig::new();
        rig.down(touch(5.0, 5.0, 1));
        assert_eq!(
            rig.rec.on_end(&mouse(5.0, 5.0)),
            EndOutcome::Ignored(Ignored::OtherPointer)
        );
        assert!(rig.rec.is_tracking());
    }

    #[test]
    fn click_after_prevented_tap_is_suppressed_once() {
        let mut rig = Rig::new();
        rig.down(touch(20.0, 30.0, 1));
        rig.clock.advance(80.0);
        assert!(matches!(rig.rec.on_end(&touch(20.0, 30.0, 0)), EndOutcome::Tap(_)));
        rig.rec.settle_tap(true);
        rig.clock.advance(300.0);
        assert_eq!(rig.rec.on_click(&mouse(20.0, 30.0)), ClickOutcome::Suppress);
        assert!(rig.rec.last_tap().is_none());
        assert_eq!(rig.rec.on_click(&mouse(20.0, 30.0)), ClickOutcome::Pass);
    }

    #[test]
    fn click_passes_when_tap_default_not_prevented() {
        let mut rig = Rig::new();
        rig.down(touch(20.0, 30.0, 1));
        rig.clock.advance(80.0);
        rig.rec.on_end(&touch(20.0, 30.0, 0));
        rig.rec.settle_tap(false);
        assert_eq!(rig.rec.on_click(&mouse(20.0, 30.0)), ClickOutcome::Pass);
    }

    #[test]
    fn click_on_other_target_passes() {
        let mut rig = Rig::new();
        rig.down(touch(20.0, 30.0, 1));
        rig.clock.advance(80.0);
        rig.rec.on_end(&touch(20.0, 30.0, 0));
        rig.rec.settle_tap(true);
        let elsewhere = InputSignal::mouse("link", MouseButton::Primary, Coordinates::uniform(20.0, 30.0));
        assert_eq!(rig.rec.on_click(&elsewhere), ClickOutcome::Pass);
    }

    #[test]
    fn emulated_mouse_after_touch_is_ignored() {
        let mut rig = Rig::new();
        rig.down(touch(100.0, 100.0, 1));
        rig.clock.advance(60.0);
        rig.rec.on_end(&touch(100.0, 100.0, 0));
        rig.clock.advance(200.0);
        assert_eq!(rig.down(mouse(102.0, 101.0)), DownOutcome::Ignored(Ignored::Emulated));
        rig.clock.advance(600.0);
        assert_eq!(rig.down(mouse(102.0, 101.0)), DownOutcome::Tracking);
    }

    #[test]
    fn reset_clears_open_gesture() {
        let mut rig = Rig::new();
        rig.down(mouse(1.0, 1.0));
        rig.rec.reset();
        assert!(!rig.rec.is_tracking());
        assert_eq!(rig.live.get(), 0);
    }
}
