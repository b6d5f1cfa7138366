// Gesture tracking state machine
use crate::model::NormalizedSignal;

/// An accepted down that has not resolved yet. Owns the end-listener
/// subscription; dropping the value releases it.
#[derive(Debug)]
pub struct Tracking<T, S> {
    pub origin: NormalizedSignal,
    pub target: T,
    pub touch_count: usize,
    pub subscription: S,
}

#[derive(Debug)]
pub enum GestureState<T, S> {
    Idle,
    Tracking(Tracking<T, S>),
}

impl<T, S> Default for GestureState<T, S> {
    fn default() -> Self {
        GestureState::Idle
    }
}

impl<T, S> GestureState<T, S> {
    pub fn is_tracking(&self) -> bool {
        matches!(self, GestureState::Tracking(_))
    }

    pub fn tracking(&self) -> Option<&Tracking<T, S>> {
        match self {
            GestureState::Tracking(t) => Some(t),
            GestureState::Idle => None,
        }
    }

    pub fn tracking_mut(&mut self) -> Option<&mut Tracking<T, S>> {
        match self {
            GestureState::Tracking(t) => Some(t),
            GestureState::Idle => None,
        }
    }

    /// Back to idle, handing out the gesture that was open (if any).
    pub fn reset(&mut self) -> Option<Tracking<T, S>> {
        match std::mem::take(self) {
            GestureState::Tracking(t) => Some(t),
            GestureState::Idle => None,
        }
    }
}
