// Last touch-originated down, used to spot emulated mouse events
use crate::config::EMULATION_WINDOW_MS;
use crate::model::{NormalizedSignal, Point};

#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct TouchMark {
    pub page: Point,
    pub timestamp: f64,
}

impl TouchMark {
    pub fn from_signal(signal: &NormalizedSignal) -> Self {
        Self {
            page: signal.coords.page,
            timestamp: signal.timestamp,
        }
    }

    /// A mouse down this close in time and space is the platform replaying the touch.
    pub fn emulates(&self, signal: &NormalizedSignal, distance_threshold: f64) -> bool {
        (signal.timestamp - self.timestamp).abs() < EMULATION_WINDOW_MS
            && self.page.chebyshev(signal.coords.page) < distance_threshold
    }
}
