// Most recent recognized tap, kept to swallow the native click that follows it
use crate::config::EMULATION_WINDOW_MS;
use crate::model::{Point, TapEvent};

#[derive(Debug, Clone, PartialEq)]
pub struct LastTap<T> {
    pub event: TapEvent<T>,
    /// Set once the dispatched tap reports `preventDefault` from a listener.
    pub default_prevented: bool,
}

impl<T: PartialEq> LastTap<T> {
    pub fn new(event: TapEvent<T>) -> Self {
        Self {
            event,
            default_prevented: false,
        }
    }

    pub fn matches_click(&self, target: &T, page: Point, now: f64) -> bool {
        self.default_prevented
            && self.event.target == *target
            && self.event.coords.page == page
            && now - self.event.timestamp < EMULATION_WINDOW_MS
    }
}
