//! Input signal and tap event types.
//! Signals are immutable snapshots handed over by the host; the recognizer
//! derives a [`NormalizedSignal`] from each one instead of mutating it.

/// A 2D position in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Max of the absolute horizontal and vertical displacement.
    pub fn chebyshev(self, other: Point) -> f64 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

/// The positional fields carried by pointer events and by the emitted tap.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Coordinates {
    pub client: Point,
    pub screen: Point,
    pub page: Point,
}

impl Coordinates {
    /// Same position for all three coordinate spaces. Handy for hosts
    /// without scrolling or screen offsets.
    pub const fn uniform(x: f64, y: f64) -> Self {
        let p = Point::new(x, y);
        Self {
            client: p,
            screen: p,
            page: p,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Auxiliary,
    Secondary,
    Other(i16),
}

impl MouseButton {
    /// Maps the DOM `MouseEvent.button` index.
    pub fn from_dom(button: i16) -> Self {
        match button {
            0 => MouseButton::Primary,
            1 => MouseButton::Auxiliary,
            2 => MouseButton::Secondary,
            b => MouseButton::Other(b),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// Device-specific payload of a raw signal.
#[derive(Clone, Debug, PartialEq)]
pub enum Source {
    Mouse {
        button: MouseButton,
        coords: Coordinates,
    },
    Touch {
        /// Touch points that changed with this signal; the first one is used.
        changed: Vec<Coordinates>,
        /// Touch points currently on the surface.
        active: usize,
    },
}

/// One raw input signal as delivered by the host runtime.
#[derive(Clone, Debug, PartialEq)]
pub struct InputSignal<T> {
    pub target: T,
    pub source: Source,
    /// Dispatched programmatically rather than by genuine user input.
    pub synthetic: bool,
}

impl<T> InputSignal<T> {
    pub fn mouse(target: T, button: MouseButton, coords: Coordinates) -> Self {
        Self {
            target,
            source: Source::Mouse { button, coords },
            synthetic: false,
        }
    }

    pub fn touch(target: T, changed: Vec<Coordinates>, active: usize) -> Self {
        Self {
            target,
            source: Source::Touch { changed, active },
            synthetic: false,
        }
    }

    pub fn synthetic(mut self) -> Self {
        self.synthetic = true;
        self
    }

    pub fn pointer_kind(&self) -> PointerKind {
        match self.source {
            Source::Mouse { .. } => PointerKind::Mouse,
            Source::Touch { .. } => PointerKind::Touch,
        }
    }

    /// Derives the value the recognizer works with, stamping it with `now`.
    /// Returns `None` for a touch signal without changed touch points.
    pub fn normalize(&self, now: f64) -> Option<NormalizedSignal> {
        match &self.source {
            Source::Mouse { button, coords } => Some(NormalizedSignal {
                kind: PointerKind::Mouse,
                coords: *coords,
                timestamp: now,
                button: Some(*button),
                touch_count: 0,
            }),
            Source::Touch { changed, active } => {
                let first = changed.first()?;
                Some(NormalizedSignal {
                    kind: PointerKind::Touch,
                    coords: *first,
                    timestamp: now,
                    button: None,
                    touch_count: (*active).max(changed.len()),
                })
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedSignal {
    pub kind: PointerKind,
    pub coords: Coordinates,
    /// Wall-clock milliseconds.
    pub timestamp: f64,
    pub button: Option<MouseButton>,
    pub touch_count: usize,
}

impl NormalizedSignal {
    pub fn is_touch(&self) -> bool {
        self.kind == PointerKind::Touch
    }
}

/// The synthesized tap, addressed to the element that received the down.
#[derive(Clone, Debug, PartialEq)]
pub struct TapEvent<T> {
    pub target: T,
    pub coords: Coordinates,
    pub timestamp: f64,
    pub pointer: PointerKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chebyshev_takes_larger_axis() {
        let a = Point::new(100.0, 100.0);
        assert_eq!(a.chebyshev(Point::new(103.0, 92.0)), 8.0);
        assert_eq!(a.chebyshev(Point::new(100.0, 100.0)), 0.0);
    }

    #[test]
    fn touch_normalizes_from_first_changed_point() {
        let first = Coordinates::uniform(10.0, 20.0);
        let signal = InputSignal::touch("el", vec![first, Coordinates::uniform(50.0, 50.0)], 1);
        let n = signal.normalize(42.0).unwrap();
        assert_eq!(n.coords, first);
        assert_eq!(n.timestamp, 42.0);
        assert_eq!(n.touch_count, 2);
        assert!(n.is_touch());
    }

    #[test]
    fn touch_without_changed_points_is_dropped() {
        let signal: InputSignal<&str> = InputSignal::touch("el", Vec::new(), 0);
        assert!(signal.normalize(0.0).is_none());
    }

    #[test]
    fn dom_button_indices() {
        assert_eq!(MouseButton::from_dom(0), MouseButton::Primary);
        assert_eq!(MouseButton::from_dom(2), MouseButton::Secondary);
        assert_eq!(MouseButton::from_dom(4), MouseButton::Other(4));
    }
}
