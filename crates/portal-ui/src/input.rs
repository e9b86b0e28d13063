//! Touch input abstraction.
//!
//! The touch controller driver owns sampling and calibration; this crate only
//! consumes points that are already in display pixel space.

use embedded_graphics::prelude::Point;

/// One calibrated touch reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchPoint {
    pub x: i32,
    pub y: i32,
    /// Raw pressure as reported by the controller (unused by hit-testing).
    pub pressure: u16,
}

impl TouchPoint {
    pub const fn new(x: i32, y: i32, pressure: u16) -> Self {
        Self { x, y, pressure }
    }

    /// Touch at `(x, y)` with an arbitrary non-zero pressure.
    pub const fn at(x: i32, y: i32) -> Self {
        Self::new(x, y, 1)
    }

    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl From<(i32, i32, u16)> for TouchPoint {
    fn from((x, y, pressure): (i32, i32, u16)) -> Self {
        Self::new(x, y, pressure)
    }
}

/// Result of one sampling pass: `None` when nothing touches the panel.
pub type TouchSample = Option<TouchPoint>;

/// Touch transport.
///
/// "No touch" is a normal reading, not an error. Errors are reserved for a
/// failing controller and are never retried by the poll loop.
pub trait TouchSource {
    type Error;

    fn touch_point(&mut self) -> Result<TouchSample, Self::Error>;
}

impl<T: TouchSource + ?Sized> TouchSource for &mut T {
    type Error = T::Error;

    fn touch_point(&mut self) -> Result<TouchSample, Self::Error> {
        (**self).touch_point()
    }
}
