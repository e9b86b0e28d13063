//! Test display that allows pixel overdraw.
//!
//! `MockDisplay` from embedded-graphics panics when a pixel is drawn twice,
//! which doesn't work for buttons that clear their bounds then draw on top.
//! This simple framebuffer display allows overdraw for render tests and
//! host-side screenshots.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

use embedded_graphics::{pixelcolor::Rgb565, prelude::*};

use crate::app::Screen;

/// Simple RGB565 framebuffer display for tests that allows overdraw.
pub struct TestDisplay {
    pixels: Vec<Rgb565>,
    width: u32,
    height: u32,
    flushes: usize,
}

impl TestDisplay {
    /// Create a new test display with the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![Rgb565::BLACK; (width * height) as usize],
            width,
            height,
            flushes: 0,
        }
    }

    /// Create a display matching the switcher panel (320x240).
    pub fn default_size() -> Self {
        Self::new(crate::DISPLAY_WIDTH, crate::DISPLAY_HEIGHT)
    }

    /// Colour at `point`, `None` outside the framebuffer.
    pub fn pixel(&self, point: Point) -> Option<Rgb565> {
        if point.x < 0 || point.y < 0 {
            return None;
        }
        let (x, y) = (point.x as u32, point.y as u32);
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    /// Row-major pixels.
    pub fn pixels(&self) -> &[Rgb565] {
        &self.pixels
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels with exactly `color`.
    pub fn count(&self, color: Rgb565) -> usize {
        self.pixels.iter().filter(|&&p| p == color).count()
    }

    /// Number of times the display was flushed.
    pub fn flushes(&self) -> usize {
        self.flushes
    }
}

impl DrawTarget for TestDisplay {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if coord.x >= 0
                && coord.y >= 0
                && (coord.x as u32) < self.width
                && (coord.y as u32) < self.height
            {
                let idx = (coord.y as u32 * self.width + coord.x as u32) as usize;
                self.pixels[idx] = color;
            }
        }
        Ok(())
    }
}

impl OriginDimensions for TestDisplay {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl Screen for TestDisplay {
    fn flush(&mut self) -> Result<(), Self::Error> {
        self.flushes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

    #[test]
    fn test_display_allows_overdraw() {
        let mut display = TestDisplay::new(10, 10);

        Rectangle::new(Point::new(0, 0), Size::new(10, 10))
            .into_styled(PrimitiveStyle::with_fill(Rgb565::WHITE))
            .draw(&mut display)
            .unwrap();

        // Draw on top - should not panic
        Rectangle::new(Point::new(0, 0), Size::new(5, 5))
            .into_styled(PrimitiveStyle::with_fill(Rgb565::RED))
            .draw(&mut display)
            .unwrap();

        assert_eq!(display.pixel(Point::new(4, 4)), Some(Rgb565::RED));
        assert_eq!(display.pixel(Point::new(5, 5)), Some(Rgb565::WHITE));
        assert_eq!(display.count(Rgb565::RED), 25);
        assert_eq!(display.pixel(Point::new(10, 0)), None);
    }

    #[test]
    fn test_display_default_size() {
        let display = TestDisplay::default_size();
        assert_eq!(display.size(), Size::new(320, 240));
    }
}
