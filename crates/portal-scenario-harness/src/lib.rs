//! Host-side scenario test harness for scripted touch sequences.

use std::convert::Infallible;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use embedded_graphics::pixelcolor::{Rgb565, Rgb888};
use embedded_graphics::prelude::*;
use png::{BitDepth, ColorType, Encoder};
use portal_ui::test_display::TestDisplay;
use portal_ui::{
    App, ButtonId, Config, Cycle, KeySink, Keycode, Layout, TouchPoint, TouchSample,
};

/// Key sink that records every keystroke instead of sending it.
#[derive(Debug, Default)]
pub struct RecordingKeySink {
    sent: Vec<Keycode>,
}

impl RecordingKeySink {
    pub fn sent(&self) -> &[Keycode] {
        &self.sent
    }
}

impl KeySink for RecordingKeySink {
    type Error = Infallible;

    fn send(&mut self, key: Keycode) -> Result<(), Infallible> {
        self.sent.push(key);
        Ok(())
    }
}

/// Couples app, recording key sink and display for scenario tests.
pub struct ScenarioHarness {
    app: App<RecordingKeySink>,
    display: TestDisplay,
    cycles: Vec<Cycle>,
}

impl ScenarioHarness {
    /// Construct a harness around a caller-provided app.
    pub fn new(app: App<RecordingKeySink>) -> Self {
        Self {
            app,
            display: TestDisplay::default_size(),
            cycles: Vec::new(),
        }
    }

    /// Standard switcher surface with the given configuration.
    pub fn portal(config: Config) -> Self {
        Self::new(App::new(config, RecordingKeySink::default()))
    }

    /// Standard switcher surface with the default configuration.
    pub fn with_defaults() -> Self {
        Self::portal(Config::default())
    }

    /// Run one poll cycle and redraw what changed.
    pub fn cycle(&mut self, sample: TouchSample) -> Cycle {
        let cycle = match self.app.tick(sample) {
            Ok(cycle) => cycle,
            Err(never) => match never {},
        };
        self.app
            .render_changes(&mut self.display, cycle.changes)
            .expect("test display never fails");
        self.cycles.push(cycle);
        cycle
    }

    /// Poll cycle with a touch at `(x, y)`.
    pub fn touch(&mut self, x: i32, y: i32) -> Cycle {
        self.cycle(Some(TouchPoint::at(x, y)))
    }

    /// Poll cycle with nothing touching the panel.
    pub fn release(&mut self) -> Cycle {
        self.cycle(None)
    }

    /// Run a whole sample sequence, one cycle per sample.
    pub fn run_samples(&mut self, samples: &[TouchSample]) -> Vec<Cycle> {
        samples.iter().map(|&sample| self.cycle(sample)).collect()
    }

    /// Render the full surface.
    pub fn render(&mut self) {
        self.app
            .render(&mut self.display)
            .expect("scenario render should succeed");
    }

    /// Keys that reached the transport so far.
    pub fn sent_keys(&self) -> &[Keycode] {
        self.app.sink().sent()
    }

    /// Every cycle run so far.
    pub fn cycles(&self) -> &[Cycle] {
        &self.cycles
    }

    pub fn selected(&self) -> Vec<ButtonId> {
        self.app.layout().selected()
    }

    pub fn is_selected(&self, id: ButtonId) -> bool {
        self.app
            .layout()
            .button(id)
            .is_some_and(|button| button.is_selected())
    }

    /// Centre of a button's hit region.
    pub fn center_of(&self, id: ButtonId) -> Point {
        self.layout()
            .button(id)
            .map(|button| button.bounds().center())
            .expect("button is part of the layout")
    }

    /// Poll cycle touching the centre of `id`.
    pub fn tap(&mut self, id: ButtonId) -> Cycle {
        let point = self.center_of(id);
        self.touch(point.x, point.y)
    }

    pub fn layout(&self) -> &Layout {
        self.app.layout()
    }

    /// Access the app for assertions.
    pub fn app(&self) -> &App<RecordingKeySink> {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App<RecordingKeySink> {
        &mut self.app
    }

    /// Access the display for render assertions.
    pub fn display(&self) -> &TestDisplay {
        &self.display
    }

    /// Colour of the pixel at the centre of the drawn shape's top edge band,
    /// clear of the label and the rounded corners.
    pub fn fill_color_of(&self, id: ButtonId) -> Option<Rgb565> {
        let shape = self.layout().button(id)?.shape_bounds();
        let probe = Point::new(shape.center().x, shape.top_left.y + 4);
        self.display.pixel(probe)
    }

    /// Save the current framebuffer to an RGB PNG.
    pub fn save_screenshot_png(&self, path: impl AsRef<Path>) -> Result<(), String> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let (width, height) = self.display.dimensions();
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for &pixel in self.display.pixels() {
            let rgb = Rgb888::from(pixel);
            data.extend_from_slice(&[rgb.r(), rgb.g(), rgb.b()]);
        }

        let file = File::create(path).map_err(|e| e.to_string())?;
        let writer = BufWriter::new(file);
        let mut encoder = Encoder::new(writer, width, height);
        encoder.set_color(ColorType::Rgb);
        encoder.set_depth(BitDepth::Eight);
        let mut png_writer = encoder.write_header().map_err(|e| e.to_string())?;
        png_writer
            .write_image_data(&data)
            .map_err(|e| e.to_string())
    }
}
