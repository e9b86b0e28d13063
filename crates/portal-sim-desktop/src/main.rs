//! Desktop SDL simulator for the portal switcher.
//!
//! The window stands in for the touch panel (hold the left mouse button to
//! touch) and HID reports are written to the log instead of a USB endpoint.

use std::convert::Infallible;
use std::env;
use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{
    sdl2::{Keycode, MouseButton},
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window,
};
use log::info;
use portal_ui::{
    App, Config, HidKeyboard, KeyboardReport, ReportWriter, TouchPoint, TouchSample,
    DISPLAY_HEIGHT, DISPLAY_WIDTH,
};

/// Frame pacing for event pumping between poll cycles.
const EVENT_PUMP_INTERVAL: Duration = Duration::from_millis(10);

/// Pressure reported for a mouse touch.
const MOUSE_PRESSURE: u16 = 0x8000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = config_from_env()?;
    let scale = env_u32("PORTAL_SCALE")?.unwrap_or(2);

    let output_settings = OutputSettingsBuilder::new().scale(scale).build();
    let mut display: SimulatorDisplay<Rgb565> =
        SimulatorDisplay::new(Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT));
    let mut window = Window::new("Portal Switcher", &output_settings);

    let mut app = App::new(config, HidKeyboard::new(LogReports));
    let mut touch = MouseTouch::default();

    app.render(&mut display)?;
    window.update(&display);

    println!("Portal Switcher Simulator");
    println!("Controls:");
    println!("  Left mouse button - Touch");
    println!("  S                 - Toggle key sending");
    println!("  Escape            - Quit");
    info!(
        "Polling every {} ms, send_codes={}",
        config.poll_interval_ms, config.send_codes
    );

    let mut next_poll = Instant::now();
    loop {
        for event in window.events() {
            match event {
                SimulatorEvent::Quit
                | SimulatorEvent::KeyDown {
                    keycode: Keycode::Escape,
                    ..
                } => return Ok(()),
                SimulatorEvent::KeyDown {
                    keycode: Keycode::S,
                    repeat: false,
                    ..
                } => {
                    let send_codes = !app.config().send_codes;
                    app.set_send_codes(send_codes);
                    info!("send_codes={}", send_codes);
                }
                SimulatorEvent::MouseButtonDown {
                    mouse_btn: MouseButton::Left,
                    point,
                } => touch.down(point),
                SimulatorEvent::MouseMove { point } => touch.moved(point),
                SimulatorEvent::MouseButtonUp {
                    mouse_btn: MouseButton::Left,
                    ..
                } => touch.up(),
                _ => {}
            }
        }

        if Instant::now() >= next_poll {
            let cycle = app.tick(touch.sample())?;
            if !cycle.changes.is_empty() {
                app.render_changes(&mut display, cycle.changes)?;
            }
            next_poll += app.config().poll_interval();
        }

        window.update(&display);
        std::thread::sleep(EVENT_PUMP_INTERVAL);
    }
}

/// Mouse-driven touch panel.
///
/// A click that starts and ends between two polls still counts as one
/// sample, the way a resistive controller latches a conversion.
#[derive(Default)]
struct MouseTouch {
    held: Option<Point>,
    latched: Option<Point>,
}

impl MouseTouch {
    fn down(&mut self, point: Point) {
        self.held = Some(point);
        self.latched = Some(point);
    }

    fn moved(&mut self, point: Point) {
        if self.held.is_some() {
            self.held = Some(point);
        }
    }

    fn up(&mut self) {
        self.held = None;
    }

    fn sample(&mut self) -> TouchSample {
        let latched = self.latched.take();
        self.held
            .or(latched)
            .map(|p| TouchPoint::new(p.x, p.y, MOUSE_PRESSURE))
    }
}

/// Report writer that logs each HID report.
struct LogReports;

impl ReportWriter for LogReports {
    type Error = Infallible;

    fn write_report(&mut self, report: &[u8; KeyboardReport::LEN]) -> Result<(), Infallible> {
        info!("HID report {:02X?}", report);
        Ok(())
    }
}

fn config_from_env() -> Result<Config, Box<dyn std::error::Error>> {
    let mut builder = Config::builder();
    if let Ok(send) = env::var("PORTAL_SEND_CODES") {
        builder = builder.send_codes(!matches!(send.trim(), "0" | "false" | "off"));
    }
    if let Some(ms) = env_u32("PORTAL_POLL_MS")? {
        builder = builder.poll_interval_ms(ms);
    }
    Ok(builder.build()?)
}

fn env_u32(name: &str) -> Result<Option<u32>, String> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|err| format!("{name}={value}: {err}")),
        Err(_) => Ok(None),
    }
}
