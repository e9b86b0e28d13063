//! Shared UI library for the portal switcher touch surface.
//! Works on the device, on the desktop simulator and in host tests.
//!
//! A poll cycle samples the touchscreen, detects the off -> on edge,
//! hit-tests the fixed [`Layout`] and sends one HID keystroke per press.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![forbid(unsafe_code)]
#![cfg_attr(
    not(test),
    deny(
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::unreachable,
        clippy::unwrap_used
    )
)]

extern crate alloc;

pub mod action;
pub mod app;
pub mod config;
pub mod error;
pub mod input;
pub mod keycode;
pub mod layout;
pub mod poller;
pub mod test_display;
pub mod ui;

pub use action::{ActionMap, Dispatcher};
pub use app::{run, App, Cycle, Screen};
pub use config::{Config, ConfigBuilder};
pub use error::{BuilderError, Error};
pub use input::{TouchPoint, TouchSample, TouchSource};
pub use keycode::{HidKeyboard, KeySink, KeyboardReport, Keycode, ReportWriter};
pub use layout::{Changes, Layout};
pub use poller::{Edge, PollState, Poller};
pub use ui::{Button, ButtonId, ButtonStyle};

/// Display dimensions of the switcher panel (landscape).
pub const DISPLAY_WIDTH: u32 = 320;
pub const DISPLAY_HEIGHT: u32 = 240;
