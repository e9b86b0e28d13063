//! HID keyboard output.
//!
//! Keycodes are USB HID usage IDs from the Keyboard/Keypad page (0x07).
//! The USB stack itself is external; [`ReportWriter`] is the seam to it.

use core::fmt;

/// Keys the switcher can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Keycode {
    C = 0x06,
    One = 0x1E,
    Two = 0x1F,
    Three = 0x20,
    Four = 0x21,
    Enter = 0x28,
    GraveAccent = 0x35,
}

impl Keycode {
    pub const ALL: [Keycode; 7] = [
        Keycode::C,
        Keycode::One,
        Keycode::Two,
        Keycode::Three,
        Keycode::Four,
        Keycode::Enter,
        Keycode::GraveAccent,
    ];

    /// HID usage ID.
    pub const fn usage(self) -> u8 {
        self as u8
    }

    pub fn from_usage(usage: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.usage() == usage)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Keycode::C => "C",
            Keycode::One => "1",
            Keycode::Two => "2",
            Keycode::Three => "3",
            Keycode::Four => "4",
            Keycode::Enter => "Enter",
            Keycode::GraveAccent => "`",
        }
    }
}

impl fmt::Display for Keycode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Keystroke output transport.
///
/// `send` is a complete tap: press and release of a single key with no
/// modifiers. Fire-and-forget; the host never acknowledges.
pub trait KeySink {
    type Error;

    fn send(&mut self, key: Keycode) -> Result<(), Self::Error>;
}

impl<K: KeySink + ?Sized> KeySink for &mut K {
    type Error = K::Error;

    fn send(&mut self, key: Keycode) -> Result<(), Self::Error> {
        (**self).send(key)
    }
}

/// 8-byte boot protocol keyboard input report.
///
/// Layout: `[modifiers, reserved, key0..key5]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyboardReport {
    pub modifiers: u8,
    pub keys: [u8; 6],
}

impl KeyboardReport {
    pub const LEN: usize = 8;

    /// Report with every key up.
    pub const fn released() -> Self {
        Self {
            modifiers: 0,
            keys: [0; 6],
        }
    }

    /// Report with exactly `key` down.
    pub const fn press(key: Keycode) -> Self {
        Self {
            modifiers: 0,
            keys: [key.usage(), 0, 0, 0, 0, 0],
        }
    }

    pub fn is_released(&self) -> bool {
        self.modifiers == 0 && self.keys.iter().all(|&k| k == 0)
    }

    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        let mut bytes = [0u8; Self::LEN];
        bytes[0] = self.modifiers;
        bytes[2..].copy_from_slice(&self.keys);
        bytes
    }
}

/// Sink for raw HID input reports (USB endpoint, BLE characteristic, ...).
pub trait ReportWriter {
    type Error;

    fn write_report(&mut self, report: &[u8; KeyboardReport::LEN]) -> Result<(), Self::Error>;
}

/// [`KeySink`] that taps keys as press + release report pairs.
pub struct HidKeyboard<W> {
    writer: W,
}

impl<W: ReportWriter> HidKeyboard<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<W: ReportWriter> KeySink for HidKeyboard<W> {
    type Error = W::Error;

    fn send(&mut self, key: Keycode) -> Result<(), Self::Error> {
        self.writer
            .write_report(&KeyboardReport::press(key).to_bytes())?;
        self.writer
            .write_report(&KeyboardReport::released().to_bytes())
    }
}
