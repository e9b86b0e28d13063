//! Button -> keystroke dispatch.
//!
//! The mapping is a static table so every control is visible in one place:
//!
//! | Button   | Key   |
//! |----------|-------|
//! | Camera 1 | `1`   |
//! | Camera 2 | `2`   |
//! | Camera 3 | `3`   |
//! | Camera 4 | `4`   |
//! | Graphics | `` ` ``|
//! | Cut      | `C`   |
//! | Cross    | Enter |

use log::debug;

use crate::keycode::{KeySink, Keycode};
use crate::ui::ButtonId;

/// Immutable button identity to keycode table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionMap {
    entries: &'static [(ButtonId, Keycode)],
}

impl ActionMap {
    /// Mapping understood by the production switcher on the host.
    pub const PORTAL: ActionMap = ActionMap::new(&[
        (ButtonId::Camera1, Keycode::One),
        (ButtonId::Camera2, Keycode::Two),
        (ButtonId::Camera3, Keycode::Three),
        (ButtonId::Camera4, Keycode::Four),
        (ButtonId::Graphics, Keycode::GraveAccent),
        (ButtonId::Cut, Keycode::C),
        (ButtonId::Cross, Keycode::Enter),
    ]);

    pub const fn new(entries: &'static [(ButtonId, Keycode)]) -> Self {
        Self { entries }
    }

    pub fn keycode(&self, id: ButtonId) -> Option<Keycode> {
        self.entries
            .iter()
            .find(|(button, _)| *button == id)
            .map(|&(_, key)| key)
    }
}

impl Default for ActionMap {
    fn default() -> Self {
        Self::PORTAL
    }
}

/// Sends the mapped keystroke for a pressed button.
pub struct Dispatcher<K> {
    sink: K,
    actions: ActionMap,
    send_codes: bool,
}

impl<K: KeySink> Dispatcher<K> {
    pub fn new(sink: K, actions: ActionMap, send_codes: bool) -> Self {
        Self {
            sink,
            actions,
            send_codes,
        }
    }

    pub fn send_codes(&self) -> bool {
        self.send_codes
    }

    pub fn set_send_codes(&mut self, send_codes: bool) {
        self.send_codes = send_codes;
    }

    pub fn actions(&self) -> &ActionMap {
        &self.actions
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    pub fn into_sink(self) -> K {
        self.sink
    }

    /// Send the key mapped to `id`, exactly once.
    ///
    /// Returns the key actually sent: `None` for an unmapped id or while
    /// emission is disabled.
    pub fn dispatch(&mut self, id: ButtonId) -> Result<Option<Keycode>, K::Error> {
        let Some(key) = self.actions.keycode(id) else {
            debug!("No key mapped for {}", id);
            return Ok(None);
        };
        if !self.send_codes {
            debug!("Key {} for {} suppressed (send_codes off)", key, id);
            return Ok(None);
        }
        self.sink.send(key)?;
        debug!("Sent key {} for {}", key, id);
        Ok(Some(key))
    }
}
