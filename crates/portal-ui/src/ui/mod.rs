//! On-screen switcher controls.

pub mod button;
pub mod theme;

pub use button::{Button, ButtonId, ButtonStyle};
