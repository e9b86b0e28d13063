//! Tappable switcher button.
//!
//! A button's hit region is its full bounds. Margin and padding only affect
//! drawing: the rounded shape is inset by the margin, the label box is inset
//! from the shape by the padding.

extern crate alloc;

use alloc::string::String;
use core::fmt;

use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, RoundedRectangle},
};
use embedded_text::{
    alignment::{HorizontalAlignment, VerticalAlignment},
    style::TextBoxStyleBuilder,
    TextBox,
};

use crate::ui::theme::{self, layout};

/// Identity of a switcher control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonId {
    Graphics,
    Camera1,
    Camera2,
    Camera3,
    Camera4,
    Cut,
    Cross,
}

impl ButtonId {
    pub const ALL: [ButtonId; 7] = [
        ButtonId::Graphics,
        ButtonId::Camera1,
        ButtonId::Camera2,
        ButtonId::Camera3,
        ButtonId::Camera4,
        ButtonId::Cut,
        ButtonId::Cross,
    ];

    /// Transition controls give momentary feedback; source selectors latch.
    pub const fn is_momentary(self) -> bool {
        matches!(self, ButtonId::Cut | ButtonId::Cross)
    }
}

impl fmt::Display for ButtonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ButtonId::Graphics => "Graphics",
            ButtonId::Camera1 => "Camera 1",
            ButtonId::Camera2 => "Camera 2",
            ButtonId::Camera3 => "Camera 3",
            ButtonId::Camera4 => "Camera 4",
            ButtonId::Cut => "Cut",
            ButtonId::Cross => "Cross",
        };
        f.write_str(name)
    }
}

/// Fill/outline/label colours for both visual states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonStyle {
    pub fill: Rgb565,
    pub outline: Rgb565,
    pub selected_fill: Rgb565,
    pub selected_outline: Rgb565,
    pub label: Rgb565,
    pub selected_label: Rgb565,
}

impl ButtonStyle {
    /// Style from `0xRRGGBB` colours. Selected state is green with the
    /// label colour inverted.
    pub const fn from_hex(fill: u32, outline: u32, label: u32) -> Self {
        Self {
            fill: theme::rgb(fill),
            outline: theme::rgb(outline),
            selected_fill: theme::rgb(theme::SELECTED),
            selected_outline: theme::rgb(theme::SELECTED),
            label: theme::rgb(label),
            selected_label: theme::rgb(theme::inverse(label)),
        }
    }

    fn shape(&self, selected: bool) -> PrimitiveStyle<Rgb565> {
        let (fill, outline) = if selected {
            (self.selected_fill, self.selected_outline)
        } else {
            (self.fill, self.outline)
        };
        PrimitiveStyleBuilder::new()
            .fill_color(fill)
            .stroke_color(outline)
            .stroke_width(layout::STROKE)
            .build()
    }

    fn label_color(&self, selected: bool) -> Rgb565 {
        if selected {
            self.selected_label
        } else {
            self.label
        }
    }
}

/// Button with fixed bounds and a selected flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub id: ButtonId,
    pub label: String,
    bounds: Rectangle,
    pub margin: Size,
    pub padding: Size,
    pub style: ButtonStyle,
    pub momentary: bool,
    selected: bool,
}

impl Button {
    /// Create an unselected button. Momentary behaviour follows the id.
    pub fn new(
        id: ButtonId,
        label: impl Into<String>,
        bounds: Rectangle,
        style: ButtonStyle,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            bounds,
            margin: layout::MARGIN,
            padding: layout::PADDING,
            style,
            momentary: id.is_momentary(),
            selected: false,
        }
    }

    /// Set margin
    pub fn margin(mut self, margin: Size) -> Self {
        self.margin = margin;
        self
    }

    /// Set padding
    pub fn padding(mut self, padding: Size) -> Self {
        self.padding = padding;
        self
    }

    /// Override momentary behaviour
    pub fn momentary(mut self, momentary: bool) -> Self {
        self.momentary = momentary;
        self
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Half-open hit test: `[x, x + w) × [y, y + h)`.
    pub fn contains(&self, point: Point) -> bool {
        self.bounds.contains(point)
    }

    /// Update the visual state. Returns `true` when it changed and the button
    /// needs a redraw.
    pub fn set_selected(&mut self, selected: bool) -> bool {
        let changed = self.selected != selected;
        self.selected = selected;
        changed
    }

    /// Label on a single line, for logs.
    pub fn display_label(&self) -> impl fmt::Display + '_ {
        SingleLine(&self.label)
    }

    /// Drawn shape: bounds inset by the margin.
    pub fn shape_bounds(&self) -> Rectangle {
        inset(self.bounds, self.margin)
    }

    /// Label box: shape inset by the padding.
    pub fn label_bounds(&self) -> Rectangle {
        inset(self.shape_bounds(), self.padding)
    }

    /// Render the button, clearing its bounds to `background` first.
    pub fn render<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        background: Rgb565,
    ) -> Result<(), D::Error> {
        self.bounds
            .into_styled(PrimitiveStyle::with_fill(background))
            .draw(display)?;

        RoundedRectangle::with_equal_corners(
            self.shape_bounds(),
            Size::new(layout::CORNER_RADIUS, layout::CORNER_RADIUS),
        )
        .into_styled(self.style.shape(self.selected))
        .draw(display)?;

        let character_style =
            MonoTextStyle::new(theme::label_font(), self.style.label_color(self.selected));
        let textbox_style = TextBoxStyleBuilder::new()
            .alignment(HorizontalAlignment::Center)
            .vertical_alignment(VerticalAlignment::Middle)
            .build();
        TextBox::with_textbox_style(
            &self.label,
            self.label_bounds(),
            character_style,
            textbox_style,
        )
        .draw(display)?;

        Ok(())
    }
}

fn inset(rect: Rectangle, by: Size) -> Rectangle {
    Rectangle::new(
        rect.top_left + Point::new(by.width as i32, by.height as i32),
        Size::new(
            rect.size.width.saturating_sub(by.width * 2),
            rect.size.height.saturating_sub(by.height * 2),
        ),
    )
}

struct SingleLine<'a>(&'a str);

impl fmt::Display for SingleLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.0.split('\n').map(str::trim).enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(part)?;
        }
        Ok(())
    }
}
