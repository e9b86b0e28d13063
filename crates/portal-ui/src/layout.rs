//! Layout registry: the ordered set of buttons covering the panel.
//!
//! Declaration order is hit-test order. The intended layout does not overlap,
//! but when it does the first button in order wins.

extern crate alloc;

use alloc::vec::Vec;

use embedded_graphics::{pixelcolor::Rgb565, prelude::*, primitives::Rectangle};

use crate::error::BuilderError;
use crate::ui::theme::{self, layout};
use crate::ui::{Button, ButtonId, ButtonStyle};

/// Set of button indices whose visual state changed during a cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Changes(u64);

impl Changes {
    pub const fn none() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, index: usize) {
        self.0 |= 1 << index;
    }

    pub fn contains(&self, index: usize) -> bool {
        index < Layout::MAX_BUTTONS && self.0 & (1 << index) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Changed indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..Layout::MAX_BUTTONS).filter(move |&i| self.contains(i))
    }
}

/// Ordered button collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    buttons: Vec<Button>,
    background: Rgb565,
}

impl Layout {
    /// Largest layout a [`Changes`] set can track.
    pub const MAX_BUTTONS: usize = 64;

    /// Build a layout from buttons in hit-test order.
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::EmptyLayout` for no buttons and
    /// `BuilderError::TooManyButtons` above [`Layout::MAX_BUTTONS`].
    pub fn new(buttons: Vec<Button>) -> Result<Self, BuilderError> {
        if buttons.is_empty() {
            return Err(BuilderError::EmptyLayout);
        }
        if buttons.len() > Self::MAX_BUTTONS {
            return Err(BuilderError::TooManyButtons {
                count: buttons.len(),
            });
        }
        Ok(Self {
            buttons,
            background: theme::rgb(theme::BACKGROUND),
        })
    }

    /// The switcher surface: graphics and four cameras along the bottom,
    /// cut and cross-fade across the top.
    pub fn portal() -> Self {
        let source = |id, label: &str, column: i32, fill: u32| {
            Button::new(
                id,
                label,
                Rectangle::new(
                    Point::new(column * layout::SOURCE_W as i32, layout::BOTTOM_ROW_Y),
                    Size::new(layout::SOURCE_W, layout::ROW_H),
                ),
                ButtonStyle::from_hex(fill, fill, theme::WHITE),
            )
        };
        let transition = |id, label: &str, column: i32, style| {
            Button::new(
                id,
                label,
                Rectangle::new(
                    Point::new(column * layout::TRANSITION_W as i32, 0),
                    Size::new(layout::TRANSITION_W, layout::ROW_H),
                ),
                style,
            )
        };

        let buttons = alloc::vec![
            source(ButtonId::Graphics, "GFX", 0, theme::GRAPHICS_FILL),
            source(ButtonId::Camera1, "Cam\n 1", 1, theme::CAMERA_FILL),
            source(ButtonId::Camera2, "Cam\n 2", 2, theme::CAMERA_FILL),
            source(ButtonId::Camera3, "Cam\n 3", 3, theme::CAMERA_FILL),
            source(ButtonId::Camera4, "Cam\n 4", 4, theme::CAMERA_FILL),
            transition(
                ButtonId::Cut,
                "Cut",
                0,
                ButtonStyle::from_hex(theme::CUT_FILL, theme::WHITE, theme::WHITE),
            ),
            transition(
                ButtonId::Cross,
                "Cross",
                1,
                ButtonStyle::from_hex(theme::CROSS_FILL, theme::CROSS_FILL, 0x000000),
            ),
        ];

        Self {
            buttons,
            background: theme::rgb(theme::BACKGROUND),
        }
    }

    /// Set background colour
    pub fn background(mut self, background: Rgb565) -> Self {
        self.background = background;
        self
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Button> {
        self.buttons.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Button> {
        self.buttons.get(index)
    }

    pub fn button(&self, id: ButtonId) -> Option<&Button> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Ids of the currently selected buttons, in layout order.
    pub fn selected(&self) -> Vec<ButtonId> {
        self.buttons
            .iter()
            .filter(|b| b.is_selected())
            .map(|b| b.id)
            .collect()
    }

    /// Index of the first button containing `point`.
    pub fn hit_test(&self, point: Point) -> Option<usize> {
        self.buttons.iter().position(|b| b.contains(point))
    }

    /// Select the first button under `point` and deselect every other one.
    /// With no hit, everything ends up deselected.
    pub fn press_at(&mut self, point: Point) -> (Option<usize>, Changes) {
        let hit = self.hit_test(point);
        let mut changes = Changes::none();
        for (index, button) in self.buttons.iter_mut().enumerate() {
            if button.set_selected(hit == Some(index)) {
                changes.insert(index);
            }
        }
        (hit, changes)
    }

    /// Deselect every momentary button, leaving latched ones alone.
    pub fn release_momentary(&mut self) -> Changes {
        let mut changes = Changes::none();
        for (index, button) in self.buttons.iter_mut().enumerate() {
            if button.momentary && button.set_selected(false) {
                changes.insert(index);
            }
        }
        changes
    }

    /// Clear the panel and draw every button.
    pub fn render<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        display.clear(self.background)?;
        for button in &self.buttons {
            button.render(display, self.background)?;
        }
        Ok(())
    }

    /// Redraw only the buttons in `changes`.
    pub fn render_changes<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        changes: Changes,
    ) -> Result<(), D::Error> {
        for index in changes.iter() {
            if let Some(button) = self.buttons.get(index) {
                button.render(display, self.background)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_display::TestDisplay;
    use crate::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
    use alloc::vec;

    fn square(id: ButtonId, x: i32, y: i32, side: u32) -> Button {
        Button::new(
            id,
            "",
            Rectangle::new(Point::new(x, y), Size::new(side, side)),
            ButtonStyle::from_hex(0x000000, 0xFFFFFF, 0xFFFFFF),
        )
    }

    #[test]
    fn portal_declaration_order() {
        let ids: Vec<_> = Layout::portal().iter().map(|b| b.id).collect();
        assert_eq!(
            ids,
            vec![
                ButtonId::Graphics,
                ButtonId::Camera1,
                ButtonId::Camera2,
                ButtonId::Camera3,
                ButtonId::Camera4,
                ButtonId::Cut,
                ButtonId::Cross,
            ]
        );
    }

    #[test]
    fn portal_tiles_the_whole_panel_once() {
        let layout = Layout::portal();
        for y in (0..DISPLAY_HEIGHT as i32).step_by(7) {
            for x in (0..DISPLAY_WIDTH as i32).step_by(7) {
                let hits = layout.iter().filter(|b| b.contains(Point::new(x, y))).count();
                assert_eq!(hits, 1, "point ({x}, {y})");
            }
        }
        assert_eq!(layout.hit_test(Point::new(-1, 10)), None);
        assert_eq!(layout.hit_test(Point::new(320, 10)), None);
        assert_eq!(layout.hit_test(Point::new(10, 240)), None);
    }

    #[test]
    fn portal_hit_regions() {
        let layout = Layout::portal();
        let id_at = |x, y| layout.hit_test(Point::new(x, y)).map(|i| layout.buttons[i].id);
        assert_eq!(id_at(32, 150), Some(ButtonId::Graphics));
        assert_eq!(id_at(64, 150), Some(ButtonId::Camera1));
        assert_eq!(id_at(300, 239), Some(ButtonId::Camera4));
        assert_eq!(id_at(159, 119), Some(ButtonId::Cut));
        assert_eq!(id_at(160, 0), Some(ButtonId::Cross));
    }

    #[test]
    fn only_transitions_are_momentary() {
        let momentary: Vec<_> = Layout::portal()
            .iter()
            .filter(|b| b.momentary)
            .map(|b| b.id)
            .collect();
        assert_eq!(momentary, vec![ButtonId::Cut, ButtonId::Cross]);
    }

    #[test]
    fn press_selects_one_and_deselects_rest() {
        let mut layout = Layout::portal();
        let (hit, changes) = layout.press_at(Point::new(100, 200));
        assert_eq!(hit, Some(1));
        assert_eq!(changes.iter().collect::<Vec<_>>(), vec![1]);

        let (hit, changes) = layout.press_at(Point::new(200, 200));
        assert_eq!(hit, Some(3));
        assert_eq!(changes.iter().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(layout.selected(), vec![ButtonId::Camera3]);
    }

    #[test]
    fn press_outside_deselects_everything() {
        let mut layout = Layout::portal();
        layout.press_at(Point::new(10, 200));
        let (hit, changes) = layout.press_at(Point::new(400, 400));
        assert_eq!(hit, None);
        assert_eq!(changes.len(), 1);
        assert!(layout.selected().is_empty());
    }

    #[test]
    fn overlapping_buttons_first_wins() {
        let mut layout = Layout::new(vec![
            square(ButtonId::Camera1, 0, 0, 50),
            square(ButtonId::Camera2, 25, 25, 50),
        ])
        .unwrap();
        let (hit, _) = layout.press_at(Point::new(30, 30));
        assert_eq!(hit, Some(0));
        assert_eq!(layout.selected(), vec![ButtonId::Camera1]);
    }

    #[test]
    fn release_momentary_leaves_latched() {
        let mut layout = Layout::portal();
        layout.press_at(Point::new(10, 10));
        assert_eq!(layout.selected(), vec![ButtonId::Cut]);
        let changes = layout.release_momentary();
        assert_eq!(changes.iter().collect::<Vec<_>>(), vec![5]);
        assert!(layout.selected().is_empty());

        layout.press_at(Point::new(10, 200));
        assert!(layout.release_momentary().is_empty());
        assert_eq!(layout.selected(), vec![ButtonId::Graphics]);
    }

    #[test]
    fn new_rejects_empty_layout() {
        assert!(matches!(Layout::new(vec![]), Err(BuilderError::EmptyLayout)));
    }

    #[test]
    fn new_rejects_untrackable_layout() {
        let buttons = (0..65).map(|i| square(ButtonId::Cut, i, 0, 1)).collect();
        assert!(matches!(
            Layout::new(buttons),
            Err(BuilderError::TooManyButtons { count: 65 })
        ));
    }

    #[test]
    fn render_paints_every_button() {
        let mut display = TestDisplay::default_size();
        let layout = Layout::portal();
        layout.render(&mut display).unwrap();

        // Inside each shape, away from labels and corners.
        assert_eq!(
            display.pixel(Point::new(20, 125 + 10)),
            Some(theme::rgb(theme::GRAPHICS_FILL))
        );
        assert_eq!(
            display.pixel(Point::new(300, 20)),
            Some(theme::rgb(theme::CROSS_FILL))
        );
        // Margin gap between cut and cross.
        assert_eq!(display.pixel(Point::new(160, 60)), Some(Rgb565::BLACK));
    }

    #[test]
    fn render_changes_touches_only_changed_buttons() {
        let mut display = TestDisplay::default_size();
        let mut layout = Layout::portal();
        layout.render(&mut display).unwrap();

        let (_, changes) = layout.press_at(Point::new(300, 200));
        layout.render_changes(&mut display, changes).unwrap();
        assert_eq!(display.pixel(Point::new(280, 140)), Some(Rgb565::GREEN));
        assert_eq!(
            display.pixel(Point::new(88, 140)),
            Some(theme::rgb(theme::CAMERA_FILL))
        );
    }
}
