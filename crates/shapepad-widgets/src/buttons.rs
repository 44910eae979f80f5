//! Button components: solid action buttons and page tabs.

use egui::{Align2, Color32, CornerRadius, CursorIcon, Sense, Ui, vec2};

use crate::{sizing, theme};

/// Fill colors for a solid button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonPalette {
    pub fill: Color32,
    pub hover_fill: Color32,
    pub text: Color32,
}

impl ButtonPalette {
    /// `bg-blue-500 hover:bg-blue-600 text-white`
    pub const BLUE: Self = Self {
        fill: theme::BLUE_500,
        hover_fill: theme::BLUE_600,
        text: Color32::WHITE,
    };

    /// `bg-green-500 hover:bg-green-600 text-white`
    pub const GREEN: Self = Self {
        fill: theme::GREEN_500,
        hover_fill: theme::GREEN_600,
        text: Color32::WHITE,
    };

    /// `bg-gray-100 hover:bg-gray-200`, for secondary actions.
    pub const NEUTRAL: Self = Self {
        fill: Color32::from_rgb(243, 244, 246),
        hover_fill: Color32::from_rgb(229, 231, 235),
        text: theme::TEXT,
    };

    /// Background for the current hover state.
    pub fn background(&self, hovered: bool) -> Color32 {
        if hovered { self.hover_fill } else { self.fill }
    }
}

impl Default for ButtonPalette {
    fn default() -> Self {
        Self::BLUE
    }
}

/// A filled, rounded button with a white label.
pub struct SolidButton<'a> {
    label: &'a str,
    palette: ButtonPalette,
}

impl<'a> SolidButton<'a> {
    /// Create a new blue button.
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            palette: ButtonPalette::default(),
        }
    }

    /// Set the colors.
    pub fn palette(mut self, palette: ButtonPalette) -> Self {
        self.palette = palette;
        self
    }

    /// Show the button and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let font_id = egui::FontId::proportional(sizing::BUTTON_FONT_SIZE);
        let galley = ui.painter().layout_no_wrap(
            self.label.to_string(),
            font_id.clone(),
            Color32::PLACEHOLDER,
        );
        let width = galley.size().x + sizing::BUTTON_PADDING * 2.0;
        let (rect, response) =
            ui.allocate_exact_size(vec2(width, sizing::BUTTON_HEIGHT), Sense::click());

        if ui.is_rect_visible(rect) {
            ui.painter().rect_filled(
                rect,
                CornerRadius::same(sizing::CORNER_RADIUS),
                self.palette.background(response.hovered()),
            );
            ui.painter().text(
                rect.center(),
                Align2::CENTER_CENTER,
                self.label,
                font_id,
                self.palette.text,
            );
        }

        let clicked = response.clicked();
        response.on_hover_cursor(CursorIcon::PointingHand);
        clicked
    }
}

/// A tab in a page selector. Solid blue when selected.
pub struct TabButton<'a> {
    label: &'a str,
    selected: bool,
}

impl<'a> TabButton<'a> {
    pub fn new(label: &'a str, selected: bool) -> Self {
        Self { label, selected }
    }

    /// Show the button and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let font_id = egui::FontId::proportional(11.0);
        let galley = ui.painter().layout_no_wrap(
            self.label.to_string(),
            font_id.clone(),
            Color32::PLACEHOLDER, // Color doesn't matter for sizing
        );
        let size = vec2(galley.size().x + 16.0, sizing::TAB_HEIGHT);
        let (rect, response) = ui.allocate_exact_size(size, Sense::click());

        if ui.is_rect_visible(rect) {
            let bg_color = if self.selected {
                theme::ACCENT
            } else if response.hovered() {
                Color32::from_gray(235)
            } else {
                Color32::from_gray(245)
            };
            let text_color = if self.selected { Color32::WHITE } else { theme::TEXT };

            ui.painter()
                .rect_filled(rect, CornerRadius::same(sizing::CORNER_RADIUS), bg_color);
            ui.painter()
                .text(rect.center(), Align2::CENTER_CENTER, self.label, font_id, text_color);
        }

        let clicked = response.clicked();
        response.on_hover_cursor(CursorIcon::PointingHand);
        clicked
    }
}
