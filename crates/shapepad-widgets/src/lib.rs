//! Reusable egui widget components with Tailwind-inspired styling.
//!
//! - **Buttons**: solid action buttons, page tabs
//! - **Layout**: section labels, separators
//! - **Panels**: toolbar frame

pub mod buttons;
pub mod layout;
pub mod panels;

pub use buttons::{ButtonPalette, SolidButton, TabButton};
pub use layout::{section_label, vertical_separator};
pub use panels::toolbar_frame;

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Action button height (`py-2` around 16px text)
    pub const BUTTON_HEIGHT: f32 = 32.0;
    /// Horizontal padding inside action buttons (`px-4`)
    pub const BUTTON_PADDING: f32 = 16.0;
    /// Action button label size
    pub const BUTTON_FONT_SIZE: f32 = 14.0;
    /// Gap between toolbar buttons (`space-x-4`)
    pub const BUTTON_GAP: f32 = 16.0;
    /// Tab height
    pub const TAB_HEIGHT: f32 = 24.0;
    /// Standard corner radius (`rounded`)
    pub const CORNER_RADIUS: u8 = 4;
    /// Panel corner radius
    pub const PANEL_RADIUS: u8 = 8;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Text color (dark gray)
    pub const TEXT: Color32 = Color32::from_rgb(60, 60, 60);
    /// Muted text color
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 120, 120);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(220, 220, 220);
    /// Selection/active color (blue)
    pub const ACCENT: Color32 = BLUE_500;
    /// Panel background
    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(250, 250, 252, 250);

    pub const BLUE_500: Color32 = Color32::from_rgb(59, 130, 246);
    pub const BLUE_600: Color32 = Color32::from_rgb(37, 99, 235);
    pub const GREEN_500: Color32 = Color32::from_rgb(34, 197, 94);
    pub const GREEN_600: Color32 = Color32::from_rgb(22, 163, 74);
}
