//! UI components using egui.

use egui::{Align2, Context, Vec2};
use shapepad_core::shapes::ShapeKind;
use shapepad_core::variant::Variant;
use shapepad_widgets::{ButtonPalette, SolidButton, TabButton, section_label, sizing, toolbar_frame, vertical_separator};

/// Actions that can be triggered by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    /// Switch to another page.
    SelectVariant(Variant),
    /// Spawn a shape on the current page.
    Spawn(ShapeKind),
    /// Save the current page as SVG and PNG.
    Export,
}

/// UI state that persists across frames.
#[derive(Debug, Clone)]
pub struct UiState {
    /// Page currently shown.
    pub variant: Variant,
    /// Buttons offered on the current page.
    pub spawn_kinds: Vec<ShapeKind>,
    /// Number of shapes on the current page.
    pub shape_count: usize,
    /// Whether the export button is offered (needs a filesystem).
    pub can_export: bool,
}

impl Default for UiState {
    fn default() -> Self {
        let variant = Variant::default();
        Self {
            variant,
            spawn_kinds: variant.config().spawn_kinds,
            shape_count: 0,
            can_export: cfg!(not(target_arch = "wasm32")),
        }
    }
}

/// Button colors for a spawn button.
pub fn spawn_palette(kind: ShapeKind) -> ButtonPalette {
    match kind {
        ShapeKind::Rectangle => ButtonPalette::GREEN,
        ShapeKind::Circle | ShapeKind::Bunny => ButtonPalette::BLUE,
    }
}

/// Render the UI and return any triggered action.
pub fn render_ui(ctx: &Context, ui_state: &UiState) -> Option<UiAction> {
    let mut action = None;

    egui::Area::new(egui::Id::new("toolbar"))
        .anchor(Align2::LEFT_TOP, Vec2::new(12.0, 12.0))
        .show(ctx, |ui| {
            toolbar_frame().show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing = Vec2::new(4.0, 0.0);
                    for variant in Variant::ALL {
                        if TabButton::new(variant.title(), variant == ui_state.variant).show(ui) {
                            action = Some(UiAction::SelectVariant(variant));
                        }
                    }

                    ui.add_space(8.0);
                    vertical_separator(ui);
                    ui.add_space(8.0);

                    ui.spacing_mut().item_spacing = Vec2::new(sizing::BUTTON_GAP, 0.0);
                    for &kind in &ui_state.spawn_kinds {
                        if SolidButton::new(kind.button_label())
                            .palette(spawn_palette(kind))
                            .show(ui)
                        {
                            action = Some(UiAction::Spawn(kind));
                        }
                    }

                    ui.add_space(8.0);
                    section_label(ui, &shape_count_label(ui_state.shape_count));

                    if ui_state.can_export {
                        ui.add_space(8.0);
                        vertical_separator(ui);
                        ui.add_space(8.0);
                        if SolidButton::new("Export")
                            .palette(ButtonPalette::NEUTRAL)
                            .show(ui)
                        {
                            action = Some(UiAction::Export);
                        }
                    }
                });
            });
        });

    action
}

fn shape_count_label(count: usize) -> String {
    match count {
        1 => "1 shape".to_string(),
        n => format!("{n} shapes"),
    }
}
