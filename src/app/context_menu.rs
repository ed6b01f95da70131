//! Shared context menu for gallery tiles

use super::App;
use crate::theme;
use eframe::egui;

#[derive(Default)]
pub(crate) struct TileAction {
    pub view: bool,
    pub download: bool,
    pub delete: bool,
}

impl App {
    pub(crate) fn tile_context_menu(&mut self, ui: &mut egui::Ui) -> TileAction {
        let mut action = TileAction::default();
        ui.spacing_mut().item_spacing.y = 2.0;

        theme::set_menu_width(ui, &["  View", "  Download", "  Delete"]);

        if theme::menu_item(ui, egui_phosphor::regular::MAGNIFYING_GLASS_PLUS, "View") {
            action.view = true;
            ui.close_menu();
        }
        if theme::menu_item(ui, egui_phosphor::regular::DOWNLOAD_SIMPLE, "Download") {
            action.download = true;
            ui.close_menu();
        }
        ui.separator();
        if theme::menu_item(ui, egui_phosphor::regular::TRASH, "Delete") {
            action.delete = true;
            ui.close_menu();
        }

        action
    }
}
