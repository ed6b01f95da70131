//! App module - contains the main application state and logic

mod context_menu;
mod textures;
mod uploads;

pub(crate) use context_menu::TileAction;

use crate::constants::*;
use crate::gallery::{GalleryManager, UploadFile};
use crate::lightbox::{Lightbox, SwipeTracker};
use crate::progress::UploadProgress;
use crate::settings::Settings;
use crate::store::JsonFileStore;
use crate::theme;
use crate::ui::rain::MatrixRain;
use eframe::egui;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// A batch of files read off the UI thread, tagged with the category that
/// was active when the user picked them. Drained whole on the UI thread so
/// no partial record is ever visible.
pub(crate) struct PendingBatch {
    pub category: String,
    pub files: Vec<UploadFile>,
}

pub struct App {
    pub(crate) gallery: GalleryManager,
    pub(crate) active_category: String,
    // Lightbox
    pub(crate) lightbox: Lightbox,
    pub(crate) swipe: SwipeTracker,
    // Uploads
    pub(crate) uploads: UploadProgress,
    pub(crate) pending: Arc<Mutex<Vec<PendingBatch>>>,
    pub(crate) runtime: tokio::runtime::Runtime,
    // Texture cache, keyed by record id
    pub(crate) texture_cache: HashMap<String, Option<egui::TextureHandle>>,
    pub(crate) logo_texture: Option<egui::TextureHandle>,
    // Grid scroll; pinned while the lightbox is open
    pub(crate) grid_scroll_offset: f32,
    pub(crate) locked_scroll: Option<f32>,
    // Decoration
    pub(crate) rain: MatrixRain,
    pub(crate) show_rain: bool,
    pub(crate) tile_height: f32,
    // Toast notification
    pub(crate) toast_message: Option<String>,
    pub(crate) toast_start: Option<std::time::Instant>,
    // Window state
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) data_dir: PathBuf,
}

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings, data_dir: PathBuf) -> Self {
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Phosphor icons for tile/lightbox controls
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        let store = JsonFileStore::new(&data_dir);
        let gallery = GalleryManager::new(Box::new(store));

        let active_category = settings
            .active_category
            .filter(|c| CATEGORIES.contains(&c.as_str()))
            .unwrap_or_else(|| CATEGORIES[0].to_string());

        let logo_texture = {
            let (rgba, w, h) = crate::utils::rasterize_logo(theme::LOGO_SIZE as u32 * 2);
            Some(cc.egui_ctx.load_texture(
                "logo",
                egui::ColorImage::from_rgba_unmultiplied([w as usize, h as usize], &rgba),
                egui::TextureOptions::LINEAR,
            ))
        };

        Self {
            gallery,
            active_category,
            lightbox: Lightbox::default(),
            swipe: SwipeTracker::default(),
            uploads: UploadProgress::default(),
            pending: Arc::new(Mutex::new(Vec::new())),
            runtime: tokio::runtime::Runtime::new().expect("failed to start tokio runtime"),
            texture_cache: HashMap::new(),
            logo_texture,
            grid_scroll_offset: 0.0,
            locked_scroll: None,
            rain: MatrixRain::default(),
            show_rain: settings.show_rain,
            tile_height: settings.tile_height,
            toast_message: None,
            toast_start: None,
            window_pos: None,
            window_size: None,
            needs_center: false,
            data_dir,
        }
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            active_category: Some(self.active_category.clone()),
            tile_height: self.tile_height,
            show_rain: self.show_rain,
        };
        settings.save(&self.data_dir);
    }

    /// The filtered list for the active category, in store order.
    pub(crate) fn filtered(&self) -> Vec<crate::store::ImageRecord> {
        self.gallery.filter_by_category(&self.active_category)
    }

    /// Opens the lightbox at `index` into the current filtered list and
    /// pins the grid scroll until close.
    pub(crate) fn open_lightbox(&mut self, index: usize) {
        let list = self.filtered();
        if index < list.len() {
            self.locked_scroll = Some(self.grid_scroll_offset);
            self.lightbox.open(index, list);
        }
    }

    /// Single close path for every trigger (escape, backdrop, close button)
    /// so the scroll pin is always released.
    pub(crate) fn close_lightbox(&mut self) {
        self.lightbox.close();
        self.swipe.cancel();
        if let Some(offset) = self.locked_scroll.take() {
            self.grid_scroll_offset = offset;
        }
    }

    pub(crate) fn delete_record(&mut self, id: &str) {
        self.texture_cache.remove(id);
        self.gallery.remove(id);
    }

    pub(crate) fn show_toast(&mut self, message: impl Into<String>) {
        self.toast_message = Some(message.into());
        self.toast_start = Some(std::time::Instant::now());
    }
}
