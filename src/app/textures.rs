//! Texture cache for stored records
//!
//! Records carry their pixels as base64 data URIs; decoding happens once
//! per record and the handle is cached by id. A failed decode caches `None`
//! so it isn't retried every frame.

use super::App;
use crate::store::ImageRecord;
use crate::utils::decode_data_uri;
use eframe::egui;
use tracing::warn;

impl App {
    pub(crate) fn texture_for(
        &mut self,
        ctx: &egui::Context,
        record: &ImageRecord,
    ) -> Option<egui::TextureHandle> {
        if let Some(cached) = self.texture_cache.get(&record.id) {
            return cached.clone();
        }

        let texture = decode_record(ctx, record);
        if texture.is_none() {
            warn!(id = %record.id, name = %record.name, "Failed to decode record image");
        }
        self.texture_cache.insert(record.id.clone(), texture.clone());
        texture
    }
}

fn decode_record(ctx: &egui::Context, record: &ImageRecord) -> Option<egui::TextureHandle> {
    let (_, bytes) = decode_data_uri(&record.src)?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let pixels = rgba.into_raw();
    Some(ctx.load_texture(
        &record.id,
        egui::ColorImage::from_rgba_unmultiplied(size, &pixels),
        egui::TextureOptions::LINEAR,
    ))
}
