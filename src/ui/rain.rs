//! Decorative digital-rain background.
//!
//! Pure presentation: advanced once per frame, reseeded on resize, never
//! read by any gallery state. Disabled via the rain toggle in settings.

use crate::theme;
use eframe::egui;
use rand::Rng;

const GLYPHS: &[char] = &[
    'ﾊ', 'ﾐ', 'ﾋ', 'ｰ', 'ｳ', 'ｼ', 'ﾅ', 'ﾓ', 'ﾆ', 'ｻ', 'ﾜ', 'ﾂ', 'ｵ', 'ﾘ', 'ｱ', 'ﾎ', 'ﾃ', 'ﾏ',
    'ｹ', 'ﾒ', 'ｴ', 'ｶ', 'ｷ', 'ﾑ', 'ﾕ', 'ﾗ', 'ｾ', 'ﾈ', '0', '1', '2', '3', '4', '5', '7', '8', '9',
];
const COLUMN_WIDTH: f32 = 18.0;
const GLYPH_SIZE: f32 = 14.0;
const TRAIL_LEN: usize = 14;

struct Column {
    x: f32,
    head_y: f32,
    speed: f32,
    glyphs: Vec<char>,
}

#[derive(Default)]
pub struct MatrixRain {
    columns: Vec<Column>,
    seeded_width: f32,
}

impl MatrixRain {
    /// Draws one frame of rain over `rect` and advances the columns.
    pub fn paint(&mut self, painter: &egui::Painter, rect: egui::Rect, dt: f32) {
        if (rect.width() - self.seeded_width).abs() > 1.0 {
            self.reseed(rect);
        }

        let mut rng = rand::thread_rng();
        for col in &mut self.columns {
            col.head_y += col.speed * dt;
            if col.head_y - TRAIL_LEN as f32 * GLYPH_SIZE > rect.bottom() {
                col.head_y = rect.top() - rng.gen_range(0.0..rect.height() * 0.5);
                col.speed = rng.gen_range(60.0..220.0);
            }
            // Mutate one glyph per frame so trails shimmer.
            let slot = rng.gen_range(0..col.glyphs.len());
            col.glyphs[slot] = GLYPHS[rng.gen_range(0..GLYPHS.len())];

            for (i, glyph) in col.glyphs.iter().enumerate() {
                let y = col.head_y - i as f32 * GLYPH_SIZE;
                if y < rect.top() || y > rect.bottom() {
                    continue;
                }
                let color = if i == 0 {
                    theme::RAIN_HEAD
                } else {
                    let fade = 1.0 - i as f32 / TRAIL_LEN as f32;
                    let alpha = (fade * 90.0) as u8;
                    egui::Color32::from_rgba_unmultiplied(
                        theme::RAIN_TRAIL.r(),
                        theme::RAIN_TRAIL.g(),
                        theme::RAIN_TRAIL.b(),
                        alpha,
                    )
                };
                painter.text(
                    egui::pos2(col.x, y),
                    egui::Align2::CENTER_CENTER,
                    glyph,
                    egui::FontId::monospace(GLYPH_SIZE - 2.0),
                    color,
                );
            }
        }
    }

    fn reseed(&mut self, rect: egui::Rect) {
        let mut rng = rand::thread_rng();
        let count = (rect.width() / COLUMN_WIDTH).ceil() as usize;
        self.columns = (0..count)
            .map(|i| Column {
                x: rect.left() + i as f32 * COLUMN_WIDTH + COLUMN_WIDTH / 2.0,
                head_y: rect.top() + rng.gen_range(0.0..rect.height()),
                speed: rng.gen_range(60.0..220.0),
                glyphs: (0..TRAIL_LEN)
                    .map(|_| GLYPHS[rng.gen_range(0..GLYPHS.len())])
                    .collect(),
            })
            .collect();
        self.seeded_width = rect.width();
    }
}
