//! Centralized theme constants for Matrix Gallery
//! All colors, sizes, and styling should reference these constants

use egui::Color32;

// =============================================================================
// COLORS - Backgrounds
// =============================================================================
pub const BG_BASE: Color32 = Color32::from_rgb(0x03, 0x08, 0x04); // near-black with a green cast
pub const BG_ELEVATED: Color32 = Color32::from_rgb(0x0a, 0x12, 0x0c);
pub const BG_SURFACE: Color32 = Color32::from_rgb(0x11, 0x1f, 0x15);
pub const BG_HOVER: Color32 = Color32::from_rgb(0x0e, 0x1f, 0x13);
pub const BG_BACKDROP: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 200); // lightbox backdrop

// =============================================================================
// COLORS - Accent (Matrix green)
// =============================================================================
pub const ACCENT: Color32 = Color32::from_rgb(0x4a, 0xde, 0x80); // green-400
pub const ACCENT_STRONG: Color32 = Color32::from_rgb(0x22, 0xc5, 0x5e); // green-500
pub const ACCENT_FAINT: Color32 = Color32::from_rgb(0x14, 0x53, 0x2d); // green-900

// =============================================================================
// COLORS - Text
// =============================================================================
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(0xbb, 0xf7, 0xd0); // green-200
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0x86, 0xef, 0xac); // green-300
pub const TEXT_MUTED: Color32 = Color32::from_rgb(0x4d, 0x7c, 0x5f);
pub const TEXT_DIM: Color32 = Color32::from_rgb(0x2f, 0x4f, 0x3a);

// =============================================================================
// COLORS - Borders
// =============================================================================
pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(0x14, 0x2e, 0x1c);
pub const BORDER_DEFAULT: Color32 = Color32::from_rgb(0x1d, 0x46, 0x2a);
pub const BORDER_STRONG: Color32 = Color32::from_rgb(0x2b, 0x6b, 0x3f);

// =============================================================================
// COLORS - Status
// =============================================================================
pub const STATUS_ERROR: Color32 = Color32::from_rgb(0xf8, 0x71, 0x71); // red-400

// =============================================================================
// COLORS - Buttons
// =============================================================================
pub const BTN_ACCENT: Color32 = Color32::from_rgb(0x16, 0xa3, 0x4a);

// =============================================================================
// COLORS - Rain
// =============================================================================
pub const RAIN_HEAD: Color32 = Color32::from_rgb(0xd9, 0xf9, 0x9d);
pub const RAIN_TRAIL: Color32 = Color32::from_rgb(0x22, 0xc5, 0x5e);

/// Per-category tint: (badge background, text color).
pub fn category_colors(category: &str) -> (Color32, Color32) {
    match category {
        "REALITY" => (
            Color32::from_rgba_unmultiplied(0x4a, 0xde, 0x80, 14),
            Color32::from_rgb(0x4a, 0xde, 0x80),
        ),
        "CONSTRUCT" => (
            Color32::from_rgba_unmultiplied(0x38, 0xbd, 0xf8, 14),
            Color32::from_rgb(0x38, 0xbd, 0xf8),
        ),
        "ZION" => (
            Color32::from_rgba_unmultiplied(0xfb, 0xbf, 0x24, 14),
            Color32::from_rgb(0xfb, 0xbf, 0x24),
        ),
        "MISSIONS" => (
            Color32::from_rgba_unmultiplied(0xf8, 0x71, 0x71, 14),
            Color32::from_rgb(0xf8, 0x71, 0x71),
        ),
        "ARCHIVES" => (
            Color32::from_rgba_unmultiplied(0xa7, 0x8b, 0xfa, 14),
            Color32::from_rgb(0xa7, 0x8b, 0xfa),
        ),
        _ => (
            Color32::from_rgba_unmultiplied(0x86, 0xef, 0xac, 10),
            TEXT_MUTED,
        ),
    }
}

// =============================================================================
// DIMENSIONS
// =============================================================================
pub const TAB_HEIGHT: f32 = 30.0;
pub const TILE_MIN_WIDTH: f32 = 220.0;
pub const LOGO_SIZE: f32 = 48.0;
pub const TOAST_WIDTH: f32 = 220.0;

// =============================================================================
// CORNER RADIUS
// =============================================================================
pub const RADIUS_DEFAULT: f32 = 4.0;
pub const RADIUS_LARGE: f32 = 8.0;

// =============================================================================
// STROKE WIDTHS
// =============================================================================
pub const STROKE_DEFAULT: f32 = 1.0;
pub const STROKE_MEDIUM: f32 = 1.5;

// =============================================================================
// SPACING
// =============================================================================
pub const SPACING_SM: f32 = 4.0;
pub const SPACING_MD: f32 = 8.0;
pub const SPACING_LG: f32 = 12.0;
pub const SPACING_XL: f32 = 16.0;

// =============================================================================
// HELPER - Apply global visuals
// =============================================================================
pub fn apply_visuals(ctx: &egui::Context) {
    ctx.set_visuals(egui::Visuals {
        dark_mode: true,
        panel_fill: BG_BASE,
        window_fill: BG_ELEVATED,
        extreme_bg_color: BG_BASE,
        faint_bg_color: BG_ELEVATED,
        hyperlink_color: ACCENT,
        selection: egui::style::Selection {
            bg_fill: ACCENT_FAINT,
            stroke: egui::Stroke::NONE,
        },
        widgets: egui::style::Widgets {
            noninteractive: egui::style::WidgetVisuals {
                bg_fill: BG_ELEVATED,
                weak_bg_fill: BG_SURFACE,
                bg_stroke: egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE),
                fg_stroke: egui::Stroke::new(STROKE_DEFAULT, TEXT_PRIMARY),
                corner_radius: RADIUS_DEFAULT.into(),
                expansion: 0.0,
            },
            inactive: egui::style::WidgetVisuals {
                bg_fill: Color32::TRANSPARENT,
                weak_bg_fill: BG_ELEVATED,
                bg_stroke: egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE),
                fg_stroke: egui::Stroke::new(STROKE_DEFAULT, TEXT_SECONDARY),
                corner_radius: RADIUS_DEFAULT.into(),
                expansion: 0.0,
            },
            hovered: egui::style::WidgetVisuals {
                bg_fill: BG_HOVER,
                weak_bg_fill: BG_SURFACE,
                bg_stroke: egui::Stroke::NONE,
                fg_stroke: egui::Stroke::new(STROKE_MEDIUM, TEXT_PRIMARY),
                corner_radius: RADIUS_DEFAULT.into(),
                expansion: 0.0,
            },
            active: egui::style::WidgetVisuals {
                bg_fill: BG_SURFACE,
                weak_bg_fill: BG_SURFACE,
                bg_stroke: egui::Stroke::NONE,
                fg_stroke: egui::Stroke::new(STROKE_DEFAULT, TEXT_PRIMARY),
                corner_radius: RADIUS_DEFAULT.into(),
                expansion: -2.0,
            },
            open: egui::style::WidgetVisuals {
                bg_fill: BG_SURFACE,
                weak_bg_fill: BG_ELEVATED,
                bg_stroke: egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE),
                fg_stroke: egui::Stroke::new(STROKE_DEFAULT, TEXT_PRIMARY),
                corner_radius: RADIUS_DEFAULT.into(),
                expansion: 0.0,
            },
        },
        striped: false,
        slider_trailing_fill: false,
        interact_cursor: Some(egui::CursorIcon::PointingHand),
        popup_shadow: egui::epaint::Shadow {
            offset: [0, 4],
            blur: 12,
            spread: 0,
            color: Color32::from_black_alpha(120),
        },
        window_stroke: egui::Stroke::new(1.0, BORDER_DEFAULT),
        window_corner_radius: egui::CornerRadius::same(8),
        menu_corner_radius: egui::CornerRadius::same(8),
        ..egui::Visuals::dark()
    });

    ctx.style_mut(|style| {
        style.interaction.selectable_labels = false;
        style.spacing.menu_margin = egui::Margin::symmetric(6, 4);
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.button_padding = egui::vec2(12.0, 6.0);
        style.spacing.scroll.bar_width = 6.0;
        style.spacing.scroll.floating = false;
    });
}

// =============================================================================
// HELPER - Frames
// =============================================================================
pub fn toast_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(Color32::from_rgba_unmultiplied(0x03, 0x08, 0x04, 230))
        .stroke(egui::Stroke::new(STROKE_DEFAULT, BORDER_DEFAULT))
        .corner_radius(RADIUS_DEFAULT)
        .inner_margin(egui::Margin::same(SPACING_MD as i8))
}

pub fn empty_state_frame() -> egui::Frame {
    egui::Frame::new()
        .stroke(egui::Stroke::new(STROKE_DEFAULT, BORDER_DEFAULT))
        .corner_radius(RADIUS_LARGE)
        .inner_margin(egui::Margin::same(32))
}

// =============================================================================
// HELPER - Buttons
// =============================================================================
pub fn button_accent(text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(
        egui::RichText::new(text.into())
            .color(Color32::from_rgb(0x03, 0x08, 0x04))
            .strong(),
    )
    .fill(BTN_ACCENT)
    .corner_radius(RADIUS_DEFAULT)
}

/// Context menu item with icon. Returns true if clicked.
pub fn menu_item(ui: &mut egui::Ui, icon: &str, label: &str) -> bool {
    let text = format!("{}  {}", icon, label);
    let w = ui.available_width();
    let (rect, response) = ui.allocate_exact_size(egui::vec2(w, 24.0), egui::Sense::click());
    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        ui.painter().rect_filled(rect, RADIUS_DEFAULT, BG_HOVER);
    }
    let text_pos = rect.left_center() + egui::vec2(8.0, 0.0);
    ui.painter().text(
        text_pos,
        egui::Align2::LEFT_CENTER,
        text,
        egui::FontId::proportional(13.0),
        TEXT_SECONDARY,
    );
    response.clicked()
}

/// Sets context menu width to 1.5x the widest label.
pub fn set_menu_width(ui: &mut egui::Ui, labels: &[&str]) {
    let max_text = labels
        .iter()
        .map(|l| {
            ui.fonts(|f| {
                f.layout_no_wrap(l.to_string(), egui::FontId::proportional(13.0), TEXT_SECONDARY)
                    .rect
                    .width()
            })
        })
        .fold(0.0_f32, f32::max);
    let w = (max_text + 16.0) * 1.5;
    ui.set_min_width(w);
    ui.set_max_width(w);
}
