#![windows_subsystem = "windows"]
//! Matrix Gallery - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod app;
mod constants;
mod gallery;
mod lightbox;
mod progress;
mod settings;
mod store;
mod theme;
mod ui;
mod utils;

use app::App;
use constants::*;
use eframe::egui;
use lightbox::SwipeAction;
use std::path::PathBuf;
use tracing::info;
use ui::components;
use utils::format_bytes;

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "matrix-gallery.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,matrix_gallery=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

fn main() -> eframe::Result<()> {
    let data_dir = utils::get_data_dir();
    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, "Matrix Gallery starting");

    let settings = settings::Settings::load(&data_dir);
    let win_pos = match (settings.window_x, settings.window_y) {
        (Some(x), Some(y)) => Some(egui::pos2(x, y)),
        _ => None,
    };
    let win_size = match (settings.window_w, settings.window_h) {
        (Some(w), Some(h)) => Some(egui::vec2(w, h)),
        _ => None,
    };

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(win_size.unwrap_or(egui::vec2(1200.0, 800.0)))
        .with_min_inner_size([760.0, 560.0])
        .with_title("Matrix Gallery");

    // Window/taskbar icon from the vector logo
    {
        let (rgba, w, h) = utils::rasterize_logo(64);
        let icon = egui::IconData { rgba, width: w, height: h };
        viewport = viewport.with_icon(std::sync::Arc::new(icon));
    }

    let needs_center = win_pos.is_none();

    if let Some(pos) = win_pos {
        viewport = viewport.with_position(pos);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Matrix Gallery",
        options,
        Box::new(move |cc| {
            let mut app = App::new(cc, settings, data_dir);
            app.needs_center = needs_center;
            Ok(Box::new(app))
        }),
    )
}

// ============================================================================
// MAIN UPDATE LOOP & UI RENDERING
// ============================================================================

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window position/size for saving on exit
        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                self.window_pos = Some(rect.min);
            }
            if let Some(rect) = i.viewport().inner_rect {
                self.window_size = Some(rect.size());
            }
        });

        // Center window on first launch
        if self.needs_center {
            self.needs_center = false;
            if let Some(cmd) = egui::ViewportCommand::center_on_screen(ctx) {
                ctx.send_viewport_cmd(cmd);
            }
        }

        // Completed background reads land here, whole batches at a time
        self.drain_pending();

        // Progress toasts advance on the repaint cycle, not a timer
        if !self.uploads.is_idle() {
            self.uploads.tick();
            ctx.request_repaint();
        }

        // Files dropped anywhere on the window count as an upload
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });
        if !dropped.is_empty() {
            self.ingest_paths(ctx, dropped);
        }

        self.handle_lightbox_keys(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(theme::BG_BASE))
            .show(ctx, |ui| {
                if self.show_rain {
                    let dt = ctx.input(|i| i.stable_dt).min(0.1);
                    self.rain.paint(ui.painter(), ui.max_rect(), dt);
                    ctx.request_repaint();
                }

                ui.add_space(theme::SPACING_XL);
                self.render_hero(ui);
                ui.add_space(theme::SPACING_LG);
                self.render_category_nav(ui, ctx);
                ui.add_space(theme::SPACING_LG);
                self.render_gallery(ui, ctx);
            });

        self.render_lightbox(ctx);
        self.render_upload_toasts(ctx);
        self.render_toast(ctx);

        // Keep the clock in the category bar ticking
        ctx.request_repaint_after(std::time::Duration::from_secs(1));
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        // Lightbox state is transient; only settings survive the session
        if self.lightbox.is_open() {
            self.close_lightbox();
        }
        self.save_settings();
    }
}

impl App {
    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    fn handle_lightbox_keys(&mut self, ctx: &egui::Context) {
        if !self.lightbox.is_open() {
            return;
        }
        let (escape, right, left) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Escape),
                i.key_pressed(egui::Key::ArrowRight),
                i.key_pressed(egui::Key::ArrowLeft),
            )
        });
        if escape {
            self.close_lightbox();
        } else if right {
            self.lightbox.next();
        } else if left {
            self.lightbox.prev();
        }
    }

    // ------------------------------------------------------------------
    // Hero banner
    // ------------------------------------------------------------------

    fn render_hero(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            if let Some(logo) = &self.logo_texture {
                ui.add(
                    egui::Image::new(logo)
                        .fit_to_exact_size(egui::vec2(theme::LOGO_SIZE, theme::LOGO_SIZE)),
                );
                ui.add_space(theme::SPACING_SM);
            }
            ui.label(
                egui::RichText::new("MATRIX // Image Gallery")
                    .color(theme::ACCENT)
                    .strong()
                    .size(26.0),
            );
            ui.label(
                egui::RichText::new("Enter the Construct. Upload. Navigate. Decrypt memories.")
                    .color(theme::TEXT_MUTED)
                    .size(13.0),
            );
        });
    }

    // ------------------------------------------------------------------
    // Category tabs + clock
    // ------------------------------------------------------------------

    fn render_category_nav(&mut self, ui: &mut egui::Ui, _ctx: &egui::Context) {
        ui.horizontal(|ui| {
            ui.add_space(theme::SPACING_XL);
            for category in CATEGORIES {
                let active = self.active_category == category;
                let (fill, text_color, border) = if active {
                    (
                        theme::ACCENT_FAINT,
                        theme::TEXT_SECONDARY,
                        theme::ACCENT_STRONG,
                    )
                } else {
                    (
                        egui::Color32::TRANSPARENT,
                        theme::TEXT_MUTED,
                        theme::BORDER_DEFAULT,
                    )
                };
                let button = egui::Button::new(egui::RichText::new(category).color(text_color))
                    .fill(fill)
                    .stroke(egui::Stroke::new(theme::STROKE_DEFAULT, border))
                    .corner_radius(theme::RADIUS_DEFAULT)
                    .min_size(egui::vec2(0.0, theme::TAB_HEIGHT));
                if ui.add(button).clicked() && !active {
                    // Open lightbox belongs to the previous filter snapshot
                    self.close_lightbox();
                    self.active_category = category.to_string();
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.add_space(theme::SPACING_XL);
                ui.label(
                    egui::RichText::new(components::clock_text())
                        .color(theme::TEXT_MUTED)
                        .monospace(),
                );
                let rain_icon = if self.show_rain {
                    egui_phosphor::regular::CLOUD_RAIN
                } else {
                    egui_phosphor::regular::CLOUD_SLASH
                };
                if ui
                    .add(components::icon_button(rain_icon, theme::TEXT_MUTED))
                    .on_hover_text("Toggle digital rain")
                    .clicked()
                {
                    self.show_rain = !self.show_rain;
                }
            });
        });
    }

    // ------------------------------------------------------------------
    // Gallery grid
    // ------------------------------------------------------------------

    fn render_gallery(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal(|ui| {
            ui.add_space(theme::SPACING_XL);
            let label = format!(
                "{}  Upload to {}",
                egui_phosphor::regular::UPLOAD_SIMPLE,
                self.active_category
            );
            if ui.add(theme::button_accent(label)).clicked() {
                self.pick_files(ctx);
            }
            components::category_badge(ui, &self.active_category);
            let count = self.filtered().len();
            ui.label(
                egui::RichText::new(format!("{count} images"))
                    .color(theme::TEXT_DIM)
                    .size(12.0),
            );
        });
        ui.add_space(theme::SPACING_MD);

        let list = self.filtered();
        if list.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(48.0);
                theme::empty_state_frame().show(ui, |ui| {
                    ui.label(
                        egui::RichText::new("Drag & drop images here or use Upload.")
                            .color(theme::TEXT_MUTED)
                            .monospace(),
                    );
                });
            });
            return;
        }

        // While the lightbox is open the grid scroll is pinned to the
        // offset captured at open time.
        let mut scroll_area = egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .id_salt("gallery_scroll");
        if let Some(locked) = self.locked_scroll {
            scroll_area = scroll_area.vertical_scroll_offset(locked);
        }

        let output = scroll_area.show(ui, |ui| {
            ui.add_space(theme::SPACING_SM);
            let spacing = theme::SPACING_MD;
            let available = ui.available_width() - theme::SPACING_XL * 2.0;
            let num_cols = ((available + spacing) / (theme::TILE_MIN_WIDTH + spacing))
                .floor()
                .max(1.0);
            let tile_w = ((available - spacing * (num_cols - 1.0)) / num_cols).floor();
            let tile_h = self.tile_height;

            ui.horizontal(|ui| {
                ui.add_space(theme::SPACING_XL);
                ui.horizontal_wrapped(|ui| {
                    ui.spacing_mut().item_spacing = egui::vec2(spacing, spacing);
                    for (idx, record) in list.iter().enumerate() {
                        self.render_tile(ui, ctx, idx, record, egui::vec2(tile_w, tile_h));
                    }
                });
            });
            ui.add_space(theme::SPACING_XL);
        });
        self.grid_scroll_offset = output.state.offset.y;
    }

    fn render_tile(
        &mut self,
        ui: &mut egui::Ui,
        ctx: &egui::Context,
        index: usize,
        record: &store::ImageRecord,
        size: egui::Vec2,
    ) {
        let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());
        let mut action = app::TileAction::default();

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            painter.rect_filled(rect, theme::RADIUS_LARGE, theme::BG_ELEVATED);

            if let Some(tex) = self.texture_for(ctx, record) {
                let uv = cover_uv(tex.size_vec2(), rect.size());
                let mut shape = egui::epaint::RectShape::filled(
                    rect,
                    egui::CornerRadius::same(theme::RADIUS_LARGE as u8),
                    egui::Color32::WHITE,
                );
                shape.brush = Some(std::sync::Arc::new(egui::epaint::Brush {
                    fill_texture_id: tex.id(),
                    uv,
                }));
                painter.add(shape);
            } else {
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    egui_phosphor::regular::IMAGE_BROKEN,
                    egui::FontId::proportional(28.0),
                    theme::TEXT_DIM,
                );
            }

            // Caption strip
            let strip = egui::Rect::from_min_max(
                egui::pos2(rect.left(), rect.bottom() - 26.0),
                rect.max,
            );
            painter.rect_filled(
                strip,
                egui::CornerRadius {
                    nw: 0,
                    ne: 0,
                    sw: theme::RADIUS_LARGE as u8,
                    se: theme::RADIUS_LARGE as u8,
                },
                egui::Color32::from_rgba_unmultiplied(0, 0, 0, 170),
            );
            painter.text(
                strip.left_center() + egui::vec2(8.0, 0.0),
                egui::Align2::LEFT_CENTER,
                truncate(&record.name, 28),
                egui::FontId::monospace(11.0),
                theme::TEXT_SECONDARY,
            );
            painter.text(
                strip.right_center() - egui::vec2(8.0, 0.0),
                egui::Align2::RIGHT_CENTER,
                format_bytes(record.size),
                egui::FontId::monospace(10.0),
                theme::TEXT_DIM,
            );

            let border = if response.hovered() {
                theme::BORDER_STRONG
            } else {
                theme::BORDER_SUBTLE
            };
            painter.rect_stroke(
                rect,
                theme::RADIUS_LARGE,
                egui::Stroke::new(theme::STROKE_DEFAULT, border),
                egui::StrokeKind::Outside,
            );

            // Hover actions: download / delete
            if response.hovered() {
                ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                let mut cursor =
                    egui::pos2(rect.right() - 8.0 - 14.0, rect.top() + 8.0 + 14.0);
                let button_size = egui::vec2(28.0, 28.0);

                let dl_rect = egui::Rect::from_center_size(cursor, button_size);
                if ui
                    .put(
                        dl_rect,
                        components::icon_button(
                            egui_phosphor::regular::DOWNLOAD_SIMPLE,
                            theme::TEXT_SECONDARY,
                        ),
                    )
                    .clicked()
                {
                    action.download = true;
                }
                cursor.x -= 34.0;
                let del_rect = egui::Rect::from_center_size(cursor, button_size);
                if ui
                    .put(
                        del_rect,
                        components::icon_button(
                            egui_phosphor::regular::TRASH,
                            theme::STATUS_ERROR,
                        ),
                    )
                    .clicked()
                {
                    action.delete = true;
                }
            }
        }

        response
            .clone()
            .on_hover_text(format!(
                "{}\n{} - {}",
                record.name,
                components::format_created_at(record.created_at),
                format_bytes(record.size)
            ))
            .context_menu(|ui| {
                let menu = self.tile_context_menu(ui);
                action.view |= menu.view;
                action.download |= menu.download;
                action.delete |= menu.delete;
            });

        if response.clicked() {
            action.view = true;
        }

        if action.view {
            self.open_lightbox(index);
        }
        if action.download {
            self.export_record(&record.id);
        }
        if action.delete {
            self.delete_record(&record.id);
        }
    }

    // ------------------------------------------------------------------
    // Lightbox overlay
    // ------------------------------------------------------------------

    fn render_lightbox(&mut self, ctx: &egui::Context) {
        if !self.lightbox.is_open() {
            return;
        }
        let Some(record) = self.lightbox.current().cloned() else {
            self.close_lightbox();
            return;
        };
        let index = self.lightbox.index().unwrap_or(0);
        let total = self.lightbox.len();
        let screen = ctx.screen_rect();

        let mut close_requested = false;
        let mut swipe_action: Option<SwipeAction> = None;

        egui::Area::new(egui::Id::new("lightbox"))
            .order(egui::Order::Foreground)
            .fixed_pos(screen.min)
            .show(ctx, |ui| {
                let backdrop = ui.allocate_rect(screen, egui::Sense::click());
                ui.painter().rect_filled(screen, 0.0, theme::BG_BACKDROP);

                // Image, fit to 86% of the screen, never upscaled
                let max = screen.shrink2(screen.size() * 0.07);
                let texture = self.texture_for(ctx, &record);
                let image_rect = if let Some(tex) = &texture {
                    let tex_size = tex.size_vec2();
                    let scale = (max.width() / tex_size.x)
                        .min(max.height() / tex_size.y)
                        .min(1.0);
                    let rect =
                        egui::Rect::from_center_size(screen.center(), tex_size * scale);
                    ui.painter().image(
                        tex.id(),
                        rect,
                        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                        egui::Color32::WHITE,
                    );
                    ui.painter().rect_stroke(
                        rect,
                        theme::RADIUS_DEFAULT,
                        egui::Stroke::new(theme::STROKE_DEFAULT, theme::BORDER_STRONG),
                        egui::StrokeKind::Outside,
                    );
                    rect
                } else {
                    let rect = egui::Rect::from_center_size(
                        screen.center(),
                        egui::vec2(320.0, 180.0),
                    );
                    ui.painter().text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        "signal lost",
                        egui::FontId::monospace(16.0),
                        theme::TEXT_MUTED,
                    );
                    rect
                };

                // Swipe gesture over the image
                let image_response = ui.interact(
                    image_rect,
                    egui::Id::new("lightbox_image"),
                    egui::Sense::click_and_drag(),
                );
                if image_response.drag_started() {
                    if let Some(pos) = image_response.interact_pointer_pos() {
                        self.swipe.begin(pos.x, pos.y);
                    }
                }
                if image_response.drag_stopped() {
                    if let Some(pos) = ctx.input(|i| i.pointer.latest_pos()) {
                        swipe_action = self.swipe.end(pos.x, pos.y);
                    } else {
                        self.swipe.cancel();
                    }
                }

                // Navigation arrows
                let arrow_size = egui::vec2(36.0, 52.0);
                let prev_rect = egui::Rect::from_center_size(
                    egui::pos2(screen.left() + 36.0, screen.center().y),
                    arrow_size,
                );
                if ui
                    .put(
                        prev_rect,
                        components::icon_button(
                            egui_phosphor::regular::CARET_LEFT,
                            theme::TEXT_SECONDARY,
                        ),
                    )
                    .clicked()
                {
                    swipe_action = Some(SwipeAction::Prev);
                }
                let next_rect = egui::Rect::from_center_size(
                    egui::pos2(screen.right() - 36.0, screen.center().y),
                    arrow_size,
                );
                if ui
                    .put(
                        next_rect,
                        components::icon_button(
                            egui_phosphor::regular::CARET_RIGHT,
                            theme::TEXT_SECONDARY,
                        ),
                    )
                    .clicked()
                {
                    swipe_action = Some(SwipeAction::Next);
                }

                // Close control
                let close_rect = egui::Rect::from_center_size(
                    egui::pos2(screen.right() - 30.0, screen.top() + 30.0),
                    egui::vec2(30.0, 30.0),
                );
                if ui
                    .put(
                        close_rect,
                        components::icon_button(egui_phosphor::regular::X, theme::TEXT_SECONDARY),
                    )
                    .clicked()
                {
                    close_requested = true;
                }

                // Caption
                ui.painter().text(
                    egui::pos2(screen.center().x, screen.bottom() - 24.0),
                    egui::Align2::CENTER_CENTER,
                    format!("{}  [{}/{}]", record.name, index + 1, total),
                    egui::FontId::monospace(13.0),
                    theme::TEXT_SECONDARY,
                );

                // Backdrop click closes, unless the click landed on the image
                if backdrop.clicked() && !image_response.hovered() {
                    close_requested = true;
                }
            });

        match swipe_action {
            Some(SwipeAction::Next) => self.lightbox.next(),
            Some(SwipeAction::Prev) => self.lightbox.prev(),
            None => {}
        }
        if close_requested {
            self.close_lightbox();
        }
    }

    // ------------------------------------------------------------------
    // Toasts
    // ------------------------------------------------------------------

    fn render_upload_toasts(&mut self, ctx: &egui::Context) {
        if self.uploads.is_idle() {
            return;
        }
        let screen = ctx.screen_rect();
        egui::Area::new(egui::Id::new("upload_toasts"))
            .order(egui::Order::Tooltip)
            .fixed_pos(egui::pos2(
                screen.right() - theme::TOAST_WIDTH - theme::SPACING_XL,
                screen.bottom() - theme::SPACING_XL,
            ))
            .pivot(egui::Align2::LEFT_BOTTOM)
            .show(ctx, |ui| {
                ui.set_width(theme::TOAST_WIDTH);
                let entries: Vec<_> = self.uploads.entries().cloned().collect();
                for entry in entries {
                    theme::toast_frame().show(ui, |ui| {
                        ui.set_width(theme::TOAST_WIDTH - theme::SPACING_MD * 2.0);
                        ui.label(
                            egui::RichText::new(truncate(&entry.name, 30))
                                .color(theme::TEXT_SECONDARY)
                                .size(11.0)
                                .monospace(),
                        );
                        components::progress_bar(ui, entry.progress);
                    });
                    ui.add_space(theme::SPACING_SM);
                }
            });
    }

    fn render_toast(&mut self, ctx: &egui::Context) {
        let Some(message) = self.toast_message.clone() else {
            return;
        };
        let expired = self
            .toast_start
            .map(|t| t.elapsed() > std::time::Duration::from_secs(3))
            .unwrap_or(true);
        if expired {
            self.toast_message = None;
            self.toast_start = None;
            return;
        }
        let screen = ctx.screen_rect();
        egui::Area::new(egui::Id::new("toast"))
            .order(egui::Order::Tooltip)
            .fixed_pos(egui::pos2(screen.center().x, screen.bottom() - 48.0))
            .pivot(egui::Align2::CENTER_CENTER)
            .show(ctx, |ui| {
                theme::toast_frame().show(ui, |ui| {
                    ui.label(
                        egui::RichText::new(message)
                            .color(theme::TEXT_SECONDARY)
                            .monospace(),
                    );
                });
            });
        ctx.request_repaint_after(std::time::Duration::from_millis(250));
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// UV rect that crops a texture to cover `target` without distortion.
fn cover_uv(tex_size: egui::Vec2, target: egui::Vec2) -> egui::Rect {
    let tex_aspect = tex_size.x / tex_size.y;
    let target_aspect = target.x / target.y;
    if tex_aspect > target_aspect {
        // Texture is wider: crop left/right
        let visible = target_aspect / tex_aspect;
        let margin = (1.0 - visible) / 2.0;
        egui::Rect::from_min_max(egui::pos2(margin, 0.0), egui::pos2(1.0 - margin, 1.0))
    } else {
        let visible = tex_aspect / target_aspect;
        let margin = (1.0 - visible) / 2.0;
        egui::Rect::from_min_max(egui::pos2(0.0, margin), egui::pos2(1.0, 1.0 - margin))
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
