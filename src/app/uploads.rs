//! Upload ingestion and record export
//!
//! File reads run on the tokio runtime so a multi-file selection never
//! stalls the frame. Reads in one batch may finish out of order; the batch
//! lands in the pending queue as a whole and is appended atomically on the
//! UI thread.

use super::{App, PendingBatch};
use crate::constants::IMAGE_EXTENSIONS;
use crate::gallery::UploadFile;
use crate::utils::{decode_data_uri, image_mime_for_path};
use eframe::egui;
use std::path::PathBuf;
use tracing::{debug, warn};

impl App {
    /// Opens the native picker and queues the selection.
    pub(crate) fn pick_files(&mut self, ctx: &egui::Context) {
        let picked = rfd::FileDialog::new()
            .set_title(&format!("Upload to {}", self.active_category))
            .add_filter("Images", &IMAGE_EXTENSIONS)
            .pick_files();
        if let Some(paths) = picked {
            self.ingest_paths(ctx, paths);
        }
    }

    /// Filters `paths` to image media types and reads them in the
    /// background. Non-image entries are silently dropped here, before the
    /// gallery manager ever sees them.
    pub(crate) fn ingest_paths(&mut self, ctx: &egui::Context, paths: Vec<PathBuf>) {
        let accepted: Vec<(PathBuf, String)> = paths
            .into_iter()
            .filter_map(|p| image_mime_for_path(&p).map(|mime| (p, mime.to_string())))
            .collect();
        if accepted.is_empty() {
            return;
        }

        let now = chrono::Utc::now().timestamp_millis();
        for (path, _) in &accepted {
            let name = file_name(path);
            self.uploads.begin(format!("{name}-{now}"), name);
        }

        let category = self.active_category.clone();
        let pending = self.pending.clone();
        let ctx = ctx.clone();

        debug!(count = accepted.len(), category, "Ingesting files");
        self.runtime.spawn(async move {
            let reads = accepted.into_iter().map(|(path, mime)| async move {
                match tokio::fs::read(&path).await {
                    Ok(bytes) => Some(UploadFile {
                        name: file_name(&path),
                        mime,
                        bytes,
                    }),
                    Err(e) => {
                        // One unreadable file never aborts the rest of the batch.
                        warn!(error = %e, path = %path.display(), "Failed to read file, skipping");
                        None
                    }
                }
            });
            let files: Vec<UploadFile> = futures::future::join_all(reads)
                .await
                .into_iter()
                .flatten()
                .collect();

            if !files.is_empty() {
                if let Ok(mut queue) = pending.lock() {
                    queue.push(PendingBatch { category, files });
                }
            }
            ctx.request_repaint();
        });
    }

    /// Moves completed batches into the gallery. Called once per frame.
    pub(crate) fn drain_pending(&mut self) {
        let batches: Vec<PendingBatch> = match self.pending.lock() {
            Ok(mut queue) => queue.drain(..).collect(),
            Err(_) => return,
        };
        for batch in batches {
            self.gallery.add_many(&batch.category, batch.files);
        }
    }

    /// Save-as for one record: decodes the stored payload and writes it
    /// wherever the user points the dialog.
    pub(crate) fn export_record(&mut self, id: &str) {
        let Some(record) = self.gallery.records().iter().find(|r| r.id == id).cloned() else {
            return;
        };
        let default_name = if record.name.is_empty() {
            "image".to_string()
        } else {
            record.name.clone()
        };
        let Some(dest) = rfd::FileDialog::new()
            .set_file_name(&default_name)
            .save_file()
        else {
            return;
        };

        match decode_data_uri(&record.src) {
            Some((_, bytes)) => match std::fs::write(&dest, bytes) {
                Ok(()) => {
                    debug!(path = %dest.display(), "Record exported");
                    self.show_toast(format!("Saved {}", default_name));
                }
                Err(e) => {
                    warn!(error = %e, path = %dest.display(), "Failed to export record");
                    self.show_toast("Save failed");
                }
            },
            None => {
                warn!(id, "Record payload is not a valid data URI");
                self.show_toast("Save failed");
            }
        }
    }
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "image".to_string())
}
