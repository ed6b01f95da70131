//! Utility functions

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use std::path::{Path, PathBuf};

// Rounded dark tile with falling "rain" columns — window/taskbar icon and
// hero banner logo.
pub const LOGO_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 64"><rect x="0" y="0" width="64" height="64" rx="12" fill="#030804"/><g fill="#22c55e"><rect x="10" y="8" width="5" height="34" rx="2.5" opacity="0.9"/><rect x="10" y="46" width="5" height="6" rx="2.5" opacity="0.45"/><rect x="21" y="14" width="5" height="20" rx="2.5" opacity="0.6"/><rect x="21" y="38" width="5" height="10" rx="2.5" opacity="0.9"/><rect x="32" y="6" width="5" height="46" rx="2.5"/><rect x="43" y="18" width="5" height="16" rx="2.5" opacity="0.7"/><rect x="43" y="38" width="5" height="18" rx="2.5" opacity="0.5"/><rect x="54" y="10" width="5" height="26" rx="2.5" opacity="0.8"/><rect x="54" y="40" width="5" height="8" rx="2.5" opacity="0.4"/></g></svg>"##;

/// Rasterize the logo SVG to a square image (for window/taskbar icons and
/// the hero banner).
pub fn rasterize_logo(size: u32) -> (Vec<u8>, u32, u32) {
    let tree = resvg::usvg::Tree::from_str(LOGO_SVG, &resvg::usvg::Options::default()).unwrap();
    let scale = size as f32 / tree.size().width();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size, size).unwrap();
    resvg::render(
        &tree,
        resvg::usvg::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    (premul_to_straight(&pixmap), size, size)
}

fn premul_to_straight(pixmap: &resvg::tiny_skia::Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let a = p.alpha();
            if a == 0 {
                [0, 0, 0, 0]
            } else {
                let r = (p.red() as u16 * 255 / a as u16) as u8;
                let g = (p.green() as u16 * 255 / a as u16) as u8;
                let b = (p.blue() as u16 * 255 / a as u16) as u8;
                [r, g, b, a]
            }
        })
        .collect()
}

/// Get the app data directory path
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Matrix Gallery")
}

/// Format bytes into human-readable string (B, KB, MB)
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Encode raw image bytes as a self-contained `data:` URI.
pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, BASE64.encode(bytes))
}

/// Decode a `data:` URI back into its mime type and raw bytes. Returns
/// `None` for anything that isn't a well-formed base64 data URI.
pub fn decode_data_uri(src: &str) -> Option<(String, Vec<u8>)> {
    let rest = src.strip_prefix("data:")?;
    let (mime, payload) = rest.split_once(";base64,")?;
    let bytes = BASE64.decode(payload).ok()?;
    Some((mime.to_string(), bytes))
}

/// Infer an `image/*` mime type from a file extension. `None` means the
/// file is not an accepted image and must be dropped before ingestion.
pub fn image_mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_uri_round_trips() {
        let bytes = vec![0u8, 159, 146, 150];
        let uri = encode_data_uri("image/png", &bytes);
        assert!(uri.starts_with("data:image/png;base64,"));

        let (mime, decoded) = decode_data_uri(&uri).unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(decoded, bytes);
    }

    #[test]
    fn decode_rejects_malformed_uris() {
        assert!(decode_data_uri("not a uri").is_none());
        assert!(decode_data_uri("data:image/png;base64,!!!").is_none());
        assert!(decode_data_uri("data:image/png,plain").is_none());
    }

    #[test]
    fn mime_inference_accepts_images_only() {
        assert_eq!(
            image_mime_for_path(Path::new("photo.JPG")),
            Some("image/jpeg")
        );
        assert_eq!(image_mime_for_path(Path::new("a.png")), Some("image/png"));
        assert_eq!(image_mime_for_path(Path::new("doc.pdf")), None);
        assert_eq!(image_mime_for_path(Path::new("noext")), None);
    }

    #[test]
    fn format_bytes_picks_unit() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MB");
    }
}
