//! Upload progress simulation.
//!
//! Encoding a file is near-instant, so real transfer progress doesn't
//! exist; this is a bounded monotonic counter that gives the user feedback
//! anyway. Ticks are driven by the repaint cycle, so spacing is best-effort.

use rand::Rng;

/// Transient progress entry, never persisted.
#[derive(Debug, Clone)]
pub struct UploadProgressEntry {
    pub id: String,
    pub name: String,
    /// Displayed percentage, clamped to 99 until the entry completes.
    pub progress: u8,
}

#[derive(Default)]
pub struct UploadProgress {
    entries: Vec<(UploadProgressEntry, f32)>,
}

impl UploadProgress {
    pub fn begin(&mut self, id: String, name: String) {
        self.entries.push((
            UploadProgressEntry {
                id,
                name,
                progress: 0,
            },
            0.0,
        ));
    }

    /// Advances every entry by a pseudo-random step and drops the ones that
    /// crossed 100. Monotonic and self-terminating: any entry finishes
    /// within ten ticks.
    pub fn tick(&mut self) {
        let mut rng = rand::thread_rng();
        self.entries.retain_mut(|(entry, raw)| {
            *raw += rng.gen_range(10.0..25.0);
            if *raw >= 100.0 {
                return false;
            }
            entry.progress = (raw.round() as u8).min(99);
            true
        });
    }

    pub fn entries(&self) -> impl Iterator<Item = &UploadProgressEntry> {
        self.entries.iter().map(|(entry, _)| entry)
    }

    pub fn is_idle(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_progress_is_monotonic_and_bounded() {
        let mut progress = UploadProgress::default();
        progress.begin("u1".to_string(), "a.png".to_string());

        let mut last = 0;
        while !progress.is_idle() {
            progress.tick();
            if let Some(entry) = progress.entries().next() {
                assert!(entry.progress >= last);
                assert!(entry.progress <= 99);
                last = entry.progress;
            }
        }
    }

    #[test]
    fn entries_self_terminate_within_ten_ticks() {
        let mut progress = UploadProgress::default();
        progress.begin("u1".to_string(), "a.png".to_string());
        progress.begin("u2".to_string(), "b.png".to_string());

        for _ in 0..10 {
            progress.tick();
        }
        assert!(progress.is_idle());
    }

    #[test]
    fn entries_advance_independently() {
        let mut progress = UploadProgress::default();
        progress.begin("u1".to_string(), "a.png".to_string());
        progress.tick();
        progress.begin("u2".to_string(), "b.png".to_string());

        let values: Vec<u8> = progress.entries().map(|e| e.progress).collect();
        assert_eq!(values.len(), 2);
        assert!(values[0] >= 10);
        assert_eq!(values[1], 0);
    }

    #[test]
    fn tick_on_empty_set_is_a_noop() {
        let mut progress = UploadProgress::default();
        progress.tick();
        assert!(progress.is_idle());
    }
}
