//! Lightbox navigation state machine.
//!
//! Holds a read-only snapshot of the filtered list taken at open time plus
//! the current index. Records added or removed while the lightbox is open
//! are not reflected until it is reopened; that is the documented boundary,
//! not something this module papers over.

use crate::constants::SWIPE_THRESHOLD;
use crate::store::ImageRecord;

#[derive(Default)]
pub enum Lightbox {
    #[default]
    Closed,
    Open {
        index: usize,
        list: Vec<ImageRecord>,
    },
}

impl Lightbox {
    /// Opens at `index` into a snapshot of the filtered list. Out-of-range
    /// indices and empty lists leave the lightbox closed.
    pub fn open(&mut self, index: usize, list: Vec<ImageRecord>) {
        if index < list.len() {
            *self = Lightbox::Open { index, list };
        }
    }

    pub fn close(&mut self) {
        *self = Lightbox::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Lightbox::Open { .. })
    }

    /// Advances to the next image, wrapping past the end. No-op when closed
    /// or when the list has a single entry.
    pub fn next(&mut self) {
        if let Lightbox::Open { index, list } = self {
            *index = (*index + 1) % list.len();
        }
    }

    /// Steps back to the previous image, wrapping before the start.
    pub fn prev(&mut self) {
        if let Lightbox::Open { index, list } = self {
            *index = (*index + list.len() - 1) % list.len();
        }
    }

    pub fn current(&self) -> Option<&ImageRecord> {
        match self {
            Lightbox::Open { index, list } => list.get(*index),
            Lightbox::Closed => None,
        }
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            Lightbox::Open { index, .. } => Some(*index),
            Lightbox::Closed => None,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Lightbox::Open { list, .. } => list.len(),
            Lightbox::Closed => 0,
        }
    }
}

/// Navigation intent produced by a completed swipe gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeAction {
    Next,
    Prev,
}

/// Tracks one press-drag-release gesture over the lightbox image.
///
/// A gesture maps to navigation only when its horizontal displacement
/// exceeds both [`SWIPE_THRESHOLD`] and its own vertical displacement;
/// leftward drags mean next, rightward mean prev.
#[derive(Default)]
pub struct SwipeTracker {
    start: Option<(f32, f32)>,
}

impl SwipeTracker {
    pub fn begin(&mut self, x: f32, y: f32) {
        self.start = Some((x, y));
    }

    pub fn cancel(&mut self) {
        self.start = None;
    }

    /// Ends the gesture and returns the resulting action, if any.
    pub fn end(&mut self, x: f32, y: f32) -> Option<SwipeAction> {
        let (sx, sy) = self.start.take()?;
        let dx = x - sx;
        let dy = y - sy;
        if dx.abs() > SWIPE_THRESHOLD && dx.abs() > dy.abs() {
            if dx < 0.0 {
                Some(SwipeAction::Next)
            } else {
                Some(SwipeAction::Prev)
            }
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(n: usize) -> Vec<ImageRecord> {
        (0..n)
            .map(|i| ImageRecord {
                id: format!("id{i}"),
                src: String::new(),
                name: format!("{i}.png"),
                size: 0,
                category: "REALITY".to_string(),
                created_at: 0,
            })
            .collect()
    }

    #[test]
    fn open_requires_valid_index() {
        let mut lb = Lightbox::default();
        lb.open(0, list(0));
        assert!(!lb.is_open());

        lb.open(3, list(3));
        assert!(!lb.is_open());

        lb.open(2, list(3));
        assert_eq!(lb.index(), Some(2));
    }

    #[test]
    fn next_wraps_past_end() {
        let mut lb = Lightbox::default();
        lb.open(0, list(3));
        lb.next();
        lb.next();
        lb.next();
        assert_eq!(lb.index(), Some(0));
    }

    #[test]
    fn prev_wraps_before_start() {
        let mut lb = Lightbox::default();
        lb.open(0, list(3));
        lb.prev();
        assert_eq!(lb.index(), Some(2));
    }

    #[test]
    fn next_then_prev_returns_to_origin() {
        for len in 1..=4 {
            for start in 0..len {
                let mut lb = Lightbox::default();
                lb.open(start, list(len));
                lb.next();
                lb.prev();
                assert_eq!(lb.index(), Some(start));
            }
        }
    }

    #[test]
    fn single_item_navigation_is_a_noop() {
        let mut lb = Lightbox::default();
        lb.open(0, list(1));
        lb.next();
        assert_eq!(lb.index(), Some(0));
        lb.prev();
        assert_eq!(lb.index(), Some(0));
    }

    #[test]
    fn navigation_on_closed_lightbox_is_a_noop() {
        let mut lb = Lightbox::default();
        lb.next();
        lb.prev();
        assert!(lb.current().is_none());
    }

    #[test]
    fn close_discards_snapshot() {
        let mut lb = Lightbox::default();
        lb.open(1, list(3));
        lb.close();
        assert!(!lb.is_open());
        assert_eq!(lb.len(), 0);
    }

    #[test]
    fn swipe_left_maps_to_next() {
        let mut swipe = SwipeTracker::default();
        swipe.begin(100.0, 50.0);
        assert_eq!(swipe.end(40.0, 55.0), Some(SwipeAction::Next));
    }

    #[test]
    fn swipe_right_maps_to_prev() {
        let mut swipe = SwipeTracker::default();
        swipe.begin(100.0, 50.0);
        assert_eq!(swipe.end(160.0, 45.0), Some(SwipeAction::Prev));
    }

    #[test]
    fn short_swipe_is_ignored() {
        let mut swipe = SwipeTracker::default();
        swipe.begin(100.0, 50.0);
        assert_eq!(swipe.end(70.0, 50.0), None);
    }

    #[test]
    fn mostly_vertical_swipe_is_ignored() {
        let mut swipe = SwipeTracker::default();
        swipe.begin(100.0, 50.0);
        assert_eq!(swipe.end(40.0, 150.0), None);
    }

    #[test]
    fn end_without_begin_is_ignored() {
        let mut swipe = SwipeTracker::default();
        assert_eq!(swipe.end(0.0, 0.0), None);
    }
}
