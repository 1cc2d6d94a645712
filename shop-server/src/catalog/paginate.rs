//! Incremental pagination controller
//!
//! Stateful per list-view session: a growing visible count over the
//! already-filtered set. Growth is triggered when the viewport
//! sentinel becomes visible, smoothed by a fixed short delay — no
//! I/O happens here, the whole filtered set is already in memory.
//! The `is_loading_more` guard keeps at most one growth cycle in
//! flight, and the sentinel is only rendered while more items remain
//! and no growth is running, so duplicate triggers cannot stack.

use std::time::Duration;

use shared::Shop;

/// Items revealed per growth step (and the initial page).
pub const PAGE_SIZE: usize = 12;

/// UX smoothing delay between trigger and growth.
pub const LOAD_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug)]
pub struct Paginator {
    page_size: usize,
    visible_count: usize,
    is_loading_more: bool,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new()
    }
}

impl Paginator {
    pub fn new() -> Self {
        Self::with_page_size(PAGE_SIZE)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size,
            visible_count: page_size,
            is_loading_more: false,
        }
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn is_loading_more(&self) -> bool {
        self.is_loading_more
    }

    /// Call whenever the filtered set changes: the visible window
    /// snaps back to the first page.
    pub fn reset(&mut self) {
        self.visible_count = self.page_size;
        self.is_loading_more = false;
    }

    /// Whether the sentinel element should be rendered at all.
    pub fn wants_sentinel(&self, filtered_len: usize) -> bool {
        self.visible_count < filtered_len && !self.is_loading_more
    }

    /// Sentinel became visible. Returns true when a growth cycle
    /// actually starts; re-entry while one is in flight is refused.
    pub fn try_begin_load(&mut self, filtered_len: usize) -> bool {
        if self.visible_count >= filtered_len || self.is_loading_more {
            return false;
        }
        self.is_loading_more = true;
        true
    }

    /// Complete the in-flight growth cycle.
    pub fn finish_load(&mut self) {
        if self.is_loading_more {
            self.visible_count += self.page_size;
            self.is_loading_more = false;
        }
    }

    /// Full growth cycle with the smoothing delay. Returns false when
    /// no growth was started.
    pub async fn load_more(&mut self, filtered_len: usize) -> bool {
        if !self.try_begin_load(filtered_len) {
            return false;
        }
        tokio::time::sleep(LOAD_DELAY).await;
        self.finish_load();
        true
    }

    /// The currently visible prefix of the filtered set.
    pub fn visible_slice<'a>(&self, filtered: &'a [Shop]) -> &'a [Shop] {
        let end = self.visible_count.min(filtered.len());
        &filtered[..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_one_page() {
        let p = Paginator::new();
        assert_eq!(p.visible_count(), PAGE_SIZE);
        assert!(!p.is_loading_more());
    }

    #[test]
    fn one_cycle_reveals_one_more_page() {
        let mut p = Paginator::new();
        assert!(p.try_begin_load(30));
        assert!(p.is_loading_more());
        p.finish_load();
        assert_eq!(p.visible_count(), 24);
        assert!(!p.is_loading_more());
    }

    #[test]
    fn refuses_reentry_while_loading() {
        let mut p = Paginator::new();
        assert!(p.try_begin_load(30));
        assert!(!p.try_begin_load(30));
        assert!(!p.wants_sentinel(30));
        p.finish_load();
        assert!(p.wants_sentinel(30));
    }

    #[test]
    fn no_growth_when_everything_is_visible() {
        let mut p = Paginator::new();
        assert!(!p.try_begin_load(12));
        assert!(!p.try_begin_load(5));
        assert!(!p.wants_sentinel(12));
    }

    #[test]
    fn filter_change_resets_to_first_page() {
        let mut p = Paginator::new();
        assert!(p.try_begin_load(30));
        p.finish_load();
        assert_eq!(p.visible_count(), 24);

        p.reset();
        assert_eq!(p.visible_count(), PAGE_SIZE);
        assert!(!p.is_loading_more());
    }

    #[tokio::test(start_paused = true)]
    async fn load_more_grows_after_the_smoothing_delay() {
        let mut p = Paginator::new();
        assert!(p.load_more(30).await);
        assert_eq!(p.visible_count(), 24);

        // everything visible after the second page of a 24-item set
        assert!(p.load_more(24).await == false);
    }

    #[test]
    fn visible_slice_is_clamped() {
        let p = Paginator::with_page_size(2);
        let shops: Vec<Shop> = (0..1)
            .map(|i| {
                serde_json::from_value(serde_json::json!({
                    "id": i + 1,
                    "created_at": "2024-04-01T10:00:00+00:00",
                    "name": format!("shop-{i}"),
                }))
                .unwrap()
            })
            .collect();
        assert_eq!(p.visible_slice(&shops).len(), 1);
    }
}
