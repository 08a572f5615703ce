//! Scroll window over the rendered timeline.

use std::time::{Duration, Instant};

use pilot_core::RecordId;

/// Rendered timeline text plus the line index of every record card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub lines: Vec<String>,
    pub anchors: Vec<(String, usize)>,
}

impl Page {
    pub fn anchor_line(&self, anchor: &str) -> Option<usize> {
        self.anchors
            .iter()
            .find(|(name, _)| name == anchor)
            .map(|(_, line)| *line)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    height: usize,
    offset: usize,
}

impl Viewport {
    pub fn new(height: usize) -> Self {
        Self {
            height: height.max(1),
            offset: 0,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Centers the anchored line. Returns `false` and leaves the offset alone
    /// when the anchor is not on the page.
    pub fn focus_anchor(&mut self, page: &Page, anchor: &str) -> bool {
        let Some(line) = page.anchor_line(anchor) else {
            return false;
        };
        self.offset = line.saturating_sub(self.height / 2);
        self.clamp(page.lines.len());
        true
    }

    pub fn scroll(&mut self, delta: isize, total_lines: usize) {
        self.offset = self.offset.saturating_add_signed(delta);
        self.clamp(total_lines);
    }

    pub fn visible<'a>(&self, page: &'a Page) -> &'a [String] {
        let start = self.offset.min(page.lines.len());
        let end = (start + self.height).min(page.lines.len());
        &page.lines[start..end]
    }

    fn clamp(&mut self, total_lines: usize) {
        let max_offset = total_lines.saturating_sub(self.height);
        self.offset = self.offset.min(max_offset);
    }
}

/// A focus request waiting for the timeline to settle. A newer request
/// replaces an older one.
#[derive(Debug, Clone)]
pub struct FocusSchedule {
    delay: Duration,
    pending: Option<(Instant, RecordId)>,
}

impl FocusSchedule {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn schedule(&mut self, record_id: RecordId, now: Instant) {
        self.pending = Some((now + self.delay, record_id));
    }

    /// Time until the pending focus is due, capped at `max`.
    pub fn wait_budget(&self, now: Instant, max: Duration) -> Duration {
        match &self.pending {
            Some((deadline, _)) => deadline.saturating_duration_since(now).min(max),
            None => max,
        }
    }

    pub fn take_due(&mut self, now: Instant) -> Option<RecordId> {
        match self.pending.take() {
            Some((deadline, record_id)) if deadline <= now => Some(record_id),
            pending => {
                self.pending = pending;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(len: usize, anchors: &[(&str, usize)]) -> Page {
        Page {
            lines: (0..len).map(|i| format!("line {i}")).collect(),
            anchors: anchors
                .iter()
                .map(|(name, line)| (name.to_string(), *line))
                .collect(),
        }
    }

    #[test]
    fn focus_centers_the_anchor() {
        let page = page(100, &[("interview-card-7", 50)]);
        let mut viewport = Viewport::new(10);
        assert!(viewport.focus_anchor(&page, "interview-card-7"));
        assert_eq!(viewport.offset(), 45);
        assert_eq!(viewport.visible(&page)[5], "line 50");
    }

    #[test]
    fn focus_near_the_edges_is_clamped() {
        let page = page(30, &[("top", 1), ("bottom", 29)]);
        let mut viewport = Viewport::new(10);
        viewport.focus_anchor(&page, "top");
        assert_eq!(viewport.offset(), 0);
        viewport.focus_anchor(&page, "bottom");
        assert_eq!(viewport.offset(), 20);
    }

    #[test]
    fn missing_anchor_is_a_no_op() {
        let page = page(30, &[("interview-card-1", 12)]);
        let mut viewport = Viewport::new(10);
        viewport.scroll(3, page.lines.len());
        assert!(!viewport.focus_anchor(&page, "interview-card-2"));
        assert_eq!(viewport.offset(), 3);
    }

    #[test]
    fn scroll_stays_in_bounds() {
        let mut viewport = Viewport::new(10);
        viewport.scroll(-5, 40);
        assert_eq!(viewport.offset(), 0);
        viewport.scroll(100, 40);
        assert_eq!(viewport.offset(), 30);
        viewport.scroll(1, 4);
        assert_eq!(viewport.offset(), 0);
    }

    #[test]
    fn focus_fires_only_after_the_settle_delay() {
        let start = Instant::now();
        let mut schedule = FocusSchedule::new(Duration::from_millis(100));
        let poll = Duration::from_millis(50);
        assert_eq!(schedule.wait_budget(start, poll), poll);

        schedule.schedule(RecordId::from(7u64), start);
        assert_eq!(
            schedule.wait_budget(start + Duration::from_millis(80), poll),
            Duration::from_millis(20)
        );
        assert_eq!(schedule.take_due(start + Duration::from_millis(99)), None);
        assert_eq!(
            schedule.take_due(start + Duration::from_millis(100)),
            Some(RecordId::from(7u64))
        );
        assert_eq!(schedule.take_due(start + Duration::from_secs(1)), None);
    }

    #[test]
    fn newer_focus_replaces_pending_one() {
        let start = Instant::now();
        let mut schedule = FocusSchedule::new(Duration::from_millis(100));
        schedule.schedule(RecordId::from(1u64), start);
        schedule.schedule(RecordId::from(2u64), start + Duration::from_millis(60));
        assert_eq!(schedule.take_due(start + Duration::from_millis(120)), None);
        assert_eq!(
            schedule.take_due(start + Duration::from_millis(160)),
            Some(RecordId::from(2u64))
        );
    }
}
