/// What the host should do after reporting a raw scroll notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollRequest {
    /// A recomputation is now pending; request one display refresh callback
    /// (e.g. `requestAnimationFrame`) and call `on_refresh` from it.
    Scheduled,
    /// A recomputation was already pending for this refresh; only the sample was replaced.
    Coalesced,
    /// The notification was dropped (not accepting input, or released).
    Ignored,
}

/// Coalesces high-frequency notifications into at most one recomputation per display refresh.
///
/// This is a single-slot pending queue: the first notification after a refresh schedules work,
/// later ones only overwrite the stored sample, and [`Self::on_refresh`] hands back the newest
/// sample exactly once. Once [`Self::release`]d, nothing is scheduled or returned again.
#[derive(Clone, Debug)]
pub struct RefreshScheduler<T> {
    pending: Option<T>,
    released: bool,
    coalesced: u64,
}

impl<T> Default for RefreshScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RefreshScheduler<T> {
    pub fn new() -> Self {
        Self {
            pending: None,
            released: false,
            coalesced: 0,
        }
    }

    pub fn notify(&mut self, sample: T) -> ScrollRequest {
        if self.released {
            return ScrollRequest::Ignored;
        }
        if self.pending.replace(sample).is_some() {
            self.coalesced = self.coalesced.saturating_add(1);
            return ScrollRequest::Coalesced;
        }
        ScrollRequest::Scheduled
    }

    /// Call from the display refresh callback. Returns the latest sample if work was pending.
    pub fn on_refresh(&mut self) -> Option<T> {
        if self.released {
            return None;
        }
        let sample = self.pending.take();
        if sample.is_some() {
            strace!(coalesced = self.coalesced, "RefreshScheduler: refresh");
        }
        sample
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drops any pending sample without running it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Releases the subscription. Pending work is discarded and all later calls are no-ops.
    pub fn release(&mut self) {
        self.pending = None;
        self.released = true;
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Total notifications merged into an already pending refresh.
    pub fn coalesced_count(&self) -> u64 {
        self.coalesced
    }
}
