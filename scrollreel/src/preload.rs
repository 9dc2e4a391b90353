use crate::{ConfigError, FrameSequence};

/// One load request handed to a [`FrameSource`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameRequest<'a> {
    /// 1-based frame number.
    pub frame: u32,
    /// 0-based slot in the handle buffer.
    pub index: usize,
    pub path: &'a str,
}

/// Starts loading frame images on behalf of a [`Preloader`].
///
/// `request` is fire-and-forget: it should return a handle immediately (e.g. an image element
/// whose decode is still in flight). An `Err` leaves the slot empty; it is logged and never
/// retried. Failures discovered later can be reported with [`Preloader::mark_failed`].
///
/// Any `FnMut(&FrameRequest) -> Result<H, E>` closure is a frame source.
pub trait FrameSource {
    type Handle;
    type Error: core::fmt::Debug;

    fn request(&mut self, request: &FrameRequest<'_>) -> Result<Self::Handle, Self::Error>;
}

impl<F, H, E> FrameSource for F
where
    F: FnMut(&FrameRequest<'_>) -> Result<H, E>,
    E: core::fmt::Debug,
{
    type Handle = H;
    type Error = E;

    fn request(&mut self, request: &FrameRequest<'_>) -> Result<H, E> {
        self(request)
    }
}

/// Handles recorded so far, in frame order.
///
/// `None` marks a frame whose load failed; it renders as an empty frame.
#[derive(Clone, Debug)]
pub struct PreloadState<H> {
    handles: Vec<Option<H>>,
    complete: bool,
}

impl<H> PreloadState<H> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            handles: Vec::with_capacity(capacity),
            complete: false,
        }
    }

    pub fn handles(&self) -> &[Option<H>] {
        &self.handles
    }

    /// Returns the handle at a 0-based index, if it was requested and did not fail.
    pub fn get(&self, index: usize) -> Option<&H> {
        self.handles.get(index).and_then(Option::as_ref)
    }

    /// Number of slots recorded (successful or not).
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn failed_count(&self) -> usize {
        self.handles.iter().filter(|h| h.is_none()).count()
    }
}

/// Result of a [`Preloader::poll`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreloadPoll {
    /// A batch is paused; poll again once the host clock reaches `resume_at_ms`.
    Waiting { resume_at_ms: u64 },
    /// Every frame has been requested. Returned exactly once.
    Completed,
    /// Nothing left to do.
    Idle,
}

/// Requests a [`FrameSequence`] in small batches with a pause after each full batch.
///
/// The preloader does not sleep or spawn anything. The host calls [`Self::poll`] from its
/// timer/frame loop with a monotonic `now_ms`; the pause is a deadline, so the scroll path is
/// never blocked by loading.
#[derive(Clone, Debug)]
pub struct Preloader<H> {
    sequence: FrameSequence,
    batch_size: usize,
    batch_pause_ms: u64,
    next_index: usize,
    resume_at_ms: Option<u64>,
    state: PreloadState<H>,
}

impl<H> Preloader<H> {
    pub const DEFAULT_BATCH_SIZE: usize = 10;
    pub const DEFAULT_BATCH_PAUSE_MS: u64 = 100;

    /// Creates a preloader with the default pacing (10 frames, then 100 ms).
    pub fn new(sequence: FrameSequence) -> Self {
        let state = PreloadState::with_capacity(sequence.len());
        Self {
            sequence,
            batch_size: Self::DEFAULT_BATCH_SIZE,
            batch_pause_ms: Self::DEFAULT_BATCH_PAUSE_MS,
            next_index: 0,
            resume_at_ms: None,
            state,
        }
    }

    pub fn with_pacing(
        sequence: FrameSequence,
        batch_size: usize,
        batch_pause_ms: u64,
    ) -> Result<Self, ConfigError> {
        if batch_size == 0 {
            return Err(ConfigError::EmptyBatch);
        }
        let mut p = Self::new(sequence);
        p.batch_size = batch_size;
        p.batch_pause_ms = batch_pause_ms;
        Ok(p)
    }

    pub fn sequence(&self) -> &FrameSequence {
        &self.sequence
    }

    pub fn state(&self) -> &PreloadState<H> {
        &self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state.complete
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn batch_pause_ms(&self) -> u64 {
        self.batch_pause_ms
    }

    /// Number of frames requested so far.
    pub fn issued(&self) -> usize {
        self.next_index
    }

    /// The deadline of the current pause, if one is in progress.
    pub fn resume_at_ms(&self) -> Option<u64> {
        self.resume_at_ms
    }

    /// Advances the preload sequence.
    ///
    /// Issues at most one batch per call. A full batch is followed by a pause of
    /// `batch_pause_ms`, including the last one; a trailing partial batch completes
    /// immediately.
    pub fn poll<S>(&mut self, now_ms: u64, source: &mut S) -> PreloadPoll
    where
        S: FrameSource<Handle = H> + ?Sized,
    {
        if self.state.complete {
            return PreloadPoll::Idle;
        }

        if let Some(resume_at_ms) = self.resume_at_ms {
            if now_ms < resume_at_ms {
                return PreloadPoll::Waiting { resume_at_ms };
            }
            self.resume_at_ms = None;
        }

        let total = self.sequence.len();
        if self.next_index >= total {
            return self.finish();
        }

        let start = self.next_index;
        let end = start.saturating_add(self.batch_size).min(total);
        for index in start..end {
            self.issue(index, source);
        }
        self.next_index = end;
        strace!(start, end, total, now_ms, "Preloader: batch issued");

        if end - start == self.batch_size {
            let resume_at_ms = now_ms.saturating_add(self.batch_pause_ms);
            self.resume_at_ms = Some(resume_at_ms);
            return PreloadPoll::Waiting { resume_at_ms };
        }

        self.finish()
    }

    /// Marks an already requested frame (0-based) as failed, emptying its slot.
    ///
    /// Returns `true` when a handle was dropped.
    pub fn mark_failed(&mut self, index: usize) -> bool {
        let Some(slot) = self.state.handles.get_mut(index) else {
            swarn!(
                index,
                issued = self.next_index,
                "Preloader: failure reported for a frame that was never requested"
            );
            return false;
        };
        slot.take().is_some()
    }

    /// Consumes the preloader, returning the recorded handles.
    pub fn into_state(self) -> PreloadState<H> {
        self.state
    }

    fn issue<S>(&mut self, index: usize, source: &mut S)
    where
        S: FrameSource<Handle = H> + ?Sized,
    {
        let frame = index as u32 + 1;
        let handle = match self.sequence.path_for_index(index) {
            Some(path) => {
                let request = FrameRequest {
                    frame,
                    index,
                    path: &path,
                };
                match source.request(&request) {
                    Ok(handle) => Some(handle),
                    Err(_err) => {
                        swarn!(frame, path = %path, error = ?_err, "Preloader: frame load failed");
                        None
                    }
                }
            }
            None => None,
        };
        self.state.handles.push(handle);
    }

    fn finish(&mut self) -> PreloadPoll {
        debug_assert_eq!(
            self.state.handles.len(),
            self.sequence.len(),
            "Preloader: completed with missing slots"
        );
        self.state.complete = true;
        sdebug!(
            frames = self.state.handles.len(),
            failed = self.state.failed_count(),
            "Preloader: complete"
        );
        PreloadPoll::Completed
    }
}
