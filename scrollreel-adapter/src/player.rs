use scrollreel::{
    ConfigError, FrameSequence, FrameSource, PreloadPoll, PreloadState, Preloader,
    RefreshScheduler, ScrollMapping, ScrollRequest, map_frame,
};

use crate::{
    DisplayedFrame, Header, NavigationIntent, Phase, PlayerOptions, PlayerSettings, PlayerState,
    Viewport, ViewportCategory,
};

/// A framework-neutral scroll-synchronized frame player.
///
/// One instance owns everything for one intro screen: the handle buffer, the preload pacing,
/// the pending refresh and the current frame. Nothing is shared between players.
///
/// Adapters drive it by calling:
/// - `tick(now_ms, source)` from a timer/frame loop until preloading completes
/// - `on_scroll` for every raw scroll event, and `on_refresh` from the display refresh
///   callback it requested
/// - `on_layout` on mount and whenever the viewport is resized
/// - `unmount` when the view goes away
#[derive(Debug)]
pub struct Player<H> {
    options: PlayerOptions<H>,
    mapping: ScrollMapping,
    preloader: Preloader<H>,
    scheduler: RefreshScheduler<f64>,

    phase: Phase,
    current_frame: u32,
    viewport: Viewport,
    viewport_category: ViewportCategory,
    scroll_offset: f64,
    /// Latest offset seen while loading; replayed once on `Ready`.
    loading_offset: Option<f64>,
    header_visible: bool,
    mounted: bool,
}

impl<H> Player<H> {
    /// Creates a player in the `Loading` phase.
    ///
    /// Fails on an empty sequence, a non-positive scroll distance factor, a zero batch size
    /// or a non-positive mobile breakpoint.
    pub fn new(options: PlayerOptions<H>) -> Result<Self, ConfigError> {
        let PlayerSettings {
            base_path,
            extension,
            total_frames,
            scroll_distance_factor,
            batch_size,
            batch_pause_ms,
            mobile_breakpoint,
            ..
        } = &options.settings;

        if !mobile_breakpoint.is_finite() || *mobile_breakpoint <= 0.0 {
            return Err(ConfigError::InvalidBreakpoint(*mobile_breakpoint));
        }
        let mapping = ScrollMapping::new(*total_frames, *scroll_distance_factor)?;
        let sequence = FrameSequence::new(base_path.as_str(), extension.as_str(), *total_frames)?;
        let preloader = Preloader::with_pacing(sequence, *batch_size, *batch_pause_ms)?;

        let viewport = options.initial_viewport.unwrap_or_default();
        let viewport_category = match options.initial_viewport {
            Some(vp) => ViewportCategory::from_width(vp.width, *mobile_breakpoint),
            None => ViewportCategory::Desktop,
        };

        sdebug!(
            base_path = %base_path,
            total_frames,
            scroll_distance_factor,
            "Player::new"
        );

        Ok(Self {
            options,
            mapping,
            preloader,
            scheduler: RefreshScheduler::new(),
            phase: Phase::Loading,
            current_frame: 1,
            viewport,
            viewport_category,
            scroll_offset: 0.0,
            loading_offset: None,
            header_visible: true,
            mounted: true,
        })
    }

    pub fn options(&self) -> &PlayerOptions<H> {
        &self.options
    }

    pub fn settings(&self) -> &PlayerSettings {
        &self.options.settings
    }

    pub fn mapping(&self) -> &ScrollMapping {
        &self.mapping
    }

    pub fn sequence(&self) -> &FrameSequence {
        self.preloader.sequence()
    }

    pub fn preload_state(&self) -> &PreloadState<H> {
        self.preloader.state()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == Phase::Ready
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// 1-based, always within `[1, total_frames]`.
    pub fn current_frame(&self) -> u32 {
        self.current_frame
    }

    /// Hosts use this to show the scroll hint and the title block.
    pub fn is_first_frame(&self) -> bool {
        self.current_frame == 1
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn viewport_category(&self) -> ViewportCategory {
        self.viewport_category
    }

    /// The scroll offset of the last applied recomputation.
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn mirrored(&self) -> bool {
        self.options.settings.mirrored
    }

    pub fn header(&self) -> Header {
        match self.viewport_category {
            ViewportCategory::Mobile => Header::Mobile,
            ViewportCategory::Desktop => Header::Desktop {
                visible: self.header_visible,
            },
        }
    }

    /// Returns a lightweight snapshot of the player state.
    pub fn state(&self) -> PlayerState {
        PlayerState {
            phase: self.phase,
            current_frame: self.current_frame,
            viewport_category: self.viewport_category,
        }
    }

    /// What the display surface should paint.
    pub fn displayed_frame(&self) -> DisplayedFrame<'_, H> {
        if self.phase == Phase::Loading {
            return DisplayedFrame::Loading;
        }
        let frame = self.current_frame;
        match self.preloader.state().get(frame as usize - 1) {
            Some(handle) => DisplayedFrame::Image { frame, handle },
            None => DisplayedFrame::Empty { frame },
        }
    }

    /// Whether a refresh is pending (the host already requested a refresh callback).
    pub fn is_refresh_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Advances preloading. Flips `Loading` → `Ready` once every frame has been requested.
    ///
    /// If the page was scrolled while loading, the transition leaves a refresh pending.
    ///
    /// Keep calling this after `unmount` if the remaining requests should still go out; the
    /// result is discarded and the phase no longer changes.
    pub fn tick<S>(&mut self, now_ms: u64, source: &mut S) -> PreloadPoll
    where
        S: FrameSource<Handle = H> + ?Sized,
    {
        let poll = self.preloader.poll(now_ms, source);
        if poll == PreloadPoll::Completed && self.mounted && self.phase == Phase::Loading {
            self.phase = Phase::Ready;
            if let Some(offset) = self.loading_offset.take() {
                self.scheduler.notify(offset);
            }
            sdebug!(
                now_ms,
                failed = self.preloader.state().failed_count(),
                "Player: ready"
            );
            self.notify();
        }
        poll
    }

    /// Reports a raw scroll notification.
    ///
    /// Ignored after unmount. While loading, the offset is only remembered and replayed as
    /// one pending refresh when the player becomes ready (check [`Self::is_refresh_pending`]
    /// after `tick`). Otherwise the offset is queued and, when this returns
    /// [`ScrollRequest::Scheduled`], the host must request one refresh callback and call
    /// [`Self::on_refresh`] from it.
    pub fn on_scroll(&mut self, scroll_offset: f64) -> ScrollRequest {
        if !self.mounted {
            return ScrollRequest::Ignored;
        }
        if self.phase == Phase::Loading {
            self.loading_offset = Some(scroll_offset);
            return ScrollRequest::Ignored;
        }
        self.scheduler.notify(scroll_offset)
    }

    /// Runs the pending recomputation, if any, with the newest scroll offset.
    ///
    /// Returns `true` when the frame or the header visibility changed.
    pub fn on_refresh(&mut self) -> bool {
        if !self.mounted || self.phase != Phase::Ready {
            return false;
        }
        let Some(scroll_offset) = self.scheduler.on_refresh() else {
            return false;
        };

        self.scroll_offset = scroll_offset;
        let frame = map_frame(scroll_offset, self.viewport.height, &self.mapping);
        let header_visible = match self.options.settings.header_hide_offset {
            Some(limit) => scroll_offset <= limit,
            None => true,
        };
        strace!(scroll_offset, frame, "Player::on_refresh");

        let changed = frame != self.current_frame || header_visible != self.header_visible;
        self.current_frame = frame;
        self.header_visible = header_visible;
        if changed {
            self.notify();
        }
        changed
    }

    /// Reports a layout change.
    ///
    /// The viewport category is recomputed every time, so rotating a device switches header
    /// variants. When the height changes on a ready player, a recomputation is queued with
    /// the last scroll offset; the return value has the same meaning as for `on_scroll`.
    pub fn on_layout(&mut self, viewport: Viewport) -> ScrollRequest {
        if !self.mounted {
            return ScrollRequest::Ignored;
        }
        let height_changed = viewport.height != self.viewport.height;
        let category =
            ViewportCategory::from_width(viewport.width, self.options.settings.mobile_breakpoint);
        self.viewport = viewport;

        if category != self.viewport_category {
            sdebug!(?category, width = viewport.width, "Player: viewport category changed");
            self.viewport_category = category;
            self.notify();
        }

        if !height_changed || self.phase != Phase::Ready {
            return ScrollRequest::Ignored;
        }
        // A pending sample is newer than the applied offset and will see the new height.
        if self.scheduler.is_pending() {
            return ScrollRequest::Coalesced;
        }
        self.scheduler.notify(self.scroll_offset)
    }

    /// Reports that a frame (1-based) failed to load after its handle was handed out.
    ///
    /// The slot becomes empty and renders as [`DisplayedFrame::Empty`]. Returns `true` when a
    /// handle was dropped.
    pub fn report_load_failure(&mut self, frame: u32) -> bool {
        if !self.mounted {
            return false;
        }
        if !self.sequence().contains(frame) {
            swarn!(
                frame,
                total_frames = self.mapping.total_frames(),
                "Player: load failure reported for an out-of-range frame"
            );
            return false;
        }
        let dropped = self.preloader.mark_failed(frame as usize - 1);
        if dropped && self.phase == Phase::Ready && frame == self.current_frame {
            self.notify();
        }
        dropped
    }

    /// Forwards a navigation intent to the host. Returns `true` if a callback received it.
    pub fn navigate(&self, intent: NavigationIntent) -> bool {
        if !self.mounted {
            return false;
        }
        let Some(cb) = &self.options.on_navigate else {
            return false;
        };
        sdebug!(?intent, "Player::navigate");
        cb(intent);
        true
    }

    /// Releases the scroll subscription.
    ///
    /// A pending refresh is dropped, and scroll, layout and refresh calls become no-ops. The
    /// preloader may still be driven through `tick`, without any further state change.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.loading_offset = None;
        self.scheduler.release();
        sdebug!(
            issued = self.preloader.issued(),
            complete = self.preloader.is_complete(),
            "Player::unmount"
        );
    }

    fn notify(&self) {
        if !self.mounted {
            return;
        }
        if let Some(cb) = &self.options.on_change {
            cb(self);
        }
    }
}
