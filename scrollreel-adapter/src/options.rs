use std::sync::Arc;

use crate::{NavigationIntent, Player, Viewport};

/// A callback fired after an observable player state change (phase, frame, viewport category
/// or header visibility).
pub type OnChangeCallback<H> = Arc<dyn Fn(&Player<H>) + Send + Sync>;

/// A callback receiving navigation requests from the player's chrome.
pub type OnNavigateCallback = Arc<dyn Fn(NavigationIntent) + Send + Sync>;

/// The data half of [`PlayerOptions`]: everything that describes one intro screen.
///
/// With `feature = "serde"`, this can be loaded from a host config file. Missing fields fall
/// back to the same defaults as [`PlayerSettings::new`]; validation happens in
/// [`Player::new`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerSettings {
    pub base_path: String,
    #[cfg_attr(feature = "serde", serde(default = "defaults::extension"))]
    pub extension: String,
    pub total_frames: u32,
    /// Multiple of the viewport height that plays the whole sequence.
    pub scroll_distance_factor: f64,
    /// Flip the display surface horizontally.
    #[cfg_attr(feature = "serde", serde(default))]
    pub mirrored: bool,
    #[cfg_attr(feature = "serde", serde(default = "defaults::batch_size"))]
    pub batch_size: usize,
    #[cfg_attr(feature = "serde", serde(default = "defaults::batch_pause_ms"))]
    pub batch_pause_ms: u64,
    /// Widths at or below this are mobile.
    #[cfg_attr(feature = "serde", serde(default = "defaults::mobile_breakpoint"))]
    pub mobile_breakpoint: f64,
    /// Scroll offset past which the desktop header hides. `None` keeps it visible.
    #[cfg_attr(feature = "serde", serde(default))]
    pub header_hide_offset: Option<f64>,
}

mod defaults {
    pub(super) fn extension() -> String {
        String::from("webp")
    }

    pub(super) fn batch_size() -> usize {
        10
    }

    pub(super) fn batch_pause_ms() -> u64 {
        100
    }

    pub(super) fn mobile_breakpoint() -> f64 {
        768.0
    }
}

impl PlayerSettings {
    pub fn new(base_path: impl Into<String>, total_frames: u32, scroll_distance_factor: f64) -> Self {
        Self {
            base_path: base_path.into(),
            extension: defaults::extension(),
            total_frames,
            scroll_distance_factor,
            mirrored: false,
            batch_size: defaults::batch_size(),
            batch_pause_ms: defaults::batch_pause_ms(),
            mobile_breakpoint: defaults::mobile_breakpoint(),
            header_hide_offset: None,
        }
    }
}

/// Configuration for [`crate::Player`].
///
/// Cheap to clone: callbacks are stored in `Arc`s.
pub struct PlayerOptions<H> {
    pub settings: PlayerSettings,
    /// Viewport known at construction time, if any. Until the first `on_layout`, a player
    /// without one reports [`crate::ViewportCategory::Desktop`] and maps against a zero height.
    pub initial_viewport: Option<Viewport>,
    pub on_change: Option<OnChangeCallback<H>>,
    pub on_navigate: Option<OnNavigateCallback>,
}

impl<H> Clone for PlayerOptions<H> {
    fn clone(&self) -> Self {
        Self {
            settings: self.settings.clone(),
            initial_viewport: self.initial_viewport,
            on_change: self.on_change.clone(),
            on_navigate: self.on_navigate.clone(),
        }
    }
}

impl<H> PlayerOptions<H> {
    /// Creates options for a sequence at `base_path` with `total_frames` frames, played over
    /// `scroll_distance_factor` viewport heights.
    pub fn new(base_path: impl Into<String>, total_frames: u32, scroll_distance_factor: f64) -> Self {
        Self::from_settings(PlayerSettings::new(base_path, total_frames, scroll_distance_factor))
    }

    pub fn from_settings(settings: PlayerSettings) -> Self {
        Self {
            settings,
            initial_viewport: None,
            on_change: None,
            on_navigate: None,
        }
    }

    /// File extension of the frame images (without the dot).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.settings.extension = extension.into();
        self
    }

    pub fn with_mirrored(mut self, mirrored: bool) -> Self {
        self.settings.mirrored = mirrored;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.settings.batch_size = batch_size;
        self
    }

    pub fn with_batch_pause_ms(mut self, batch_pause_ms: u64) -> Self {
        self.settings.batch_pause_ms = batch_pause_ms;
        self
    }

    pub fn with_mobile_breakpoint(mut self, mobile_breakpoint: f64) -> Self {
        self.settings.mobile_breakpoint = mobile_breakpoint;
        self
    }

    pub fn with_header_hide_offset(mut self, header_hide_offset: Option<f64>) -> Self {
        self.settings.header_hide_offset = header_hide_offset;
        self
    }

    pub fn with_initial_viewport(mut self, initial_viewport: Option<Viewport>) -> Self {
        self.initial_viewport = initial_viewport;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&Player<H>) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_navigate(
        mut self,
        on_navigate: Option<impl Fn(NavigationIntent) + Send + Sync + 'static>,
    ) -> Self {
        self.on_navigate = on_navigate.map(|f| Arc::new(f) as _);
        self
    }
}

impl<H> core::fmt::Debug for PlayerOptions<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PlayerOptions")
            .field("settings", &self.settings)
            .field("initial_viewport", &self.initial_viewport)
            .field("on_change", &self.on_change.is_some())
            .field("on_navigate", &self.on_navigate.is_some())
            .finish()
    }
}
