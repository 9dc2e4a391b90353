/// Lifecycle of a player. `Loading` → `Ready` happens once and is never undone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    #[default]
    Loading,
    Ready,
}

/// Coarse width classification that decides which header chrome the host renders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ViewportCategory {
    Mobile,
    #[default]
    Desktop,
}

impl ViewportCategory {
    /// Widths at or below `breakpoint` are mobile.
    pub fn from_width(width: f64, breakpoint: f64) -> Self {
        if width <= breakpoint {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }

    pub fn is_mobile(self) -> bool {
        self == Self::Mobile
    }
}

/// Viewport geometry in layout units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Which header variant to render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Header {
    /// Compact bar with back/login icon buttons. Always shown.
    Mobile,
    /// Full-width bar; hidden once the page is scrolled past the configured offset.
    Desktop { visible: bool },
}

/// A navigation request raised by the player's chrome.
///
/// The player never routes by itself; the host maps these to its own routes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NavigationIntent {
    /// The header "back" control.
    BackToSelection,
    /// The header login control, or the call-to-action below the animation.
    Authenticate,
}

/// What the display surface should paint right now.
#[derive(Debug, PartialEq, Eq)]
pub enum DisplayedFrame<'a, H> {
    /// Frames are still being requested; show the loading placeholder.
    Loading,
    /// The current frame failed to load; paint nothing.
    Empty { frame: u32 },
    Image { frame: u32, handle: &'a H },
}

impl<H> Clone for DisplayedFrame<'_, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H> Copy for DisplayedFrame<'_, H> {}

impl<'a, H> DisplayedFrame<'a, H> {
    pub fn handle(&self) -> Option<&'a H> {
        match *self {
            Self::Image { handle, .. } => Some(handle),
            Self::Loading | Self::Empty { .. } => None,
        }
    }

    pub fn frame(&self) -> Option<u32> {
        match *self {
            Self::Loading => None,
            Self::Empty { frame } | Self::Image { frame, .. } => Some(frame),
        }
    }
}

/// A lightweight, serializable snapshot of a player.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub phase: Phase,
    /// Always within `[1, total_frames]`.
    pub current_frame: u32,
    pub viewport_category: ViewportCategory,
}
