//! Player controller for the `scrollreel` crate.
//!
//! The `scrollreel` crate is UI-agnostic and holds the mapping, preloading and scheduling
//! logic. This crate wires them into one [`Player`] per intro screen:
//!
//! - Lifecycle (`Loading` → `Ready`) gated on preload completion
//! - Refresh-gated scroll → frame recomputation
//! - Viewport category (mobile/desktop), header chrome and navigation intents
//!
//! This crate is intentionally framework-agnostic (no DOM/wasm bindings).
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod options;
mod player;
mod types;


pub use options::{OnChangeCallback, OnNavigateCallback, PlayerOptions, PlayerSettings};
pub use player::Player;
pub use types::{
    DisplayedFrame, Header, NavigationIntent, Phase, PlayerState, Viewport, ViewportCategory,
};

pub use scrollreel::{
    ConfigError, FrameRequest, FrameSequence, FrameSource, PreloadPoll, PreloadState,
    ScrollMapping, ScrollRequest,
};
