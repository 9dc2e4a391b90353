//! A headless engine for scroll-synchronized frame-sequence animation.
//!
//! For the framework-neutral player controller (lifecycle, viewport category, header chrome),
//! see the `scrollreel-adapter` crate.
//!
//! This crate holds the pieces with actual logic in them:
//! - [`map_frame`]: scroll offset + viewport height → 1-based frame, with a quadratic ease-in
//!   over the back half of the scroll range
//! - [`Preloader`]: requests a [`FrameSequence`] in paced batches, driven by the host clock
//! - [`RefreshScheduler`]: coalesces scroll notifications to one recomputation per refresh
//!
//! It is UI-agnostic. A host is expected to provide:
//! - scroll offset and viewport geometry
//! - a [`FrameSource`] that starts loading an image and returns a handle
//! - a monotonic clock (`now_ms`) and display refresh callbacks
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod error;
mod mapping;
mod preload;
mod scheduler;
mod sequence;

#[cfg(test)]
mod tests;

pub use error::ConfigError;
pub use mapping::{ScrollMapping, ease_back_half, map_frame, scroll_fraction};
pub use preload::{FrameRequest, FrameSource, PreloadPoll, PreloadState, Preloader};
pub use scheduler::{RefreshScheduler, ScrollRequest};
pub use sequence::FrameSequence;
