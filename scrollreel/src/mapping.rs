use crate::ConfigError;

/// Scroll → frame configuration.
///
/// `scroll_distance_factor` is a multiple of the viewport height: scrolling that far plays the
/// whole sequence, and scrolling further has no effect.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawScrollMapping"))]
pub struct ScrollMapping {
    total_frames: u32,
    scroll_distance_factor: f64,
}

impl ScrollMapping {
    pub fn new(total_frames: u32, scroll_distance_factor: f64) -> Result<Self, ConfigError> {
        if total_frames == 0 {
            return Err(ConfigError::NoFrames);
        }
        if !scroll_distance_factor.is_finite() || scroll_distance_factor <= 0.0 {
            return Err(ConfigError::InvalidScrollDistance(scroll_distance_factor));
        }
        Ok(Self {
            total_frames,
            scroll_distance_factor,
        })
    }

    pub fn total_frames(&self) -> u32 {
        self.total_frames
    }

    pub fn scroll_distance_factor(&self) -> f64 {
        self.scroll_distance_factor
    }

    /// The scroll distance that maps to the full animation for a given viewport height.
    pub fn total_scroll_distance(&self, viewport_height: f64) -> f64 {
        viewport_height * self.scroll_distance_factor
    }

    /// Shorthand for [`map_frame`].
    pub fn frame_for(&self, scroll_offset: f64, viewport_height: f64) -> u32 {
        map_frame(scroll_offset, viewport_height, self)
    }
}

/// Linear progress through the scroll range, clamped to `[0, 1]`.
///
/// Returns `0.0` for non-positive (or NaN) offsets and degenerate scroll distances.
pub fn scroll_fraction(scroll_offset: f64, total_scroll_distance: f64) -> f64 {
    if scroll_offset.is_nan() || scroll_offset <= 0.0 {
        return 0.0;
    }
    if !total_scroll_distance.is_finite() || total_scroll_distance <= 0.0 {
        return 0.0;
    }
    scroll_offset.min(total_scroll_distance) / total_scroll_distance
}

/// Quadratic ease-in over the back half of the range.
///
/// The first half is linear; past `0.5` the fraction becomes `0.5 + ((f - 0.5) * 2)^2 / 2`.
/// Both branches meet at `0.5`, and `1.0` maps to `1.0`.
pub fn ease_back_half(fraction: f64) -> f64 {
    if fraction > 0.5 {
        let t = (fraction - 0.5) * 2.0;
        0.5 + (t * t) / 2.0
    } else {
        fraction
    }
}

/// Maps a scroll offset to a 1-based frame in `[1, total_frames]`.
///
/// Pure: identical inputs always give the same frame. A zero offset is special-cased to frame
/// `1`, and so is a non-positive viewport height (there is no scroll range to map).
pub fn map_frame(scroll_offset: f64, viewport_height: f64, mapping: &ScrollMapping) -> u32 {
    if scroll_offset.is_nan() || scroll_offset <= 0.0 {
        return 1;
    }
    let distance = mapping.total_scroll_distance(viewport_height);
    if !distance.is_finite() || distance <= 0.0 {
        return 1;
    }

    let fraction = ease_back_half(scroll_fraction(scroll_offset, distance));
    let total = mapping.total_frames as f64;
    // `ceil`, not round: a fraction exactly on a frame boundary stays on that frame.
    (fraction * total).ceil().clamp(1.0, total) as u32
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawScrollMapping {
    total_frames: u32,
    scroll_distance_factor: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawScrollMapping> for ScrollMapping {
    type Error = ConfigError;

    fn try_from(raw: RawScrollMapping) -> Result<Self, Self::Error> {
        Self::new(raw.total_frames, raw.scroll_distance_factor)
    }
}
