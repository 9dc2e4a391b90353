use crate::ConfigError;

/// An ordered, immutable sequence of pre-rendered frame images.
///
/// Frames are numbered `1..=total_frames` in the public API and stored `0..total_frames`
/// internally. Resource paths are derived, never stored: `{base_path}/{frame:04}.{extension}`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawFrameSequence"))]
pub struct FrameSequence {
    base_path: String,
    extension: String,
    total_frames: u32,
}

impl FrameSequence {
    pub fn new(
        base_path: impl Into<String>,
        extension: impl Into<String>,
        total_frames: u32,
    ) -> Result<Self, ConfigError> {
        if total_frames == 0 {
            return Err(ConfigError::NoFrames);
        }
        let mut base_path = base_path.into();
        while base_path.len() > 1 && base_path.ends_with('/') {
            base_path.pop();
        }
        let extension = extension.into();
        let extension = extension.trim_start_matches('.').into();
        Ok(Self {
            base_path,
            extension,
            total_frames,
        })
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn total_frames(&self) -> u32 {
        self.total_frames
    }

    /// Number of frames as a length (for indexing handle buffers).
    pub fn len(&self) -> usize {
        self.total_frames as usize
    }

    pub fn is_empty(&self) -> bool {
        self.total_frames == 0
    }

    pub fn contains(&self, frame: u32) -> bool {
        (1..=self.total_frames).contains(&frame)
    }

    /// Returns the resource path of a 1-based frame, or `None` when out of range.
    pub fn path(&self, frame: u32) -> Option<String> {
        if !self.contains(frame) {
            return None;
        }
        Some(format!(
            "{}/{:04}.{}",
            self.base_path, frame, self.extension
        ))
    }

    /// Same as [`Self::path`], addressed by 0-based index.
    pub fn path_for_index(&self, index: usize) -> Option<String> {
        let frame = u32::try_from(index).ok()?.checked_add(1)?;
        self.path(frame)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawFrameSequence {
    base_path: String,
    extension: String,
    total_frames: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawFrameSequence> for FrameSequence {
    type Error = ConfigError;

    fn try_from(raw: RawFrameSequence) -> Result<Self, Self::Error> {
        Self::new(raw.base_path, raw.extension, raw.total_frames)
    }
}
