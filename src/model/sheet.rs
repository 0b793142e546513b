use image::DynamicImage;
use serde::{Deserialize, Serialize};

/// Pixel rectangle inside a sheet, `[left, right) x [top, bottom)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameRect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl FrameRect {
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

#[derive(Clone, Debug)]
pub struct Frame {
    /// 0-based position in the strip.
    pub index: usize,
    pub rect: FrameRect,
    pub image: DynamicImage,
}

/// What to do with the `width % frame_count` pixels left over at the right edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemainderPolicy {
    /// Every frame is `width / frame_count` wide; leftover columns are dropped.
    #[default]
    Truncate,
    /// The first `width % frame_count` frames are one pixel wider.
    Distribute,
}

impl std::str::FromStr for RemainderPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "truncate" => Ok(RemainderPolicy::Truncate),
            "distribute" => Ok(RemainderPolicy::Distribute),
            other => Err(format!("unknown remainder policy: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_dimensions() {
        let rect = FrameRect {
            left: 140,
            top: 0,
            right: 144,
            bottom: 160,
        };
        assert_eq!(rect.width(), 4);
        assert_eq!(rect.height(), 160);
    }

    #[test]
    fn test_remainder_policy_parse() {
        assert_eq!("truncate".parse(), Ok(RemainderPolicy::Truncate));
        assert_eq!("Distribute".parse(), Ok(RemainderPolicy::Distribute));
        assert!("spread".parse::<RemainderPolicy>().is_err());
        assert_eq!(RemainderPolicy::default(), RemainderPolicy::Truncate);
    }
}
