// Uniform horizontal sprite-strip slicing

use image::DynamicImage;
use tracing::warn;

use crate::model::sheet::{Frame, FrameRect, RemainderPolicy};

use super::error::SheetError;

pub fn decode_sheet(filename: &str, bytes: &[u8]) -> Result<DynamicImage, SheetError> {
    image::load_from_memory(bytes).map_err(|source| SheetError::Decode {
        filename: filename.to_string(),
        source,
    })
}

/// Frame geometry for a `width x height` strip cut into `frame_count` columns,
/// in strip order. `frame_count` must be non-zero.
pub fn frame_rects(
    width: u32,
    height: u32,
    frame_count: u32,
    policy: RemainderPolicy,
) -> Vec<FrameRect> {
    assert!(frame_count > 0, "frame_count must be at least 1");

    let base = width / frame_count;
    let remainder = width % frame_count;

    let mut rects = Vec::with_capacity(frame_count as usize);
    let mut left = 0;
    for i in 0..frame_count {
        let w = match policy {
            RemainderPolicy::Truncate => base,
            RemainderPolicy::Distribute if i < remainder => base + 1,
            RemainderPolicy::Distribute => base,
        };
        rects.push(FrameRect {
            left,
            top: 0,
            right: left + w,
            bottom: height,
        });
        left += w;
    }
    rects
}

pub fn slice(sheet: &DynamicImage, frame_count: u32, policy: RemainderPolicy) -> Vec<Frame> {
    assert!(frame_count > 0, "frame_count must be at least 1");
    let (width, height) = (sheet.width(), sheet.height());

    if width < frame_count {
        warn!(width, frame_count, "sheet narrower than frame count, frames will be empty");
    } else if policy == RemainderPolicy::Truncate && width % frame_count != 0 {
        warn!(
            width,
            frame_count,
            dropped = width % frame_count,
            "sheet width not divisible by frame count, dropping right-edge columns"
        );
    }

    frame_rects(width, height, frame_count, policy)
        .into_iter()
        .enumerate()
        .map(|(index, rect)| Frame {
            index,
            rect,
            image: sheet.crop_imm(rect.left, rect.top, rect.width(), rect.height()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::io::Cursor;

    fn striped_sheet(width: u32, height: u32, frame_width: u32) -> DynamicImage {
        let mut img = RgbaImage::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let band = (x / frame_width) as u8;
                img.put_pixel(x, y, Rgba([band, 255 - band, 0, 255]));
            }
        }
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn test_dragon_death_geometry() {
        let rects = frame_rects(160, 160, 36, RemainderPolicy::Truncate);
        assert_eq!(rects.len(), 36);
        assert!(rects.iter().all(|r| r.width() == 4 && r.height() == 160));
        assert_eq!(rects[35].left, 140);
        assert_eq!(rects[35].right, 144);
    }

    #[test]
    fn test_knight_attack_geometry() {
        let rects = frame_rects(576, 96, 6, RemainderPolicy::Truncate);
        assert_eq!(rects.len(), 6);
        for (i, r) in rects.iter().enumerate() {
            assert_eq!(r.left, i as u32 * 96);
            assert_eq!(r.width(), 96);
            assert_eq!((r.top, r.bottom), (0, 96));
        }
    }

    #[test]
    fn test_spans_follow_floor_division() {
        for (width, count) in [(74u32, 4u32), (100, 7), (9, 9), (1000, 3)] {
            let fw = width / count;
            let rects = frame_rects(width, 10, count, RemainderPolicy::Truncate);
            assert_eq!(rects.len(), count as usize);
            for (i, r) in rects.iter().enumerate() {
                assert_eq!(r.left, i as u32 * fw);
                assert_eq!(r.right, (i as u32 + 1) * fw);
            }
        }
    }

    #[test]
    fn test_single_frame_covers_sheet() {
        let rects = frame_rects(74, 74, 1, RemainderPolicy::Truncate);
        assert_eq!(
            rects,
            vec![FrameRect {
                left: 0,
                top: 0,
                right: 74,
                bottom: 74
            }]
        );
    }

    #[test]
    fn test_distribute_remainder() {
        // 10 = 3 + 3 + 2 + 2
        let rects = frame_rects(10, 5, 4, RemainderPolicy::Distribute);
        let widths: Vec<u32> = rects.iter().map(|r| r.width()).collect();
        assert_eq!(widths, vec![3, 3, 2, 2]);
        assert_eq!(rects.last().unwrap().right, 10);

        let truncated = frame_rects(10, 5, 4, RemainderPolicy::Truncate);
        assert_eq!(truncated.last().unwrap().right, 8);
    }

    #[test]
    fn test_narrow_sheet_gives_empty_frames() {
        let rects = frame_rects(3, 8, 5, RemainderPolicy::Truncate);
        assert_eq!(rects.len(), 5);
        assert!(rects.iter().all(|r| r.width() == 0));
    }

    #[test]
    #[should_panic]
    fn test_zero_frame_count_panics() {
        frame_rects(10, 10, 0, RemainderPolicy::Truncate);
    }

    #[test]
    #[should_panic(expected = "frame_count must be at least 1")]
    fn test_slice_zero_frame_count_panics() {
        slice(&striped_sheet(10, 2, 5), 0, RemainderPolicy::Truncate);
    }

    #[test]
    fn test_slice_crops_pixels_in_order() {
        let sheet = striped_sheet(40, 8, 10);
        let frames = slice(&sheet, 4, RemainderPolicy::Truncate);

        assert_eq!(frames.len(), 4);
        for (i, frame) in frames.iter().enumerate() {
            assert_eq!(frame.index, i);
            assert_eq!(frame.image.width(), 10);
            assert_eq!(frame.image.height(), 8);
            let px = frame.image.to_rgba8().get_pixel(5, 3).0;
            assert_eq!(px, [i as u8, 255 - i as u8, 0, 255]);
        }
    }

    #[test]
    fn test_decode_sheet() {
        let sheet = striped_sheet(12, 4, 3);
        let mut png = Vec::new();
        sheet
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let decoded = decode_sheet("strip.png", &png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (12, 4));
    }

    #[test]
    fn test_decode_garbage_fails() {
        let err = decode_sheet("broken.png", b"<html>not found</html>").unwrap_err();
        assert!(matches!(err, SheetError::Decode { .. }));
        assert!(err.to_string().contains("broken.png"));
    }
}
