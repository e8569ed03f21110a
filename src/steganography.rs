//! # 像素编解码模块
//!
//! 按行优先顺序 (y 在外层, x 在内层) 遍历像素，依次在 R、G、B 通道的最低位
//! 写入或读取一位，Alpha 通道始终保持不变。

use crate::constants::{CHANNELS_PER_PIXEL, HIGHLIGHT_COLOR, SENTINEL, SENTINEL_BITS};
use crate::error::{Result, StegoError};
use image::{Rgba, RgbaImage};
use log::debug;

/// 一次嵌入的结果：隐写后的图像以及标出被修改像素的高亮图像。
#[derive(Debug, Clone)]
pub struct Embedding {
    /// 写入位流后的图像。
    pub output: RgbaImage,
    /// 被修改的像素为红色，其余与 `output` 相同。
    pub highlight: RgbaImage,
    /// 写入的位数，包括 16 位哨兵。
    pub bits_written: usize,
    /// 至少有一个通道被修改的像素数。
    pub pixels_changed: usize,
}

/// 图像可容纳的位数，即 `width * height * 3`。
pub fn capacity(image: &RgbaImage) -> usize {
    let (width, height) = image.dimensions();
    (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(CHANNELS_PER_PIXEL)
}

/// 将位流逐位写入图像通道的最低位，同时生成高亮图像。
///
/// 位流耗尽后剩余的通道与像素保持原样；高亮图像中，任一 R/G/B 通道发生变化的像素
/// 被替换为红色 (保留原 Alpha)，其余像素与输出图像相同。
///
/// # Errors
///
/// 位流长度超过 [`capacity`] 时返回 [`StegoError::InsufficientCapacity`]，不做任何写入。
pub fn embed(cover: &RgbaImage, bits: &[bool]) -> Result<Embedding> {
    let available = capacity(cover);
    if available < bits.len() {
        return Err(StegoError::InsufficientCapacity {
            required: bits.len(),
            available,
        });
    }

    let mut output = cover.clone();
    let mut highlight = cover.clone();
    let mut pixels_changed = 0;

    for ((pixel, marker), chunk) in output
        .pixels_mut()
        .zip(highlight.pixels_mut())
        .zip(bits.chunks(CHANNELS_PER_PIXEL))
    {
        let original = *pixel;
        for (channel, &bit) in pixel.0.iter_mut().zip(chunk) {
            *channel = splice_lsb(*channel, bit);
        }

        *marker = if *pixel != original {
            pixels_changed += 1;
            let Rgba([r, g, b, _]) = HIGHLIGHT_COLOR;
            Rgba([r, g, b, original[3]])
        } else {
            *pixel
        };
    }

    debug!(
        "embedded {} bits into {}x{} image, {} pixels changed",
        bits.len(),
        cover.width(),
        cover.height(),
        pixels_changed
    );

    Ok(Embedding {
        output,
        highlight,
        bits_written: bits.len(),
        pixels_changed,
    })
}

/// 按嵌入时的顺序读取通道最低位，直到尾部 16 位与哨兵相同。
///
/// 返回去掉哨兵后的位流，可直接交给 [`crate::framer::unframe`]。
/// 该函数只读，不会修改图像。
///
/// # Errors
///
/// 遍历完所有通道仍未遇到哨兵时返回 [`StegoError::NoPayloadFound`]。
pub fn scan(image: &RgbaImage) -> Result<Vec<bool>> {
    let mut bits = Vec::new();
    let mut window: u16 = 0;

    let channels = image
        .pixels()
        .flat_map(|pixel| pixel.0.into_iter().take(CHANNELS_PER_PIXEL));

    for channel in channels {
        let bit = lsb(channel);
        bits.push(bit);
        window = (window << 1) | u16::from(bit);

        if bits.len() >= SENTINEL_BITS && window == SENTINEL {
            bits.truncate(bits.len() - SENTINEL_BITS);
            debug!("sentinel found after {} payload bits", bits.len());
            return Ok(bits);
        }
    }

    debug!("scanned {} channels without finding the sentinel", bits.len());
    Err(StegoError::NoPayloadFound)
}

fn splice_lsb(channel: u8, bit: bool) -> u8 {
    (channel & 0xFE) | u8::from(bit)
}

fn lsb(channel: u8) -> bool {
    channel & 1 == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framer::{frame, unframe};
    use image::ImageBuffer;

    fn uniform(width: u32, height: u32, value: Rgba<u8>) -> RgbaImage {
        ImageBuffer::from_pixel(width, height, value)
    }

    fn gradient(width: u32, height: u32) -> RgbaImage {
        ImageBuffer::from_fn(width, height, |x, y| {
            Rgba([
                (x * 37 + y) as u8,
                (y * 53 + x * 3) as u8,
                (x ^ y) as u8,
                (x + y * 7) as u8,
            ])
        })
    }

    #[test]
    fn capacity_counts_three_bits_per_pixel() {
        assert_eq!(capacity(&uniform(4, 3, Rgba([0, 0, 0, 0]))), 36);
        assert_eq!(capacity(&uniform(1, 1, Rgba([0, 0, 0, 0]))), 3);
    }

    #[test]
    fn hides_hi_in_four_by_three_image() {
        let cover = uniform(4, 3, Rgba([128, 128, 128, 200]));
        let bits = frame("HI").unwrap();
        assert_eq!(bits.len(), 32);

        let embedding = embed(&cover, &bits).unwrap();
        assert_eq!(embedding.bits_written, 32);

        let written: Vec<u8> = embedding
            .output
            .pixels()
            .flat_map(|p| p.0.into_iter().take(CHANNELS_PER_PIXEL))
            .collect();
        for (slot, &bit) in bits.iter().enumerate() {
            assert_eq!(written[slot], 128 | u8::from(bit), "channel slot {slot}");
        }
        assert!(written[32..].iter().all(|&c| c == 128));

        // The 11th pixel carries the last two sentinel bits, its blue channel is untouched.
        assert_eq!(*embedding.output.get_pixel(2, 2), Rgba([129, 128, 128, 200]));
        assert_eq!(*embedding.output.get_pixel(3, 2), cover[(3, 2)]);
        assert_eq!(embedding.highlight.get_pixel(3, 2), embedding.output.get_pixel(3, 2));

        // Bits 6..9 of "HI" are all zero, so the third pixel is not flagged.
        assert_eq!(*embedding.highlight.get_pixel(2, 0), Rgba([128, 128, 128, 200]));
        assert_eq!(*embedding.highlight.get_pixel(0, 0), Rgba([255, 0, 0, 200]));

        assert_eq!(unframe(&scan(&embedding.output).unwrap()), "HI");
    }

    #[test]
    fn capacity_boundary_is_exact() {
        // "A" frames to 24 bits, which fills an 8x1 image to the last channel.
        let bits = frame("A").unwrap();
        let exact = gradient(8, 1);
        assert_eq!(capacity(&exact), bits.len());
        let embedding = embed(&exact, &bits).unwrap();
        assert_eq!(unframe(&scan(&embedding.output).unwrap()), "A");

        let one_short = vec![true; capacity(&exact) + 1];
        match embed(&exact, &one_short) {
            Err(StegoError::InsufficientCapacity { required, available }) => {
                assert_eq!(required, 25);
                assert_eq!(available, 24);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn highlight_marks_exactly_the_changed_pixels() {
        let cover = gradient(16, 9);
        let bits = frame("highlight me").unwrap();
        let embedding = embed(&cover, &bits).unwrap();

        let mut changed = 0;
        for (x, y, source) in cover.enumerate_pixels() {
            let out = embedding.output.get_pixel(x, y);
            let mark = embedding.highlight.get_pixel(x, y);
            if out != source {
                changed += 1;
                assert_eq!(*mark, Rgba([255, 0, 0, source[3]]));
            } else {
                assert_eq!(mark, out);
            }
        }
        assert_eq!(changed, embedding.pixels_changed);

        let consumed_pixels = bits.len().div_ceil(CHANNELS_PER_PIXEL);
        for (index, (source, out)) in cover.pixels().zip(embedding.output.pixels()).enumerate() {
            if index >= consumed_pixels {
                assert_eq!(source, out);
            }
        }
    }

    #[test]
    fn alpha_is_never_modified() {
        let cover = gradient(10, 10);
        let bits = vec![true; capacity(&cover)];
        let embedding = embed(&cover, &bits).unwrap();

        for ((source, out), mark) in cover
            .pixels()
            .zip(embedding.output.pixels())
            .zip(embedding.highlight.pixels())
        {
            assert_eq!(source[3], out[3]);
            assert_eq!(source[3], mark[3]);
        }
    }

    #[test]
    fn untouched_image_has_no_payload() {
        let cover = uniform(8, 8, Rgba([10, 20, 30, 255]));
        assert!(matches!(scan(&cover), Err(StegoError::NoPayloadFound)));
    }

    #[test]
    fn scan_is_repeatable() {
        let embedding = embed(&gradient(20, 20), &frame("twice").unwrap()).unwrap();
        let first = scan(&embedding.output).unwrap();
        let second = scan(&embedding.output).unwrap();
        assert_eq!(first, second);
        assert_eq!(unframe(&first), "twice");
    }

    #[test]
    fn payload_containing_the_sentinel_stops_early() {
        let embedding = embed(&gradient(20, 20), &frame("\u{ff}\u{fe}tail").unwrap()).unwrap();
        assert_eq!(unframe(&scan(&embedding.output).unwrap()), "");
    }
}
