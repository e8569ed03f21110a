//! # 位流分帧模块
//!
//! 把文本载荷转换为位流并追加结束哨兵，或把去掉哨兵的位流还原为文本。
//! 每个字符按其码点写成 8 位 (高位在前)，只接受 0–255 的码点。

use crate::constants::{BITS_PER_CHAR, SENTINEL, SENTINEL_BITS};
use crate::error::{Result, StegoError};

/// 将载荷编码为以哨兵结尾的位流。
///
/// # Errors
///
/// 若某个字符的码点大于 255，返回 [`StegoError::PayloadEncoding`]。
pub fn frame(payload: &str) -> Result<Vec<bool>> {
    let mut bits = Vec::with_capacity(payload.chars().count() * BITS_PER_CHAR + SENTINEL_BITS);

    for (index, character) in payload.chars().enumerate() {
        let byte = u8::try_from(character)
            .map_err(|_| StegoError::PayloadEncoding { character, index })?;
        push_msb_first(&mut bits, u32::from(byte), BITS_PER_CHAR);
    }
    push_msb_first(&mut bits, u32::from(SENTINEL), SENTINEL_BITS);

    Ok(bits)
}

/// 将不含哨兵的位流按 8 位一组还原为文本。
///
/// 末尾不足 8 位的部分会被丢弃。
pub fn unframe(bits: &[bool]) -> String {
    bits.chunks_exact(BITS_PER_CHAR)
        .map(|chunk| chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | u8::from(bit)))
        .map(char::from)
        .collect()
}

fn push_msb_first(bits: &mut Vec<bool>, value: u32, width: usize) {
    bits.extend((0..width).rev().map(|shift| (value >> shift) & 1 == 1));
}
