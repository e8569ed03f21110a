//! # 错误类型模块
//!
//! 库层所有失败都以 [`StegoError`] 返回，调用方可以逐一区分处理。

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StegoError {
    #[error("Image not found: {}", .0.display())]
    ImageNotFound(PathBuf),

    #[error("Cannot open image {}: {source}", .path.display())]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Cannot save image {}: {source}", .path.display())]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Image too small to hide this message. Required: {required} bits, Available: {available} bits")]
    InsufficientCapacity { required: usize, available: usize },

    #[error("No hidden message found")]
    NoPayloadFound,

    #[error("Character {character:?} at index {index} does not fit in a single byte")]
    PayloadEncoding { character: char, index: usize },
}

pub type Result<T> = std::result::Result<T, StegoError>;
