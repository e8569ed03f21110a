//! # lsb_highlight 库
//!
//! 本库包含 LSB 文本隐写的核心逻辑：位流分帧、像素编解码，
//! 以及供外部调用的两个入口 [`handler::hide_message`] 和 [`handler::extract_message`]。

pub mod cli;
pub mod constants;
pub mod error;
pub mod framer;
pub mod handler;
pub mod picture;
pub mod steganography;

pub use error::{Result, StegoError};
pub use handler::{HideOutcome, extract_message, hide_message};
