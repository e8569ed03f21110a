//! # 命令处理逻辑模块
//!
//! 包含两个库级入口 [`hide_message`] 与 [`extract_message`]，它们以 [`StegoError`]
//! 返回可区分的失败结果；以及处理 `embed` 和 `extract` 子命令的高层逻辑，
//! 负责覆盖保护、读写文本文件并向用户报告结果。

use crate::cli::{EmbedArgs, ExtractArgs};
use crate::error::{Result as StegoResult, StegoError};
use crate::framer::{frame, unframe};
use crate::picture::{highlight_path, load_rgba, png_output_path, save_png};
use crate::steganography::{embed, scan};
use anyhow::{Context, Result};
use colored::Colorize;
use log::warn;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// 隐藏成功后的结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HideOutcome {
    /// 实际写入的结果图像路径 (已强制为 `.png`)。
    pub output_path: PathBuf,
    /// 高亮图像路径。
    pub highlight_path: PathBuf,
    /// 写入的位数，包括 16 位哨兵。
    pub bits_embedded: usize,
    /// 至少有一个通道被修改的像素数。
    pub pixels_changed: usize,
}

impl fmt::Display for HideOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Message hidden successfully!\nSaved as: {}\nHighlighted pixels: {}",
            self.output_path.display(),
            self.highlight_path.display()
        )
    }
}

/// 在图像中隐藏文本，并保存结果图像与高亮图像。
///
/// # Arguments
///
/// * `image_path` - 输入图像路径。
/// * `output_path` - 结果图像路径，非 `.png` 结尾时追加 `.png`。
/// * `message` - 要隐藏的文本，每个字符的码点必须在 0–255 之间。
///
/// # Errors
///
/// 返回 [`StegoError`] 的各个变体之一；容量不足或编码失败时不会写入任何文件。
pub fn hide_message(
    image_path: &Path,
    output_path: &Path,
    message: &str,
) -> StegoResult<HideOutcome> {
    let cover = load_rgba(image_path)?;
    let bits = frame(message)?;
    let embedding = embed(&cover, &bits)?;

    let output_path = png_output_path(output_path);
    let highlight_path = highlight_path(&output_path);
    save_png(&embedding.output, &output_path)?;
    if let Err(e) = save_png(&embedding.highlight, &highlight_path) {
        // Leave nothing behind when the pair cannot be written.
        if let Err(cleanup) = fs::remove_file(&output_path) {
            warn!(
                "could not remove {} after failed highlight save: {cleanup}",
                output_path.display()
            );
        }
        return Err(e);
    }

    Ok(HideOutcome {
        output_path,
        highlight_path,
        bits_embedded: embedding.bits_written,
        pixels_changed: embedding.pixels_changed,
    })
}

/// 从图像中提取隐藏的文本。
///
/// # Errors
///
/// * [`StegoError::ImageNotFound`] / [`StegoError::ImageDecode`] - 图像无法读取。
/// * [`StegoError::NoPayloadFound`] - 整张图像中都没有出现结束哨兵。
pub fn extract_message(image_path: &Path) -> StegoResult<String> {
    let picture = load_rgba(image_path)?;
    let bits = scan(&picture)?;
    Ok(unframe(&bits))
}

/// 处理 'Embed' 命令的执行逻辑。
///
/// 负责确定要隐藏的文本、检查目标文件是否会被覆盖，再调用 [`hide_message`]
/// 并打印结果。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像或文本文件。
/// * 结果图像或高亮图像已存在且未指定 `--force`。
/// * 图像没有足够的空间来隐藏文本，或文本包含码点大于 255 的字符。
/// * 无法写入结果文件。
pub fn handle_embed(args: EmbedArgs) -> Result<()> {
    let message = match (&args.message, &args.text) {
        (Some(message), _) => message.clone(),
        (None, Some(text)) => fs::read_to_string(text).with_context(|| {
            format!(
                "Unable to read text file: {}",
                text.to_string_lossy().red().bold()
            )
        })?,
        (None, None) => anyhow::bail!("Either --message or --text must be given."),
    };

    let output = png_output_path(&args.dest);
    for target in [output.clone(), highlight_path(&output)] {
        anyhow::ensure!(
            args.force || !target.exists(),
            "Output file already exists: {}. \nUse --force to overwrite it.",
            target.to_string_lossy().red().bold()
        );
    }

    let outcome = hide_message(&args.image, &output, &message)
        .map_err(|e| match e {
            StegoError::InsufficientCapacity { required, available } => anyhow::anyhow!(
                "Not enough space in the image to hide the text. \nRequired: {} bits, Available: {} bits",
                required.to_string().red().bold(),
                available.to_string().green().bold()
            ),
            other => anyhow::Error::new(other),
        })
        .with_context(|| {
            format!(
                "Failed to hide the message in {}",
                args.image.to_string_lossy().red().bold()
            )
        })?;

    println!(
        "The text has been successfully hidden and saved: {}",
        outcome.output_path.to_string_lossy().green().bold()
    );
    println!(
        "Highlighted pixels ({} changed): {}",
        outcome.pixels_changed.to_string().green(),
        outcome.highlight_path.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Extract' 命令的执行逻辑。
///
/// 负责调用 [`extract_message`]，然后将文本写入指定文件或直接打印。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像文件。
/// * 图像中没有隐藏的文本。
/// * 目标文本文件已存在且未指定 `--force`，或无法写入。
pub fn handle_extract(args: ExtractArgs) -> Result<()> {
    if let Some(text) = &args.text {
        anyhow::ensure!(
            args.force || !text.exists(),
            "Output file already exists: {}. \nUse --force to overwrite it.",
            text.to_string_lossy().red().bold()
        );
    }

    let message = extract_message(&args.image).with_context(|| {
        format!(
            "Failed to extract a message from {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    match &args.text {
        Some(text) => {
            fs::write(text, &message).with_context(|| {
                format!(
                    "Unable to write to target text file: {}",
                    text.to_string_lossy().red().bold()
                )
            })?;
            println!(
                "The text has been successfully recovered and saved: {}",
                text.to_string_lossy().green().bold()
            );
        }
        None => println!("Hidden message: {message}"),
    }

    Ok(())
}
