//! # 图像访问模块
//!
//! 负责图像文件的读取与写入，以及输出文件名的推导。
//! 格式编解码委托给 `image` crate，读入后统一转换为 RGBA8。

use crate::constants::{HIGHLIGHT_PREFIX, OUTPUT_EXTENSION};
use crate::error::{Result, StegoError};
use image::{ImageFormat, ImageReader, RgbaImage};
use log::{info, warn};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// 读取图像文件并转换为 RGBA8 缓冲区。
///
/// 文件在函数返回前即被关闭。
///
/// # Errors
///
/// * 路径不存在时返回 [`StegoError::ImageNotFound`]。
/// * 文件无法打开、格式无法识别或数据损坏时返回 [`StegoError::ImageDecode`]。
pub fn load_rgba(path: &Path) -> Result<RgbaImage> {
    if !path.exists() {
        return Err(StegoError::ImageNotFound(path.to_path_buf()));
    }

    let decode_error = |source: image::ImageError| StegoError::ImageDecode {
        path: path.to_path_buf(),
        source,
    };

    let image = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| decode_error(image::ImageError::IoError(e)))?
        .decode()
        .map_err(decode_error)?;

    Ok(image.to_rgba8())
}

/// 以 PNG 格式保存图像。
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| StegoError::ImageSave {
            path: path.to_path_buf(),
            source,
        })?;
    info!("wrote {}", path.display());
    Ok(())
}

/// 保证输出路径以 `.png` 结尾 (不区分大小写)，否则在末尾追加 `.png`。
///
/// 原有扩展名不会被替换：`out.jpg` 变为 `out.jpg.png`；名为 `.png` 的文件保持不变。
pub fn png_output_path(path: &Path) -> PathBuf {
    let suffix = format!(".{OUTPUT_EXTENSION}");
    let is_png = path
        .file_name()
        .is_some_and(|name| name.to_string_lossy().to_lowercase().ends_with(&suffix));
    if is_png {
        return path.to_path_buf();
    }

    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(OUTPUT_EXTENSION);
    let coerced = PathBuf::from(name);
    warn!(
        "output path {} is not a PNG, saving as {}",
        path.display(),
        coerced.display()
    );
    coerced
}

/// 高亮图像路径：与输出图像位于同一目录，文件名为 `highlight_` 加输出文件名。
pub fn highlight_path(output: &Path) -> PathBuf {
    let mut name = OsString::from(HIGHLIGHT_PREFIX);
    if let Some(file_name) = output.file_name() {
        name.push(file_name);
    }
    output.with_file_name(name)
}
