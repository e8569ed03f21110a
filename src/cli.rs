//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// 基于 LSB (最低有效位) 隐写术的命令行工具：在图像的 R/G/B 通道中隐藏文本，
/// 并额外输出一张标出被修改像素的高亮图像。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "基于 LSB (最低有效位) 隐写术的命令行工具：在图像的 R/G/B 通道中隐藏文本，并额外输出一张标出被修改像素的高亮图像。结果始终保存为 PNG。"
)]
pub struct Cli {
    /// 输出更多日志 (可重复：-v 为 info，-vv 为 debug，-vvv 为 trace)。
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：embed (隐藏) 和 extract (提取)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 在图像中隐藏一段文本，并生成高亮图像。
    #[command(visible_alias = "hide")]
    Embed(EmbedArgs),

    /// 从经过隐写的图像中提取隐藏的文本。
    #[command(visible_alias = "recover")]
    Extract(ExtractArgs),
}

/// 'embed' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct EmbedArgs {
    /// 用于隐写的输入图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 结果图像的保存路径，非 `.png` 结尾时会自动追加 `.png`。
    #[arg(short, long)]
    pub dest: PathBuf,

    /// 要隐藏的文本。
    #[arg(short, long, conflicts_with = "text", required_unless_present = "text")]
    pub message: Option<String>,

    /// 从文件 (UTF-8) 读取要隐藏的文本。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 允许覆盖已存在的结果图像和高亮图像。
    #[arg(short, long)]
    pub force: bool,
}

/// 'extract' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// 已隐藏文本的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 将提取的文本保存到该文件；省略时直接打印。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 允许覆盖已存在的文本文件。
    #[arg(short, long)]
    pub force: bool,
}
