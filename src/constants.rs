use image::Rgba;

/// 标记载荷结束的 16 位哨兵 `1111111111111110`。
/// 提取时一旦尾部 16 位与之相等即停止扫描。
pub const SENTINEL: u16 = 0b1111_1111_1111_1110;

/// 哨兵所占的位数。
pub const SENTINEL_BITS: usize = 16;

/// 载荷中每个字符占用的位数 (按码点逐字节写入, 高位在前)。
pub const BITS_PER_CHAR: usize = 8;

/// 每个像素可写入的位数：R、G、B 各一位，Alpha 永不修改。
pub const CHANNELS_PER_PIXEL: usize = 3;

/// 高亮图像文件名的前缀。
pub const HIGHLIGHT_PREFIX: &str = "highlight_";

/// 高亮图像中被修改像素的颜色 (Alpha 会被替换为原像素的 Alpha)。
pub const HIGHLIGHT_COLOR: Rgba<u8> = Rgba([255, 0, 0, 255]);

/// 输出图像强制使用的扩展名。
pub const OUTPUT_EXTENSION: &str = "png";
