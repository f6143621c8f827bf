//! 协议常量定义

/// 帧头标记字节
pub const MARKER_BYTE: u8 = 0xAA;

/// 帧头标记（两个连续的 0xAA）
pub const FRAME_MARKER: [u8; 2] = [MARKER_BYTE, MARKER_BYTE];

/// 帧头长度：标记（2 字节）+ 长度字节
pub const HEADER_LEN: usize = 3;

/// 长度字节的最小值（仅包含 ID 和控制字节）
pub const MIN_LENGTH: usize = 2;

/// 参数的最大长度（长度字节为 u8，需减去 ID 和控制字节）
pub const MAX_PARAMS_LEN: usize = u8::MAX as usize - MIN_LENGTH;

/// 位姿响应参数长度：8 个 f32（x, y, z, r, j1..j4）
pub const POSE_PARAMS_LEN: usize = 32;

/// 队列索引字段长度（u32）
pub const QUEUED_INDEX_LEN: usize = 4;
