//! # Dobot Protocol
//!
//! 机械臂串口协议定义（无硬件依赖）
//!
//! ## 模块
//!
//! - `ids`: 命令 ID 定义
//! - `constants`: 协议常量定义
//! - `control`: 指令帧构建（运动/IO 指令）
//! - `feedback`: 响应参数解析（位姿、队列索引）
//!
//! ## 帧格式
//!
//! ```text
//! | 0xAA 0xAA | len | id | ctrl | params ... | checksum |
//! ```
//!
//! - `len = 2 + params.len()`
//! - `(id + ctrl + sum(params) + checksum) mod 256 == 0`
//!
//! ## 字节序
//!
//! 参数中的多字节字段（f32/i32/u32）均为小端字节序。

pub mod constants;
pub mod control;
pub mod feedback;
pub mod ids;

// 重新导出常用类型
pub use constants::*;
pub use control::*;
pub use feedback::*;
pub use ids::*;

use smallvec::SmallVec;
use thiserror::Error;

/// 参数字节序列
///
/// 目前所有指令的参数都不超过 32 字节，内联存储避免堆分配。
pub type Params = SmallVec<[u8; 32]>;

/// 协议消息
///
/// 一次事务中的请求或响应。构造时即计算长度和校验和，之后不可变。
///
/// # 在架构中的位置
///
/// ```text
/// Client/Driver
///     ↓ Message::new() 构建 / Message::decode() 解析
/// Message (此类型)
///     ↓ encode() 成为字节流
/// Serial Layer (dobot-serial)
///     ↓ SerialPortAdapter
/// Hardware
/// ```
///
/// # 示例
///
/// ```rust
/// use dobot_protocol::Message;
///
/// let msg = Message::new(10, 0x00, &[]);
/// assert_eq!(msg.encode(), vec![0xAA, 0xAA, 0x02, 0x0A, 0x00, 0xF6]);
///
/// let decoded = Message::decode(&msg.encode()).unwrap();
/// assert_eq!(decoded, msg);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    id: u8,
    control: u8,
    params: Params,
    checksum: u8,
}

impl Message {
    /// 创建消息并计算校验和
    ///
    /// 参数超过 [`MAX_PARAMS_LEN`] 时截断（长度字节只有 8 位）。
    pub fn new(id: u8, control: u8, params: &[u8]) -> Self {
        let len = params.len().min(MAX_PARAMS_LEN);
        let params = Params::from_slice(&params[..len]);
        let checksum = checksum(id, control, &params);

        Self {
            id,
            control,
            params,
            checksum,
        }
    }

    /// 创建查询消息（无参数，控制字节为 0）
    pub fn query(id: CommandId) -> Self {
        Self::new(id.into(), 0x00, &[])
    }

    /// 创建带控制标志的指令消息
    pub fn command(id: CommandId, flags: ControlFlags, params: &[u8]) -> Self {
        Self::new(id.into(), flags.as_byte(), params)
    }

    /// 命令 ID
    pub fn id(&self) -> u8 {
        self.id
    }

    /// 已知的命令 ID（目录之外的 ID 返回 `None`）
    pub fn command_id(&self) -> Option<CommandId> {
        CommandId::try_from(self.id).ok()
    }

    /// 原始控制字节
    pub fn control(&self) -> u8 {
        self.control
    }

    /// 控制字节的位域视图
    pub fn control_flags(&self) -> ControlFlags {
        ControlFlags::from_byte(self.control)
    }

    /// 参数切片
    pub fn params(&self) -> &[u8] {
        &self.params
    }

    /// 长度字节（`2 + params.len()`）
    pub fn length(&self) -> u8 {
        (2 + self.params.len()) as u8
    }

    /// 校验和
    pub fn checksum(&self) -> u8 {
        self.checksum
    }

    /// 完整帧长度（包含帧头和校验和）
    pub fn frame_len(&self) -> usize {
        HEADER_LEN + self.length() as usize + 1
    }

    /// 编码为完整的线上字节序列
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.frame_len());
        self.encode_into(&mut buf);
        buf
    }

    /// 追加编码结果到已有缓冲区
    pub fn encode_into(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&FRAME_MARKER);
        buf.push(self.length());
        buf.push(self.id);
        buf.push(self.control);
        buf.extend_from_slice(&self.params);
        buf.push(self.checksum);
    }

    /// 从完整帧解析消息
    ///
    /// 按固定偏移读取：帧头 `[0..2]`、长度 `[2]`、ID `[3]`、控制 `[4]`、
    /// 参数 `[5..3+len]`、校验和 `[3+len]`。超出声明长度的尾随字节被忽略。
    ///
    /// # 错误
    /// - `ProtocolError::Framing`: 帧头不完整、帧头标记错误或长度字节小于 2
    /// - `ProtocolError::ShortRead`: 缓冲区短于长度字节声明的帧长
    /// - `ProtocolError::ChecksumMismatch`: 校验和不满足协议不变量
    pub fn decode(bytes: &[u8]) -> Result<Self, ProtocolError> {
        if bytes.len() < HEADER_LEN {
            return Err(ProtocolError::Framing {
                reason: format!("header truncated ({} of {HEADER_LEN} bytes)", bytes.len()),
            });
        }
        if bytes[0..2] != FRAME_MARKER {
            return Err(ProtocolError::Framing {
                reason: format!("bad frame marker {:02X} {:02X}", bytes[0], bytes[1]),
            });
        }

        let length = bytes[2] as usize;
        if length < MIN_LENGTH {
            return Err(ProtocolError::Framing {
                reason: format!("length byte {length} below minimum {MIN_LENGTH}"),
            });
        }

        let expected = HEADER_LEN + length + 1;
        if bytes.len() < expected {
            return Err(ProtocolError::ShortRead {
                expected,
                actual: bytes.len(),
            });
        }

        let id = bytes[3];
        let control = bytes[4];
        let params = &bytes[5..HEADER_LEN + length];
        let actual = bytes[HEADER_LEN + length];

        let computed = checksum(id, control, params);
        if computed != actual {
            return Err(ProtocolError::ChecksumMismatch {
                expected: computed,
                actual,
            });
        }

        Ok(Self {
            id,
            control,
            params: Params::from_slice(params),
            checksum: actual,
        })
    }
}

impl TryFrom<&[u8]> for Message {
    type Error = ProtocolError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::decode(bytes)
    }
}

/// 计算校验和：`(256 - ((id + control + sum(params)) mod 256)) mod 256`
pub fn checksum(id: u8, control: u8, params: &[u8]) -> u8 {
    params
        .iter()
        .fold(id.wrapping_add(control), |acc, b| acc.wrapping_add(*b))
        .wrapping_neg()
}

/// 编码 `(id, control, params)` 为完整帧
pub fn encode(id: u8, control: u8, params: &[u8]) -> Vec<u8> {
    Message::new(id, control, params).encode()
}

/// 解析完整帧，等价于 [`Message::decode`]
pub fn decode(bytes: &[u8]) -> Result<Message, ProtocolError> {
    Message::decode(bytes)
}

/// 协议解析错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProtocolError {
    #[error("Framing error: {reason}")]
    Framing { reason: String },

    #[error("Short read: expected {expected} bytes, got {actual}")]
    ShortRead { expected: usize, actual: usize },

    #[error("Checksum mismatch: expected 0x{expected:02X}, got 0x{actual:02X}")]
    ChecksumMismatch { expected: u8, actual: u8 },

    #[error("Cannot decode params of command {command}: need {expected} bytes, got {actual}")]
    ParamDecode {
        command: u8,
        expected: usize,
        actual: usize,
    },

    #[error("Unexpected command id {actual} (expected {expected})")]
    UnexpectedCommand { expected: u8, actual: u8 },

    #[error("Invalid value for field {field}: {value}")]
    InvalidValue { field: String, value: u8 },
}

/// 小端字节序工具函数
///
/// 从参数的指定偏移读取 f32，越界时返回 `ParamDecode`。
pub fn f32_le_at(params: &[u8], offset: usize, command: u8) -> Result<f32, ProtocolError> {
    array_at::<4>(params, offset, command).map(f32::from_le_bytes)
}

/// 从参数的指定偏移读取 u32（小端）
pub fn u32_le_at(params: &[u8], offset: usize, command: u8) -> Result<u32, ProtocolError> {
    array_at::<4>(params, offset, command).map(u32::from_le_bytes)
}

fn array_at<const N: usize>(
    params: &[u8],
    offset: usize,
    command: u8,
) -> Result<[u8; N], ProtocolError> {
    params
        .get(offset..offset + N)
        .and_then(|slice| <[u8; N]>::try_from(slice).ok())
        .ok_or(ProtocolError::ParamDecode {
            command,
            expected: offset + N,
            actual: params.len(),
        })
}
