//! # Dobot Serial Link Layer
//!
//! 串口硬件抽象层，提供统一的链路接口抽象。
//!
//! - `SerialAdapter`: 发送原始帧、接收并重组完整帧、丢弃输入缓冲
//! - `SerialPortAdapter`: 基于 `serialport` 的实现（115200-8N1，独占打开）
//! - `frame`: 在无分隔符的字节流中按 `0xAA 0xAA` 重新同步并重组帧
//! - `pacer`: 帧间最小间隔，避免控制器接收溢出

use std::time::Duration;
use thiserror::Error;

pub mod frame;
pub mod pacer;
pub mod port;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use frame::read_frame;
pub use pacer::FramePacer;
pub use port::{SerialPortAdapter, available_ports};

#[cfg(any(test, feature = "mock"))]
pub use mock::{MockLog, MockSerialAdapter};

/// 波特率（固定）
pub const BAUD_RATE: u32 = 115_200;

/// 帧头同步的最大尝试次数
pub const DEFAULT_SYNC_ATTEMPTS: usize = 5;

/// 串口链路层统一错误类型
#[derive(Error, Debug)]
pub enum SerialError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Device Error: {0}")]
    Device(#[from] SerialDeviceError),
    #[error("Frame marker not found after {attempts} attempts")]
    SyncTimeout { attempts: usize },
    #[error("Short read: expected {expected} bytes, got {actual}")]
    ShortRead { expected: usize, actual: usize },
    #[error("Read timeout")]
    Timeout,
    #[error("Port closed")]
    Closed,
}

/// 设备错误的结构化分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerialDeviceErrorKind {
    Unknown,
    NoDevice,
    InvalidInput,
    Io,
}

/// 结构化设备错误
#[derive(Error, Debug, Clone)]
#[error("{kind:?}: {message}")]
pub struct SerialDeviceError {
    pub kind: SerialDeviceErrorKind,
    pub message: String,
}

impl SerialDeviceError {
    pub fn new(kind: SerialDeviceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// 设备不存在或已被拔出，重试无意义
    pub fn is_fatal(&self) -> bool {
        matches!(self.kind, SerialDeviceErrorKind::NoDevice)
    }
}

impl From<serialport::Error> for SerialDeviceError {
    fn from(err: serialport::Error) -> Self {
        let kind = match err.kind() {
            serialport::ErrorKind::NoDevice => SerialDeviceErrorKind::NoDevice,
            serialport::ErrorKind::InvalidInput => SerialDeviceErrorKind::InvalidInput,
            serialport::ErrorKind::Io(_) => SerialDeviceErrorKind::Io,
            _ => SerialDeviceErrorKind::Unknown,
        };
        Self::new(kind, err.description)
    }
}

impl From<serialport::Error> for SerialError {
    fn from(err: serialport::Error) -> Self {
        SerialError::Device(err.into())
    }
}

/// 链路配置
///
/// 数据位、校验位、停止位固定为 8N1，不可配置。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkConfig {
    /// 波特率（默认 115200）
    pub baud_rate: u32,
    /// 单次读取超时
    pub read_timeout: Duration,
    /// 发送前的最小静默时间（距上一次收发完成）
    pub min_frame_gap: Duration,
    /// 帧头同步的最大字节尝试次数
    pub sync_attempts: usize,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            baud_rate: BAUD_RATE,
            read_timeout: Duration::from_secs(1),
            min_frame_gap: Duration::from_millis(100),
            sync_attempts: DEFAULT_SYNC_ATTEMPTS,
        }
    }
}

/// 串口链路适配器
///
/// 驱动层在独占锁内依次调用 `clear_input` → `send` → `receive` 完成一次事务。
pub trait SerialAdapter {
    /// 原样写出一帧，写出前保证最小帧间隔
    fn send(&mut self, bytes: &[u8]) -> Result<(), SerialError>;

    /// 读取并重组一帧（包含 `0xAA 0xAA` 帧头）
    fn receive(&mut self) -> Result<Vec<u8>, SerialError>;

    /// 丢弃已缓冲的陈旧输入
    fn clear_input(&mut self) -> Result<(), SerialError> {
        Ok(())
    }

    /// 设备名称（用于日志）
    fn name(&self) -> &str {
        "unknown"
    }
}

impl<T: SerialAdapter + ?Sized> SerialAdapter for Box<T> {
    fn send(&mut self, bytes: &[u8]) -> Result<(), SerialError> {
        (**self).send(bytes)
    }

    fn receive(&mut self) -> Result<Vec<u8>, SerialError> {
        (**self).receive()
    }

    fn clear_input(&mut self) -> Result<(), SerialError> {
        (**self).clear_input()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_config_default() {
        let config = LinkConfig::default();
        assert_eq!(config.baud_rate, 115_200);
        assert_eq!(config.min_frame_gap, Duration::from_millis(100));
        assert_eq!(config.sync_attempts, 5);
    }

    #[test]
    fn test_serial_error_display() {
        let err = SerialError::SyncTimeout { attempts: 5 };
        assert_eq!(err.to_string(), "Frame marker not found after 5 attempts");

        let err = SerialError::ShortRead {
            expected: 10,
            actual: 3,
        };
        assert!(err.to_string().contains("expected 10"));
    }

    #[test]
    fn test_device_error_from_serialport() {
        let err = serialport::Error::new(serialport::ErrorKind::NoDevice, "gone");
        let device: SerialDeviceError = err.into();
        assert_eq!(device.kind, SerialDeviceErrorKind::NoDevice);
        assert!(device.is_fatal());
        assert_eq!(device.message, "gone");
    }

    #[test]
    fn test_boxed_adapter_forwards() {
        let mut adapter: Box<dyn SerialAdapter> =
            Box::new(MockSerialAdapter::new(|sent: &[u8]| Ok(sent.to_vec())));
        adapter.send(&[0xAA, 0xAA, 0x02, 0x0A, 0x00, 0xF6]).unwrap();
        assert_eq!(adapter.receive().unwrap().len(), 6);
        assert_eq!(adapter.name(), "mock");
    }
}
