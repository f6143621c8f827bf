//! 客户端错误类型定义

use dobot_driver::DriverError;
use thiserror::Error;

/// 客户端错误类型
#[derive(Error, Debug)]
pub enum ClientError {
    /// 驱动层错误（链路、协议、会话）
    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),

    /// 参数超出允许范围，命令未发送
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl ClientError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
