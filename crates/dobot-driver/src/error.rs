//! 驱动层错误类型定义

use dobot_protocol::ProtocolError;
use dobot_serial::SerialError;
use thiserror::Error;

/// 驱动层错误类型
#[derive(Error, Debug)]
pub enum DriverError {
    /// 串口链路错误
    #[error("Serial link error: {0}")]
    Serial(#[from] SerialError),

    /// 协议解析错误
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// 响应的命令 ID 与请求不一致
    #[error("Unexpected response: expected command {expected}, got {actual}")]
    UnexpectedResponse { expected: u8, actual: u8 },

    /// 会话已关闭（端口已释放）
    #[error("Session closed")]
    SessionClosed,

    /// 等待被停止信号取消
    #[error("Operation cancelled")]
    Cancelled,

    /// 位姿轮询线程已在运行
    #[error("Pose poller already running")]
    PollerAlreadyRunning,

    /// 后台线程错误
    #[error("IO thread error: {0}")]
    IoThread(String),
}

#[cfg(test)]
mod tests {
    use super::DriverError;
    use dobot_protocol::ProtocolError;
    use dobot_serial::SerialError;

    /// 测试 DriverError 的 Display 实现
    #[test]
    fn test_driver_error_display() {
        let driver_error = DriverError::Serial(SerialError::SyncTimeout { attempts: 5 });
        let msg = format!("{}", driver_error);
        assert!(msg.contains("Serial link") && msg.contains("5 attempts"), "{}", msg);

        let driver_error = DriverError::Protocol(ProtocolError::ShortRead {
            expected: 10,
            actual: 9,
        });
        let msg = format!("{}", driver_error);
        assert!(msg.contains("Short read"), "{}", msg);

        let driver_error = DriverError::UnexpectedResponse {
            expected: 10,
            actual: 246,
        };
        assert_eq!(
            driver_error.to_string(),
            "Unexpected response: expected command 10, got 246"
        );

        assert_eq!(DriverError::SessionClosed.to_string(), "Session closed");
        assert_eq!(DriverError::Cancelled.to_string(), "Operation cancelled");

        let driver_error = DriverError::IoThread("spawn failed".to_string());
        assert!(driver_error.to_string().contains("spawn failed"));
    }

    /// 测试 From<SerialError> 转换
    #[test]
    fn test_from_serial_error() {
        let driver_error: DriverError = SerialError::Timeout.into();
        match driver_error {
            DriverError::Serial(e) => assert!(matches!(e, SerialError::Timeout)),
            _ => panic!("Expected Serial variant"),
        }
    }

    /// 测试 From<ProtocolError> 转换
    #[test]
    fn test_from_protocol_error() {
        let protocol_error = ProtocolError::ChecksumMismatch {
            expected: 0xF6,
            actual: 0x00,
        };
        let driver_error: DriverError = protocol_error.into();
        match driver_error {
            DriverError::Protocol(ProtocolError::ChecksumMismatch { expected, .. }) => {
                assert_eq!(expected, 0xF6)
            },
            _ => panic!("Expected Protocol variant"),
        }
    }
}
