//! 客户端接口模块
//!
//! 本模块提供 Dobot 机械臂的用户友好接口，包括：
//! - 会话建立（打开端口、下发 PTP 参数、启动位姿轮询）
//! - 运动和末端执行器指令（返回队列索引）
//! - 传送带速度换算
//!
//! # 使用场景
//!
//! 这是大多数用户应该使用的模块。如果需要直接收发协议消息，
//! 可以使用 `dobot-driver`。

pub mod builder;
pub mod conveyor;
mod dobot;
mod error;
pub mod motion;

pub use builder::DobotBuilder;
pub use conveyor::Direction;
pub use dobot::{CONVEYOR_DEFAULT_SPEED, Dobot};
pub use error::ClientError;
pub use motion::MotionParams;

// 重新导出常用类型
pub use dobot_driver::{DEFAULT_PORT, DriverConfig, DriverError, StopHandle};
pub use dobot_protocol::{CartesianPoint, MotorInterface, Pose, PtpMode, QueuedCommandIndex};
pub use dobot_serial::LinkConfig;
