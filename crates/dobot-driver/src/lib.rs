//! 驱动层模块
//!
//! 本模块提供 Dobot 机械臂的设备驱动功能，包括：
//! - 独占事务通道（`CommandChannel`）：链路上同一时刻只有一个请求/响应事务
//! - 后台位姿轮询（`PosePoller`）：周期查询位姿并更新会话状态
//! - 队列指令等待（`CommandQueueWaiter`）：轮询已执行指令索引直到目标完成
//! - 会话生命周期（`Dobot`）：打开端口、启停轮询线程、按序关闭
//!
//! # 事务对应关系
//!
//! 协议没有序列号，响应只能通过"同一时刻只有一个事务"与请求对应。
//! 所有对链路和位姿状态的访问都经过同一把互斥锁。
//!
//! # 使用场景
//!
//! 适用于需要直接收发协议消息的场景。
//! 大多数用户应该使用 `dobot-client` 提供的更高级接口。

mod builder;
mod channel;
mod config;
mod dobot;
mod error;
pub mod poller;
pub mod signal;
pub mod waiter;

pub use builder::{DEFAULT_PORT, DobotBuilder};
pub use channel::CommandChannel;
pub use config::DriverConfig;
pub use dobot::Dobot;
pub use error::DriverError;
pub use poller::PosePoller;
pub use signal::{StopHandle, StopSignal};
pub use waiter::CommandQueueWaiter;
