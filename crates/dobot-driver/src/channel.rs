//! 独占事务通道
//!
//! 把一条请求变成一条响应：加锁 → 丢弃陈旧输入 → 发送 → 接收并解析 → 解锁。
//! 锁同时保护串口和会话位姿，是唯一的同步原语。

use crate::error::DriverError;
use dobot_protocol::{GetPoseQuery, Message, Pose, QueuedCommandIndex, QueuedIndexQuery};
use dobot_serial::SerialAdapter;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::trace;

/// 锁内状态：物理链路 + 会话位姿
struct Link {
    /// 串口适配器，会话关闭后为 `None`
    adapter: Option<Box<dyn SerialAdapter + Send>>,
    /// 最近一次成功查询的位姿
    pose: Pose,
}

impl Link {
    fn transact(&mut self, request: &Message) -> Result<Message, DriverError> {
        let adapter = self.adapter.as_mut().ok_or(DriverError::SessionClosed)?;

        adapter.clear_input()?;
        adapter.send(&request.encode())?;
        let bytes = adapter.receive()?;
        let response = Message::decode(&bytes)?;

        if response.id() != request.id() {
            return Err(DriverError::UnexpectedResponse {
                expected: request.id(),
                actual: response.id(),
            });
        }

        trace!(
            "Transaction id={} ctrl=0x{:02X} -> {} param bytes",
            request.id(),
            request.control(),
            response.params().len()
        );
        Ok(response)
    }
}

/// 命令通道（可克隆，所有克隆共享同一把锁）
///
/// 同一时刻链路上只有一个事务。失败不会自动重试，由调用方决定是否重发。
///
/// # Example
///
/// ```
/// use dobot_driver::CommandChannel;
/// use dobot_protocol::GetPoseQuery;
/// use dobot_serial::MockSerialAdapter;
///
/// let channel = CommandChannel::new(MockSerialAdapter::echo());
/// let response = channel.send_command(&GetPoseQuery.to_message()).unwrap();
/// assert_eq!(response.id(), 10);
/// ```
#[derive(Clone)]
pub struct CommandChannel {
    link: Arc<Mutex<Link>>,
}

impl CommandChannel {
    /// 接管串口适配器创建通道，位姿初始为全零
    pub fn new(adapter: impl SerialAdapter + Send + 'static) -> Self {
        Self {
            link: Arc::new(Mutex::new(Link {
                adapter: Some(Box::new(adapter)),
                pose: Pose::default(),
            })),
        }
    }

    /// 执行一次完整事务
    ///
    /// # 错误
    /// - `DriverError::SessionClosed`: 端口已释放
    /// - `DriverError::Serial`: 发送/接收失败（同步超时、短读、IO 错误）
    /// - `DriverError::Protocol`: 响应帧无法解析
    /// - `DriverError::UnexpectedResponse`: 响应命令 ID 与请求不一致
    pub fn send_command(&self, request: &Message) -> Result<Message, DriverError> {
        self.link.lock().transact(request)
    }

    /// 执行队列指令，返回控制器分配的队列索引
    pub fn send_queued(&self, request: &Message) -> Result<QueuedCommandIndex, DriverError> {
        let response = self.send_command(request)?;
        Ok(QueuedCommandIndex::try_from(&response)?)
    }

    /// 查询位姿并在同一次加锁内覆盖会话位姿
    ///
    /// 响应无法解析时保留旧位姿。
    pub fn refresh_pose(&self) -> Result<Pose, DriverError> {
        let mut link = self.link.lock();
        let response = link.transact(&GetPoseQuery.to_message())?;
        let pose = Pose::try_from(&response)?;
        link.pose = pose;
        Ok(pose)
    }

    /// 会话位姿（最近一次成功查询的结果）
    pub fn pose(&self) -> Pose {
        self.link.lock().pose
    }

    /// 查询控制器当前已执行的队列指令索引
    pub fn current_queued_index(&self) -> Result<QueuedCommandIndex, DriverError> {
        let response = self.send_command(&QueuedIndexQuery.to_message())?;
        Ok(QueuedCommandIndex::try_from(&response)?)
    }

    /// 端口是否仍然打开
    pub fn is_open(&self) -> bool {
        self.link.lock().adapter.is_some()
    }

    /// 释放端口
    ///
    /// 等待进行中的事务结束后才能拿到锁，因此不会与读写竞争。
    /// 返回被关闭的设备名称（已关闭时返回 `None`）。
    pub(crate) fn close(&self) -> Option<String> {
        let mut link = self.link.lock();
        let adapter = link.adapter.take()?;
        let name = adapter.name().to_string();
        drop(adapter);
        Some(name)
    }
}
