//! 队列指令完成等待
//!
//! 控制器为每条队列指令分配单调递增的索引，并可查询当前已执行到的索引。
//! 等待即反复查询，直到当前索引不小于目标索引。

use crate::channel::CommandChannel;
use crate::error::DriverError;
use crate::signal::StopSignal;
use dobot_protocol::QueuedCommandIndex;
use std::time::Duration;
use tracing::debug;

/// 队列指令等待器
///
/// 没有超时和次数上限：目标索引永远达不到时（例如控制器清空了队列）会一直等待，
/// 只能通过停止信号取消。
pub struct CommandQueueWaiter {
    channel: CommandChannel,
    interval: Duration,
    signal: StopSignal,
}

impl CommandQueueWaiter {
    pub fn new(channel: CommandChannel, interval: Duration, signal: StopSignal) -> Self {
        Self {
            channel,
            interval,
            signal,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// 查询一次当前已执行的索引
    pub fn current_index(&self) -> Result<QueuedCommandIndex, DriverError> {
        self.channel.current_queued_index()
    }

    /// 阻塞直到控制器执行到 `target`
    ///
    /// 首次查询立即发出，之后每隔 `interval` 查询一次。查询失败视为"尚未完成"。
    ///
    /// # 错误
    /// - `DriverError::Cancelled`: 停止信号被触发
    /// - `DriverError::SessionClosed`: 会话已关闭
    pub fn wait_for(&self, target: u32) -> Result<QueuedCommandIndex, DriverError> {
        loop {
            if self.signal.is_stopped() {
                return Err(DriverError::Cancelled);
            }

            match self.current_index() {
                Ok(index) if index.value() >= target => {
                    debug!("Queued command {} reached (current {})", target, index);
                    return Ok(index);
                },
                Ok(index) => debug!("Waiting for queued command {} (current {})", target, index),
                Err(DriverError::SessionClosed) => return Err(DriverError::SessionClosed),
                Err(e) => debug!("Queue index query failed: {}", e),
            }

            if self.signal.wait(self.interval) {
                return Err(DriverError::Cancelled);
            }
        }
    }
}
