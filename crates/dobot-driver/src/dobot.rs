//! 会话生命周期
//!
//! `Dobot` 组合命令通道、位姿轮询线程和停止句柄。关闭顺序固定为：
//! 触发停止 → 等待轮询线程结束 → 释放端口。

use crate::channel::CommandChannel;
use crate::config::DriverConfig;
use crate::error::DriverError;
use crate::poller::PosePoller;
use crate::signal::StopHandle;
use crate::waiter::CommandQueueWaiter;
use dobot_protocol::{Message, Pose, QueuedCommandIndex};
use dobot_serial::SerialAdapter;
use tracing::{error, info};

/// 驱动层会话
///
/// # Example
///
/// ```
/// use dobot_driver::{Dobot, DriverConfig};
/// use dobot_protocol::HomeCommand;
/// use dobot_serial::MockSerialAdapter;
///
/// let dobot = Dobot::new(MockSerialAdapter::echo(), DriverConfig::default());
/// let response = dobot.send_command(&HomeCommand.to_message()).unwrap();
/// assert_eq!(response.id(), 31);
/// dobot.close().unwrap();
/// ```
pub struct Dobot {
    channel: CommandChannel,
    config: DriverConfig,
    poller: Option<PosePoller>,
    shutdown: StopHandle,
}

impl Dobot {
    /// 接管已打开的链路创建会话（不启动轮询线程）
    pub fn new(adapter: impl SerialAdapter + Send + 'static, config: DriverConfig) -> Self {
        Self {
            channel: CommandChannel::new(adapter),
            config,
            poller: None,
            shutdown: StopHandle::new(),
        }
    }

    pub fn channel(&self) -> &CommandChannel {
        &self.channel
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// 执行一次事务，参见 [`CommandChannel::send_command`]
    pub fn send_command(&self, request: &Message) -> Result<Message, DriverError> {
        self.channel.send_command(request)
    }

    pub fn send_queued(&self, request: &Message) -> Result<QueuedCommandIndex, DriverError> {
        self.channel.send_queued(request)
    }

    /// 最近一次成功查询的位姿
    pub fn pose(&self) -> Pose {
        self.channel.pose()
    }

    /// 立即查询位姿
    pub fn refresh_pose(&self) -> Result<Pose, DriverError> {
        self.channel.refresh_pose()
    }

    pub fn current_queued_index(&self) -> Result<QueuedCommandIndex, DriverError> {
        self.channel.current_queued_index()
    }

    /// 启动后台位姿轮询
    pub fn start_pose_poller(&mut self) -> Result<(), DriverError> {
        if self.poller.is_some() {
            return Err(DriverError::PollerAlreadyRunning);
        }
        if !self.channel.is_open() {
            return Err(DriverError::SessionClosed);
        }
        self.poller = Some(PosePoller::spawn(
            self.channel.clone(),
            self.config.pose_poll_interval,
            self.shutdown.signal(),
        )?);
        Ok(())
    }

    /// 停止后台位姿轮询并等待当前周期结束
    pub fn stop_pose_poller(&mut self) -> Result<(), DriverError> {
        match self.poller.take() {
            Some(poller) => poller.stop(),
            None => Ok(()),
        }
    }

    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(PosePoller::is_running)
    }

    /// 创建队列等待器，会话关闭时等待会被取消
    pub fn queue_waiter(&self) -> CommandQueueWaiter {
        CommandQueueWaiter::new(
            self.channel.clone(),
            self.config.queue_poll_interval,
            self.shutdown.signal(),
        )
    }

    /// 阻塞直到控制器执行到 `target`
    pub fn wait_for_command(&self, target: u32) -> Result<QueuedCommandIndex, DriverError> {
        self.queue_waiter().wait_for(target)
    }

    /// 会话级停止句柄
    ///
    /// 触发后轮询线程和所有等待器都会退出，但端口保持打开，直到 `close` 或 drop。
    pub fn stop_handle(&self) -> StopHandle {
        self.shutdown.clone()
    }

    /// 按序关闭会话
    pub fn close(mut self) -> Result<(), DriverError> {
        self.shutdown_inner()
    }

    fn shutdown_inner(&mut self) -> Result<(), DriverError> {
        self.shutdown.stop();
        let result = self.stop_pose_poller();
        // 轮询线程已退出；仍在其他线程进行中的事务由通道锁保证先于关闭结束
        if let Some(name) = self.channel.close() {
            info!("Session on {} closed", name);
        }
        result
    }
}

impl Drop for Dobot {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown_inner() {
            error!("Session shutdown failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dobot_serial::MockSerialAdapter;
    use std::time::Duration;

    fn fast_config() -> DriverConfig {
        DriverConfig {
            pose_poll_interval: Duration::from_millis(1),
            queue_poll_interval: Duration::from_millis(1),
        }
    }

    fn pose_adapter() -> MockSerialAdapter {
        MockSerialAdapter::new(|sent: &[u8]| {
            if sent[3] == 10 {
                Ok(Message::new(10, 0, &[0u8; 32]).encode())
            } else {
                Ok(sent.to_vec())
            }
        })
    }

    #[test]
    fn test_poller_lifecycle() {
        let mut dobot = Dobot::new(pose_adapter(), fast_config());
        assert!(!dobot.is_polling());

        dobot.start_pose_poller().unwrap();
        assert!(dobot.is_polling());
        assert!(matches!(
            dobot.start_pose_poller(),
            Err(DriverError::PollerAlreadyRunning)
        ));

        dobot.stop_pose_poller().unwrap();
        assert!(!dobot.is_polling());
        dobot.start_pose_poller().unwrap();
        dobot.close().unwrap();
    }

    #[test]
    fn test_stop_handle_cancels_waiter() {
        let dobot = Dobot::new(
            MockSerialAdapter::new(|_: &[u8]| Ok(Message::new(246, 0, &[0; 4]).encode())),
            fast_config(),
        );
        dobot.stop_handle().stop();
        assert!(matches!(
            dobot.wait_for_command(5),
            Err(DriverError::Cancelled)
        ));
        // 端口仍可用
        assert_eq!(dobot.current_queued_index().unwrap().value(), 0);
    }

    #[test]
    fn test_channel_clone_sees_close() {
        let adapter = pose_adapter();
        let log = adapter.log();
        let dobot = Dobot::new(adapter, fast_config());
        let channel = dobot.channel().clone();
        drop(dobot);

        let sent = log.sent_count();
        assert!(matches!(
            channel.refresh_pose(),
            Err(DriverError::SessionClosed)
        ));
        assert_eq!(log.sent_count(), sent);
    }
}
