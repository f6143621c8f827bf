//! 后台位姿轮询
//!
//! 每个周期通过 `CommandChannel` 查询一次位姿并覆盖会话位姿。单次失败只记录日志，
//! 下个周期继续；停止信号在周期边界检查，进行中的事务总会完整结束。

use crate::channel::CommandChannel;
use crate::error::DriverError;
use crate::signal::{StopHandle, StopSignal};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, error, info};

/// 位姿轮询线程句柄
///
/// drop 时停止并等待线程退出。
pub struct PosePoller {
    stop: StopHandle,
    thread: Option<JoinHandle<()>>,
}

impl PosePoller {
    /// 启动轮询线程
    ///
    /// `shutdown` 是会话级停止信号，它和轮询器自身的停止句柄任一触发都会让线程退出。
    pub fn spawn(
        channel: CommandChannel,
        interval: Duration,
        shutdown: StopSignal,
    ) -> Result<Self, DriverError> {
        let stop = StopHandle::new();
        let own = stop.signal();

        let thread = thread::Builder::new()
            .name("dobot-pose-poller".into())
            .spawn(move || poll_loop(channel, interval, own, shutdown))
            .map_err(|e| DriverError::IoThread(e.to_string()))?;

        info!("Pose poller started (interval {:?})", interval);
        Ok(Self {
            stop,
            thread: Some(thread),
        })
    }

    /// 线程是否仍在运行
    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// 停止并等待当前周期结束
    pub fn stop(mut self) -> Result<(), DriverError> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Result<(), DriverError> {
        self.stop.stop();
        match self.thread.take() {
            Some(handle) => {
                handle
                    .join()
                    .map_err(|_| DriverError::IoThread("pose poller panicked".into()))?;
                info!("Pose poller stopped");
                Ok(())
            },
            None => Ok(()),
        }
    }
}

impl Drop for PosePoller {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            error!("{}", e);
        }
    }
}

fn poll_loop(channel: CommandChannel, interval: Duration, own: StopSignal, shutdown: StopSignal) {
    loop {
        if own.is_stopped() || shutdown.is_stopped() {
            break;
        }

        match channel.refresh_pose() {
            Ok(pose) => debug!(
                "Pose x={:.2} y={:.2} z={:.2} r={:.2}",
                pose.x, pose.y, pose.z, pose.r
            ),
            Err(DriverError::SessionClosed) => break,
            Err(e) => debug!("Pose poll failed: {}", e),
        }

        if own.wait(interval) {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dobot_protocol::Message;
    use dobot_serial::{MockSerialAdapter, SerialError};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Instant;

    fn pose_bytes(x: f32) -> Vec<u8> {
        let mut params = x.to_le_bytes().to_vec();
        params.resize(32, 0);
        Message::new(10, 0, &params).encode()
    }

    fn wait_until(deadline: Duration, mut f: impl FnMut() -> bool) -> bool {
        let start = Instant::now();
        while start.elapsed() < deadline {
            if f() {
                return true;
            }
            thread::sleep(Duration::from_millis(2));
        }
        f()
    }

    #[test]
    fn test_poller_updates_pose() {
        let channel = CommandChannel::new(MockSerialAdapter::new(|_: &[u8]| Ok(pose_bytes(7.5))));
        let poller =
            PosePoller::spawn(channel.clone(), Duration::from_millis(5), StopSignal::never())
                .unwrap();

        assert!(wait_until(Duration::from_secs(5), || channel.pose().x == 7.5));
        assert!(poller.is_running());
        poller.stop().unwrap();
    }

    #[test]
    fn test_poller_survives_failures() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let channel = CommandChannel::new(MockSerialAdapter::new(move |_: &[u8]| {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            match n % 3 {
                0 => Err(SerialError::SyncTimeout { attempts: 5 }),
                1 => Ok(vec![0x00, 0x01]),
                _ => Ok(pose_bytes(n as f32)),
            }
        }));
        let poller =
            PosePoller::spawn(channel.clone(), Duration::from_millis(1), StopSignal::never())
                .unwrap();

        assert!(wait_until(Duration::from_secs(5), || calls.load(Ordering::SeqCst) >= 9));
        assert!(poller.is_running());
        poller.stop().unwrap();
        assert!(channel.pose().x >= 2.0);
    }

    #[test]
    fn test_session_shutdown_stops_poller() {
        let channel = CommandChannel::new(MockSerialAdapter::new(|_: &[u8]| Ok(pose_bytes(1.0))));
        let shutdown = StopHandle::new();
        let poller =
            PosePoller::spawn(channel, Duration::from_secs(3600), shutdown.signal()).unwrap();

        shutdown.stop();
        // 线程正在长周期睡眠，只有自身停止句柄能唤醒它；stop() 必须及时返回
        let start = Instant::now();
        poller.stop().unwrap();
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_poller_exits_when_channel_closed() {
        let channel = CommandChannel::new(MockSerialAdapter::new(|_: &[u8]| Ok(pose_bytes(1.0))));
        channel.close();
        let poller =
            PosePoller::spawn(channel, Duration::from_millis(1), StopSignal::never()).unwrap();
        assert!(wait_until(Duration::from_secs(5), || !poller.is_running()));
    }
}
