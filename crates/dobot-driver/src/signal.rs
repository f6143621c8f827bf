//! 停止信号
//!
//! `StopHandle` 持有唯一的 `Sender`，触发停止就是 drop 掉它；所有克隆的
//! `StopSignal` 立即观察到 `Disconnected`。`wait` 兼作可取消的周期睡眠，
//! 停止后轮询循环无需等满一个周期即可退出。

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError, bounded};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// 停止触发端（可克隆，任一克隆触发后全部失效）
#[derive(Debug, Clone)]
pub struct StopHandle {
    tx: Arc<Mutex<Option<Sender<()>>>>,
    rx: Receiver<()>,
}

impl StopHandle {
    pub fn new() -> Self {
        let (tx, rx) = bounded(0);
        Self {
            tx: Arc::new(Mutex::new(Some(tx))),
            rx,
        }
    }

    /// 获取一个观察端
    pub fn signal(&self) -> StopSignal {
        StopSignal {
            rx: self.rx.clone(),
        }
    }

    /// 触发停止（幂等）
    pub fn stop(&self) {
        self.tx.lock().take();
    }

    pub fn is_stopped(&self) -> bool {
        self.tx.lock().is_none()
    }
}

impl Default for StopHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// 停止观察端
#[derive(Debug, Clone)]
pub struct StopSignal {
    rx: Receiver<()>,
}

impl StopSignal {
    /// 永不触发的信号
    pub fn never() -> Self {
        // 泄漏的 Sender 保证通道永不断开
        let (tx, rx) = bounded(0);
        std::mem::forget(tx);
        Self { rx }
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self.rx.try_recv(), Err(TryRecvError::Disconnected))
    }

    /// 睡眠最多 `timeout`，期间被停止则提前返回
    ///
    /// 返回 `true` 表示已触发停止。
    pub fn wait(&self, timeout: Duration) -> bool {
        !matches!(self.rx.recv_timeout(timeout), Err(RecvTimeoutError::Timeout))
    }
}
