//! 帧间隔控制
//!
//! 控制器在连续两帧之间需要一段静默时间，否则会丢弃后到的帧。
//! 发送前等待到距上一次收发完成至少 `min_gap`。

use std::time::{Duration, Instant};

/// 帧间隔控制器
#[derive(Debug, Clone)]
pub struct FramePacer {
    min_gap: Duration,
    last_io: Option<Instant>,
}

impl FramePacer {
    pub fn new(min_gap: Duration) -> Self {
        Self {
            min_gap,
            last_io: None,
        }
    }

    /// 距允许发送还需等待的时间
    pub fn remaining(&self) -> Duration {
        match self.last_io {
            Some(last) => self.min_gap.saturating_sub(last.elapsed()),
            None => Duration::ZERO,
        }
    }

    /// 阻塞直到满足最小帧间隔
    pub fn wait(&self) {
        let remaining = self.remaining();
        if !remaining.is_zero() {
            spin_sleep::sleep(remaining);
        }
    }

    /// 记录一次收发完成
    pub fn mark(&mut self) {
        self.last_io = Some(Instant::now());
    }

    pub fn min_gap(&self) -> Duration {
        self.min_gap
    }
}
