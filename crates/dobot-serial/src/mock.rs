//! Mock 链路适配器
//!
//! 用于无硬件测试：每次 `send` 时调用应答函数生成响应，随后的 `receive` 取出该响应。
//! 所有发送的帧和 `clear_input` 调用都记录在 [`MockLog`] 中，测试可以在适配器被
//! 移入驱动后继续检查。

use crate::{SerialAdapter, SerialError};
use parking_lot::Mutex;
use std::sync::Arc;

type Responder = Box<dyn FnMut(&[u8]) -> Result<Vec<u8>, SerialError> + Send>;

/// 收发记录（可跨线程共享）
#[derive(Debug, Clone, Default)]
pub struct MockLog {
    inner: Arc<Mutex<MockLogInner>>,
}

#[derive(Debug, Default)]
struct MockLogInner {
    sent: Vec<Vec<u8>>,
    received: usize,
    clears: usize,
}

impl MockLog {
    /// 已发送的所有帧
    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.inner.lock().sent.clone()
    }

    /// 已发送帧的数量
    pub fn sent_count(&self) -> usize {
        self.inner.lock().sent.len()
    }

    /// 已发送的帧中命令 ID 为 `id` 的数量
    pub fn sent_with_id(&self, id: u8) -> usize {
        self.inner
            .lock()
            .sent
            .iter()
            .filter(|frame| frame.get(3) == Some(&id))
            .count()
    }

    /// `receive` 调用次数
    pub fn received_count(&self) -> usize {
        self.inner.lock().received
    }

    /// `clear_input` 调用次数
    pub fn clear_count(&self) -> usize {
        self.inner.lock().clears
    }
}

/// 脚本化的 Mock 适配器
pub struct MockSerialAdapter {
    responder: Responder,
    pending: Option<Result<Vec<u8>, SerialError>>,
    log: MockLog,
}

impl MockSerialAdapter {
    /// 使用应答函数创建适配器
    ///
    /// 应答函数收到完整的请求帧，返回的字节（或错误）将由下一次 `receive` 返回。
    pub fn new<F>(responder: F) -> Self
    where
        F: FnMut(&[u8]) -> Result<Vec<u8>, SerialError> + Send + 'static,
    {
        Self {
            responder: Box::new(responder),
            pending: None,
            log: MockLog::default(),
        }
    }

    /// 原样回显请求帧
    pub fn echo() -> Self {
        Self::new(|sent: &[u8]| Ok(sent.to_vec()))
    }

    /// 收发记录句柄
    pub fn log(&self) -> MockLog {
        self.log.clone()
    }
}

impl SerialAdapter for MockSerialAdapter {
    fn send(&mut self, bytes: &[u8]) -> Result<(), SerialError> {
        self.log.inner.lock().sent.push(bytes.to_vec());
        self.pending = Some((self.responder)(bytes));
        Ok(())
    }

    fn receive(&mut self) -> Result<Vec<u8>, SerialError> {
        self.log.inner.lock().received += 1;
        self.pending
            .take()
            .unwrap_or(Err(SerialError::SyncTimeout { attempts: 0 }))
    }

    fn clear_input(&mut self) -> Result<(), SerialError> {
        self.log.inner.lock().clears += 1;
        Ok(())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo_roundtrip() {
        let mut adapter = MockSerialAdapter::echo();
        let log = adapter.log();
        adapter.clear_input().unwrap();
        adapter.send(&[0xAA, 0xAA, 0x02, 0x0A, 0x00, 0xF6]).unwrap();
        assert_eq!(adapter.receive().unwrap()[3], 0x0A);
        assert_eq!(log.sent_count(), 1);
        assert_eq!(log.sent_with_id(0x0A), 1);
        assert_eq!(log.clear_count(), 1);
        assert_eq!(log.received_count(), 1);
    }

    #[test]
    fn test_receive_without_send_times_out() {
        let mut adapter = MockSerialAdapter::echo();
        assert!(matches!(
            adapter.receive(),
            Err(SerialError::SyncTimeout { .. })
        ));
    }

    #[test]
    fn test_responder_error_is_returned() {
        let mut adapter = MockSerialAdapter::new(|_: &[u8]| Err(SerialError::Timeout));
        adapter.send(&[0x00]).unwrap();
        assert!(matches!(adapter.receive(), Err(SerialError::Timeout)));
    }
}
