//! 帧重组
//!
//! 字节流中除两个连续的 `0xAA` 外没有其他分隔符，接收分两个阶段：
//!
//! 1. 逐字节扫描，直到连续读到两个 `0xAA`（最多 `sync_attempts` 个字节）
//! 2. 读取长度字节，再精确读取 `length + 1` 个字节（参数区 + 校验和）
//!
//! 返回包含帧头的完整帧，交给协议层解析。

use crate::SerialError;
use dobot_protocol::MARKER_BYTE;
use std::io::{ErrorKind, Read};

/// 从字节流中读取一帧
///
/// # 错误
/// - `SerialError::SyncTimeout`: 尝试次数用尽或读取超时仍未找到帧头
/// - `SerialError::ShortRead`: 读取超时前未收到长度字节声明的全部字节
/// - `SerialError::Io`: 底层读取失败
pub fn read_frame<R: Read + ?Sized>(
    reader: &mut R,
    sync_attempts: usize,
) -> Result<Vec<u8>, SerialError> {
    sync_to_marker(reader, sync_attempts)?;

    let mut length = [0u8; 1];
    if read_available(reader, &mut length)? == 0 {
        return Err(SerialError::ShortRead {
            expected: 1,
            actual: 0,
        });
    }
    let length = length[0];

    let mut frame = Vec::with_capacity(length as usize + 4);
    frame.extend_from_slice(&[MARKER_BYTE, MARKER_BYTE, length]);
    frame.resize(3 + length as usize + 1, 0);

    let expected = length as usize + 1;
    let actual = read_available(reader, &mut frame[3..])?;
    if actual < expected {
        return Err(SerialError::ShortRead { expected, actual });
    }

    Ok(frame)
}

fn sync_to_marker<R: Read + ?Sized>(reader: &mut R, attempts: usize) -> Result<(), SerialError> {
    let mut last = None;
    let mut byte = [0u8; 1];

    for attempt in 1..=attempts {
        if read_available(reader, &mut byte)? == 0 {
            return Err(SerialError::SyncTimeout { attempts: attempt });
        }
        if byte[0] == MARKER_BYTE && last == Some(MARKER_BYTE) {
            return Ok(());
        }
        last = Some(byte[0]);
    }

    Err(SerialError::SyncTimeout { attempts })
}

/// 尽量填满 `buf`，超时或 EOF 时返回已读取的字节数
fn read_available<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> Result<usize, SerialError> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) if matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) => break,
            Err(e) => return Err(SerialError::Io(e)),
        }
    }
    Ok(filled)
}
