//! 基于 `serialport` 的链路实现
//!
//! 固定 115200-8N1、无流控。Unix 下 `serialport` 默认以独占方式（TIOCEXCL）打开设备，
//! 同一设备路径只能被一个进程持有。

use crate::{FramePacer, LinkConfig, SerialAdapter, SerialError, read_frame};
use serialport::{ClearBuffer, DataBits, FlowControl, Parity, SerialPort, StopBits};
use std::io::Write;
use tracing::{info, trace};

/// 串口适配器
///
/// 端口在 `open` 时打开，在 drop 时关闭。
pub struct SerialPortAdapter {
    port: Box<dyn SerialPort>,
    config: LinkConfig,
    pacer: FramePacer,
    name: String,
}

impl SerialPortAdapter {
    /// 打开串口设备
    ///
    /// # 错误
    /// - `SerialError::Device`: 设备不存在、被占用或参数无效
    ///
    /// # Example
    ///
    /// ```no_run
    /// use dobot_serial::{LinkConfig, SerialPortAdapter};
    ///
    /// let adapter = SerialPortAdapter::open("/dev/ttyUSB0", LinkConfig::default()).unwrap();
    /// ```
    pub fn open(path: &str, config: LinkConfig) -> Result<Self, SerialError> {
        let port = serialport::new(path, config.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(config.read_timeout)
            .open()?;

        info!("Serial port {} opened at {} baud", path, config.baud_rate);
        Ok(Self::from_port(port, config))
    }

    /// 包装一个已打开的端口
    pub fn from_port(port: Box<dyn SerialPort>, config: LinkConfig) -> Self {
        let name = port.name().unwrap_or_else(|| "serial".to_string());
        Self {
            port,
            pacer: FramePacer::new(config.min_frame_gap),
            config,
            name,
        }
    }

    pub fn config(&self) -> &LinkConfig {
        &self.config
    }
}

impl SerialAdapter for SerialPortAdapter {
    fn send(&mut self, bytes: &[u8]) -> Result<(), SerialError> {
        self.pacer.wait();
        trace!(">> {}", hex::encode_upper(bytes));
        self.port.write_all(bytes)?;
        self.port.flush()?;
        self.pacer.mark();
        Ok(())
    }

    fn receive(&mut self) -> Result<Vec<u8>, SerialError> {
        let result = read_frame(&mut *self.port, self.config.sync_attempts);
        self.pacer.mark();
        let frame = result?;
        trace!("<< {}", hex::encode_upper(&frame));
        Ok(frame)
    }

    fn clear_input(&mut self) -> Result<(), SerialError> {
        self.port.clear(ClearBuffer::Input)?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for SerialPortAdapter {
    fn drop(&mut self) {
        info!("Serial port {} closed", self.name);
    }
}

/// 列出系统中可用的串口设备路径
pub fn available_ports() -> Result<Vec<String>, SerialError> {
    Ok(serialport::available_ports()?
        .into_iter()
        .map(|info| info.port_name)
        .collect())
}
