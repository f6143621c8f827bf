//! Builder 模式实现
//!
//! 提供链式构造 `Dobot` 会话的便捷方式。

use crate::config::DriverConfig;
use crate::dobot::Dobot;
use crate::error::DriverError;
use dobot_serial::{LinkConfig, SerialPortAdapter};
use std::time::Duration;

/// 默认串口设备
pub const DEFAULT_PORT: &str = "/dev/ttyUSB0";

/// Dobot Builder（链式构造）
///
/// # Example
///
/// ```no_run
/// use dobot_driver::DobotBuilder;
/// use std::time::Duration;
///
/// let dobot = DobotBuilder::new()
///     .port("/dev/ttyUSB1")
///     .pose_poll_interval(Duration::from_millis(100))
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct DobotBuilder {
    /// 串口设备路径
    port: String,
    /// 链路配置
    link_config: LinkConfig,
    /// 驱动配置
    driver_config: DriverConfig,
    /// 是否启动后台位姿轮询（默认启动）
    pose_poller: bool,
}

impl DobotBuilder {
    pub fn new() -> Self {
        Self {
            port: DEFAULT_PORT.to_string(),
            link_config: LinkConfig::default(),
            driver_config: DriverConfig::default(),
            pose_poller: true,
        }
    }

    /// 设置串口设备路径
    pub fn port(mut self, port: impl Into<String>) -> Self {
        self.port = port.into();
        self
    }

    pub fn link_config(mut self, config: LinkConfig) -> Self {
        self.link_config = config;
        self
    }

    pub fn driver_config(mut self, config: DriverConfig) -> Self {
        self.driver_config = config;
        self
    }

    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.link_config.read_timeout = timeout;
        self
    }

    pub fn pose_poll_interval(mut self, interval: Duration) -> Self {
        self.driver_config.pose_poll_interval = interval;
        self
    }

    pub fn queue_poll_interval(mut self, interval: Duration) -> Self {
        self.driver_config.queue_poll_interval = interval;
        self
    }

    /// 不启动后台位姿轮询（位姿只在显式查询时更新）
    pub fn without_pose_poller(mut self) -> Self {
        self.pose_poller = false;
        self
    }

    /// 打开端口并创建会话
    ///
    /// # 错误
    /// - `DriverError::Serial`: 端口不存在、被占用或参数无效
    pub fn build(self) -> Result<Dobot, DriverError> {
        let adapter = SerialPortAdapter::open(&self.port, self.link_config.clone())?;
        self.build_with(adapter)
    }

    /// 使用已有链路创建会话
    pub fn build_with(
        self,
        adapter: impl dobot_serial::SerialAdapter + Send + 'static,
    ) -> Result<Dobot, DriverError> {
        let mut dobot = Dobot::new(adapter, self.driver_config);
        if self.pose_poller {
            dobot.start_pose_poller()?;
        }
        Ok(dobot)
    }
}

impl Default for DobotBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dobot_serial::MockSerialAdapter;

    #[test]
    fn test_builder_defaults() {
        let builder = DobotBuilder::new();
        assert_eq!(builder.port, "/dev/ttyUSB0");
        assert!(builder.pose_poller);
        assert_eq!(builder.link_config, LinkConfig::default());
    }

    #[test]
    fn test_builder_chain() {
        let builder = DobotBuilder::default()
            .port("COM3")
            .read_timeout(Duration::from_millis(50))
            .queue_poll_interval(Duration::from_millis(10))
            .without_pose_poller();
        assert_eq!(builder.port, "COM3");
        assert_eq!(builder.link_config.read_timeout, Duration::from_millis(50));
        assert_eq!(
            builder.driver_config.queue_poll_interval,
            Duration::from_millis(10)
        );
        assert!(!builder.pose_poller);
    }

    #[test]
    fn test_build_with_starts_poller() {
        let dobot = DobotBuilder::new()
            .pose_poll_interval(Duration::from_millis(1))
            .build_with(MockSerialAdapter::echo())
            .unwrap();
        assert!(dobot.is_polling());
        dobot.close().unwrap();

        let dobot = DobotBuilder::new()
            .without_pose_poller()
            .build_with(MockSerialAdapter::echo())
            .unwrap();
        assert!(!dobot.is_polling());
    }

    #[test]
    fn test_build_missing_port_fails() {
        let result = DobotBuilder::new()
            .port("/dev/this-port-does-not-exist")
            .without_pose_poller()
            .build();
        assert!(matches!(result, Err(DriverError::Serial(_))));
    }
}
