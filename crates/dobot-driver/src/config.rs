//! 驱动配置

use std::time::Duration;

/// 驱动配置
///
/// # Example
///
/// ```
/// use dobot_driver::DriverConfig;
/// use std::time::Duration;
///
/// let config = DriverConfig {
///     pose_poll_interval: Duration::from_millis(100),
///     ..DriverConfig::default()
/// };
/// assert_eq!(config.queue_poll_interval, Duration::from_millis(500));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    /// 位姿轮询周期（默认 200ms）
    pub pose_poll_interval: Duration,
    /// 队列索引轮询周期（默认 500ms）
    pub queue_poll_interval: Duration,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            pose_poll_interval: Duration::from_millis(200),
            queue_poll_interval: Duration::from_millis(500),
        }
    }
}
