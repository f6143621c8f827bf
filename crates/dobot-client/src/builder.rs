//! Client 层 Builder
//!
//! 会话建立顺序：打开端口 → 下发 PTP 坐标参数 → 下发 PTP 通用参数 → 启动位姿轮询。

use crate::dobot::{Dobot, apply_motion_params};
use crate::error::ClientError;
use crate::motion::MotionParams;
use dobot_driver::DriverConfig;
use dobot_serial::{LinkConfig, SerialAdapter};
use tracing::info;

/// Dobot Builder（链式构造）
///
/// # Example
///
/// ```no_run
/// use dobot_client::{DobotBuilder, MotionParams};
///
/// let dobot = DobotBuilder::new()
///     .port("/dev/ttyUSB0")
///     .motion_params(MotionParams::new(100.0, 100.0))
///     .build()
///     .unwrap();
/// let index = dobot.home().unwrap();
/// dobot.wait_for_cmd(index).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct DobotBuilder {
    port: String,
    link_config: LinkConfig,
    driver_config: DriverConfig,
    motion_params: MotionParams,
    pose_poller: bool,
}

impl DobotBuilder {
    pub fn new() -> Self {
        Self {
            port: dobot_driver::DEFAULT_PORT.to_string(),
            link_config: LinkConfig::default(),
            driver_config: DriverConfig::default(),
            motion_params: MotionParams::default(),
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

    /// 会话建立时下发的 PTP 参数
    pub fn motion_params(mut self, params: MotionParams) -> Self {
        self.motion_params = params;
        self
    }

    /// 不启动后台位姿轮询
    pub fn without_pose_poller(mut self) -> Self {
        self.pose_poller = false;
        self
    }

    /// 打开端口并完成会话建立
    pub fn build(self) -> Result<Dobot, ClientError> {
        let driver = dobot_driver::DobotBuilder::new()
            .port(self.port.clone())
            .link_config(self.link_config.clone())
            .driver_config(self.driver_config.clone())
            .without_pose_poller()
            .build()?;
        self.bring_up(driver)
    }

    /// 使用已有链路完成会话建立
    pub fn build_with(
        self,
        adapter: impl SerialAdapter + Send + 'static,
    ) -> Result<Dobot, ClientError> {
        let driver = dobot_driver::Dobot::new(adapter, self.driver_config.clone());
        self.bring_up(driver)
    }

    fn bring_up(self, mut driver: dobot_driver::Dobot) -> Result<Dobot, ClientError> {
        // 参数下发失败时 driver 被 drop，端口随之释放
        apply_motion_params(&driver, self.motion_params, false)?;
        if self.pose_poller {
            driver.start_pose_poller()?;
        }
        info!(
            "Dobot session ready on {} (velocity {}, acceleration {})",
            self.port, self.motion_params.velocity, self.motion_params.acceleration
        );
        Ok(Dobot::from_driver(driver))
    }
}

impl Default for DobotBuilder {
    fn default() -> Self {
        Self::new()
    }
}
