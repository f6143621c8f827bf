//! One-shot 模式
//!
//! 每个命令独立执行：
//! 1. 读取配置
//! 2. 连接机械臂
//! 3. 执行操作（可选等待完成）
//! 4. 断开连接

use anyhow::{Context, Result};
use dobot_client::{DEFAULT_PORT, Dobot, DobotBuilder, MotionParams, QueuedCommandIndex};
use tracing::{info, warn};

use crate::commands::config::CliConfig;
use crate::commands::{
    ConveyorCommand, GripCommand, HomeCommand, MoveCommand, PoseCommand, SuckCommand,
};

/// One-shot 模式配置
#[derive(Debug, Clone, PartialEq)]
pub struct OneShotConfig {
    /// 串口设备
    pub port: String,

    /// 会话建立时下发的 PTP 参数
    pub motion: MotionParams,
}

impl OneShotConfig {
    /// 合并命令行参数与配置文件（命令行优先）
    pub fn resolve(port: Option<String>, file: &CliConfig) -> Self {
        Self {
            port: port
                .or_else(|| file.port.clone())
                .unwrap_or_else(|| DEFAULT_PORT.to_string()),
            motion: file.motion_params(),
        }
    }
}

/// One-shot 模式
pub struct OneShotMode {
    config: OneShotConfig,
}

impl OneShotMode {
    /// 创建新的 One-shot 模式实例
    pub fn new(port: Option<String>) -> Result<Self> {
        let file = CliConfig::load()?;
        file.validate().context("配置文件无效")?;
        Ok(Self {
            config: OneShotConfig::resolve(port, &file),
        })
    }

    /// 连接机械臂并安装 Ctrl-C 处理（取消等待，随后按序关闭）
    fn connect(&self) -> Result<Dobot> {
        println!("🔌 连接到 {} ...", self.config.port);
        let dobot = DobotBuilder::new()
            .port(self.config.port.clone())
            .motion_params(self.config.motion)
            .build()
            .with_context(|| format!("连接 {} 失败", self.config.port))?;

        let stop = dobot.stop_handle();
        if let Err(e) = ctrlc::set_handler(move || {
            eprintln!("\n收到中断信号，正在停止...");
            stop.stop();
        }) {
            warn!("Failed to set signal handler: {}", e);
        }

        Ok(dobot)
    }

    fn finish(dobot: Dobot, index: QueuedCommandIndex, wait: bool) -> Result<()> {
        println!("📨 已入队: {}", index);
        if wait {
            println!("⏳ 等待执行完成...");
            dobot.wait_for_cmd(index).context("等待指令完成失败")?;
            println!("✅ 完成");
        }
        dobot.close()?;
        Ok(())
    }

    /// 位姿查询
    pub fn pose(&self, args: PoseCommand) -> Result<()> {
        let dobot = self.connect()?;
        let pose = dobot.refresh_pose().context("查询位姿失败")?;
        println!("{}", args.render(&pose)?.trim_end());
        dobot.close()?;
        Ok(())
    }

    /// 回零
    pub fn home(&self, args: HomeCommand) -> Result<()> {
        let dobot = self.connect()?;
        info!("Homing");
        let index = dobot.home()?;
        Self::finish(dobot, index, args.wait)
    }

    /// 移动命令
    pub fn move_to(&self, args: MoveCommand) -> Result<()> {
        args.validate()?;

        let dobot = self.connect()?;
        let index = dobot.go_with_mode(args.mode(), args.x, args.y, args.z, args.r)?;
        Self::finish(dobot, index, args.wait)
    }

    /// 吸盘
    pub fn suck(&self, args: SuckCommand) -> Result<()> {
        let dobot = self.connect()?;
        let index = dobot.suck(args.state.enabled())?;
        Self::finish(dobot, index, args.wait)
    }

    /// 夹爪
    pub fn grip(&self, args: GripCommand) -> Result<()> {
        let dobot = self.connect()?;
        let index = dobot.grip(args.state.enabled())?;
        Self::finish(dobot, index, args.wait)
    }

    /// 传送带
    pub fn conveyor(&self, args: ConveyorCommand) -> Result<()> {
        let dobot = self.connect()?;
        let index = match args.distance {
            Some(distance) => dobot.conveyor_belt_distance(
                args.speed,
                distance,
                args.direction,
                args.interface(),
            )?,
            None => dobot.conveyor_belt(args.speed, args.direction, args.interface())?,
        };
        Self::finish(dobot, index, false)
    }

    /// 停止传送带
    pub fn conveyor_stop(&self) -> Result<()> {
        let dobot = self.connect()?;
        let index = dobot.stop_conveyor()?;
        Self::finish(dobot, index, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_prefers_command_line() {
        let file = CliConfig {
            port: Some("/dev/ttyACM0".to_string()),
            velocity: Some(80.0),
            acceleration: None,
        };

        let config = OneShotConfig::resolve(Some("COM3".to_string()), &file);
        assert_eq!(config.port, "COM3");
        assert_eq!(config.motion, MotionParams::new(80.0, 200.0));

        let config = OneShotConfig::resolve(None, &file);
        assert_eq!(config.port, "/dev/ttyACM0");
    }

    #[test]
    fn test_resolve_default_port() {
        let config = OneShotConfig::resolve(None, &CliConfig::default());
        assert_eq!(config.port, "/dev/ttyUSB0");
        assert_eq!(config.motion, MotionParams::default());
    }
}
