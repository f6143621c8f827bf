//! 移动命令
//!
//! 移动末端到笛卡尔目标点，下发前检查坐标有效性

use crate::validation::CoordinateValidator;
use anyhow::Result;
use clap::Args;
use dobot_client::PtpMode;

/// 移动命令参数
#[derive(Args, Debug)]
pub struct MoveCommand {
    /// 目标 X（mm）
    #[arg(long, allow_negative_numbers = true)]
    pub x: f32,

    /// 目标 Y（mm）
    #[arg(long, allow_negative_numbers = true)]
    pub y: f32,

    /// 目标 Z（mm）
    #[arg(long, allow_negative_numbers = true)]
    pub z: f32,

    /// 末端旋转角（度）
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub r: f32,

    /// 直线插补（默认关节插补）
    #[arg(long)]
    pub linear: bool,

    /// 等待运动完成后再退出
    #[arg(short, long)]
    pub wait: bool,
}

impl MoveCommand {
    /// 轨迹模式
    pub fn mode(&self) -> PtpMode {
        if self.linear {
            PtpMode::MovlXyz
        } else {
            PtpMode::MovjXyz
        }
    }

    /// 校验目标点
    pub fn validate(&self) -> Result<()> {
        CoordinateValidator::default_range().validate_point(self.x, self.y, self.z, self.r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(x: f32, linear: bool) -> MoveCommand {
        MoveCommand {
            x,
            y: 0.0,
            z: 50.0,
            r: 0.0,
            linear,
            wait: false,
        }
    }

    #[test]
    fn test_mode_selection() {
        assert_eq!(cmd(200.0, false).mode(), PtpMode::MovjXyz);
        assert_eq!(cmd(200.0, true).mode(), PtpMode::MovlXyz);
    }

    #[test]
    fn test_validate() {
        assert!(cmd(200.0, false).validate().is_ok());
        assert!(cmd(f32::NAN, false).validate().is_err());
        assert!(cmd(5000.0, false).validate().is_err());
    }
}
