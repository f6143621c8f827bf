//! 传送带命令

use clap::Args;
use dobot_client::{Direction, MotorInterface};

/// 传送带命令参数
#[derive(Args, Debug)]
pub struct ConveyorCommand {
    /// 速度百分比（0-100）
    #[arg(short, long)]
    pub speed: f32,

    /// 方向（forward / backward）
    #[arg(short, long, default_value = "forward")]
    pub direction: Direction,

    /// 运行距离（电机脉冲数）；不指定时连续运行
    #[arg(long)]
    pub distance: Option<u32>,

    /// 使用 2 号电机接口
    #[arg(long)]
    pub stepper2: bool,
}

impl ConveyorCommand {
    pub fn interface(&self) -> MotorInterface {
        if self.stepper2 {
            MotorInterface::Stepper2
        } else {
            MotorInterface::Stepper1
        }
    }
}
