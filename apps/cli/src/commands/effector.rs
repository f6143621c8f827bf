//! 末端执行器命令（吸盘、夹爪）

use clap::{Args, ValueEnum};

/// 开关状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    pub fn enabled(self) -> bool {
        self == Switch::On
    }
}

/// 吸盘命令参数
#[derive(Args, Debug)]
pub struct SuckCommand {
    /// on: 吸取，off: 释放
    #[arg(value_enum)]
    pub state: Switch,

    /// 等待指令执行完成
    #[arg(short, long)]
    pub wait: bool,
}

/// 夹爪命令参数
#[derive(Args, Debug)]
pub struct GripCommand {
    /// on: 夹紧，off: 张开
    #[arg(value_enum)]
    pub state: Switch,

    /// 等待指令执行完成
    #[arg(short, long)]
    pub wait: bool,
}
