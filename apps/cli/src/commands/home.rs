//! 回零命令

use clap::Args;

/// 回零命令参数
#[derive(Args, Debug)]
pub struct HomeCommand {
    /// 等待回零完成后再退出
    #[arg(short, long)]
    pub wait: bool,
}
