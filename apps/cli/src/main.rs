//! # Dobot CLI
//!
//! Command-line interface for Dobot robot arm control.
//!
//! 每个命令独立执行（连接 → 下发 → 可选等待完成 → 断开）：
//!
//! ```bash
//! # 配置默认串口
//! dobot-cli config set port /dev/ttyUSB0
//!
//! # 回零并等待完成
//! dobot-cli home --wait
//!
//! # 直线移动到目标点
//! dobot-cli move --x 200 --y 0 --z 50 --linear --wait
//!
//! # 以 json 输出当前位姿
//! dobot-cli pose --format json
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod modes;
mod validation;

use commands::{
    ConfigCommand, ConveyorCommand, GripCommand, HomeCommand, MoveCommand, PoseCommand,
    SuckCommand,
};
use modes::oneshot::OneShotMode;

/// Dobot CLI - 机械臂命令行工具
#[derive(Parser, Debug)]
#[command(name = "dobot-cli")]
#[command(about = "Command-line interface for Dobot robot arm control", long_about = None)]
#[command(version)]
struct Cli {
    /// 串口设备（覆盖配置文件）
    #[arg(short, long, global = true)]
    port: Option<String>,

    /// 输出收发帧的十六进制转储
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 配置管理
    #[command(subcommand)]
    Config(ConfigCommand),

    /// 查询当前位姿
    Pose {
        #[command(flatten)]
        args: PoseCommand,
    },

    /// 回零
    Home {
        #[command(flatten)]
        args: HomeCommand,
    },

    /// 移动到笛卡尔坐标
    Move {
        #[command(flatten)]
        args: MoveCommand,
    },

    /// 吸盘开关
    Suck {
        #[command(flatten)]
        args: SuckCommand,
    },

    /// 夹爪开合
    Grip {
        #[command(flatten)]
        args: GripCommand,
    },

    /// 运行传送带
    Conveyor {
        #[command(flatten)]
        args: ConveyorCommand,
    },

    /// 停止传送带
    ConveyorStop,
}

fn init_logging(verbose: bool) -> Result<()> {
    let mut filter =
        tracing_subscriber::EnvFilter::from_default_env().add_directive("dobot_cli=info".parse()?);
    if verbose {
        for directive in [
            "dobot_serial=trace",
            "dobot_driver=trace",
            "dobot_client=trace",
        ] {
            filter = filter.add_directive(directive.parse()?);
        }
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Config(cmd) => cmd.execute(),

        Commands::Pose { args } => {
            let mode = OneShotMode::new(cli.port)?;
            mode.pose(args)
        },

        Commands::Home { args } => {
            let mode = OneShotMode::new(cli.port)?;
            mode.home(args)
        },

        Commands::Move { args } => {
            let mode = OneShotMode::new(cli.port)?;
            mode.move_to(args)
        },

        Commands::Suck { args } => {
            let mode = OneShotMode::new(cli.port)?;
            mode.suck(args)
        },

        Commands::Grip { args } => {
            let mode = OneShotMode::new(cli.port)?;
            mode.grip(args)
        },

        Commands::Conveyor { args } => {
            let mode = OneShotMode::new(cli.port)?;
            mode.conveyor(args)
        },

        Commands::ConveyorStop => {
            let mode = OneShotMode::new(cli.port)?;
            mode.conveyor_stop()
        },
    }
}
