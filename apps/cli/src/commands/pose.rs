//! 位姿查询命令

use anyhow::Result;
use clap::{Args, ValueEnum};
use dobot_client::Pose;

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// 位姿查询命令参数
#[derive(Args, Debug)]
pub struct PoseCommand {
    /// 输出格式
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl PoseCommand {
    /// 按选定格式渲染位姿
    pub fn render(&self, pose: &Pose) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(pose)?),
            OutputFormat::Table => {
                let mut out = String::from("📊 末端位姿:\n");
                for (name, value) in [("x", pose.x), ("y", pose.y), ("z", pose.z)] {
                    out.push_str(&format!("  {}: {:>9.3} mm\n", name, value));
                }
                out.push_str(&format!("  r: {:>9.3}°\n", pose.r));
                out.push_str("📐 关节角度:\n");
                for (i, angle) in pose.joints().iter().enumerate() {
                    out.push_str(&format!("  J{}: {:>8.3}°\n", i + 1, angle));
                }
                Ok(out)
            },
        }
    }
}
