//! 配置管理命令
//!
//! 用于管理 CLI 配置（串口、PTP 速度和加速度）

use anyhow::{Context, Result};
use clap::{Subcommand, ValueEnum};
use dobot_client::MotionParams;
use std::fs;
use std::path::{Path, PathBuf};

/// 配置文件路径
fn config_dir() -> Result<PathBuf> {
    let mut path = dirs::config_dir().ok_or_else(|| anyhow::anyhow!("无法确定配置目录"))?;

    path.push("dobot");
    Ok(path)
}

pub fn config_file() -> Result<PathBuf> {
    let mut path = config_dir()?;
    path.push("config.toml");
    Ok(path)
}

/// CLI 配置
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// 默认串口设备
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,

    /// PTP 速度
    #[serde(skip_serializing_if = "Option::is_none")]
    pub velocity: Option<f32>,

    /// PTP 加速度
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acceleration: Option<f32>,
}

impl CliConfig {
    /// 加载默认位置的配置，文件不存在时返回默认配置
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).context("读取配置文件失败")?;
        toml::from_str(&content).with_context(|| format!("解析配置文件失败: {}", path.display()))
    }

    /// 保存到默认位置
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_file()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).context("创建配置目录失败")?;
        }
        let body = toml::to_string_pretty(self).context("序列化配置失败")?;
        let content = format!("# Dobot CLI Configuration\n\n{}", body);
        fs::write(path, content).context("写入配置文件失败")?;
        Ok(())
    }

    /// 配置文件中的运动参数，未设置的项使用默认值
    pub fn motion_params(&self) -> MotionParams {
        let defaults = MotionParams::default();
        MotionParams::new(
            self.velocity.unwrap_or(defaults.velocity),
            self.acceleration.unwrap_or(defaults.acceleration),
        )
    }

    /// 检查配置值是否有效
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("velocity", self.velocity), ("acceleration", self.acceleration)] {
            if let Some(v) = value
                && !(v.is_finite() && v > 0.0)
            {
                anyhow::bail!("{} 必须为正数，当前为 {}", name, v);
            }
        }
        if let Some(port) = &self.port
            && port.trim().is_empty()
        {
            anyhow::bail!("port 不能为空");
        }
        Ok(())
    }
}

/// 配置项
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigKey {
    Port,
    Velocity,
    Acceleration,
}

/// 配置命令
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// 设置配置项（如 `config set port /dev/ttyUSB0`）
    Set {
        /// 配置项名称
        #[arg(value_enum)]
        key: ConfigKey,

        /// 配置值
        value: String,
    },

    /// 获取配置项
    Get {
        /// 配置项名称（port, velocity, acceleration, all）
        #[arg(default_value = "all")]
        key: String,
    },

    /// 检查配置
    Check,
}

impl ConfigCommand {
    pub fn execute(self) -> Result<()> {
        match self {
            ConfigCommand::Set { key, value } => Self::set_(key, &value),

            ConfigCommand::Get { key } => Self::get_(&key),

            ConfigCommand::Check => Self::check_(),
        }
    }

    fn set_(key: ConfigKey, value: &str) -> Result<()> {
        let mut config = CliConfig::load()?;
        apply_set(&mut config, key, value)?;
        config.validate()?;
        config.save()?;

        println!("✅ 配置已保存: {}", config_file()?.display());
        Ok(())
    }

    fn get_(key: &str) -> Result<()> {
        let config = CliConfig::load()?;
        println!("{}", describe(&config, key));
        Ok(())
    }

    fn check_() -> Result<()> {
        let path = config_file()?;
        let config = CliConfig::load_from(&path)?;

        println!("配置文件: {}", path.display());
        println!("{}", describe(&config, "all"));
        config.validate()?;
        println!("✅ 配置有效");

        Ok(())
    }
}

fn apply_set(config: &mut CliConfig, key: ConfigKey, value: &str) -> Result<()> {
    let number = || {
        value
            .trim()
            .parse::<f32>()
            .with_context(|| format!("无法解析数值: {}", value))
    };
    match key {
        ConfigKey::Port => config.port = Some(value.trim().to_string()),
        ConfigKey::Velocity => config.velocity = Some(number()?),
        ConfigKey::Acceleration => config.acceleration = Some(number()?),
    }
    Ok(())
}

fn describe(config: &CliConfig, key: &str) -> String {
    fn show<T: std::fmt::Display>(value: &Option<T>) -> String {
        value.as_ref().map_or_else(|| "(未设置)".to_string(), |v| v.to_string())
    }

    match key {
        "port" => show(&config.port),
        "velocity" => show(&config.velocity),
        "acceleration" => show(&config.acceleration),
        _ => format!(
            "Dobot CLI 配置:\n  串口: {}\n  速度: {}\n  加速度: {}",
            show(&config.port),
            show(&config.velocity),
            show(&config.acceleration)
        ),
    }
}
