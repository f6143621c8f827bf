//! 传送带速度换算
//!
//! 传送带由步进电机驱动：每圈 360/1.8 步、10 倍减速、16 细分；
//! 主动轮直径 36mm。速度百分比先换算成 mm/s，再换算成电机脉冲频率。

use crate::error::ClientError;
use std::f64::consts::PI;

/// 电机每圈步数
pub const STEPS_PER_REV: f64 = 360.0 / 1.8 * 10.0 * 16.0;

/// 传送带每圈前进距离（mm）
pub const MM_PER_REV: f64 = PI * 36.0;

/// 连续运行时速度百分比的放大系数
const CONTINUOUS_GAIN: f64 = 70.0;

/// 传送带方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    /// 速度符号
    pub fn sign(self) -> f64 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }
}

impl TryFrom<i8> for Direction {
    type Error = ClientError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Direction::Forward),
            -1 => Ok(Direction::Backward),
            v => Err(ClientError::invalid(
                "direction",
                format!("must be 1 or -1, got {}", v),
            )),
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "forward" | "fwd" | "1" => Ok(Direction::Forward),
            "backward" | "back" | "-1" => Ok(Direction::Backward),
            other => Err(ClientError::invalid(
                "direction",
                format!("expected forward or backward, got '{}'", other),
            )),
        }
    }
}

fn check_percent(speed: f32) -> Result<f64, ClientError> {
    if (0.0..=100.0).contains(&speed) {
        Ok(speed as f64)
    } else {
        Err(ClientError::invalid(
            "speed",
            format!("must be within 0..=100, got {}", speed),
        ))
    }
}

/// 连续运行的电机速度（脉冲/秒，小数部分截断）
///
/// # 错误
/// - `ClientError::InvalidParameter`: 速度不在 0..=100 内
pub fn continuous_motor_speed(speed: f32, direction: Direction) -> Result<i32, ClientError> {
    let speed = check_percent(speed)?;
    Ok((CONTINUOUS_GAIN * speed * STEPS_PER_REV / MM_PER_REV * direction.sign()) as i32)
}

/// 定距运行的电机速度
pub fn distance_motor_speed(speed: f32, direction: Direction) -> Result<i32, ClientError> {
    let speed = check_percent(speed)?;
    Ok((speed * STEPS_PER_REV / MM_PER_REV * direction.sign()) as i32)
}
