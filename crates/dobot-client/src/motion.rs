//! 运动参数

/// PTP 运动参数
///
/// 会话建立时依次下发坐标参数和通用参数。
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotionParams {
    /// 速度（坐标轴 mm/s，同时用作通用速度比例）
    pub velocity: f32,
    /// 加速度
    pub acceleration: f32,
}

impl MotionParams {
    pub fn new(velocity: f32, acceleration: f32) -> Self {
        Self {
            velocity,
            acceleration,
        }
    }
}

impl Default for MotionParams {
    fn default() -> Self {
        Self::new(200.0, 200.0)
    }
}
