//! 输入验证模块
//!
//! 下发前拦截明显无效的目标点，真正的可达性由控制器判断

use anyhow::Result;

/// 笛卡尔坐标验证器
pub struct CoordinateValidator {
    /// 水平方向最大半径（mm）
    max_radius: f32,
    /// Z 轴范围（mm）
    z_range: (f32, f32),
    /// 旋转角范围（度）
    r_range: (f32, f32),
}

impl CoordinateValidator {
    /// 创建新的坐标验证器
    pub fn new(max_radius: f32, z_range: (f32, f32), r_range: (f32, f32)) -> Self {
        Self {
            max_radius,
            z_range,
            r_range,
        }
    }

    /// 使用默认范围创建验证器（半径 400mm，Z ±250mm，R ±180°）
    pub fn default_range() -> Self {
        Self::new(400.0, (-250.0, 250.0), (-180.0, 180.0))
    }

    /// 验证目标点
    ///
    /// # 错误
    /// 如果：
    /// - 任一坐标为 NaN 或无穷大
    /// - 水平半径、Z 或 R 超出范围
    pub fn validate_point(&self, x: f32, y: f32, z: f32, r: f32) -> Result<()> {
        for (name, value) in [("x", x), ("y", y), ("z", z), ("r", r)] {
            if !value.is_finite() {
                anyhow::bail!("坐标 {} 无效: {}", name, value);
            }
        }

        let radius = x.hypot(y);
        if radius > self.max_radius {
            anyhow::bail!(
                "目标点水平半径 {:.1} mm 超出范围 {:.1} mm",
                radius,
                self.max_radius
            );
        }
        Self::check_range("z", z, self.z_range)?;
        Self::check_range("r", r, self.r_range)?;
        Ok(())
    }

    fn check_range(name: &str, value: f32, (min, max): (f32, f32)) -> Result<()> {
        if value < min || value > max {
            anyhow::bail!(
                "坐标 {} = {:.3} 超出范围 [{:.3}, {:.3}]",
                name,
                value,
                min,
                max
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_point() {
        let validator = CoordinateValidator::default_range();
        assert!(validator.validate_point(200.0, 0.0, 50.0, 0.0).is_ok());
        assert!(validator.validate_point(-150.0, 150.0, -40.0, 90.0).is_ok());
    }

    #[test]
    fn test_non_finite_rejected() {
        let validator = CoordinateValidator::default_range();
        assert!(validator.validate_point(f32::NAN, 0.0, 0.0, 0.0).is_err());
        assert!(validator.validate_point(0.0, f32::INFINITY, 0.0, 0.0).is_err());
    }

    #[test]
    fn test_out_of_range_rejected() {
        let validator = CoordinateValidator::new(300.0, (-10.0, 10.0), (-90.0, 90.0));
        let err = validator.validate_point(300.0, 10.0, 0.0, 0.0).unwrap_err();
        assert!(err.to_string().contains("水平半径"));
        assert!(validator.validate_point(0.0, 0.0, 11.0, 0.0).is_err());
        assert!(validator.validate_point(0.0, 0.0, 0.0, -91.0).is_err());
    }
}
