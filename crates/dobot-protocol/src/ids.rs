//! 命令 ID 定义
//!
//! 协议没有序列号，请求与响应只通过命令 ID 相等来对应，
//! 因此同一时刻链路上只能有一个事务在进行。

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// 已知的命令 ID 目录
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum CommandId {
    /// 获取实时位姿
    GetPose = 10,
    /// 设置回零坐标
    SetHomeParams = 30,
    /// 执行回零
    SetHomeCmd = 31,
    /// 吸盘控制
    SetEndEffectorSuctionCup = 62,
    /// 夹爪控制
    SetEndEffectorGripper = 63,
    /// PTP 坐标轴速度/加速度
    SetPtpCoordinateParams = 81,
    /// PTP 速度/加速度比例
    SetPtpCommonParams = 83,
    /// PTP 运动指令（10 种轨迹模式）
    SetPtpCmd = 84,
    /// 连续轨迹（CP）点
    SetCpCmd = 91,
    /// 圆弧指令
    SetArcCmd = 101,
    /// 扩展电机（传送带）速度控制，0x87
    SetEMotor = 135,
    /// 扩展电机（传送带）定距控制，0x88
    SetEMotorS = 136,
    /// 获取队列当前已执行指令索引
    GetQueuedCmdCurrentIndex = 246,
}

impl CommandId {
    /// 原始 ID 字节
    pub fn as_u8(self) -> u8 {
        self.into()
    }

    /// 响应参数中是否携带队列指令索引
    ///
    /// 以队列方式下发的指令，响应参数偏移 0 处为该指令的队列索引。
    pub fn returns_queued_index(self) -> bool {
        !matches!(self, CommandId::GetPose | CommandId::GetQueuedCmdCurrentIndex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_id_values() {
        assert_eq!(CommandId::GetPose.as_u8(), 10);
        assert_eq!(CommandId::SetEMotor.as_u8(), 0x87);
        assert_eq!(CommandId::SetEMotorS.as_u8(), 0x88);
        assert_eq!(CommandId::GetQueuedCmdCurrentIndex.as_u8(), 246);
    }

    #[test]
    fn test_command_id_from_u8() {
        assert_eq!(CommandId::try_from(84).unwrap(), CommandId::SetPtpCmd);
        assert_eq!(CommandId::try_from(101).unwrap(), CommandId::SetArcCmd);
        assert!(CommandId::try_from(0).is_err());
        assert!(CommandId::try_from(255).is_err());
    }

    #[test]
    fn test_returns_queued_index() {
        assert!(CommandId::SetPtpCmd.returns_queued_index());
        assert!(CommandId::SetHomeCmd.returns_queued_index());
        assert!(!CommandId::GetPose.returns_queued_index());
        assert!(!CommandId::GetQueuedCmdCurrentIndex.returns_queued_index());
    }
}
