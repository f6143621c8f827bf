//! 指令帧结构体定义
//!
//! 包含所有运动/IO 指令的结构体，提供构建指令参数的方法
//! 和转换为 `Message` 的方法。参数布局由命令 ID 决定，多字节字段为小端。

use crate::{CommandId, Message, Params, ProtocolError};
use bilge::prelude::*;

// ============================================================================
// 控制字节
// ============================================================================

/// 控制字节位域
///
/// - Bit 0: 队列执行（置 1 时指令进入控制器队列，响应携带队列索引）
/// - Bit 1: 读/写（置 1 为写）
#[bitsize(8)]
#[derive(FromBits, DebugBits, Clone, Copy, Default, PartialEq)]
pub struct ControlFlags {
    pub queued: bool,  // Bit 0
    pub write: bool,   // Bit 1
    pub reserved: u6,  // Bit 2-7: 保留
}

impl ControlFlags {
    /// 从原始字节解析
    pub fn from_byte(byte: u8) -> Self {
        ControlFlags::from(u8::new(byte))
    }

    /// 转换为原始字节
    pub fn as_byte(self) -> u8 {
        u8::from(self).value()
    }

    /// 立即读取（0x00），用于查询类指令
    pub fn read() -> Self {
        Self::from_byte(0x00)
    }

    /// 队列写入（0x03），运动/IO 指令的默认方式
    pub fn queued_write() -> Self {
        let mut flags = Self::from_byte(0x00);
        flags.set_queued(true);
        flags.set_write(true);
        flags
    }
}

// ============================================================================
// PTP 模式
// ============================================================================

/// PTP 轨迹模式
///
/// JUMP：抬升-平移-下降的门型轨迹；MOVJ：关节插补；MOVL：直线插补。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum PtpMode {
    /// JUMP，笛卡尔坐标绝对值
    JumpXyz = 0x00,
    /// MOVJ，笛卡尔坐标绝对值
    #[default]
    MovjXyz = 0x01,
    /// MOVL，笛卡尔坐标绝对值
    MovlXyz = 0x02,
    /// JUMP，关节角度绝对值
    JumpAngle = 0x03,
    /// MOVJ，关节角度绝对值
    MovjAngle = 0x04,
    /// MOVL，关节角度绝对值
    MovlAngle = 0x05,
    /// MOVJ，关节角度增量
    MovjInc = 0x06,
    /// MOVL，笛卡尔坐标增量
    MovlInc = 0x07,
    /// MOVJ，笛卡尔坐标增量
    MovjXyzInc = 0x08,
    /// JUMP 到位后 MOVL
    JumpMovlXyz = 0x09,
}

impl TryFrom<u8> for PtpMode {
    type Error = ProtocolError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(PtpMode::JumpXyz),
            0x01 => Ok(PtpMode::MovjXyz),
            0x02 => Ok(PtpMode::MovlXyz),
            0x03 => Ok(PtpMode::JumpAngle),
            0x04 => Ok(PtpMode::MovjAngle),
            0x05 => Ok(PtpMode::MovlAngle),
            0x06 => Ok(PtpMode::MovjInc),
            0x07 => Ok(PtpMode::MovlInc),
            0x08 => Ok(PtpMode::MovjXyzInc),
            0x09 => Ok(PtpMode::JumpMovlXyz),
            _ => Err(ProtocolError::InvalidValue {
                field: "PtpMode".to_string(),
                value,
            }),
        }
    }
}

fn push_f32s(params: &mut Params, values: &[f32]) {
    for value in values {
        params.extend_from_slice(&value.to_le_bytes());
    }
}

// ============================================================================
// 查询指令
// ============================================================================

/// 获取位姿查询 (10)
#[derive(Debug, Clone, Copy, Default)]
pub struct GetPoseQuery;

impl GetPoseQuery {
    pub fn to_message(self) -> Message {
        Message::query(CommandId::GetPose)
    }
}

/// 获取队列当前已执行指令索引 (246)
#[derive(Debug, Clone, Copy, Default)]
pub struct QueuedIndexQuery;

impl QueuedIndexQuery {
    pub fn to_message(self) -> Message {
        Message::query(CommandId::GetQueuedCmdCurrentIndex)
    }
}

// ============================================================================
// 回零指令
// ============================================================================

/// 设置回零坐标 (30)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HomeParamsCommand {
    pub x: f32, // Byte 0-3
    pub y: f32, // Byte 4-7
    pub z: f32, // Byte 8-11
    pub r: f32, // Byte 12-15
}

impl HomeParamsCommand {
    pub fn new(x: f32, y: f32, z: f32, r: f32) -> Self {
        Self { x, y, z, r }
    }

    pub fn to_message(self) -> Message {
        let mut params = Params::new();
        push_f32s(&mut params, &[self.x, self.y, self.z, self.r]);
        Message::command(CommandId::SetHomeParams, ControlFlags::queued_write(), &params)
    }
}

/// 执行回零 (31)
///
/// 参数为一个保留字节。
#[derive(Debug, Clone, Copy, Default)]
pub struct HomeCommand;

impl HomeCommand {
    pub fn to_message(self) -> Message {
        Message::command(CommandId::SetHomeCmd, ControlFlags::queued_write(), &[0x00])
    }
}

// ============================================================================
// 末端执行器指令
// ============================================================================

/// 吸盘控制 (62)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuctionCupCommand {
    pub suck: bool,
}

impl SuctionCupCommand {
    pub fn new(suck: bool) -> Self {
        Self { suck }
    }

    pub fn to_message(self) -> Message {
        // Byte 0: 末端控制使能，Byte 1: 吸/放
        Message::command(
            CommandId::SetEndEffectorSuctionCup,
            ControlFlags::queued_write(),
            &[0x01, self.suck as u8],
        )
    }
}

/// 夹爪控制 (63)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GripperCommand {
    pub grip: bool,
}

impl GripperCommand {
    pub fn new(grip: bool) -> Self {
        Self { grip }
    }

    pub fn to_message(self) -> Message {
        Message::command(
            CommandId::SetEndEffectorGripper,
            ControlFlags::queued_write(),
            &[0x01, self.grip as u8],
        )
    }
}

// ============================================================================
// PTP 指令
// ============================================================================

/// PTP 坐标轴参数 (81)
///
/// 发送顺序：xyz 速度、r 速度、xyz 加速度、r 加速度。
/// 上层只区分速度和加速度，xyz 与 r 使用同一值。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PtpCoordinateParamsCommand {
    pub velocity: f32,
    pub acceleration: f32,
}

impl PtpCoordinateParamsCommand {
    pub fn new(velocity: f32, acceleration: f32) -> Self {
        Self {
            velocity,
            acceleration,
        }
    }

    pub fn to_message(self) -> Message {
        let mut params = Params::new();
        push_f32s(
            &mut params,
            &[
                self.velocity,
                self.velocity,
                self.acceleration,
                self.acceleration,
            ],
        );
        Message::command(
            CommandId::SetPtpCoordinateParams,
            ControlFlags::queued_write(),
            &params,
        )
    }
}

/// PTP 公共参数 (83)：速度比例、加速度比例
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PtpCommonParamsCommand {
    pub velocity: f32,
    pub acceleration: f32,
}

impl PtpCommonParamsCommand {
    pub fn new(velocity: f32, acceleration: f32) -> Self {
        Self {
            velocity,
            acceleration,
        }
    }

    pub fn to_message(self) -> Message {
        let mut params = Params::new();
        push_f32s(&mut params, &[self.velocity, self.acceleration]);
        Message::command(
            CommandId::SetPtpCommonParams,
            ControlFlags::queued_write(),
            &params,
        )
    }
}

/// PTP 运动指令 (84)
///
/// Byte 0 为模式，随后是 x, y, z, r（坐标模式为 mm/度，角度模式为 j1..j4）。
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PtpCommand {
    pub mode: PtpMode,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
}

impl PtpCommand {
    pub fn new(mode: PtpMode, x: f32, y: f32, z: f32, r: f32) -> Self {
        Self { mode, x, y, z, r }
    }

    pub fn to_message(self) -> Message {
        let mut params = Params::new();
        params.push(self.mode as u8);
        push_f32s(&mut params, &[self.x, self.y, self.z, self.r]);
        Message::command(CommandId::SetPtpCmd, ControlFlags::queued_write(), &params)
    }
}

/// 连续轨迹点 (91)
///
/// Byte 0: 绝对坐标模式（0x01），Byte 1-12: x, y, z，Byte 13: 速度/功率（固定 0）。
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CpCommand {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl CpCommand {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn to_message(self) -> Message {
        let mut params = Params::new();
        params.push(0x01);
        push_f32s(&mut params, &[self.x, self.y, self.z]);
        params.push(0x00);
        Message::command(CommandId::SetCpCmd, ControlFlags::queued_write(), &params)
    }
}

/// 笛卡尔坐标点
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CartesianPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
}

impl CartesianPoint {
    pub fn new(x: f32, y: f32, z: f32, r: f32) -> Self {
        Self { x, y, z, r }
    }
}

/// 圆弧指令 (101)
///
/// 先发送圆弧经过点，再发送终点。
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ArcCommand {
    pub circumference: CartesianPoint, // Byte 0-15
    pub end: CartesianPoint,           // Byte 16-31
}

impl ArcCommand {
    pub fn new(end: CartesianPoint, circumference: CartesianPoint) -> Self {
        Self { circumference, end }
    }

    pub fn to_message(self) -> Message {
        let c = self.circumference;
        let e = self.end;
        let mut params = Params::new();
        push_f32s(&mut params, &[c.x, c.y, c.z, c.r, e.x, e.y, e.z, e.r]);
        Message::command(CommandId::SetArcCmd, ControlFlags::queued_write(), &params)
    }
}

// ============================================================================
// 扩展电机（传送带）指令
// ============================================================================

/// 扩展电机接口
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum MotorInterface {
    /// Stepper1
    #[default]
    Stepper1 = 0x00,
    /// Stepper2
    Stepper2 = 0x01,
}

impl TryFrom<u8> for MotorInterface {
    type Error = ProtocolError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(MotorInterface::Stepper1),
            0x01 => Ok(MotorInterface::Stepper2),
            _ => Err(ProtocolError::InvalidValue {
                field: "MotorInterface".to_string(),
                value,
            }),
        }
    }
}

/// 扩展电机速度控制 (135 / 0x87)
///
/// Byte 0: 接口，Byte 1: 使能，Byte 2-5: 速度（脉冲/秒，i32）。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EMotorCommand {
    pub interface: MotorInterface,
    pub enabled: bool,
    pub speed: i32,
}

impl EMotorCommand {
    pub fn new(interface: MotorInterface, enabled: bool, speed: i32) -> Self {
        Self {
            interface,
            enabled,
            speed,
        }
    }

    pub fn to_message(self) -> Message {
        let mut params = Params::new();
        params.push(self.interface as u8);
        params.push(self.enabled as u8);
        params.extend_from_slice(&self.speed.to_le_bytes());
        Message::command(CommandId::SetEMotor, ControlFlags::queued_write(), &params)
    }
}

/// 扩展电机定距控制 (136 / 0x88)
///
/// Byte 0: 接口，Byte 1: 使能，Byte 2-5: 速度（i32），Byte 6-9: 距离（脉冲数，u32）。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EMotorDistanceCommand {
    pub interface: MotorInterface,
    pub enabled: bool,
    pub speed: i32,
    pub distance: u32,
}

impl EMotorDistanceCommand {
    pub fn new(interface: MotorInterface, enabled: bool, speed: i32, distance: u32) -> Self {
        Self {
            interface,
            enabled,
            speed,
            distance,
        }
    }

    pub fn to_message(self) -> Message {
        let mut params = Params::new();
        params.push(self.interface as u8);
        params.push(self.enabled as u8);
        params.extend_from_slice(&self.speed.to_le_bytes());
        params.extend_from_slice(&self.distance.to_le_bytes());
        Message::command(CommandId::SetEMotorS, ControlFlags::queued_write(), &params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // ControlFlags 测试
    // ========================================================================

    #[test]
    fn test_control_flags_parse() {
        let flags = ControlFlags::from_byte(0b0000_0011);
        assert!(flags.queued());
        assert!(flags.write());

        let flags = ControlFlags::from_byte(0b0000_0010);
        assert!(!flags.queued());
        assert!(flags.write());
    }

    #[test]
    fn test_control_flags_presets() {
        assert_eq!(ControlFlags::queued_write().as_byte(), 0x03);
        assert_eq!(ControlFlags::read().as_byte(), 0x00);
    }

    // ========================================================================
    // PtpMode 测试
    // ========================================================================

    #[test]
    fn test_ptp_mode_from_u8() {
        assert_eq!(PtpMode::try_from(0x00).unwrap(), PtpMode::JumpXyz);
        assert_eq!(PtpMode::try_from(0x02).unwrap(), PtpMode::MovlXyz);
        assert_eq!(PtpMode::try_from(0x09).unwrap(), PtpMode::JumpMovlXyz);
        assert!(PtpMode::try_from(0x0A).is_err());
    }

    #[test]
    fn test_ptp_mode_default_is_movj() {
        assert_eq!(PtpMode::default(), PtpMode::MovjXyz);
    }

    // ========================================================================
    // 指令编码测试
    // ========================================================================

    #[test]
    fn test_get_pose_query() {
        let bytes = GetPoseQuery.to_message().encode();
        assert_eq!(bytes, vec![0xAA, 0xAA, 0x02, 0x0A, 0x00, 0xF6]);
    }

    #[test]
    fn test_home_command() {
        let msg = HomeCommand.to_message();
        assert_eq!(msg.id(), 31);
        assert_eq!(msg.control(), 0x03);
        assert_eq!(msg.params(), &[0x00]);
    }

    #[test]
    fn test_ptp_command_layout() {
        let msg = PtpCommand::new(PtpMode::MovlXyz, 1.0, -1.0, 0.0, 2.0).to_message();
        let p = msg.params();
        assert_eq!(msg.id(), 84);
        assert_eq!(p.len(), 17);
        assert_eq!(p[0], 0x02);
        assert_eq!(&p[1..5], &1.0f32.to_le_bytes());
        assert_eq!(&p[5..9], &(-1.0f32).to_le_bytes());
        assert_eq!(&p[9..13], &0.0f32.to_le_bytes());
        assert_eq!(&p[13..17], &2.0f32.to_le_bytes());
    }

    #[test]
    fn test_ptp_coordinate_params_layout() {
        let msg = PtpCoordinateParamsCommand::new(200.0, 100.0).to_message();
        let p = msg.params();
        assert_eq!(msg.id(), 81);
        assert_eq!(p.len(), 16);
        assert_eq!(&p[0..4], &200.0f32.to_le_bytes());
        assert_eq!(&p[4..8], &200.0f32.to_le_bytes());
        assert_eq!(&p[8..12], &100.0f32.to_le_bytes());
        assert_eq!(&p[12..16], &100.0f32.to_le_bytes());
    }

    #[test]
    fn test_ptp_common_params_layout() {
        let msg = PtpCommonParamsCommand::new(50.0, 25.0).to_message();
        assert_eq!(msg.id(), 83);
        assert_eq!(&msg.params()[0..4], &50.0f32.to_le_bytes());
        assert_eq!(&msg.params()[4..8], &25.0f32.to_le_bytes());
    }

    #[test]
    fn test_cp_command_layout() {
        let msg = CpCommand::new(1.0, 2.0, 3.0).to_message();
        let p = msg.params();
        assert_eq!(msg.id(), 91);
        assert_eq!(p.len(), 14);
        assert_eq!(p[0], 0x01);
        assert_eq!(p[13], 0x00);
    }

    #[test]
    fn test_arc_command_puts_circumference_first() {
        let end = CartesianPoint::new(1.0, 2.0, 3.0, 4.0);
        let cir = CartesianPoint::new(5.0, 6.0, 7.0, 8.0);
        let msg = ArcCommand::new(end, cir).to_message();
        let p = msg.params();
        assert_eq!(msg.id(), 101);
        assert_eq!(p.len(), 32);
        assert_eq!(&p[0..4], &5.0f32.to_le_bytes());
        assert_eq!(&p[16..20], &1.0f32.to_le_bytes());
    }

    #[test]
    fn test_end_effector_commands() {
        assert_eq!(SuctionCupCommand::new(true).to_message().params(), &[0x01, 0x01]);
        assert_eq!(SuctionCupCommand::new(false).to_message().params(), &[0x01, 0x00]);
        assert_eq!(GripperCommand::new(true).to_message().id(), 63);
        assert_eq!(GripperCommand::new(false).to_message().params(), &[0x01, 0x00]);
    }

    #[test]
    fn test_emotor_start_conveyor_bytes() {
        // 传送带启动帧：接口 0、使能、速度 20000
        let msg = EMotorCommand::new(MotorInterface::Stepper1, true, 20000).to_message();
        assert_eq!(msg.id(), 0x87);
        assert_eq!(msg.params(), &[0x00, 0x01, 0x20, 0x4E, 0x00, 0x00]);
    }

    #[test]
    fn test_emotor_distance_layout() {
        let msg =
            EMotorDistanceCommand::new(MotorInterface::Stepper2, true, -100, 5000).to_message();
        let p = msg.params();
        assert_eq!(msg.id(), 0x88);
        assert_eq!(p.len(), 10);
        assert_eq!(p[0], 0x01);
        assert_eq!(&p[2..6], &(-100i32).to_le_bytes());
        assert_eq!(&p[6..10], &5000u32.to_le_bytes());
    }

    #[test]
    fn test_motor_interface_from_u8() {
        assert_eq!(MotorInterface::try_from(1).unwrap(), MotorInterface::Stepper2);
        assert!(MotorInterface::try_from(2).is_err());
    }
}
