//! 机械臂高层接口
//!
//! 每条运动/IO 指令都作为队列指令下发，返回控制器分配的队列索引；
//! 需要确认执行完成时，把索引交给 [`Dobot::wait_for_cmd`]。

use crate::conveyor::{self, Direction};
use crate::error::ClientError;
use crate::motion::MotionParams;
use dobot_driver::{DriverError, StopHandle};
use dobot_protocol::{
    ArcCommand, CartesianPoint, CpCommand, EMotorCommand, EMotorDistanceCommand, GripperCommand,
    HomeCommand, HomeParamsCommand, Message, MotorInterface, Pose, PtpCommand,
    PtpCommonParamsCommand, PtpCoordinateParamsCommand, PtpMode, QueuedCommandIndex,
    SuctionCupCommand,
};
use tracing::{debug, info};

/// `start_conveyor` 使用的固定电机速度
pub const CONVEYOR_DEFAULT_SPEED: i32 = 20_000;

/// Dobot 机械臂
///
/// 持有一个驱动层会话；drop 时按序关闭（停止轮询 → 等待线程 → 释放端口）。
pub struct Dobot {
    driver: dobot_driver::Dobot,
}

impl Dobot {
    /// 接管已建立的驱动会话
    pub fn from_driver(driver: dobot_driver::Dobot) -> Self {
        Self { driver }
    }

    /// 底层驱动会话
    pub fn driver(&self) -> &dobot_driver::Dobot {
        &self.driver
    }

    fn queued(&self, message: Message) -> Result<QueuedCommandIndex, ClientError> {
        let index = self.driver.send_queued(&message)?;
        debug!("Queued command {} as {}", message.id(), index);
        Ok(index)
    }

    /// 关节插补移动到笛卡尔坐标（MOVJ_XYZ）
    pub fn go(&self, x: f32, y: f32, z: f32, r: f32) -> Result<QueuedCommandIndex, ClientError> {
        self.go_with_mode(PtpMode::MovjXyz, x, y, z, r)
    }

    /// 直线插补移动到笛卡尔坐标（MOVL_XYZ）
    pub fn go_lin(
        &self,
        x: f32,
        y: f32,
        z: f32,
        r: f32,
    ) -> Result<QueuedCommandIndex, ClientError> {
        self.go_with_mode(PtpMode::MovlXyz, x, y, z, r)
    }

    /// 以指定轨迹模式执行 PTP 运动
    pub fn go_with_mode(
        &self,
        mode: PtpMode,
        x: f32,
        y: f32,
        z: f32,
        r: f32,
    ) -> Result<QueuedCommandIndex, ClientError> {
        self.queued(PtpCommand::new(mode, x, y, z, r).to_message())
    }

    /// 圆弧运动：经过 `circumference` 到达 `end`
    pub fn go_arc(
        &self,
        end: CartesianPoint,
        circumference: CartesianPoint,
    ) -> Result<QueuedCommandIndex, ClientError> {
        self.queued(ArcCommand::new(end, circumference).to_message())
    }

    /// 连续路径点（绝对坐标）
    pub fn move_cp(&self, x: f32, y: f32, z: f32) -> Result<QueuedCommandIndex, ClientError> {
        self.queued(CpCommand::new(x, y, z).to_message())
    }

    /// 吸盘开关
    pub fn suck(&self, enable: bool) -> Result<QueuedCommandIndex, ClientError> {
        self.queued(SuctionCupCommand::new(enable).to_message())
    }

    /// 夹爪开合
    pub fn grip(&self, enable: bool) -> Result<QueuedCommandIndex, ClientError> {
        self.queued(GripperCommand::new(enable).to_message())
    }

    /// 设置回零点坐标
    pub fn set_home(
        &self,
        x: f32,
        y: f32,
        z: f32,
        r: f32,
    ) -> Result<QueuedCommandIndex, ClientError> {
        self.queued(HomeParamsCommand::new(x, y, z, r).to_message())
    }

    /// 回零
    pub fn home(&self) -> Result<QueuedCommandIndex, ClientError> {
        self.queued(HomeCommand.to_message())
    }

    /// 调整 PTP 速度和加速度（先通用参数，后坐标参数）
    pub fn speed(&self, velocity: f32, acceleration: f32) -> Result<(), ClientError> {
        apply_motion_params(&self.driver, MotionParams::new(velocity, acceleration), true)
    }

    /// 以速度百分比连续运行传送带
    ///
    /// # 错误
    /// - `ClientError::InvalidParameter`: `speed` 不在 0..=100 内（不发送任何指令）
    pub fn conveyor_belt(
        &self,
        speed: f32,
        direction: Direction,
        interface: MotorInterface,
    ) -> Result<QueuedCommandIndex, ClientError> {
        let motor_speed = conveyor::continuous_motor_speed(speed, direction)?;
        self.queued(EMotorCommand::new(interface, true, motor_speed).to_message())
    }

    /// 以速度百分比让传送带运行指定距离
    pub fn conveyor_belt_distance(
        &self,
        speed: f32,
        distance: u32,
        direction: Direction,
        interface: MotorInterface,
    ) -> Result<QueuedCommandIndex, ClientError> {
        let motor_speed = conveyor::distance_motor_speed(speed, direction)?;
        self.queued(
            EMotorDistanceCommand::new(interface, true, motor_speed, distance).to_message(),
        )
    }

    /// 以固定速度启动 1 号接口上的传送带
    pub fn start_conveyor(&self) -> Result<QueuedCommandIndex, ClientError> {
        self.queued(
            EMotorCommand::new(MotorInterface::Stepper1, true, CONVEYOR_DEFAULT_SPEED).to_message(),
        )
    }

    /// 停止 1 号接口上的传送带
    pub fn stop_conveyor(&self) -> Result<QueuedCommandIndex, ClientError> {
        self.queued(
            EMotorCommand::new(MotorInterface::Stepper1, false, CONVEYOR_DEFAULT_SPEED)
                .to_message(),
        )
    }

    /// 最近一次轮询到的位姿
    pub fn pose(&self) -> Pose {
        self.driver.pose()
    }

    /// 立即查询位姿
    pub fn refresh_pose(&self) -> Result<Pose, ClientError> {
        Ok(self.driver.refresh_pose()?)
    }

    /// 控制器当前已执行的队列索引
    pub fn current_index(&self) -> Result<QueuedCommandIndex, ClientError> {
        Ok(self.driver.current_queued_index()?)
    }

    /// 阻塞直到队列指令 `index` 执行完成
    ///
    /// 没有超时；可通过 [`Dobot::stop_handle`] 从其他线程取消。
    pub fn wait_for_cmd(
        &self,
        index: impl Into<u32>,
    ) -> Result<QueuedCommandIndex, ClientError> {
        Ok(self.driver.wait_for_command(index.into())?)
    }

    /// 会话级停止句柄（例如在 Ctrl-C 处理中触发）
    pub fn stop_handle(&self) -> StopHandle {
        self.driver.stop_handle()
    }

    /// 按序关闭会话
    pub fn close(self) -> Result<(), ClientError> {
        info!("Closing Dobot session");
        Ok(self.driver.close()?)
    }
}

/// 下发 PTP 参数
///
/// 会话建立时先坐标参数后通用参数；`speed` 调整时顺序相反。
pub(crate) fn apply_motion_params(
    driver: &dobot_driver::Dobot,
    params: MotionParams,
    common_first: bool,
) -> Result<(), ClientError> {
    let coordinate =
        PtpCoordinateParamsCommand::new(params.velocity, params.acceleration).to_message();
    let common = PtpCommonParamsCommand::new(params.velocity, params.acceleration).to_message();

    let (first, second) = if common_first {
        (common, coordinate)
    } else {
        (coordinate, common)
    };
    send_checked(driver, &first)?;
    send_checked(driver, &second)?;
    Ok(())
}

fn send_checked(driver: &dobot_driver::Dobot, message: &Message) -> Result<(), DriverError> {
    driver.send_command(message).map(|_| ())
}
