//! 响应参数解析
//!
//! 响应的参数布局由命令 ID 决定，本模块解析驱动层关心的两类响应：
//! - 位姿（GetPose，8 个小端 f32）
//! - 队列指令索引（队列指令的响应和 GetQueuedCmdCurrentIndex，偏移 0 的小端 u32）

use crate::{
    CommandId, Message, POSE_PARAMS_LEN, ProtocolError, QUEUED_INDEX_LEN, f32_le_at, u32_le_at,
};

/// 机械臂位姿
///
/// 笛卡尔坐标（mm）、末端旋转角（度）和 4 个关节角（度）。
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub j1: f32,
    pub j2: f32,
    pub j3: f32,
    pub j4: f32,
}

impl Pose {
    /// 从 GetPose 响应参数解析（偏移 0, 4, ..., 28）
    ///
    /// # 错误
    /// - `ProtocolError::ParamDecode`: 参数不足 32 字节
    pub fn from_params(params: &[u8]) -> Result<Self, ProtocolError> {
        let command = CommandId::GetPose.as_u8();
        if params.len() < POSE_PARAMS_LEN {
            return Err(ProtocolError::ParamDecode {
                command,
                expected: POSE_PARAMS_LEN,
                actual: params.len(),
            });
        }

        let at = |offset| f32_le_at(params, offset, command);
        Ok(Self {
            x: at(0)?,
            y: at(4)?,
            z: at(8)?,
            r: at(12)?,
            j1: at(16)?,
            j2: at(20)?,
            j3: at(24)?,
            j4: at(28)?,
        })
    }

    /// 关节角数组
    pub fn joints(&self) -> [f32; 4] {
        [self.j1, self.j2, self.j3, self.j4]
    }
}

impl TryFrom<&Message> for Pose {
    type Error = ProtocolError;

    fn try_from(msg: &Message) -> Result<Self, Self::Error> {
        let expected = CommandId::GetPose.as_u8();
        if msg.id() != expected {
            return Err(ProtocolError::UnexpectedCommand {
                expected,
                actual: msg.id(),
            });
        }
        Self::from_params(msg.params())
    }
}

/// 控制器队列中的指令索引
///
/// 控制器为每条队列指令分配单调递增的 u32 索引。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueuedCommandIndex(pub u32);

impl QueuedCommandIndex {
    /// 从响应参数偏移 0 处解析
    pub fn from_params(params: &[u8], command: u8) -> Result<Self, ProtocolError> {
        if params.len() < QUEUED_INDEX_LEN {
            return Err(ProtocolError::ParamDecode {
                command,
                expected: QUEUED_INDEX_LEN,
                actual: params.len(),
            });
        }
        u32_le_at(params, 0, command).map(Self)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl TryFrom<&Message> for QueuedCommandIndex {
    type Error = ProtocolError;

    fn try_from(msg: &Message) -> Result<Self, Self::Error> {
        Self::from_params(msg.params(), msg.id())
    }
}

impl From<QueuedCommandIndex> for u32 {
    fn from(index: QueuedCommandIndex) -> Self {
        index.0
    }
}

impl std::fmt::Display for QueuedCommandIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
