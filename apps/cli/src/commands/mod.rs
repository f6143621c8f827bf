//! 命令定义和实现

pub mod config;
pub mod conveyor;
pub mod effector;
pub mod home;
pub mod r#move;
pub mod pose;

pub use config::ConfigCommand;
pub use conveyor::ConveyorCommand;
pub use effector::{GripCommand, SuckCommand};
pub use home::HomeCommand;
pub use r#move::MoveCommand;
pub use pose::PoseCommand;
