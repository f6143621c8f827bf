//! 执行模式

pub mod oneshot;
