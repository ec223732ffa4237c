//! FS 调度模块
//!
//! 根据当前链路需求构造兼容矩阵，枚举互不干扰的链路团（clique）及其所有子团，
//! 再贪心选出增益最大的团覆盖，作为一轮 TDMA 调度的时隙序列。

mod clique;
mod compat;
mod interference;
mod scheduler;

pub use clique::Clique;
pub use compat::CompatMatrix;
pub use interference::interfere;
pub use scheduler::Scheduler;
