//! 波长资源模块
//!
//! 波长连续性约束下的分配与释放，以及可选的逐跳波长转换。

mod assignment;

pub use assignment::{WavelengthAssigner, WavelengthAssignment};
