// ==========================================
// 零售商品周度计划系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体与派生值对象
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod calendar;
pub mod planning;
pub mod sku;
pub mod store;

// 重导出核心类型
pub use calendar::{Month, Week};
pub use planning::PlanningFact;
pub use sku::Sku;
pub use store::Store;
