// ==========================================
// 零售商品周度计划系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化；输入默认已经 API 边界校验
// ==========================================

pub mod error;
pub mod planning_repo;
pub mod sku_repo;
pub mod store_repo;
pub mod week_repo;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use planning_repo::PlanningFactRepository;
pub use sku_repo::SkuRepository;
pub use store_repo::StoreRepository;
pub use week_repo::WeekRepository;
