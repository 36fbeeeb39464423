// ==========================================
// 零售商品周度计划系统 - 引擎层
// ==========================================
// 职责: 日历派生、稠密网格投影、图表序列聚合
// 红线: Engine 不拼 SQL；无状态、无副作用、无 I/O 操作
// ==========================================

pub mod calendar_deriver;
pub mod chart_series;
pub mod projection;

// 重导出核心引擎
pub use calendar_deriver::CalendarDeriver;
pub use chart_series::{ChartPoint, ChartSeriesBuilder, CHART_WEEK_BUCKETS};
pub use projection::{PlanningCell, PlanningGrid, PlanningProjector, PlanningRow};
