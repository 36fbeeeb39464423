// ==========================================
// 零售商品周度计划系统 - 驾驶舱 API
// ==========================================
// 职责: 单门店周度毛利序列查询（图表数据源）
// ==========================================

use std::sync::Arc;
use tracing::debug;

use crate::api::error::{ApiError, ApiResult};
use crate::engine::chart_series::{ChartPoint, ChartSeriesBuilder};
use crate::repository::{PlanningFactRepository, SkuRepository};

// ==========================================
// DashboardApi - 驾驶舱 API
// ==========================================

/// 驾驶舱API
///
/// 职责：封装图表序列引擎，按门店输出固定 52 周桶的毛利序列。
/// 未知门店不报错——没有匹配事实时序列全为零
pub struct DashboardApi {
    sku_repo: Arc<SkuRepository>,
    planning_repo: Arc<PlanningFactRepository>,
}

impl DashboardApi {
    /// 创建新的DashboardApi实例
    pub fn new(sku_repo: Arc<SkuRepository>, planning_repo: Arc<PlanningFactRepository>) -> Self {
        Self {
            sku_repo,
            planning_repo,
        }
    }

    /// 查询单门店周度毛利序列（W01..W52 固定 52 桶）
    ///
    /// # 参数
    /// - store_id: 目标门店
    ///
    /// # 返回
    /// - Ok(Vec<ChartPoint>): 52 个数据点，缺失周补零
    pub fn get_store_series(&self, store_id: &str) -> ApiResult<Vec<ChartPoint>> {
        if store_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("门店 ID 不得为空".to_string()));
        }

        let skus = self.sku_repo.list_all()?;
        let facts = self.planning_repo.list_by_store(store_id)?;

        debug!(
            "构建图表序列: store={}, facts={}, skus={}",
            store_id,
            facts.len(),
            skus.len()
        );

        Ok(ChartSeriesBuilder::build(store_id, &skus, &facts))
    }
}
