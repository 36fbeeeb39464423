// ==========================================
// 零售商品周度计划系统 - 图表序列聚合引擎
// ==========================================
// 职责: 单门店跨 SKU 的周度毛利序列（驾驶舱图表数据源）
// 红线: 纯函数；固定 52 个周桶，与周表实际内容无关
// ==========================================

use crate::domain::planning::PlanningFact;
use crate::domain::sku::Sku;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 图表周桶数量（固定 W01..W52，独立于日历派生）
pub const CHART_WEEK_BUCKETS: usize = 52;

/// 图表数据点：一个周桶的毛利额与毛利率
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub week: String,
    pub gm_dollars: f64,
    pub gm_percent: f64,
}

// ==========================================
// ChartSeriesBuilder - 纯函数工具类
// ==========================================
pub struct ChartSeriesBuilder;

impl ChartSeriesBuilder {
    /// 构建单门店周度毛利序列
    ///
    /// # 规则
    /// - 仅聚合 store_id 匹配的事实；价格口径取当前 SKU 主数据，
    ///   未知 SKU 按 price = cost = 0 处理
    /// - gm_dollars: 同周各事实的 units × (price − cost) 求和
    /// - gm_percent: 仅当该事实 units × price > 0 时计算
    ///   gm_dollars / (units × price) × 100；同周多个 SKU 时
    ///   最后一个非零值覆盖先前值，不做合并或加权
    /// - 输出固定 52 个桶，键为零填充序号 W01..W52，缺失补 0
    ///
    /// # 参数
    /// - store_id: 目标门店
    /// - skus: SKU 主数据（价格口径）
    /// - facts: 全量事实集合
    pub fn build(store_id: &str, skus: &[Sku], facts: &[PlanningFact]) -> Vec<ChartPoint> {
        let sku_by_id: HashMap<&str, &Sku> =
            skus.iter().map(|sku| (sku.id.as_str(), sku)).collect();

        let mut gm_dollars_by_week: HashMap<&str, f64> = HashMap::new();
        let mut gm_percent_by_week: HashMap<&str, f64> = HashMap::new();

        for fact in facts.iter().filter(|f| f.store_id == store_id) {
            let (price, cost) = match sku_by_id.get(fact.sku_id.as_str()) {
                Some(sku) => (sku.price, sku.cost),
                None => (0.0, 0.0),
            };

            let gm_dollars = fact.sales_units as f64 * (price - cost);
            *gm_dollars_by_week
                .entry(fact.week_id.as_str())
                .or_insert(0.0) += gm_dollars;

            let sales_dollars = fact.sales_units as f64 * price;
            if sales_dollars > 0.0 {
                let gm_percent = gm_dollars / sales_dollars * 100.0;
                let entry = gm_percent_by_week
                    .entry(fact.week_id.as_str())
                    .or_insert(0.0);
                // 同周后写的非零值胜出；零值保留已有值
                if gm_percent != 0.0 {
                    *entry = gm_percent;
                }
            }
        }

        (1..=CHART_WEEK_BUCKETS)
            .map(|i| {
                let week = format!("W{:02}", i);
                ChartPoint {
                    gm_dollars: gm_dollars_by_week
                        .get(week.as_str())
                        .copied()
                        .unwrap_or(0.0),
                    gm_percent: gm_percent_by_week
                        .get(week.as_str())
                        .copied()
                        .unwrap_or(0.0),
                    week,
                }
            })
            .collect()
    }
}
