// ==========================================
// 零售商品周度计划系统 - 计划事实领域模型
// ==========================================
// 用途: 稀疏事实表记录（门店 × SKU × 周 → 销量）
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 计划事实（稀疏）
///
/// 组合键 (store_id, sku_id, week_id) 唯一，同组合至多一条。
/// 某组合无事实即视为销量 0（"无数据"与"零销量"在投影中同义）。
/// 唯一写入路径为 upsert；门店/SKU 删除时级联删除其全部事实。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanningFact {
    pub store_id: String,
    pub sku_id: String,
    pub week_id: String,
    pub sales_units: i64,
    /// 审计字段：最近一次写入时间
    pub updated_at: DateTime<Utc>,
}
