// ==========================================
// 零售商品周度计划系统 - 门店领域模型
// ==========================================
// 用途: 种子数据载入、主数据维护、计划网格行维度
// ==========================================

use serde::{Deserialize, Serialize};

/// 门店主数据
///
/// `id` 由调用方提供，唯一性在 API 边界校验。
/// `seq_no` 为展示序号，整体重排时按新顺序重新赋值（1 起）；
/// 集合的实际展示顺序以存储顺序为准。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: String,
    pub label: String,
    pub city: String,
    pub state: String,
    pub seq_no: i64,
}
