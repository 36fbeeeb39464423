// ==========================================
// 零售商品周度计划系统 - 周/月日历领域模型
// ==========================================
// 用途: 计划网格的列维度、月度分组展示
// ==========================================

use serde::{Deserialize, Serialize};

/// 周主数据
///
/// `week` 为唯一键（如 "W01"），编辑操作按此键匹配。
/// `month` 为不可变分组键，把一个周归入唯一一个月。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Week {
    pub week: String,
    pub week_label: String,
    pub month: String,
    pub month_label: String,
    pub seq_no: i64,
}

/// 月分组（派生值，不落库）
///
/// 由周集合按 `month` 字段分组得到，周的任何变更后整体重建。
/// 月顺序按 `month` 值在周序列中的首次出现顺序，不排序。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Month {
    pub month: String,
    pub month_label: String,
    pub weeks: Vec<Week>,
}
