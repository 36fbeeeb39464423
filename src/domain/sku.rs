// ==========================================
// 零售商品周度计划系统 - SKU 领域模型
// ==========================================
// 用途: 种子数据载入、主数据维护、毛利派生的价格口径
// ==========================================

use serde::{Deserialize, Serialize};

/// SKU 主数据
///
/// `price` 必须大于 0，`cost` 不得为负（API 边界校验）。
/// 毛利率 = (price - cost) / price，与销量无关。
/// SKU 无展示序号字段，重排仅替换集合顺序。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sku {
    pub id: String,
    pub label: String,
    #[serde(rename = "class")]
    pub class_name: String,
    pub department: String,
    pub price: f64,
    pub cost: f64,
}

impl Sku {
    /// 单件毛利（price - cost）
    pub fn unit_margin(&self) -> f64 {
        self.price - self.cost
    }

    /// 毛利率（百分数）；price 为 0 时返回 0
    pub fn gm_percent(&self) -> f64 {
        if self.price > 0.0 {
            (self.price - self.cost) / self.price * 100.0
        } else {
            0.0
        }
    }
}
