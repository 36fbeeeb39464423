// ==========================================
// 零售商品周度计划系统 - 计划网格投影引擎
// ==========================================
// 职责: 稀疏事实 → 稠密网格（门店 × SKU × 周）
// 红线: 纯函数；"无数据"显式按销量 0 处理，不靠隐式空值折叠
// ==========================================

use crate::domain::calendar::Month;
use crate::domain::planning::PlanningFact;
use crate::domain::sku::Sku;
use crate::domain::store::Store;
use crate::engine::calendar_deriver::CalendarDeriver;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// 投影输出模型（只读值快照，不含行为）
// ==========================================

/// 网格单元格：一个 (门店, SKU) 行在某一周的派生指标
///
/// sales_units 之外的字段均为只读投影，展示层不得回写
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanningCell {
    pub week_id: String,
    pub sales_units: i64,
    pub sales_dollars: f64,
    pub gm_dollars: f64,
    /// 单件毛利率（仅由 price/cost 决定，与销量、周次无关）
    pub gm_percent: f64,
}

/// 网格行：一个 (门店, SKU) 组合的整行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanningRow {
    pub store_id: String,
    pub store_label: String,
    pub sku_id: String,
    pub sku_label: String,
    pub cells: Vec<PlanningCell>,
}

/// 稠密网格：全量叉积投影结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanningGrid {
    pub rows: Vec<PlanningRow>,
}

// ==========================================
// PlanningProjector - 纯函数工具类
// ==========================================
pub struct PlanningProjector;

impl PlanningProjector {
    /// 稠密网格投影
    ///
    /// # 规则
    /// - 行序: 门店外层 × SKU 内层的叉积顺序
    /// - 列序: 日历顺序（月序 × 组内周序），非周表原始顺序
    /// - 事实查找走组合键索引（对事实集合单遍建索引），缺失按销量 0
    /// - 派生指标: sales_dollars = units × price,
    ///   gm_dollars = units × (price − cost),
    ///   gm_percent = price > 0 ? (price − cost) / price × 100 : 0
    ///
    /// # 参数
    /// - stores/skus: 主数据（存储顺序）
    /// - calendar: 月分组（由 CalendarDeriver 派生）
    /// - facts: 稀疏事实集合
    pub fn project(
        stores: &[Store],
        skus: &[Sku],
        calendar: &[Month],
        facts: &[PlanningFact],
    ) -> PlanningGrid {
        let weeks = CalendarDeriver::flatten(calendar);

        // 组合键索引，单遍构建；之后每个单元格 O(1) 查找
        let mut units_by_key: HashMap<(&str, &str, &str), i64> =
            HashMap::with_capacity(facts.len());
        for fact in facts {
            units_by_key.insert(
                (
                    fact.store_id.as_str(),
                    fact.sku_id.as_str(),
                    fact.week_id.as_str(),
                ),
                fact.sales_units,
            );
        }

        let mut rows = Vec::with_capacity(stores.len() * skus.len());

        for store in stores {
            for sku in skus {
                let mut cells = Vec::with_capacity(weeks.len());

                for week in &weeks {
                    let sales_units = units_by_key
                        .get(&(store.id.as_str(), sku.id.as_str(), week.week.as_str()))
                        .copied()
                        .unwrap_or(0);

                    let sales_dollars = sales_units as f64 * sku.price;
                    let gm_dollars = sales_units as f64 * (sku.price - sku.cost);

                    cells.push(PlanningCell {
                        week_id: week.week.clone(),
                        sales_units,
                        sales_dollars,
                        gm_dollars,
                        gm_percent: sku.gm_percent(),
                    });
                }

                rows.push(PlanningRow {
                    store_id: store.id.clone(),
                    store_label: store.label.clone(),
                    sku_id: sku.id.clone(),
                    sku_label: sku.label.clone(),
                    cells,
                });
            }
        }

        PlanningGrid { rows }
    }
}
