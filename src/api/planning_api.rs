// ==========================================
// 零售商品周度计划系统 - 计划 API
// ==========================================
// 职责: 稠密网格查询 + 单元格编辑回写（销量数据唯一写入口）
// ==========================================

use std::sync::Arc;
use tracing::debug;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::PlanningFact;
use crate::engine::calendar_deriver::CalendarDeriver;
use crate::engine::projection::{PlanningGrid, PlanningProjector};
use crate::repository::{PlanningFactRepository, SkuRepository, StoreRepository, WeekRepository};

/// 解析销量输入（自由文本 → 非负整数）
///
/// # 规则
/// - 取前缀整数：去首尾空白后，可选正负号 + 前导数字串（"12.9" → 12）
/// - 解析失败静默取 0，绝不向上传播错误——编辑路径是全函数
/// - 负数与溢出同样落入 0（事实的销量不变量为非负）
pub fn parse_sales_units(raw: &str) -> i64 {
    let trimmed = raw.trim();

    let (negative, digits_part) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let digits: String = digits_part
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();

    if digits.is_empty() || negative {
        return 0;
    }

    digits.parse::<i64>().unwrap_or(0)
}

// ==========================================
// PlanningApi - 计划 API
// ==========================================

/// 计划API
///
/// 职责：
/// 1. 稠密网格投影查询（门店 × SKU × 周，缺失事实补零）
/// 2. 单元格编辑回写：解析销量文本并 upsert 对应事实
///
/// 网格中除销量外的列均为只读派生值，编辑一律走 record_sale
pub struct PlanningApi {
    store_repo: Arc<StoreRepository>,
    sku_repo: Arc<SkuRepository>,
    week_repo: Arc<WeekRepository>,
    planning_repo: Arc<PlanningFactRepository>,
}

impl PlanningApi {
    /// 创建新的PlanningApi实例
    pub fn new(
        store_repo: Arc<StoreRepository>,
        sku_repo: Arc<SkuRepository>,
        week_repo: Arc<WeekRepository>,
        planning_repo: Arc<PlanningFactRepository>,
    ) -> Self {
        Self {
            store_repo,
            sku_repo,
            week_repo,
            planning_repo,
        }
    }

    /// 查询稠密计划网格
    ///
    /// 基于当前实体与事实全量重新投影；返回纯值快照，
    /// 任何变更后调用方必须重新查询
    pub fn get_grid(&self) -> ApiResult<PlanningGrid> {
        let stores = self.store_repo.list_all()?;
        let skus = self.sku_repo.list_all()?;
        let weeks = self.week_repo.list_all()?;
        let facts = self.planning_repo.list_all()?;

        let calendar = CalendarDeriver::derive(&weeks);
        Ok(PlanningProjector::project(&stores, &skus, &calendar, &facts))
    }

    /// 记录单元格销量编辑
    ///
    /// 这是销量数据的唯一写入路径：解析输入文本（失败取 0），
    /// 按组合键 upsert 事实
    ///
    /// # 参数
    /// - store_id / sku_id / week_id: 单元格坐标
    /// - raw_input: 编辑后的自由文本
    ///
    /// # 返回
    /// - Ok(PlanningFact): 写入后的事实
    pub fn record_sale(
        &self,
        store_id: &str,
        sku_id: &str,
        week_id: &str,
        raw_input: &str,
    ) -> ApiResult<PlanningFact> {
        if store_id.trim().is_empty() || sku_id.trim().is_empty() || week_id.trim().is_empty() {
            return Err(ApiError::InvalidInput(
                "单元格坐标 (store_id, sku_id, week_id) 不得为空".to_string(),
            ));
        }

        let sales_units = parse_sales_units(raw_input);
        let fact = self
            .planning_repo
            .upsert(store_id, sku_id, week_id, sales_units)?;

        debug!(
            "销量回写: store={}, sku={}, week={}, raw={:?} → units={}",
            store_id, sku_id, week_id, raw_input, sales_units
        );

        Ok(fact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_integer() {
        assert_eq!(parse_sales_units("7"), 7);
        assert_eq!(parse_sales_units("  42  "), 42);
        assert_eq!(parse_sales_units("+13"), 13);
    }

    #[test]
    fn test_parse_takes_leading_digit_prefix() {
        assert_eq!(parse_sales_units("12.9"), 12);
        assert_eq!(parse_sales_units("7abc"), 7);
    }

    #[test]
    fn test_parse_failure_coerces_to_zero() {
        assert_eq!(parse_sales_units(""), 0);
        assert_eq!(parse_sales_units("abc"), 0);
        assert_eq!(parse_sales_units("."), 0);
        assert_eq!(parse_sales_units("e5"), 0);
    }

    #[test]
    fn test_negative_coerces_to_zero() {
        assert_eq!(parse_sales_units("-5"), 0);
        assert_eq!(parse_sales_units("-0"), 0);
    }

    #[test]
    fn test_overflow_coerces_to_zero() {
        assert_eq!(parse_sales_units("99999999999999999999999999"), 0);
    }
}
