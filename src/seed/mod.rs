// ==========================================
// 零售商品周度计划系统 - 种子数据装载
// ==========================================
// 职责: 进程启动时把内置 JSON 固定数据装入仓储，作为初始状态
// 约束: 仅启动时调用一次；坏行跳过并计数，不让单行错误中断装载
// ==========================================

use crate::domain::{Sku, Store, Week};
use crate::repository::error::RepositoryError;
use crate::repository::{PlanningFactRepository, SkuRepository, StoreRepository, WeekRepository};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{info, warn};

// 内置固定数据（camelCase 字段，与领域模型的 serde 命名一致）
const STORES_JSON: &str = include_str!("data/stores.json");
const SKUS_JSON: &str = include_str!("data/skus.json");
const WEEKS_JSON: &str = include_str!("data/weeks.json");
const PLANNING_JSON: &str = include_str!("data/planning_data.json");

/// 种子装载错误
#[derive(Error, Debug)]
pub enum SeedError {
    #[error("种子数据解析失败 ({collection}): {source}")]
    ParseError {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// 装载结果汇总
#[derive(Debug, Clone, Default, Serialize)]
pub struct SeedSummary {
    pub stores: usize,
    pub skus: usize,
    pub weeks: usize,
    pub facts: usize,
    /// 被跳过的坏行总数（缺字段、引用缺失、负销量）
    pub skipped: usize,
}

/// 计划事实种子记录
///
/// 固定数据里的事实不带审计时间戳，装载时经 upsert 统一打戳
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedPlanningRecord {
    store_id: String,
    sku_id: String,
    week_id: String,
    sales_units: i64,
}

// ==========================================
// SeedLoader - 种子装载器
// ==========================================
pub struct SeedLoader;

impl SeedLoader {
    /// 装载全部种子集合
    ///
    /// # 顺序
    /// 门店 → SKU → 周 → 计划事实；事实装载前校验 store/sku 引用，
    /// 引用缺失的事实跳过（级联删除的完整性约束从装载起就成立）
    pub fn load(
        store_repo: &StoreRepository,
        sku_repo: &SkuRepository,
        week_repo: &WeekRepository,
        planning_repo: &PlanningFactRepository,
    ) -> Result<SeedSummary, SeedError> {
        let mut summary = SeedSummary::default();

        // ===== 门店 =====
        let stores: Vec<Store> = Self::parse("stores", STORES_JSON)?;
        for store in &stores {
            if store.id.trim().is_empty() {
                warn!("跳过门店种子行: id 为空 (label={})", store.label);
                summary.skipped += 1;
                continue;
            }
            store_repo.insert(store)?;
            summary.stores += 1;
        }

        // ===== SKU =====
        let skus: Vec<Sku> = Self::parse("skus", SKUS_JSON)?;
        for sku in &skus {
            if sku.id.trim().is_empty() {
                warn!("跳过 SKU 种子行: id 为空 (label={})", sku.label);
                summary.skipped += 1;
                continue;
            }
            sku_repo.insert(sku)?;
            summary.skus += 1;
        }

        // ===== 周 =====
        let weeks: Vec<Week> = Self::parse("weeks", WEEKS_JSON)?;
        for week in &weeks {
            if week.week.trim().is_empty() {
                warn!("跳过周种子行: week 键为空");
                summary.skipped += 1;
                continue;
            }
            week_repo.insert(week)?;
            summary.weeks += 1;
        }

        // ===== 计划事实 =====
        let store_ids: HashSet<&str> = stores.iter().map(|s| s.id.as_str()).collect();
        let sku_ids: HashSet<&str> = skus.iter().map(|s| s.id.as_str()).collect();

        let records: Vec<SeedPlanningRecord> = Self::parse("planning_data", PLANNING_JSON)?;
        for record in &records {
            if !store_ids.contains(record.store_id.as_str())
                || !sku_ids.contains(record.sku_id.as_str())
            {
                warn!(
                    "跳过事实种子行: 引用缺失 (store={}, sku={}, week={})",
                    record.store_id, record.sku_id, record.week_id
                );
                summary.skipped += 1;
                continue;
            }
            if record.sales_units < 0 {
                warn!(
                    "跳过事实种子行: 销量为负 (store={}, sku={}, week={}, units={})",
                    record.store_id, record.sku_id, record.week_id, record.sales_units
                );
                summary.skipped += 1;
                continue;
            }

            planning_repo.upsert(
                &record.store_id,
                &record.sku_id,
                &record.week_id,
                record.sales_units,
            )?;
            summary.facts += 1;
        }

        info!(
            "种子数据装载完成: stores={}, skus={}, weeks={}, facts={}, skipped={}",
            summary.stores, summary.skus, summary.weeks, summary.facts, summary.skipped
        );

        Ok(summary)
    }

    fn parse<T: serde::de::DeserializeOwned>(
        collection: &'static str,
        raw: &str,
    ) -> Result<Vec<T>, SeedError> {
        serde_json::from_str(raw).map_err(|source| SeedError::ParseError { collection, source })
    }
}
