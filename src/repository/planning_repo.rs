// ==========================================
// 零售商品周度计划系统 - 计划事实数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 说明: 组合键 (store_id, sku_id, week_id) 唯一；
//       upsert 是销量数据的唯一写入路径
// ==========================================

use crate::domain::planning::PlanningFact;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult};
use std::sync::{Arc, Mutex};

// ==========================================
// PlanningFactRepository - 计划事实仓储
// ==========================================

/// 计划事实仓储
/// 职责: 管理 planning_data 表的查询、upsert 与级联删除
pub struct PlanningFactRepository {
    conn: Arc<Mutex<Connection>>,
}

impl PlanningFactRepository {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 查询全部事实（按存储顺序）
    pub fn list_all(&self) -> RepositoryResult<Vec<PlanningFact>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            "SELECT store_id, sku_id, week_id, sales_units, updated_at
             FROM planning_data ORDER BY rowid",
        )?;

        let facts = stmt
            .query_map([], Self::map_row)?
            .collect::<SqliteResult<Vec<PlanningFact>>>()?;

        Ok(facts)
    }

    /// 查询单个门店的全部事实（按存储顺序）
    pub fn list_by_store(&self, store_id: &str) -> RepositoryResult<Vec<PlanningFact>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            "SELECT store_id, sku_id, week_id, sales_units, updated_at
             FROM planning_data WHERE store_id = ?1 ORDER BY rowid",
        )?;

        let facts = stmt
            .query_map(params![store_id], Self::map_row)?
            .collect::<SqliteResult<Vec<PlanningFact>>>()?;

        Ok(facts)
    }

    /// 按组合键查询单条事实
    pub fn find_by_key(
        &self,
        store_id: &str,
        sku_id: &str,
        week_id: &str,
    ) -> RepositoryResult<Option<PlanningFact>> {
        let conn = self.get_conn()?;

        let fact = conn
            .query_row(
                "SELECT store_id, sku_id, week_id, sales_units, updated_at
                 FROM planning_data
                 WHERE store_id = ?1 AND sku_id = ?2 AND week_id = ?3",
                params![store_id, sku_id, week_id],
                Self::map_row,
            )
            .optional()?;

        Ok(fact)
    }

    /// 插入或更新单条事实（销量数据唯一写入路径）
    ///
    /// 组合键存在则覆盖 sales_units，否则追加新事实；
    /// 相同输入重复调用幂等（结果集合不变，仅审计时间戳刷新）
    ///
    /// # 返回
    /// - Ok(PlanningFact): 写入后的事实
    pub fn upsert(
        &self,
        store_id: &str,
        sku_id: &str,
        week_id: &str,
        sales_units: i64,
    ) -> RepositoryResult<PlanningFact> {
        let conn = self.get_conn()?;
        let now: DateTime<Utc> = Utc::now();

        conn.execute(
            r#"
            INSERT INTO planning_data (store_id, sku_id, week_id, sales_units, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT (store_id, sku_id, week_id)
            DO UPDATE SET sales_units = excluded.sales_units, updated_at = excluded.updated_at
            "#,
            params![store_id, sku_id, week_id, sales_units, now],
        )?;

        Ok(PlanningFact {
            store_id: store_id.to_string(),
            sku_id: sku_id.to_string(),
            week_id: week_id.to_string(),
            sales_units,
            updated_at: now,
        })
    }

    /// 删除引用某门店的全部事实（门店删除时的级联第一步）
    ///
    /// # 返回
    /// - Ok(usize): 删除的事实条数
    pub fn delete_by_store(&self, store_id: &str) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;

        let affected = conn.execute(
            "DELETE FROM planning_data WHERE store_id = ?1",
            params![store_id],
        )?;

        Ok(affected)
    }

    /// 删除引用某 SKU 的全部事实（SKU 删除时的级联第一步）
    ///
    /// # 返回
    /// - Ok(usize): 删除的事实条数
    pub fn delete_by_sku(&self, sku_id: &str) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;

        let affected = conn.execute(
            "DELETE FROM planning_data WHERE sku_id = ?1",
            params![sku_id],
        )?;

        Ok(affected)
    }

    /// 事实总数
    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM planning_data", [], |row| row.get(0))?;
        Ok(count)
    }

    /// 行映射
    fn map_row(row: &rusqlite::Row<'_>) -> SqliteResult<PlanningFact> {
        Ok(PlanningFact {
            store_id: row.get(0)?,
            sku_id: row.get(1)?,
            week_id: row.get(2)?,
            sales_units: row.get(3)?,
            updated_at: row.get(4)?,
        })
    }
}
