// ==========================================
// 零售商品周度计划系统 - 门店数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::store::Store;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult};
use std::sync::{Arc, Mutex};

// ==========================================
// StoreRepository - 门店仓储
// ==========================================

/// 门店仓储
/// 职责: 管理 store 表的增删改查；展示顺序以 rowid（插入顺序）为准
pub struct StoreRepository {
    conn: Arc<Mutex<Connection>>,
}

impl StoreRepository {
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

    /// 查询全部门店（按存储顺序）
    pub fn list_all(&self) -> RepositoryResult<Vec<Store>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            "SELECT id, label, city, state, seq_no FROM store ORDER BY rowid",
        )?;

        let stores = stmt
            .query_map([], |row| {
                Ok(Store {
                    id: row.get(0)?,
                    label: row.get(1)?,
                    city: row.get(2)?,
                    state: row.get(3)?,
                    seq_no: row.get(4)?,
                })
            })?
            .collect::<SqliteResult<Vec<Store>>>()?;

        Ok(stores)
    }

    /// 按 id 查询单个门店
    pub fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Store>> {
        let conn = self.get_conn()?;

        let store = conn
            .query_row(
                "SELECT id, label, city, state, seq_no FROM store WHERE id = ?1",
                params![id],
                |row| {
                    Ok(Store {
                        id: row.get(0)?,
                        label: row.get(1)?,
                        city: row.get(2)?,
                        state: row.get(3)?,
                        seq_no: row.get(4)?,
                    })
                },
            )
            .optional()?;

        Ok(store)
    }

    /// 追加单个门店（追加到集合末尾）
    pub fn insert(&self, store: &Store) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute(
            "INSERT INTO store (id, label, city, state, seq_no) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![store.id, store.label, store.city, store.state, store.seq_no],
        )?;

        Ok(())
    }

    /// 按 id 整行替换
    ///
    /// # 返回
    /// - Ok(usize): 受影响行数（0 表示未找到，调用方视为 no-op）
    pub fn update(&self, store: &Store) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;

        let affected = conn.execute(
            "UPDATE store SET label = ?2, city = ?3, state = ?4, seq_no = ?5 WHERE id = ?1",
            params![store.id, store.label, store.city, store.state, store.seq_no],
        )?;

        Ok(affected)
    }

    /// 按 id 删除
    ///
    /// 事实表的级联删除由 API 层先行执行（显式引用完整性规则）
    pub fn delete(&self, id: &str) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;

        let affected = conn.execute("DELETE FROM store WHERE id = ?1", params![id])?;

        Ok(affected)
    }

    /// 整表按给定顺序重写（重排）
    ///
    /// 调用方负责在传入前重排 seq_no；本方法只负责原子替换
    pub fn replace_all(&self, stores: &[Store]) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute("BEGIN TRANSACTION", [])?;

        let result: RepositoryResult<()> = (|| {
            conn.execute("DELETE FROM store", [])?;
            for store in stores {
                conn.execute(
                    "INSERT INTO store (id, label, city, state, seq_no) VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![store.id, store.label, store.city, store.state, store.seq_no],
                )?;
            }
            Ok(())
        })();

        match result {
            Ok(()) => {
                conn.execute("COMMIT", [])?;
                Ok(())
            }
            Err(e) => {
                let _ = conn.execute("ROLLBACK", []);
                Err(e)
            }
        }
    }

    /// 门店总数
    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM store", [], |row| row.get(0))?;
        Ok(count)
    }
}
