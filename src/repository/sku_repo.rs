// ==========================================
// 零售商品周度计划系统 - SKU 数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::sku::Sku;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult};
use std::sync::{Arc, Mutex};

// ==========================================
// SkuRepository - SKU 仓储
// ==========================================

/// SKU 仓储
/// 职责: 管理 sku 表的增删改查；展示顺序以 rowid（插入顺序）为准
pub struct SkuRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SkuRepository {
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

    /// 查询全部 SKU（按存储顺序）
    pub fn list_all(&self) -> RepositoryResult<Vec<Sku>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            "SELECT id, label, class, department, price, cost FROM sku ORDER BY rowid",
        )?;

        let skus = stmt
            .query_map([], |row| {
                Ok(Sku {
                    id: row.get(0)?,
                    label: row.get(1)?,
                    class_name: row.get(2)?,
                    department: row.get(3)?,
                    price: row.get(4)?,
                    cost: row.get(5)?,
                })
            })?
            .collect::<SqliteResult<Vec<Sku>>>()?;

        Ok(skus)
    }

    /// 按 id 查询单个 SKU
    pub fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Sku>> {
        let conn = self.get_conn()?;

        let sku = conn
            .query_row(
                "SELECT id, label, class, department, price, cost FROM sku WHERE id = ?1",
                params![id],
                |row| {
                    Ok(Sku {
                        id: row.get(0)?,
                        label: row.get(1)?,
                        class_name: row.get(2)?,
                        department: row.get(3)?,
                        price: row.get(4)?,
                        cost: row.get(5)?,
                    })
                },
            )
            .optional()?;

        Ok(sku)
    }

    /// 追加单个 SKU（追加到集合末尾）
    pub fn insert(&self, sku: &Sku) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute(
            "INSERT INTO sku (id, label, class, department, price, cost) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![sku.id, sku.label, sku.class_name, sku.department, sku.price, sku.cost],
        )?;

        Ok(())
    }

    /// 按 id 整行替换
    ///
    /// # 返回
    /// - Ok(usize): 受影响行数（0 表示未找到，调用方视为 no-op）
    pub fn update(&self, sku: &Sku) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;

        let affected = conn.execute(
            "UPDATE sku SET label = ?2, class = ?3, department = ?4, price = ?5, cost = ?6 WHERE id = ?1",
            params![sku.id, sku.label, sku.class_name, sku.department, sku.price, sku.cost],
        )?;

        Ok(affected)
    }

    /// 按 id 删除
    ///
    /// 事实表的级联删除由 API 层先行执行（显式引用完整性规则）
    pub fn delete(&self, id: &str) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;

        let affected = conn.execute("DELETE FROM sku WHERE id = ?1", params![id])?;

        Ok(affected)
    }

    /// 整表按给定顺序重写（重排）
    ///
    /// SKU 无 seq_no 字段，重排仅替换集合顺序本身
    pub fn replace_all(&self, skus: &[Sku]) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute("BEGIN TRANSACTION", [])?;

        let result: RepositoryResult<()> = (|| {
            conn.execute("DELETE FROM sku", [])?;
            for sku in skus {
                conn.execute(
                    "INSERT INTO sku (id, label, class, department, price, cost) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![sku.id, sku.label, sku.class_name, sku.department, sku.price, sku.cost],
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

    /// SKU 总数
    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM sku", [], |row| row.get(0))?;
        Ok(count)
    }
}
