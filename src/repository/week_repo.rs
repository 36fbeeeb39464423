// ==========================================
// 零售商品周度计划系统 - 周数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 说明: 周的唯一键是 week 字段（如 "W01"），编辑按此键匹配；
//       月分组为派生值，由引擎层按存储顺序重建，不在此落库
// ==========================================

use crate::domain::calendar::Week;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult};
use std::sync::{Arc, Mutex};

// ==========================================
// WeekRepository - 周仓储
// ==========================================

/// 周仓储
/// 职责: 管理 week 表的增删改查；存储顺序即日历派生的遍历顺序
pub struct WeekRepository {
    conn: Arc<Mutex<Connection>>,
}

impl WeekRepository {
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

    /// 查询全部周（按存储顺序）
    pub fn list_all(&self) -> RepositoryResult<Vec<Week>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            "SELECT week, week_label, month, month_label, seq_no FROM week ORDER BY rowid",
        )?;

        let weeks = stmt
            .query_map([], |row| {
                Ok(Week {
                    week: row.get(0)?,
                    week_label: row.get(1)?,
                    month: row.get(2)?,
                    month_label: row.get(3)?,
                    seq_no: row.get(4)?,
                })
            })?
            .collect::<SqliteResult<Vec<Week>>>()?;

        Ok(weeks)
    }

    /// 按 week 键查询单个周
    pub fn find_by_key(&self, week_key: &str) -> RepositoryResult<Option<Week>> {
        let conn = self.get_conn()?;

        let week = conn
            .query_row(
                "SELECT week, week_label, month, month_label, seq_no FROM week WHERE week = ?1",
                params![week_key],
                |row| {
                    Ok(Week {
                        week: row.get(0)?,
                        week_label: row.get(1)?,
                        month: row.get(2)?,
                        month_label: row.get(3)?,
                        seq_no: row.get(4)?,
                    })
                },
            )
            .optional()?;

        Ok(week)
    }

    /// 追加单个周（追加到集合末尾）
    pub fn insert(&self, week: &Week) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute(
            "INSERT INTO week (week, week_label, month, month_label, seq_no) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![week.week, week.week_label, week.month, week.month_label, week.seq_no],
        )?;

        Ok(())
    }

    /// 按 week 键整行替换
    ///
    /// # 返回
    /// - Ok(usize): 受影响行数（0 表示未找到，调用方视为 no-op）
    pub fn update(&self, week: &Week) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;

        let affected = conn.execute(
            "UPDATE week SET week_label = ?2, month = ?3, month_label = ?4, seq_no = ?5 WHERE week = ?1",
            params![week.week, week.week_label, week.month, week.month_label, week.seq_no],
        )?;

        Ok(affected)
    }

    /// 整表按给定顺序重写（重排）
    ///
    /// 调用方负责在传入前重排 seq_no；本方法只负责原子替换
    pub fn replace_all(&self, weeks: &[Week]) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute("BEGIN TRANSACTION", [])?;

        let result: RepositoryResult<()> = (|| {
            conn.execute("DELETE FROM week", [])?;
            for week in weeks {
                conn.execute(
                    "INSERT INTO week (week, week_label, month, month_label, seq_no) VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![week.week, week.week_label, week.month, week.month_label, week.seq_no],
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

    /// 周总数
    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM week", [], |row| row.get(0))?;
        Ok(count)
    }
}
