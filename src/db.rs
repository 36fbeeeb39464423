// ==========================================
// 零售商品周度计划系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection 的 PRAGMA 行为，避免"部分模块外键开启/部分不开启"
// - 建表语句集中一处；内存库每次进程启动全新创建，无迁移版本概念
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要"每个连接"单独开启
/// - busy_timeout 需要"每个连接"单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开内存库连接并应用统一配置
///
/// 内存库随连接销毁，状态仅在进程生命周期内有效（无落盘、无多进程共享）
pub fn open_in_memory_connection() -> rusqlite::Result<Connection> {
    let conn = Connection::open_in_memory()?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 创建全部业务表
///
/// 约束说明：
/// - store/sku/week 的 id 列不建唯一约束，唯一性校验在 API 边界完成
/// - planning_data 的 (store_id, sku_id, week_id) 组合键唯一，支撑 upsert
/// - 集合的展示顺序以 rowid（插入顺序）为准，重排操作整表重写
pub fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS store (
            id      TEXT NOT NULL,
            label   TEXT NOT NULL,
            city    TEXT NOT NULL,
            state   TEXT NOT NULL,
            seq_no  INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS sku (
            id          TEXT NOT NULL,
            label       TEXT NOT NULL,
            class       TEXT NOT NULL,
            department  TEXT NOT NULL,
            price       REAL NOT NULL,
            cost        REAL NOT NULL
        );

        CREATE TABLE IF NOT EXISTS week (
            week        TEXT NOT NULL,
            week_label  TEXT NOT NULL,
            month       TEXT NOT NULL,
            month_label TEXT NOT NULL,
            seq_no      INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS planning_data (
            store_id    TEXT NOT NULL,
            sku_id      TEXT NOT NULL,
            week_id     TEXT NOT NULL,
            sales_units INTEGER NOT NULL DEFAULT 0,
            updated_at  TEXT NOT NULL,
            UNIQUE (store_id, sku_id, week_id)
        );

        -- 级联删除按 store_id / sku_id 整列扫描，保持单遍删除高效
        CREATE INDEX IF NOT EXISTS idx_planning_store ON planning_data(store_id);
        CREATE INDEX IF NOT EXISTS idx_planning_sku ON planning_data(sku_id);

        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id    TEXT NOT NULL DEFAULT 'global',
            key         TEXT NOT NULL,
            value       TEXT NOT NULL,
            updated_at  TEXT,
            UNIQUE (scope_id, key)
        );
        "#,
    )?;
    Ok(())
}
