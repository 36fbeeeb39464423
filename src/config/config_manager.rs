// ==========================================
// 零售商品周度计划系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================
// 配置项全集:
// - session_timeout_minutes: 会话闲置过期时长（展示层消费，默认 30）
// - gm_band_green_min / gm_band_yellow_min / gm_band_orange_min:
//   毛利率色带阈值（展示层网格着色消费，默认 40 / 10 / 5）
// ==========================================

use chrono::Utc;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::sync::{Arc, Mutex};
use tracing::warn;

/// 会话闲置过期时长默认值（分钟）
pub const DEFAULT_SESSION_TIMEOUT_MINUTES: i64 = 30;

/// 毛利率色带阈值默认值（百分数）
pub const DEFAULT_GM_BAND_GREEN_MIN: f64 = 40.0;
pub const DEFAULT_GM_BAND_YELLOW_MIN: f64 = 10.0;
pub const DEFAULT_GM_BAND_ORANGE_MIN: f64 = 5.0;

/// 全部可配置键（未知键在 API 边界拒绝）
pub const CONFIG_KEYS: [&str; 4] = [
    "session_timeout_minutes",
    "gm_band_green_min",
    "gm_band_yellow_min",
    "gm_band_orange_min",
];

/// 毛利率色带阈值（green ≥ yellow ≥ orange，降序）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GmBandThresholds {
    pub green_min: f64,
    pub yellow_min: f64,
    pub orange_min: f64,
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 从已有连接创建 ConfigManager
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 已覆写的配置值
    /// - None: 配置未覆写（取默认值）
    pub fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 覆写配置值（scope_id='global'，存在则更新）
    pub fn set_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        conn.execute(
            r#"
            INSERT INTO config_kv (scope_id, key, value, updated_at)
            VALUES ('global', ?1, ?2, ?3)
            ON CONFLICT (scope_id, key)
            DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
            params![key, value, Utc::now()],
        )?;

        Ok(())
    }

    /// 读取配置值，带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, Box<dyn Error>> {
        Ok(self
            .get_config_value(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// 会话闲置过期时长（分钟）
    ///
    /// 过期计时本身在展示层执行，核心只持有配置口径
    pub fn get_session_timeout_minutes(&self) -> Result<i64, Box<dyn Error>> {
        let raw = self.get_config_or_default(
            "session_timeout_minutes",
            &DEFAULT_SESSION_TIMEOUT_MINUTES.to_string(),
        )?;

        match raw.parse::<i64>() {
            Ok(v) if v > 0 => Ok(v),
            _ => {
                warn!("session_timeout_minutes 配置非法({}), 回退默认值", raw);
                Ok(DEFAULT_SESSION_TIMEOUT_MINUTES)
            }
        }
    }

    /// 毛利率色带阈值（展示层网格着色口径）
    pub fn get_gm_band_thresholds(&self) -> Result<GmBandThresholds, Box<dyn Error>> {
        let green = self.get_f64_or_default("gm_band_green_min", DEFAULT_GM_BAND_GREEN_MIN)?;
        let yellow = self.get_f64_or_default("gm_band_yellow_min", DEFAULT_GM_BAND_YELLOW_MIN)?;
        let orange = self.get_f64_or_default("gm_band_orange_min", DEFAULT_GM_BAND_ORANGE_MIN)?;

        Ok(GmBandThresholds {
            green_min: green,
            yellow_min: yellow,
            orange_min: orange,
        })
    }

    /// 全部配置的生效值（默认值被覆写项覆盖）
    pub fn list_effective(&self) -> Result<Vec<(String, String)>, Box<dyn Error>> {
        let mut entries = Vec::with_capacity(CONFIG_KEYS.len());

        for key in CONFIG_KEYS {
            let default = Self::default_for(key);
            let value = self.get_config_or_default(key, &default)?;
            entries.push((key.to_string(), value));
        }

        Ok(entries)
    }

    /// 内置默认值
    pub fn default_for(key: &str) -> String {
        match key {
            "session_timeout_minutes" => DEFAULT_SESSION_TIMEOUT_MINUTES.to_string(),
            "gm_band_green_min" => DEFAULT_GM_BAND_GREEN_MIN.to_string(),
            "gm_band_yellow_min" => DEFAULT_GM_BAND_YELLOW_MIN.to_string(),
            "gm_band_orange_min" => DEFAULT_GM_BAND_ORANGE_MIN.to_string(),
            _ => String::new(),
        }
    }

    fn get_f64_or_default(&self, key: &str, default: f64) -> Result<f64, Box<dyn Error>> {
        let raw = self.get_config_or_default(key, &default.to_string())?;

        match raw.parse::<f64>() {
            Ok(v) => Ok(v),
            Err(_) => {
                warn!("{} 配置非法({}), 回退默认值", key, raw);
                Ok(default)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn setup() -> ConfigManager {
        let conn = db::open_in_memory_connection().unwrap();
        db::create_schema(&conn).unwrap();
        ConfigManager::from_connection(Arc::new(Mutex::new(conn)))
    }

    #[test]
    fn test_defaults_when_nothing_stored() {
        let config = setup();

        assert_eq!(config.get_session_timeout_minutes().unwrap(), 30);

        let bands = config.get_gm_band_thresholds().unwrap();
        assert_eq!(bands.green_min, 40.0);
        assert_eq!(bands.yellow_min, 10.0);
        assert_eq!(bands.orange_min, 5.0);
    }

    #[test]
    fn test_override_and_read_back() {
        let config = setup();

        config.set_config_value("session_timeout_minutes", "15").unwrap();
        assert_eq!(config.get_session_timeout_minutes().unwrap(), 15);

        // 再次覆写走 upsert 路径
        config.set_config_value("session_timeout_minutes", "45").unwrap();
        assert_eq!(config.get_session_timeout_minutes().unwrap(), 45);
    }

    #[test]
    fn test_invalid_value_falls_back_to_default() {
        let config = setup();

        config.set_config_value("session_timeout_minutes", "abc").unwrap();
        assert_eq!(config.get_session_timeout_minutes().unwrap(), 30);

        config.set_config_value("gm_band_green_min", "not-a-number").unwrap();
        assert_eq!(config.get_gm_band_thresholds().unwrap().green_min, 40.0);
    }

    #[test]
    fn test_list_effective_merges_overrides() {
        let config = setup();
        config.set_config_value("gm_band_orange_min", "6").unwrap();

        let entries = config.list_effective().unwrap();
        assert_eq!(entries.len(), CONFIG_KEYS.len());

        let orange = entries
            .iter()
            .find(|(k, _)| k == "gm_band_orange_min")
            .unwrap();
        assert_eq!(orange.1, "6");
    }
}
