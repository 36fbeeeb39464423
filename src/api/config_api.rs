// ==========================================
// 零售商品周度计划系统 - 配置管理 API
// ==========================================
// 职责: 配置的查询与覆写，供展示层消费
// 约束: 未知键拒绝；数值键必须可解析；色带阈值保持降序
// ==========================================

use std::sync::Arc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::error::{ApiError, ApiResult};
use crate::config::config_manager::{ConfigManager, GmBandThresholds, CONFIG_KEYS};

/// 配置条目（生效值：默认值被覆写项覆盖）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
}

// ==========================================
// ConfigApi - 配置管理 API
// ==========================================

/// 配置管理API
pub struct ConfigApi {
    config_manager: Arc<ConfigManager>,
}

impl ConfigApi {
    /// 创建新的ConfigApi实例
    pub fn new(config_manager: Arc<ConfigManager>) -> Self {
        Self { config_manager }
    }

    /// 查询全部配置的生效值
    pub fn list_configs(&self) -> ApiResult<Vec<ConfigEntry>> {
        let entries = self
            .config_manager
            .list_effective()
            .map_err(|e| ApiError::InternalError(e.to_string()))?;

        Ok(entries
            .into_iter()
            .map(|(key, value)| ConfigEntry { key, value })
            .collect())
    }

    /// 查询单个配置的生效值（未知键拒绝）
    pub fn get_config(&self, key: &str) -> ApiResult<String> {
        Self::ensure_known_key(key)?;

        let value = self
            .config_manager
            .get_config_value(key)
            .map_err(|e| ApiError::InternalError(e.to_string()))?
            .unwrap_or_else(|| ConfigManager::default_for(key));

        Ok(value)
    }

    /// 覆写单个配置
    ///
    /// # 校验
    /// - 键必须在配置项全集内
    /// - session_timeout_minutes 必须是正整数
    /// - 色带阈值必须是数值，且覆写后保持 green ≥ yellow ≥ orange
    pub fn update_config(&self, key: &str, value: &str) -> ApiResult<()> {
        Self::ensure_known_key(key)?;

        match key {
            "session_timeout_minutes" => {
                let parsed = value.trim().parse::<i64>().map_err(|_| {
                    ApiError::ValidationError(format!("{} 必须是整数: {}", key, value))
                })?;
                if parsed <= 0 {
                    return Err(ApiError::ValidationError(format!(
                        "{} 必须是正整数: {}",
                        key, parsed
                    )));
                }
            }
            _ => {
                let parsed = value.trim().parse::<f64>().map_err(|_| {
                    ApiError::ValidationError(format!("{} 必须是数值: {}", key, value))
                })?;

                // 用覆写后的候选阈值整体检查降序约束
                let mut bands = self.get_gm_band_thresholds()?;
                match key {
                    "gm_band_green_min" => bands.green_min = parsed,
                    "gm_band_yellow_min" => bands.yellow_min = parsed,
                    "gm_band_orange_min" => bands.orange_min = parsed,
                    _ => {}
                }
                if !(bands.green_min >= bands.yellow_min && bands.yellow_min >= bands.orange_min) {
                    return Err(ApiError::ValidationError(format!(
                        "色带阈值必须降序: green={} yellow={} orange={}",
                        bands.green_min, bands.yellow_min, bands.orange_min
                    )));
                }
            }
        }

        self.config_manager
            .set_config_value(key, value.trim())
            .map_err(|e| ApiError::InternalError(e.to_string()))?;

        info!("配置覆写: {} = {}", key, value.trim());
        Ok(())
    }

    /// 毛利率色带阈值（类型化读取）
    pub fn get_gm_band_thresholds(&self) -> ApiResult<GmBandThresholds> {
        self.config_manager
            .get_gm_band_thresholds()
            .map_err(|e| ApiError::InternalError(e.to_string()))
    }

    /// 会话闲置过期时长（分钟，类型化读取）
    pub fn get_session_timeout_minutes(&self) -> ApiResult<i64> {
        self.config_manager
            .get_session_timeout_minutes()
            .map_err(|e| ApiError::InternalError(e.to_string()))
    }

    fn ensure_known_key(key: &str) -> ApiResult<()> {
        if CONFIG_KEYS.contains(&key) {
            Ok(())
        } else {
            Err(ApiError::InvalidInput(format!("未知配置键: {}", key)))
        }
    }
}
