// ==========================================
// 零售商品周度计划系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{ConfigApi, DashboardApi, MasterDataApi, PlanningApi};
use crate::config::config_manager::ConfigManager;
use crate::db;
use crate::repository::{
    PlanningFactRepository, SkuRepository, StoreRepository, WeekRepository,
};
use crate::seed::{SeedLoader, SeedSummary};

/// 应用状态
///
/// 包含所有API实例和共享资源。
/// 整个状态由单一逻辑执行者持有；共享连接上的互斥锁只用于
/// 跨仓储复用同一内存库，不承担并行语义
pub struct AppState {
    /// 主数据API
    pub master_data_api: Arc<MasterDataApi>,

    /// 计划API
    pub planning_api: Arc<PlanningApi>,

    /// 驾驶舱API
    pub dashboard_api: Arc<DashboardApi>,

    /// 配置管理API
    pub config_api: Arc<ConfigApi>,

    /// 计划事实仓储（测试与诊断用的只读入口）
    pub planning_repo: Arc<PlanningFactRepository>,

    /// 种子数据装载汇总（启动诊断用）
    pub seed_summary: SeedSummary,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 返回
    /// - Ok(AppState): 应用状态实例
    /// - Err(String): 初始化错误
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开全新内存库并建表
    /// 2. 初始化所有Repository
    /// 3. 装载种子数据作为初始状态
    /// 4. 创建所有API实例
    pub fn new() -> Result<Self, String> {
        tracing::info!("初始化AppState（内存库）");

        // 创建数据库连接（共享连接）
        let conn = db::open_in_memory_connection()
            .map_err(|e| format!("无法打开内存库: {}", e))?;
        db::create_schema(&conn).map_err(|e| format!("建表失败: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层
        // ==========================================

        let store_repo = Arc::new(StoreRepository::from_connection(conn.clone()));
        let sku_repo = Arc::new(SkuRepository::from_connection(conn.clone()));
        let week_repo = Arc::new(WeekRepository::from_connection(conn.clone()));
        let planning_repo = Arc::new(PlanningFactRepository::from_connection(conn.clone()));

        // ==========================================
        // 装载种子数据（初始状态）
        // ==========================================

        let seed_summary = SeedLoader::load(&store_repo, &sku_repo, &week_repo, &planning_repo)
            .map_err(|e| format!("种子数据装载失败: {}", e))?;

        // ==========================================
        // 初始化API层
        // ==========================================

        // 配置管理器
        let config_manager = Arc::new(ConfigManager::from_connection(conn.clone()));

        // 主数据API
        let master_data_api = Arc::new(MasterDataApi::new(
            store_repo.clone(),
            sku_repo.clone(),
            week_repo.clone(),
            planning_repo.clone(),
        ));

        // 计划API
        let planning_api = Arc::new(PlanningApi::new(
            store_repo.clone(),
            sku_repo.clone(),
            week_repo.clone(),
            planning_repo.clone(),
        ));

        // 驾驶舱API
        let dashboard_api = Arc::new(DashboardApi::new(sku_repo, planning_repo.clone()));

        // 配置管理API
        let config_api = Arc::new(ConfigApi::new(config_manager));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            master_data_api,
            planning_api,
            dashboard_api,
            config_api,
            planning_repo,
            seed_summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_boot_with_seed() {
        let state = AppState::new().unwrap();

        assert_eq!(state.seed_summary.stores, 5);
        assert_eq!(state.seed_summary.weeks, 52);
        assert!(state.seed_summary.facts > 0);

        // 启动后即可投影：行数 = 门店 × SKU，列数 = 周数
        let grid = state.planning_api.get_grid().unwrap();
        assert_eq!(
            grid.rows.len(),
            state.seed_summary.stores * state.seed_summary.skus
        );
        assert_eq!(grid.rows[0].cells.len(), state.seed_summary.weeks);
    }
}
