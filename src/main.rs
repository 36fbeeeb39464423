// ==========================================
// 零售商品周度计划系统 - 主入口
// ==========================================
// 技术栈: Rust + SQLite (内存库)
// 说明: 核心为库形态，展示层（网格/图表前端）外置；
//       此入口用于独立启动并输出装配与投影概况
// ==========================================

use merch_planning::app::AppState;
use merch_planning::logging;

fn main() {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", merch_planning::APP_NAME);
    tracing::info!("系统版本: {}", merch_planning::VERSION);
    tracing::info!("==================================================");

    // 创建AppState（内存库 + 种子数据）
    tracing::info!("正在初始化AppState...");
    let app_state = match AppState::new() {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("无法初始化AppState: {}", e);
            std::process::exit(1);
        }
    };

    let summary = &app_state.seed_summary;
    tracing::info!(
        "初始状态: 门店 {} / SKU {} / 周 {} / 计划事实 {}",
        summary.stores,
        summary.skus,
        summary.weeks,
        summary.facts
    );

    // 投影概况（验证启动即可读）
    match app_state.master_data_api.get_calendar() {
        Ok(calendar) => tracing::info!("日历: {} 个月分组", calendar.len()),
        Err(e) => tracing::error!("日历派生失败: {}", e),
    }

    match app_state.planning_api.get_grid() {
        Ok(grid) => {
            let weeks_per_row = grid.rows.first().map(|r| r.cells.len()).unwrap_or(0);
            tracing::info!("计划网格: {} 行 × {} 周", grid.rows.len(), weeks_per_row);
        }
        Err(e) => tracing::error!("网格投影失败: {}", e),
    }

    tracing::info!("核心装配完成，等待展示层接入");
}
