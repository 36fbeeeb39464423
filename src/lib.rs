// ==========================================
// 零售商品周度计划系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite (内存库)
// 系统定位: 单用户商品计划核心，展示层外置
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 日历派生与计划投影
pub mod engine;

// 种子数据层 - 内置初始数据装载
pub mod seed;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/建表统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 状态装配
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{Month, PlanningFact, Sku, Store, Week};

// 引擎
pub use engine::{
    CalendarDeriver, ChartPoint, ChartSeriesBuilder, PlanningCell, PlanningGrid,
    PlanningProjector, PlanningRow,
};

// API
pub use api::{ConfigApi, DashboardApi, MasterDataApi, PlanningApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "零售商品周度计划系统";
