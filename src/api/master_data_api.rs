// ==========================================
// 零售商品周度计划系统 - 主数据 API
// ==========================================
// 职责: 门店/SKU/周的增删改与重排，日历查询
// 约束: 本层是校验边界——必填字段、id 唯一性、数值范围在此拦截，
//       仓储层信任通过校验的输入
// ==========================================

use std::sync::Arc;
use tracing::{debug, info};

use crate::api::error::{ApiError, ApiResult};
use crate::domain::{Month, Sku, Store, Week};
use crate::engine::calendar_deriver::CalendarDeriver;
use crate::repository::{PlanningFactRepository, SkuRepository, StoreRepository, WeekRepository};

// ==========================================
// MasterDataApi - 主数据 API
// ==========================================

/// 主数据API
///
/// 职责：
/// 1. 门店/SKU/周集合的增删改与整体重排
/// 2. 创建时的唯一性与字段校验（编辑/删除未命中按 no-op 处理）
/// 3. 删除时的显式级联：先单遍删除引用事实，再删实体
/// 4. 日历查询（每次调用基于当前周集合全量重建）
pub struct MasterDataApi {
    store_repo: Arc<StoreRepository>,
    sku_repo: Arc<SkuRepository>,
    week_repo: Arc<WeekRepository>,
    planning_repo: Arc<PlanningFactRepository>,
}

impl MasterDataApi {
    /// 创建新的MasterDataApi实例
    pub fn new(
        store_repo: Arc<StoreRepository>,
        sku_repo: Arc<SkuRepository>,
        week_repo: Arc<WeekRepository>,
        planning_repo: Arc<PlanningFactRepository>,
    ) -> Self {
        Self {
            store_repo,
            sku_repo,
            week_repo,
            planning_repo,
        }
    }

    // ==========================================
    // 门店操作
    // ==========================================

    /// 查询全部门店（存储顺序快照）
    pub fn list_stores(&self) -> ApiResult<Vec<Store>> {
        Ok(self.store_repo.list_all()?)
    }

    /// 新增门店（追加到集合末尾）
    ///
    /// # 校验
    /// - id/label/city/state 必填（去空白后非空）
    /// - seq_no 不得为负
    /// - id 在现有集合中唯一
    pub fn add_store(&self, store: Store) -> ApiResult<()> {
        Self::validate_store_fields(&store)?;

        if self.store_repo.find_by_id(&store.id)?.is_some() {
            return Err(ApiError::ValidationError(format!(
                "门店 ID 已存在: {}",
                store.id
            )));
        }

        self.store_repo.insert(&store)?;
        info!("新增门店: id={}, label={}", store.id, store.label);
        Ok(())
    }

    /// 编辑门店（按 id 匹配整行替换；未命中为 no-op）
    pub fn edit_store(&self, store: Store) -> ApiResult<()> {
        Self::validate_store_fields(&store)?;

        let affected = self.store_repo.update(&store)?;
        if affected == 0 {
            debug!("编辑门店未命中, no-op: id={}", store.id);
        }
        Ok(())
    }

    /// 删除门店，并级联删除其全部计划事实
    ///
    /// 级联是显式的引用完整性规则：单遍删除 store_id 匹配的事实，
    /// 再删除门店本身；未命中为 no-op
    pub fn delete_store(&self, id: &str) -> ApiResult<()> {
        let removed_facts = self.planning_repo.delete_by_store(id)?;
        let affected = self.store_repo.delete(id)?;

        if affected == 0 {
            debug!("删除门店未命中, no-op: id={}", id);
        } else {
            info!("删除门店: id={}, 级联删除事实 {} 条", id, removed_facts);
        }
        Ok(())
    }

    /// 整体重排门店：按给定顺序重写集合，seq_no 重新赋值为 1..N
    pub fn reorder_stores(&self, stores: Vec<Store>) -> ApiResult<()> {
        let reordered: Vec<Store> = stores
            .into_iter()
            .enumerate()
            .map(|(index, mut store)| {
                store.seq_no = index as i64 + 1;
                store
            })
            .collect();

        self.store_repo.replace_all(&reordered)?;
        debug!("门店重排完成: {} 条", reordered.len());
        Ok(())
    }

    // ==========================================
    // SKU 操作
    // ==========================================

    /// 查询全部 SKU（存储顺序快照）
    pub fn list_skus(&self) -> ApiResult<Vec<Sku>> {
        Ok(self.sku_repo.list_all()?)
    }

    /// 新增 SKU（追加到集合末尾）
    ///
    /// # 校验
    /// - id/label/class/department 必填（去空白后非空）
    /// - price 必须大于 0，cost 不得为负
    /// - id 在现有集合中唯一
    pub fn add_sku(&self, sku: Sku) -> ApiResult<()> {
        Self::validate_sku_fields(&sku)?;

        if self.sku_repo.find_by_id(&sku.id)?.is_some() {
            return Err(ApiError::ValidationError(format!(
                "SKU ID 已存在: {}",
                sku.id
            )));
        }

        self.sku_repo.insert(&sku)?;
        info!("新增 SKU: id={}, label={}", sku.id, sku.label);
        Ok(())
    }

    /// 编辑 SKU（按 id 匹配整行替换；未命中为 no-op）
    pub fn edit_sku(&self, sku: Sku) -> ApiResult<()> {
        Self::validate_sku_fields(&sku)?;

        let affected = self.sku_repo.update(&sku)?;
        if affected == 0 {
            debug!("编辑 SKU 未命中, no-op: id={}", sku.id);
        }
        Ok(())
    }

    /// 删除 SKU，并级联删除其全部计划事实
    pub fn delete_sku(&self, id: &str) -> ApiResult<()> {
        let removed_facts = self.planning_repo.delete_by_sku(id)?;
        let affected = self.sku_repo.delete(id)?;

        if affected == 0 {
            debug!("删除 SKU 未命中, no-op: id={}", id);
        } else {
            info!("删除 SKU: id={}, 级联删除事实 {} 条", id, removed_facts);
        }
        Ok(())
    }

    /// 整体重排 SKU：按给定顺序重写集合
    ///
    /// SKU 无 seq_no 字段，仅替换集合顺序本身
    pub fn reorder_skus(&self, skus: Vec<Sku>) -> ApiResult<()> {
        self.sku_repo.replace_all(&skus)?;
        debug!("SKU 重排完成: {} 条", skus.len());
        Ok(())
    }

    // ==========================================
    // 周操作
    // ==========================================

    /// 查询全部周（存储顺序快照）
    pub fn list_weeks(&self) -> ApiResult<Vec<Week>> {
        Ok(self.week_repo.list_all()?)
    }

    /// 新增周（追加到集合末尾）
    ///
    /// # 校验
    /// - week/week_label/month/month_label 必填（去空白后非空）
    /// - week 键在现有集合中唯一
    pub fn add_week(&self, week: Week) -> ApiResult<()> {
        Self::validate_week_fields(&week)?;

        if self.week_repo.find_by_key(&week.week)?.is_some() {
            return Err(ApiError::ValidationError(format!(
                "周键已存在: {}",
                week.week
            )));
        }

        self.week_repo.insert(&week)?;
        info!("新增周: week={}, month={}", week.week, week.month);
        Ok(())
    }

    /// 编辑周（按 week 键匹配整行替换；未命中为 no-op）
    pub fn edit_week(&self, week: Week) -> ApiResult<()> {
        Self::validate_week_fields(&week)?;

        let affected = self.week_repo.update(&week)?;
        if affected == 0 {
            debug!("编辑周未命中, no-op: week={}", week.week);
        }
        Ok(())
    }

    /// 整体重排周：按给定顺序重写集合，seq_no 重新赋值为 1..N
    pub fn reorder_weeks(&self, weeks: Vec<Week>) -> ApiResult<()> {
        let reordered: Vec<Week> = weeks
            .into_iter()
            .enumerate()
            .map(|(index, mut week)| {
                week.seq_no = index as i64 + 1;
                week
            })
            .collect();

        self.week_repo.replace_all(&reordered)?;
        debug!("周重排完成: {} 条", reordered.len());
        Ok(())
    }

    /// 查询日历（月→周层级）
    ///
    /// 每次调用都基于当前周集合全量重建，不存在可失效的缓存
    pub fn get_calendar(&self) -> ApiResult<Vec<Month>> {
        let weeks = self.week_repo.list_all()?;
        Ok(CalendarDeriver::derive(&weeks))
    }

    // ==========================================
    // 字段校验（创建与编辑共用）
    // ==========================================

    fn validate_store_fields(store: &Store) -> ApiResult<()> {
        let mut errors: Vec<&str> = Vec::new();

        if store.id.trim().is_empty() {
            errors.push("ID 必填");
        }
        if store.label.trim().is_empty() {
            errors.push("名称必填");
        }
        if store.city.trim().is_empty() {
            errors.push("城市必填");
        }
        if store.state.trim().is_empty() {
            errors.push("州必填");
        }
        if store.seq_no < 0 {
            errors.push("序号不得为负");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::ValidationError(errors.join("; ")))
        }
    }

    fn validate_sku_fields(sku: &Sku) -> ApiResult<()> {
        let mut errors: Vec<&str> = Vec::new();

        if sku.id.trim().is_empty() {
            errors.push("ID 必填");
        }
        if sku.label.trim().is_empty() {
            errors.push("名称必填");
        }
        if sku.class_name.trim().is_empty() {
            errors.push("品类必填");
        }
        if sku.department.trim().is_empty() {
            errors.push("部门必填");
        }
        if sku.price <= 0.0 {
            errors.push("价格必须大于 0");
        }
        if sku.cost < 0.0 {
            errors.push("成本不得为负");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::ValidationError(errors.join("; ")))
        }
    }

    fn validate_week_fields(week: &Week) -> ApiResult<()> {
        let mut errors: Vec<&str> = Vec::new();

        if week.week.trim().is_empty() {
            errors.push("周键必填");
        }
        if week.week_label.trim().is_empty() {
            errors.push("周标签必填");
        }
        if week.month.trim().is_empty() {
            errors.push("月键必填");
        }
        if week.month_label.trim().is_empty() {
            errors.push("月标签必填");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::ValidationError(errors.join("; ")))
        }
    }
}
