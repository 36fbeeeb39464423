// ==========================================
// 计划网格集成测试
// ==========================================
// 测试目标: 稀疏事实 → 稠密网格的投影口径、
//           单元格编辑回写、级联删除的一致性
// ==========================================


use merch_planning::logging;
use test_helpers::{create_app, make_sku, make_store};

/// 在网格中定位 (store, sku) 行
fn find_row<'a>(
    grid: &'a merch_planning::PlanningGrid,
    store_id: &str,
    sku_id: &str,
) -> Option<&'a merch_planning::PlanningRow> {
    grid.rows
        .iter()
        .find(|r| r.store_id == store_id && r.sku_id == sku_id)
}

/// 在行中定位某周的单元格
fn find_cell<'a>(
    row: &'a merch_planning::PlanningRow,
    week_id: &str,
) -> &'a merch_planning::PlanningCell {
    row.cells.iter().find(|c| c.week_id == week_id).unwrap()
}

#[test]
fn test_grid_is_dense_cross_product() {
    logging::init_test();
    let app = create_app();

    let stores = app.master_data_api.list_stores().unwrap();
    let skus = app.master_data_api.list_skus().unwrap();
    let weeks = app.master_data_api.list_weeks().unwrap();
    let grid = app.planning_api.get_grid().unwrap();

    assert_eq!(grid.rows.len(), stores.len() * skus.len());
    for row in &grid.rows {
        assert_eq!(row.cells.len(), weeks.len());
    }
}

#[test]
fn test_missing_fact_projects_zero_with_unit_margin_percent() {
    let app = create_app();

    // 新增一对无任何事实的 (门店, SKU)
    app.master_data_api
        .add_store(make_store("ST910", "Empty Planning Store"))
        .unwrap();
    app.master_data_api
        .add_sku(make_sku("SK0910", 10.0, 6.0))
        .unwrap();

    let grid = app.planning_api.get_grid().unwrap();
    let row = find_row(&grid, "ST910", "SK0910").unwrap();

    for cell in &row.cells {
        assert_eq!(cell.sales_units, 0);
        assert_eq!(cell.sales_dollars, 0.0);
        assert_eq!(cell.gm_dollars, 0.0);
        // 毛利率只由 price/cost 决定，与销量无关
        assert_eq!(cell.gm_percent, 40.0);
    }
}

#[test]
fn test_recorded_sale_projects_derived_metrics() {
    let app = create_app();

    app.master_data_api
        .add_store(make_store("ST911", "Metrics Store"))
        .unwrap();
    app.master_data_api
        .add_sku(make_sku("SK0911", 10.0, 6.0))
        .unwrap();

    app.planning_api
        .record_sale("ST911", "SK0911", "W01", "5")
        .unwrap();

    let grid = app.planning_api.get_grid().unwrap();
    let cell = find_cell(find_row(&grid, "ST911", "SK0911").unwrap(), "W01");

    assert_eq!(cell.sales_units, 5);
    assert_eq!(cell.sales_dollars, 50.0);
    assert_eq!(cell.gm_dollars, 20.0);
    assert_eq!(cell.gm_percent, 40.0);
}

#[test]
fn test_record_sale_overwrites_then_parse_failure_coerces_to_zero() {
    let app = create_app();

    // 同一单元格先写 "7" 再写 "abc"：最终销量是 0 而不是 7
    app.planning_api
        .record_sale("ST001", "SK0001", "W30", "7")
        .unwrap();
    let fact = app
        .planning_api
        .record_sale("ST001", "SK0001", "W30", "abc")
        .unwrap();

    assert_eq!(fact.sales_units, 0);

    let grid = app.planning_api.get_grid().unwrap();
    let cell = find_cell(find_row(&grid, "ST001", "SK0001").unwrap(), "W30");
    assert_eq!(cell.sales_units, 0);
}

#[test]
fn test_upsert_is_idempotent_for_identical_input() {
    let app = create_app();

    app.planning_api
        .record_sale("ST002", "SK0002", "W40", "9")
        .unwrap();
    let count_after_first = app.planning_repo.count().unwrap();

    app.planning_api
        .record_sale("ST002", "SK0002", "W40", "9")
        .unwrap();
    let count_after_second = app.planning_repo.count().unwrap();

    // 重复同一写入不产生新事实
    assert_eq!(count_after_first, count_after_second);

    let grid = app.planning_api.get_grid().unwrap();
    let cell = find_cell(find_row(&grid, "ST002", "SK0002").unwrap(), "W40");
    assert_eq!(cell.sales_units, 9);
}

#[test]
fn test_record_sale_rejects_blank_coordinates() {
    let app = create_app();

    assert!(app
        .planning_api
        .record_sale("", "SK0001", "W01", "5")
        .is_err());
    assert!(app
        .planning_api
        .record_sale("ST001", " ", "W01", "5")
        .is_err());
}

#[test]
fn test_delete_store_cascades_facts_and_removes_rows() {
    let app = create_app();

    // 种子数据里 ST001 持有事实
    let grid_before = app.planning_api.get_grid().unwrap();
    assert!(find_row(&grid_before, "ST001", "SK0001").is_some());

    app.master_data_api.delete_store("ST001").unwrap();

    // 网格不再含该门店的任何行
    let grid = app.planning_api.get_grid().unwrap();
    assert!(grid.rows.iter().all(|r| r.store_id != "ST001"));

    // 重建同 id 门店：无孤儿事实残留，整行回到零
    app.master_data_api
        .add_store(make_store("ST001", "Rebuilt Store"))
        .unwrap();
    let grid = app.planning_api.get_grid().unwrap();
    for row in grid.rows.iter().filter(|r| r.store_id == "ST001") {
        assert!(row.cells.iter().all(|c| c.sales_units == 0));
    }
}

#[test]
fn test_delete_sku_cascades_facts_for_every_store() {
    let app = create_app();

    app.master_data_api.delete_sku("SK0001").unwrap();

    let grid = app.planning_api.get_grid().unwrap();
    assert!(grid.rows.iter().all(|r| r.sku_id != "SK0001"));

    // 同 id 重建后全部归零（旧事实已级联删除）
    app.master_data_api
        .add_sku(make_sku("SK0001", 20.0, 10.0))
        .unwrap();
    let grid = app.planning_api.get_grid().unwrap();
    for row in grid.rows.iter().filter(|r| r.sku_id == "SK0001") {
        assert!(row.cells.iter().all(|c| c.sales_units == 0));
    }
}

#[test]
fn test_grid_snapshot_is_not_live() {
    let app = create_app();

    let snapshot = app.planning_api.get_grid().unwrap();
    app.planning_api
        .record_sale("ST003", "SK0003", "W45", "33")
        .unwrap();

    // 旧快照不随状态变化；重新查询才能看到新值
    let old_cell = find_cell(find_row(&snapshot, "ST003", "SK0003").unwrap(), "W45");
    assert_eq!(old_cell.sales_units, 0);

    let fresh = app.planning_api.get_grid().unwrap();
    let new_cell = find_cell(find_row(&fresh, "ST003", "SK0003").unwrap(), "W45");
    assert_eq!(new_cell.sales_units, 33);
}

#[test]
fn test_cascade_leaves_no_orphan_facts() {
    let app = create_app();

    let facts_with_st001 = app
        .planning_repo
        .list_by_store("ST001")
        .unwrap()
        .len();
    assert!(facts_with_st001 > 0);

    app.master_data_api.delete_store("ST001").unwrap();

    assert!(app.planning_repo.list_by_store("ST001").unwrap().is_empty());
}
