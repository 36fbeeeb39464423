// ==========================================
// 主数据 API 集成测试
// ==========================================
// 测试目标: 实体增删改/重排的校验边界与 no-op 语义
// ==========================================


use merch_planning::api::ApiError;
use merch_planning::logging;
use test_helpers::{create_app, make_sku, make_store, make_week};

// ==========================================
// 门店
// ==========================================

#[test]
fn test_add_store_appends_to_end() {
    logging::init_test();
    let app = create_app();

    app.master_data_api
        .add_store(make_store("ST900", "Denver Peak Outfitters"))
        .unwrap();

    let stores = app.master_data_api.list_stores().unwrap();
    assert_eq!(stores.last().unwrap().id, "ST900");
}

#[test]
fn test_add_store_rejects_duplicate_id() {
    let app = create_app();

    // ST001 来自种子数据
    let result = app.master_data_api.add_store(make_store("ST001", "Imposter"));

    assert!(matches!(result, Err(ApiError::ValidationError(_))));
    // 变更整体丢弃：集合内仍然只有一个 ST001
    let count = app
        .master_data_api
        .list_stores()
        .unwrap()
        .iter()
        .filter(|s| s.id == "ST001")
        .count();
    assert_eq!(count, 1);
}

#[test]
fn test_add_store_rejects_missing_fields() {
    let app = create_app();

    let mut store = make_store("ST901", "Half Filled");
    store.city = "  ".to_string();

    assert!(matches!(
        app.master_data_api.add_store(store),
        Err(ApiError::ValidationError(_))
    ));
}

#[test]
fn test_add_store_rejects_negative_seq_no() {
    let app = create_app();

    let mut store = make_store("ST902", "Negative Seq");
    store.seq_no = -1;

    assert!(matches!(
        app.master_data_api.add_store(store),
        Err(ApiError::ValidationError(_))
    ));
}

#[test]
fn test_edit_store_replaces_matching_row() {
    let app = create_app();

    let mut store = app.master_data_api.list_stores().unwrap()[0].clone();
    store.label = "Renamed Store".to_string();
    app.master_data_api.edit_store(store.clone()).unwrap();

    let stores = app.master_data_api.list_stores().unwrap();
    assert_eq!(stores[0].label, "Renamed Store");
    // 编辑不改变存储顺序
    assert_eq!(stores[0].id, store.id);
}

#[test]
fn test_edit_unknown_store_is_noop() {
    let app = create_app();
    let before = app.master_data_api.list_stores().unwrap();

    app.master_data_api
        .edit_store(make_store("ST999", "Ghost"))
        .unwrap();

    assert_eq!(app.master_data_api.list_stores().unwrap(), before);
}

#[test]
fn test_delete_unknown_store_is_noop() {
    let app = create_app();
    let before = app.master_data_api.list_stores().unwrap();

    app.master_data_api.delete_store("ST999").unwrap();

    assert_eq!(app.master_data_api.list_stores().unwrap(), before);
}

#[test]
fn test_reorder_stores_reassigns_seq_no_1_to_n() {
    let app = create_app();

    let mut stores = app.master_data_api.list_stores().unwrap();
    stores.reverse();
    app.master_data_api.reorder_stores(stores.clone()).unwrap();

    let after = app.master_data_api.list_stores().unwrap();
    // 存储顺序变成传入顺序
    let ids: Vec<&str> = after.iter().map(|s| s.id.as_str()).collect();
    let expected: Vec<&str> = stores.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, expected);
    // seq_no 精确重赋为 1..N
    let seqs: Vec<i64> = after.iter().map(|s| s.seq_no).collect();
    assert_eq!(seqs, (1..=after.len() as i64).collect::<Vec<i64>>());
}

// ==========================================
// SKU
// ==========================================

#[test]
fn test_add_sku_rejects_nonpositive_price() {
    let app = create_app();

    assert!(matches!(
        app.master_data_api.add_sku(make_sku("SK0900", 0.0, 0.0)),
        Err(ApiError::ValidationError(_))
    ));
}

#[test]
fn test_add_sku_rejects_negative_cost() {
    let app = create_app();

    assert!(matches!(
        app.master_data_api.add_sku(make_sku("SK0900", 10.0, -1.0)),
        Err(ApiError::ValidationError(_))
    ));
}

#[test]
fn test_add_sku_rejects_duplicate_id() {
    let app = create_app();

    assert!(matches!(
        app.master_data_api.add_sku(make_sku("SK0001", 10.0, 5.0)),
        Err(ApiError::ValidationError(_))
    ));
}

#[test]
fn test_edit_sku_and_noop() {
    let app = create_app();

    let mut sku = app.master_data_api.list_skus().unwrap()[0].clone();
    sku.price = 99.0;
    app.master_data_api.edit_sku(sku.clone()).unwrap();
    assert_eq!(app.master_data_api.list_skus().unwrap()[0].price, 99.0);

    let before = app.master_data_api.list_skus().unwrap();
    app.master_data_api
        .edit_sku(make_sku("SK9999", 10.0, 5.0))
        .unwrap();
    assert_eq!(app.master_data_api.list_skus().unwrap(), before);
}

#[test]
fn test_reorder_skus_keeps_fields_untouched() {
    let app = create_app();

    let mut skus = app.master_data_api.list_skus().unwrap();
    skus.reverse();
    let expected = skus.clone();
    app.master_data_api.reorder_skus(skus).unwrap();

    // SKU 无 seq_no，重排只替换集合顺序，字段原样保留
    assert_eq!(app.master_data_api.list_skus().unwrap(), expected);
}

// ==========================================
// 周与日历
// ==========================================

#[test]
fn test_add_week_rejects_duplicate_key() {
    let app = create_app();

    assert!(matches!(
        app.master_data_api
            .add_week(make_week("W01", "M01", "Jan", 53)),
        Err(ApiError::ValidationError(_))
    ));
}

#[test]
fn test_add_week_extends_calendar() {
    let app = create_app();

    // 种子日历 12 个月；追加一个新月份的周后变成 13 组
    app.master_data_api
        .add_week(make_week("W53", "M13", "Extra", 53))
        .unwrap();

    let calendar = app.master_data_api.get_calendar().unwrap();
    assert_eq!(calendar.len(), 13);
    assert_eq!(calendar.last().unwrap().month, "M13");
    assert_eq!(calendar.last().unwrap().weeks.len(), 1);
}

#[test]
fn test_edit_week_regroups_calendar() {
    let app = create_app();

    // 把 W01 改挂到新月份 M90：M01 少一周，月组多一组
    let mut w01 = app
        .master_data_api
        .list_weeks()
        .unwrap()
        .into_iter()
        .find(|w| w.week == "W01")
        .unwrap();
    w01.month = "M90".to_string();
    w01.month_label = "Shifted".to_string();
    app.master_data_api.edit_week(w01).unwrap();

    let calendar = app.master_data_api.get_calendar().unwrap();
    // W01 在周序列最前，M90 成为首个月组
    assert_eq!(calendar[0].month, "M90");
    assert_eq!(calendar[0].weeks.len(), 1);

    let m01 = calendar.iter().find(|m| m.month == "M01").unwrap();
    assert_eq!(m01.weeks.len(), 3);
}

#[test]
fn test_reorder_weeks_changes_calendar_order_and_seq_no() {
    let app = create_app();

    let mut weeks = app.master_data_api.list_weeks().unwrap();
    weeks.reverse();
    app.master_data_api.reorder_weeks(weeks).unwrap();

    let after = app.master_data_api.list_weeks().unwrap();
    assert_eq!(after[0].week, "W52");
    let seqs: Vec<i64> = after.iter().map(|w| w.seq_no).collect();
    assert_eq!(seqs, (1..=52).collect::<Vec<i64>>());

    // 日历按新存储顺序重建：12 月在前
    let calendar = app.master_data_api.get_calendar().unwrap();
    assert_eq!(calendar[0].month, "M12");
}

#[test]
fn test_calendar_is_deterministic() {
    let app = create_app();

    let first = app.master_data_api.get_calendar().unwrap();
    let second = app.master_data_api.get_calendar().unwrap();
    assert_eq!(first, second);
}
