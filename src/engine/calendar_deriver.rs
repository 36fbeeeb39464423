// ==========================================
// 零售商品周度计划系统 - 日历派生引擎
// ==========================================
// 职责: 从扁平周序列重建月→周层级
// 红线: 纯函数，周集合任何变更后整体重建，不做增量修补
// ==========================================

use crate::domain::calendar::{Month, Week};
use std::collections::HashMap;

// ==========================================
// CalendarDeriver - 纯函数工具类
// ==========================================
pub struct CalendarDeriver;

impl CalendarDeriver {
    /// 派生月分组
    ///
    /// # 规则
    /// - 按存储顺序遍历周，按 month 字段分组
    /// - 月顺序 = month 值的首次出现顺序（不排序）
    /// - month_label 取该 month 值首次出现的那个周的标签
    /// - 每个周恰好归入一个月，组内保持原有顺序
    ///
    /// # 参数
    /// - weeks: 周序列（存储顺序）
    ///
    /// # 返回
    /// - Vec<Month>: 月分组序列
    pub fn derive(weeks: &[Week]) -> Vec<Month> {
        let mut months: Vec<Month> = Vec::new();
        let mut index_by_month: HashMap<String, usize> = HashMap::new();

        for week in weeks {
            match index_by_month.get(&week.month) {
                Some(&idx) => {
                    months[idx].weeks.push(week.clone());
                }
                None => {
                    index_by_month.insert(week.month.clone(), months.len());
                    months.push(Month {
                        month: week.month.clone(),
                        month_label: week.month_label.clone(),
                        weeks: vec![week.clone()],
                    });
                }
            }
        }

        months
    }

    /// 按日历顺序展开全部周（月序 × 组内周序）
    ///
    /// 计划网格的列顺序以此为准，而非周表的原始顺序
    pub fn flatten(calendar: &[Month]) -> Vec<Week> {
        calendar
            .iter()
            .flat_map(|month| month.weeks.iter().cloned())
            .collect()
    }
}
