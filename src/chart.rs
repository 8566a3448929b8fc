//! Chart selection for report results.
//!
//! Given a tabular result, picks at most one chart using an ordered set of
//! column-name rules. Selection is data-shape-driven only: it looks at the
//! literal column names that came back, never at which report produced them.
//! The first matching rule wins; if nothing matches (or the result is empty)
//! no chart is drawn and the UI shows a notice instead.

use crate::db::QueryResult;

/// The kind of chart to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Line,
}

/// A chart picked for a result set: which column keys the axis and which
/// columns provide the values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    /// Index of the column providing the category / x-axis labels.
    pub key_column: usize,
    /// Indices of the columns charted as values, in column order.
    pub value_columns: Vec<usize>,
    /// For line charts: rows are plotted in ascending order of the key column.
    pub sort_by_key: bool,
}

/// Selects a chart for the given result, or `None` when no rule applies.
///
/// Rules, evaluated in order against exact column names:
/// 1. `City` + `total_quantity` -> bar keyed by `City`, valued by
///    `total_quantity` alone;
/// 2. `Food_Name` + (`total_quantity` | `claim_count`) -> bar keyed by
///    `Food_Name`, valued by every other column;
/// 3. `Status` + `total_claims` -> bar keyed by `Status`, valued by every
///    other column;
/// 4. `Claim_Date` -> line keyed by `Claim_Date` (rows sorted ascending by
///    date), valued by `Quantity` if present, else every other column.
///
/// An empty result set never gets a chart, whatever its columns.
pub fn select_chart(result: &QueryResult) -> Option<ChartSpec> {
    if result.is_empty() {
        return None;
    }

    if let (Some(city), Some(qty)) = (
        result.column_index("City"),
        result.column_index("total_quantity"),
    ) {
        return Some(ChartSpec {
            kind: ChartKind::Bar,
            key_column: city,
            value_columns: vec![qty],
            sort_by_key: false,
        });
    }

    if let Some(food) = result.column_index("Food_Name") {
        if result.column_index("total_quantity").is_some()
            || result.column_index("claim_count").is_some()
        {
            return Some(ChartSpec {
                kind: ChartKind::Bar,
                key_column: food,
                value_columns: all_columns_except(result, food),
                sort_by_key: false,
            });
        }
    }

    if let (Some(status), Some(_)) = (
        result.column_index("Status"),
        result.column_index("total_claims"),
    ) {
        return Some(ChartSpec {
            kind: ChartKind::Bar,
            key_column: status,
            value_columns: all_columns_except(result, status),
            sort_by_key: false,
        });
    }

    // No report in the current catalog emits a column literally named
    // `Claim_Date`, so this branch is unreachable today. It is kept for
    // future reports rather than special-cased away.
    if let Some(date) = result.column_index("Claim_Date") {
        let value_columns = match result.column_index("Quantity") {
            Some(qty) => vec![qty],
            None => all_columns_except(result, date),
        };
        return Some(ChartSpec {
            kind: ChartKind::Line,
            key_column: date,
            value_columns,
            sort_by_key: true,
        });
    }

    None
}

/// Every column index except the key column, preserving column order.
fn all_columns_except(result: &QueryResult, key: usize) -> Vec<usize> {
    (0..result.columns.len()).filter(|&i| i != key).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{ColumnInfo, Value};
    use pretty_assertions::assert_eq;

    fn result_with(columns: &[&str], rows: usize) -> QueryResult {
        let columns: Vec<ColumnInfo> = columns
            .iter()
            .map(|name| ColumnInfo::new(*name, "VARCHAR"))
            .collect();
        let row: Vec<Value> = columns.iter().map(|_| Value::Int(1)).collect();
        QueryResult::with_data(columns, vec![row; rows])
    }

    #[test]
    fn test_city_and_total_quantity_selects_bar_by_city() {
        let result = result_with(&["City", "total_quantity"], 3);
        let spec = select_chart(&result).unwrap();
        assert_eq!(spec.kind, ChartKind::Bar);
        assert_eq!(spec.key_column, 0);
        assert_eq!(spec.value_columns, vec![1]);
    }

    #[test]
    fn test_city_rule_charts_only_total_quantity() {
        // Even with extra columns present, rule 1 charts the one column.
        let result = result_with(&["location", "City", "total_quantity", "extra"], 2);
        let spec = select_chart(&result).unwrap();
        assert_eq!(spec.key_column, 1);
        assert_eq!(spec.value_columns, vec![2]);
    }

    #[test]
    fn test_food_name_with_claim_count_selects_bar() {
        let result = result_with(&["Food_Name", "claim_count"], 5);
        let spec = select_chart(&result).unwrap();
        assert_eq!(spec.kind, ChartKind::Bar);
        assert_eq!(spec.key_column, 0);
        assert_eq!(spec.value_columns, vec![1]);
    }

    #[test]
    fn test_food_name_rule_charts_all_remaining_columns() {
        let result = result_with(&["Food_Name", "total_quantity", "claim_count"], 2);
        let spec = select_chart(&result).unwrap();
        assert_eq!(spec.key_column, 0);
        assert_eq!(spec.value_columns, vec![1, 2]);
    }

    #[test]
    fn test_food_name_without_quantity_or_count_is_not_enough() {
        // Report 13's shape: Food_Name, Quantity, Expiry_Date. No rule matches.
        let result = result_with(&["Food_Name", "Quantity", "Expiry_Date"], 4);
        assert_eq!(select_chart(&result), None);
    }

    #[test]
    fn test_status_and_total_claims_selects_bar() {
        let result = result_with(&["Status", "total_claims"], 3);
        let spec = select_chart(&result).unwrap();
        assert_eq!(spec.kind, ChartKind::Bar);
        assert_eq!(spec.key_column, 0);
        assert_eq!(spec.value_columns, vec![1]);
    }

    #[test]
    fn test_city_rule_wins_over_food_name_rule() {
        let result = result_with(&["City", "Food_Name", "total_quantity"], 2);
        let spec = select_chart(&result).unwrap();
        assert_eq!(spec.key_column, 0, "rule order: City wins");
        assert_eq!(spec.value_columns, vec![2]);
    }

    #[test]
    fn test_claim_date_selects_sorted_line_with_quantity() {
        let result = result_with(&["Claim_Date", "Quantity", "Receiver_Name"], 3);
        let spec = select_chart(&result).unwrap();
        assert_eq!(spec.kind, ChartKind::Line);
        assert_eq!(spec.key_column, 0);
        assert_eq!(spec.value_columns, vec![1]);
        assert!(spec.sort_by_key);
    }

    #[test]
    fn test_claim_date_without_quantity_charts_all_remaining() {
        let result = result_with(&["Claim_Date", "a", "b"], 3);
        let spec = select_chart(&result).unwrap();
        assert_eq!(spec.kind, ChartKind::Line);
        assert_eq!(spec.value_columns, vec![1, 2]);
    }

    #[test]
    fn test_empty_result_never_charts() {
        let result = result_with(&["City", "total_quantity"], 0);
        assert_eq!(select_chart(&result), None);
    }

    #[test]
    fn test_column_matching_is_case_sensitive() {
        // `city` is not `City`; the heuristic must not normalize names.
        let result = result_with(&["city", "total_quantity"], 3);
        assert_eq!(select_chart(&result), None);
    }

    #[test]
    fn test_timestamp_is_not_claim_date() {
        // Report 14's shape. The line-chart rule requires a column literally
        // named Claim_Date, so nothing matches and the notice is shown.
        let result = result_with(
            &[
                "Claim_ID",
                "Status",
                "Timestamp",
                "Receiver_Name",
                "Food_Name",
                "Quantity",
            ],
            3,
        );
        assert_eq!(select_chart(&result), None);
    }

    #[test]
    fn test_no_matching_columns_yields_none() {
        let result = result_with(&["total_listed_qty", "currently_available_qty"], 1);
        assert_eq!(select_chart(&result), None);
    }
}
