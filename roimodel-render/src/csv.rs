use roimodel_domain::department_result_keys;
use roimodel_types::{Department, DepartmentResult};

/// Header of the department's fixed result keys and a single data row.
///
/// A key missing from `result` leaves its cell empty.
pub fn render_csv(department: Department, result: &DepartmentResult) -> String {
    let keys = department_result_keys(department);
    let values = result.to_map();

    let row: Vec<String> = keys
        .iter()
        .map(|k| values.get(*k).map(csv_cell).unwrap_or_default())
        .collect();

    format!("{}\n{}\n", keys.join(","), row.join(","))
}

fn csv_cell(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) if s.contains([',', '"', '\n']) => {
            format!("\"{}\"", s.replace('"', "\"\""))
        }
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roimodel_types::{CustomResult, SalesResult};

    #[test]
    fn sales_csv_layout() {
        let result = DepartmentResult::Sales(SalesResult {
            annual_leads: 6000.0,
            annual_deals: 900.0,
            annual_revenue: 7_200_000.0,
            ai_revenue: 7_200_000.0,
            human_total_cost: 180_000.0,
            ai_total_cost: 40_000.0,
            savings: 140_000.0,
            roi: 350.0,
        });
        let csv = render_csv(Department::Sales, &result);
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("annualLeads,annualDeals,annualRevenue,aiRevenue,humanTotalCost,aiTotalCost,savings,roi")
        );
        assert_eq!(
            lines.next(),
            Some("6000.0,900.0,7200000.0,7200000.0,180000.0,40000.0,140000.0,350.0")
        );
    }

    #[test]
    fn mismatched_result_leaves_cells_empty() {
        let result = DepartmentResult::Custom(CustomResult {});
        let csv = render_csv(Department::Mortgage, &result);
        let row = csv.lines().nth(1).expect("row");
        assert_eq!(row, ",,,,,,");
    }

    #[test]
    fn custom_csv_is_blank() {
        let csv = render_csv(Department::Custom, &DepartmentResult::Custom(CustomResult {}));
        assert_eq!(csv, "\n\n");
    }
}
