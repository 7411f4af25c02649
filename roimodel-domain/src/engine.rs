//! Calculation engine: pure, total functions from a snapshot to a [`DepartmentResult`].
//!
//! Nothing here returns an error. Missing or non-finite inputs read as zero and every
//! denominator is guarded, so a result can always be rendered.

use roimodel_types::fields::{AI_IMPLEMENTATION_COST, HUMAN_ANNUAL_COST};
use roimodel_types::{
    CustomResult, Department, DepartmentResult, FinanceResult, HrResult, InputSnapshot,
    MortgageResult, SalesResult, SupportResult,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Working hours in one full-time-equivalent year.
const FTE_HOURS_PER_YEAR: f64 = 2080.0;

/// How implementation cost enters the AI total for workload departments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostModel {
    /// Amortized per AI unit and then added again as a fixed cost (2x implementation cost).
    #[default]
    Compatible,
    /// Implementation cost counted once.
    Corrected,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CalcOptions {
    pub cost_model: CostModel,
}

/// `(savings / implementation_cost) * 100`, or zero without an implementation cost.
pub fn roi(savings: f64, implementation_cost: f64) -> f64 {
    if implementation_cost > 0.0 {
        (savings / implementation_cost) * 100.0
    } else {
        0.0
    }
}

/// Full-time staff needed for `monthly_volume` items at `minutes_per_item`, at least one.
pub fn required_headcount(monthly_volume: f64, minutes_per_item: f64) -> u64 {
    let hours = monthly_volume * minutes_per_item * 12.0 / (FTE_HOURS_PER_YEAR * 60.0);
    let needed = hours.ceil();
    if needed >= 1.0 { needed as u64 } else { 1 }
}

pub fn calculate(department: Department, snapshot: &InputSnapshot) -> DepartmentResult {
    calculate_with(department, snapshot, &CalcOptions::default())
}

/// `department` selects the formula; it need not match `snapshot.department`.
pub fn calculate_with(
    department: Department,
    snapshot: &InputSnapshot,
    options: &CalcOptions,
) -> DepartmentResult {
    let result = match department {
        Department::Support => {
            let w = workload(snapshot, "ticketsPerMonth", "avgHandleTime", options);
            DepartmentResult::Support(SupportResult {
                annual_tickets: w.annual_volume,
                num_human_agents: w.human_headcount,
                num_ai_agents: w.ai_headcount,
                human_total_cost: w.human_total_cost,
                ai_total_cost: w.ai_total_cost,
                total_human_ticket_cost: w.human_total_cost,
                ai_ticket_cost: w.ai_unit_cost,
                savings: w.savings,
                roi: w.roi,
            })
        }
        Department::Hr => {
            let w = workload(snapshot, "requestsPerMonth", "avgHandleTime", options);
            DepartmentResult::Hr(HrResult {
                annual_requests: w.annual_volume,
                num_human_agents: w.human_headcount,
                num_ai_agents: w.ai_headcount,
                human_total_cost: w.human_total_cost,
                ai_total_cost: w.ai_total_cost,
                total_human_request_cost: w.human_total_cost,
                ai_request_cost: w.ai_unit_cost,
                savings: w.savings,
                roi: w.roi,
            })
        }
        Department::Finance => {
            let w = workload(snapshot, "invoicesPerMonth", "avgProcessingTime", options);
            DepartmentResult::Finance(FinanceResult {
                annual_invoices: w.annual_volume,
                num_human_agents: w.human_headcount,
                num_ai_agents: w.ai_headcount,
                human_total_cost: w.human_total_cost,
                ai_total_cost: w.ai_total_cost,
                total_human_invoice_cost: w.human_total_cost,
                ai_invoice_cost: w.ai_unit_cost,
                savings: w.savings,
                roi: w.roi,
            })
        }
        Department::Sales => DepartmentResult::Sales(sales(snapshot)),
        Department::Mortgage => DepartmentResult::Mortgage(mortgage(snapshot)),
        Department::Custom => DepartmentResult::Custom(CustomResult {}),
    };

    debug!(
        department = %department,
        snapshot_department = %snapshot.department,
        roi = ?result.roi(),
        "calculated result"
    );
    result
}

struct Workload {
    annual_volume: f64,
    human_headcount: u64,
    ai_headcount: u64,
    human_total_cost: f64,
    ai_unit_cost: f64,
    ai_total_cost: f64,
    savings: f64,
    roi: f64,
}

// Support, HR and Finance share one shape; only the field names differ.
fn workload(
    snapshot: &InputSnapshot,
    volume_key: &str,
    minutes_key: &str,
    options: &CalcOptions,
) -> Workload {
    let monthly_volume = snapshot.number(volume_key);
    let minutes = snapshot.number(minutes_key);
    let rate = snapshot.number(HUMAN_ANNUAL_COST);
    let implementation = snapshot.number(AI_IMPLEMENTATION_COST);

    // AI staffing is sized exactly like the human team.
    let human_headcount = required_headcount(monthly_volume, minutes);
    let ai_headcount = required_headcount(monthly_volume, minutes);

    let human_total_cost = human_headcount as f64 * rate;
    let ai_unit_cost = implementation / (ai_headcount as f64).max(1.0);
    let amortized = ai_headcount as f64 * ai_unit_cost;
    let ai_total_cost = match options.cost_model {
        CostModel::Compatible => amortized + implementation,
        CostModel::Corrected => amortized,
    };
    let savings = human_total_cost - ai_total_cost;

    Workload {
        annual_volume: monthly_volume * 12.0,
        human_headcount,
        ai_headcount,
        human_total_cost,
        ai_unit_cost,
        ai_total_cost,
        savings,
        roi: roi(savings, implementation),
    }
}

fn sales(snapshot: &InputSnapshot) -> SalesResult {
    let annual_leads = snapshot.number("leadsPerMonth") * 12.0;
    let annual_deals = annual_leads * snapshot.number("conversionRate") / 100.0;
    let annual_revenue = annual_deals * snapshot.number("avgDealSize");
    let implementation = snapshot.number(AI_IMPLEMENTATION_COST);

    let human_total_cost = snapshot.number("numHumanAgents") * snapshot.number(HUMAN_ANNUAL_COST);
    let ai_total_cost = snapshot.number("numAIAgents") * implementation;
    let savings = human_total_cost - ai_total_cost;

    SalesResult {
        annual_leads,
        annual_deals,
        annual_revenue,
        ai_revenue: annual_revenue,
        human_total_cost,
        ai_total_cost,
        savings,
        roi: roi(savings, implementation),
    }
}

fn mortgage(snapshot: &InputSnapshot) -> MortgageResult {
    let annual_leads = snapshot.number("leadsPerMonth") * 12.0;
    let annual_closed_loans = (annual_leads * snapshot.number("conversionRate") / 100.0).round();
    let annual_revenue = annual_closed_loans * snapshot.number("avgLoanValue");
    let implementation = snapshot.number(AI_IMPLEMENTATION_COST);
    let compliance = snapshot.number("complianceCost");

    let human_total_cost =
        snapshot.number("numHumanAgents") * snapshot.number(HUMAN_ANNUAL_COST) + compliance;
    let ai_total_cost = snapshot.number("numAIAgents") * implementation + compliance;
    let savings = human_total_cost - ai_total_cost;

    MortgageResult {
        annual_leads,
        annual_closed_loans,
        annual_revenue,
        human_total_cost,
        ai_total_cost,
        savings,
        roi: roi(savings, implementation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roimodel_types::FieldInput;

    fn snapshot(department: Department, values: &[(&str, f64)]) -> InputSnapshot {
        let mut snap = InputSnapshot::new(department);
        for (k, v) in values {
            snap.fields.insert(k.to_string(), FieldInput::annual(*v));
        }
        snap
    }

    #[test]
    fn headcount_is_at_least_one() {
        assert_eq!(required_headcount(0.0, 0.0), 1);
        assert_eq!(required_headcount(-50.0, 8.0), 1);
        assert_eq!(required_headcount(1200.0, 8.0), 1);
    }

    #[test]
    fn headcount_rounds_up_partial_fte() {
        // 10_400 * 12 * 12 / 124_800 = 12 exactly; one more item tips it over.
        assert_eq!(required_headcount(10_400.0, 12.0), 12);
        assert_eq!(required_headcount(10_401.0, 12.0), 13);
    }

    #[test]
    fn compatible_model_double_counts_implementation() {
        let snap = snapshot(
            Department::Hr,
            &[
                ("requestsPerMonth", 50_000.0),
                ("avgHandleTime", 10.0),
                ("humanAnnualCost", 70_000.0),
                ("aiImplementationCost", 45_000.0),
            ],
        );
        let DepartmentResult::Hr(r) = calculate(Department::Hr, &snap) else {
            panic!("expected hr result");
        };
        assert!(r.num_ai_agents > 1);
        assert!((r.ai_total_cost - 90_000.0).abs() < 1e-6);
    }

    #[test]
    fn corrected_model_counts_implementation_once() {
        let snap = snapshot(
            Department::Finance,
            &[
                ("invoicesPerMonth", 3000.0),
                ("avgProcessingTime", 6.0),
                ("humanAnnualCost", 75_000.0),
                ("aiImplementationCost", 60_000.0),
            ],
        );
        let options = CalcOptions {
            cost_model: CostModel::Corrected,
        };
        let DepartmentResult::Finance(r) = calculate_with(Department::Finance, &snap, &options)
        else {
            panic!("expected finance result");
        };
        assert!((r.ai_total_cost - 60_000.0).abs() < 1e-6);
        assert_eq!(r.savings, r.human_total_cost - 60_000.0);
    }

    #[test]
    fn mortgage_adds_compliance_to_both_sides() {
        let snap = snapshot(
            Department::Mortgage,
            &[
                ("leadsPerMonth", 300.0),
                ("conversionRate", 8.0),
                ("avgLoanValue", 350_000.0),
                ("numHumanAgents", 3.0),
                ("numAIAgents", 1.0),
                ("humanAnnualCost", 85_000.0),
                ("aiImplementationCost", 75_000.0),
                ("complianceCost", 25_000.0),
            ],
        );
        let DepartmentResult::Mortgage(r) = calculate(Department::Mortgage, &snap) else {
            panic!("expected mortgage result");
        };
        assert_eq!(r.annual_leads, 3600.0);
        assert_eq!(r.annual_closed_loans, 288.0);
        assert_eq!(r.annual_revenue, 288.0 * 350_000.0);
        assert_eq!(r.human_total_cost, 280_000.0);
        assert_eq!(r.ai_total_cost, 100_000.0);
        assert_eq!(r.savings, 180_000.0);
        assert!((r.roi - 240.0).abs() < 1e-9);
    }

    #[test]
    fn mortgage_rounds_closed_loans() {
        let snap = snapshot(
            Department::Mortgage,
            &[("leadsPerMonth", 10.0), ("conversionRate", 7.0)],
        );
        let DepartmentResult::Mortgage(r) = calculate(Department::Mortgage, &snap) else {
            panic!("expected mortgage result");
        };
        // 120 * 0.07 = 8.4
        assert_eq!(r.annual_closed_loans, 8.0);
    }

    #[test]
    fn custom_yields_empty_result() {
        let snap = InputSnapshot::new(Department::Custom);
        assert_eq!(
            calculate(Department::Custom, &snap),
            DepartmentResult::Custom(CustomResult {})
        );
    }

    #[test]
    fn empty_snapshot_never_produces_nan() {
        for d in Department::ALL {
            let result = calculate(d, &InputSnapshot::new(d));
            for (key, value) in result.to_map() {
                let n = value.as_f64().expect("numeric");
                assert!(n.is_finite(), "{d}.{key} = {n}");
            }
        }
    }
}
