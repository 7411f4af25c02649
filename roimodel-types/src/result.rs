//! Per-department calculation results.
//!
//! Results are recomputed from an [`InputSnapshot`](crate::InputSnapshot) on demand and are
//! only ever serialized (for export), never stored.

use crate::Department;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportResult {
    pub annual_tickets: f64,
    pub num_human_agents: u64,
    #[serde(rename = "numAIAgents")]
    pub num_ai_agents: u64,
    pub human_total_cost: f64,
    pub ai_total_cost: f64,
    pub total_human_ticket_cost: f64,
    pub ai_ticket_cost: f64,
    pub savings: f64,
    pub roi: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HrResult {
    pub annual_requests: f64,
    pub num_human_agents: u64,
    #[serde(rename = "numAIAgents")]
    pub num_ai_agents: u64,
    pub human_total_cost: f64,
    pub ai_total_cost: f64,
    pub total_human_request_cost: f64,
    pub ai_request_cost: f64,
    pub savings: f64,
    pub roi: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceResult {
    pub annual_invoices: f64,
    pub num_human_agents: u64,
    #[serde(rename = "numAIAgents")]
    pub num_ai_agents: u64,
    pub human_total_cost: f64,
    pub ai_total_cost: f64,
    pub total_human_invoice_cost: f64,
    pub ai_invoice_cost: f64,
    pub savings: f64,
    pub roi: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesResult {
    pub annual_leads: f64,
    pub annual_deals: f64,
    pub annual_revenue: f64,
    /// Equal to `annual_revenue`; no AI-driven uplift is modeled.
    pub ai_revenue: f64,
    pub human_total_cost: f64,
    pub ai_total_cost: f64,
    pub savings: f64,
    pub roi: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MortgageResult {
    pub annual_leads: f64,
    pub annual_closed_loans: f64,
    pub annual_revenue: f64,
    pub human_total_cost: f64,
    pub ai_total_cost: f64,
    pub savings: f64,
    pub roi: f64,
}

/// The custom department has no formula; its result is an empty object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CustomResult {}

/// Result of one calculation, one shape per department.
///
/// Serializes as the bare per-department object (no tag), which is the JSON export format.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DepartmentResult {
    Support(SupportResult),
    Hr(HrResult),
    Finance(FinanceResult),
    Sales(SalesResult),
    Mortgage(MortgageResult),
    Custom(CustomResult),
}

impl DepartmentResult {
    pub fn department(&self) -> Department {
        match self {
            DepartmentResult::Support(_) => Department::Support,
            DepartmentResult::Hr(_) => Department::Hr,
            DepartmentResult::Finance(_) => Department::Finance,
            DepartmentResult::Sales(_) => Department::Sales,
            DepartmentResult::Mortgage(_) => Department::Mortgage,
            DepartmentResult::Custom(_) => Department::Custom,
        }
    }

    /// Headline ROI percentage; `None` for departments without a formula.
    pub fn roi(&self) -> Option<f64> {
        match self {
            DepartmentResult::Support(r) => Some(r.roi),
            DepartmentResult::Hr(r) => Some(r.roi),
            DepartmentResult::Finance(r) => Some(r.roi),
            DepartmentResult::Sales(r) => Some(r.roi),
            DepartmentResult::Mortgage(r) => Some(r.roi),
            DepartmentResult::Custom(_) => None,
        }
    }

    pub fn savings(&self) -> Option<f64> {
        match self {
            DepartmentResult::Support(r) => Some(r.savings),
            DepartmentResult::Hr(r) => Some(r.savings),
            DepartmentResult::Finance(r) => Some(r.savings),
            DepartmentResult::Sales(r) => Some(r.savings),
            DepartmentResult::Mortgage(r) => Some(r.savings),
            DepartmentResult::Custom(_) => None,
        }
    }

    /// Result fields as a JSON object keyed by their exported names.
    pub fn to_map(&self) -> serde_json::Map<String, serde_json::Value> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        }
    }
}
