//! Static, versioned catalogue of department templates and industry benchmarks.

use roimodel_types::{Department, FieldSpec, Template, ValueType};

const REGISTRY_VERSION: &str = "2024.1";

pub fn registry_version() -> &'static str {
    REGISTRY_VERSION
}

const fn number(
    key: &'static str,
    label: &'static str,
    help_text: &'static str,
    benchmark_value: f64,
    benchmark_source: &'static str,
) -> FieldSpec {
    FieldSpec {
        key,
        label,
        value_type: ValueType::Number,
        help_text: Some(help_text),
        benchmark_value: Some(benchmark_value),
        benchmark_source: Some(benchmark_source),
    }
}

const HUMAN_COST_HELP: &str = "Fully loaded annual cost of one full-time employee.";
const AI_COST_HELP: &str = "One-time AI implementation and first-year licensing cost.";

static SUPPORT_FIELDS: &[FieldSpec] = &[
    number(
        "ticketsPerMonth",
        "Tickets per Month",
        "Average number of support tickets received each month.",
        1200.0,
        "HDI Technical Support Practices & Salary Report",
    ),
    number(
        "avgHandleTime",
        "Average Handle Time (minutes)",
        "Average agent time spent resolving one ticket.",
        8.0,
        "MetricNet Service Desk Benchmark",
    ),
    number(
        "humanAnnualCost",
        "Human Agent Annual Cost",
        HUMAN_COST_HELP,
        65_000.0,
        "U.S. Bureau of Labor Statistics, Customer Service Representatives",
    ),
    number(
        "aiImplementationCost",
        "AI Implementation Cost",
        AI_COST_HELP,
        50_000.0,
        "Gartner Customer Service AI Deployment Survey",
    ),
];

static HR_FIELDS: &[FieldSpec] = &[
    number(
        "requestsPerMonth",
        "Employee Requests per Month",
        "HR inquiries and service requests received each month.",
        800.0,
        "SHRM Human Capital Benchmarking Report",
    ),
    number(
        "avgHandleTime",
        "Average Handle Time (minutes)",
        "Average HR staff time spent per request.",
        12.0,
        "APQC Human Resources Open Standards Benchmarking",
    ),
    number(
        "humanAnnualCost",
        "HR Specialist Annual Cost",
        HUMAN_COST_HELP,
        70_000.0,
        "U.S. Bureau of Labor Statistics, Human Resources Specialists",
    ),
    number(
        "aiImplementationCost",
        "AI Implementation Cost",
        AI_COST_HELP,
        45_000.0,
        "Deloitte Global Human Capital Trends",
    ),
];

static FINANCE_FIELDS: &[FieldSpec] = &[
    number(
        "invoicesPerMonth",
        "Invoices per Month",
        "Invoices and transactions processed each month.",
        3000.0,
        "APQC Accounts Payable Benchmarks",
    ),
    number(
        "avgProcessingTime",
        "Average Processing Time (minutes)",
        "Average staff time spent processing one invoice.",
        6.0,
        "Ardent Partners State of ePayables",
    ),
    number(
        "humanAnnualCost",
        "Accounting Clerk Annual Cost",
        HUMAN_COST_HELP,
        75_000.0,
        "U.S. Bureau of Labor Statistics, Bookkeeping and Accounting Clerks",
    ),
    number(
        "aiImplementationCost",
        "AI Implementation Cost",
        AI_COST_HELP,
        60_000.0,
        "IDC Worldwide AI Spending Guide",
    ),
];

static SALES_FIELDS: &[FieldSpec] = &[
    number(
        "leadsPerMonth",
        "Leads per Month",
        "Qualified inbound and outbound leads each month.",
        500.0,
        "HubSpot Sales Benchmarks",
    ),
    number(
        "conversionRate",
        "Conversion Rate (%)",
        "Share of leads that become closed deals.",
        15.0,
        "Salesforce State of Sales",
    ),
    number(
        "avgDealSize",
        "Average Deal Size",
        "Average revenue per closed deal.",
        8000.0,
        "HubSpot Sales Benchmarks",
    ),
    number(
        "numHumanAgents",
        "Sales Representatives",
        "Number of human sales representatives.",
        2.0,
        "Bridge Group SDR Metrics Report",
    ),
    number(
        "numAIAgents",
        "AI Sales Agents",
        "Number of AI agents deployed.",
        1.0,
        "Vendor deployment guidance",
    ),
    number(
        "humanAnnualCost",
        "Sales Rep Annual Cost",
        HUMAN_COST_HELP,
        90_000.0,
        "U.S. Bureau of Labor Statistics, Sales Representatives",
    ),
    number(
        "aiImplementationCost",
        "AI Implementation Cost",
        AI_COST_HELP,
        40_000.0,
        "Gartner Sales Technology Survey",
    ),
];

static MORTGAGE_FIELDS: &[FieldSpec] = &[
    number(
        "leadsPerMonth",
        "Loan Leads per Month",
        "Mortgage applications and inquiries each month.",
        300.0,
        "MBA Weekly Applications Survey",
    ),
    number(
        "conversionRate",
        "Pull-through Rate (%)",
        "Share of leads that close as funded loans.",
        8.0,
        "MBA Quarterly Performance Report",
    ),
    number(
        "avgLoanValue",
        "Average Loan Value",
        "Average revenue attributed to one closed loan.",
        350_000.0,
        "Freddie Mac Primary Mortgage Market Survey",
    ),
    number(
        "numHumanAgents",
        "Loan Officers",
        "Number of human loan officers.",
        3.0,
        "MBA Quarterly Performance Report",
    ),
    number(
        "numAIAgents",
        "AI Agents",
        "Number of AI agents deployed.",
        1.0,
        "Vendor deployment guidance",
    ),
    number(
        "humanAnnualCost",
        "Loan Officer Annual Cost",
        HUMAN_COST_HELP,
        85_000.0,
        "U.S. Bureau of Labor Statistics, Loan Officers",
    ),
    number(
        "aiImplementationCost",
        "AI Implementation Cost",
        AI_COST_HELP,
        75_000.0,
        "STRATMOR Technology Insight Study",
    ),
    number(
        "complianceCost",
        "Annual Compliance Cost",
        "Fixed regulatory compliance cost carried by either team.",
        25_000.0,
        "CFPB Regulatory Burden Estimates",
    ),
];

static TEMPLATES: [Template; 6] = [
    Template {
        department: Department::Support,
        display_name: "Customer Support",
        description: "Ticket volume and handle time drive required agent headcount.",
        fields: SUPPORT_FIELDS,
    },
    Template {
        department: Department::Hr,
        display_name: "Human Resources",
        description: "Employee request volume and handle time drive HR staffing.",
        fields: HR_FIELDS,
    },
    Template {
        department: Department::Finance,
        display_name: "Finance & Accounting",
        description: "Invoice volume and processing time drive clerk staffing.",
        fields: FINANCE_FIELDS,
    },
    Template {
        department: Department::Sales,
        display_name: "Sales",
        description: "Lead volume, conversion, and deal size drive revenue; headcount is explicit.",
        fields: SALES_FIELDS,
    },
    Template {
        department: Department::Mortgage,
        display_name: "Mortgage Lending",
        description: "Loan pipeline economics with a fixed compliance cost on both sides.",
        fields: MORTGAGE_FIELDS,
    },
    Template {
        department: Department::Custom,
        display_name: "Custom",
        description: "Extension point without a built-in formula.",
        fields: &[],
    },
];

/// Template for `department`. Total: every department has exactly one.
pub fn get_template(department: Department) -> &'static Template {
    let idx = match department {
        Department::Support => 0,
        Department::Hr => 1,
        Department::Finance => 2,
        Department::Sales => 3,
        Department::Mortgage => 4,
        Department::Custom => 5,
    };
    &TEMPLATES[idx]
}

pub fn all_templates() -> &'static [Template] {
    &TEMPLATES
}

/// Fixed, ordered result keys used for the CSV header.
pub fn department_result_keys(department: Department) -> &'static [&'static str] {
    match department {
        Department::Support => &[
            "annualTickets",
            "numHumanAgents",
            "numAIAgents",
            "humanTotalCost",
            "aiTotalCost",
            "totalHumanTicketCost",
            "aiTicketCost",
            "savings",
            "roi",
        ],
        Department::Hr => &[
            "annualRequests",
            "numHumanAgents",
            "numAIAgents",
            "humanTotalCost",
            "aiTotalCost",
            "totalHumanRequestCost",
            "aiRequestCost",
            "savings",
            "roi",
        ],
        Department::Finance => &[
            "annualInvoices",
            "numHumanAgents",
            "numAIAgents",
            "humanTotalCost",
            "aiTotalCost",
            "totalHumanInvoiceCost",
            "aiInvoiceCost",
            "savings",
            "roi",
        ],
        Department::Sales => &[
            "annualLeads",
            "annualDeals",
            "annualRevenue",
            "aiRevenue",
            "humanTotalCost",
            "aiTotalCost",
            "savings",
            "roi",
        ],
        Department::Mortgage => &[
            "annualLeads",
            "annualClosedLoans",
            "annualRevenue",
            "humanTotalCost",
            "aiTotalCost",
            "savings",
            "roi",
        ],
        Department::Custom => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn every_department_has_its_own_template() {
        for d in Department::ALL {
            assert_eq!(get_template(d).department, d);
        }
        assert_eq!(all_templates().len(), Department::ALL.len());
    }

    #[test]
    fn keys_are_unique_within_each_template() {
        for t in all_templates() {
            let keys: BTreeSet<&str> = t.keys().collect();
            assert_eq!(keys.len(), t.fields.len(), "duplicate key in {}", t.department);
        }
    }

    #[test]
    fn custom_template_is_empty() {
        let t = get_template(Department::Custom);
        assert!(t.fields.is_empty());
        assert!(department_result_keys(Department::Custom).is_empty());
    }

    #[test]
    fn benchmarks_carry_sources() {
        for t in all_templates() {
            for f in t.benchmarks() {
                assert!(f.benchmark_source.is_some(), "{}.{}", t.department, f.key);
            }
        }
    }
}
