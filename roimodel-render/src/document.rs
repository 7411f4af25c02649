//! Format-neutral report content shared by the PDF and mailto renderers.

use roimodel_domain::{department_result_keys, registry_version};
use roimodel_types::{DepartmentResult, InputSnapshot, Template, UnitMode};

/// Sections of a report, in presentation order.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    pub title: String,
    pub summary: String,
    /// `(label, value)` pairs for the template's inputs.
    pub inputs: Vec<(String, String)>,
    /// `(label, value)` pairs for the result fields.
    pub results: Vec<(String, String)>,
    /// One line per benchmark annotation.
    pub benchmarks: Vec<String>,
}

impl ReportDocument {
    pub fn build(template: &Template, snapshot: &InputSnapshot, result: &DepartmentResult) -> Self {
        let inputs = template
            .fields
            .iter()
            .map(|f| {
                let input = snapshot.get(f.key);
                let shown = input.map(|i| i.display_value()).unwrap_or(0.0);
                let mut value = format_amount(shown);
                if input.is_some_and(|i| i.unit == UnitMode::Monthly) {
                    value.push_str(" / month");
                }
                (f.label.to_string(), value)
            })
            .collect();

        let values = result.to_map();
        let results = department_result_keys(result.department())
            .iter()
            .filter_map(|key| {
                let n = values.get(*key)?.as_f64()?;
                let value = if *key == "roi" {
                    format!("{n:.1}%")
                } else {
                    format_amount(n)
                };
                Some((humanize_key(key), value))
            })
            .collect();

        let benchmarks = template
            .benchmarks()
            .map(|f| {
                let value = f
                    .benchmark_value
                    .map(format_amount)
                    .unwrap_or_else(|| "-".to_string());
                match f.benchmark_source {
                    Some(source) => format!("{}: {} (source: {})", f.label, value, source),
                    None => format!("{}: {}", f.label, value),
                }
            })
            .collect();

        Self {
            title: format!("{} ROI Report", template.display_name),
            summary: executive_summary(template, result),
            inputs,
            results,
            benchmarks,
        }
    }

    /// Plain-text rendering: title, summary, inputs, results, benchmarks.
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.title);
        out.push_str("\n\n");

        out.push_str("Executive Summary\n");
        out.push_str(&self.summary);
        out.push_str("\n\n");

        out.push_str("Inputs\n");
        push_pairs(&mut out, &self.inputs);
        out.push('\n');

        out.push_str("Results\n");
        push_pairs(&mut out, &self.results);
        out.push('\n');

        out.push_str("Benchmarks\n");
        if self.benchmarks.is_empty() {
            out.push_str("- none\n");
        }
        for line in &self.benchmarks {
            out.push_str(&format!("- {}\n", line));
        }
        out.push_str(&format!("\nBenchmark catalogue {}\n", registry_version()));
        out
    }
}

fn push_pairs(out: &mut String, pairs: &[(String, String)]) {
    if pairs.is_empty() {
        out.push_str("- none\n");
    }
    for (label, value) in pairs {
        out.push_str(&format!("- {}: {}\n", label, value));
    }
}

/// One-sentence summary referencing the computed ROI.
pub fn executive_summary(template: &Template, result: &DepartmentResult) -> String {
    match (result.roi(), result.savings()) {
        (Some(roi), Some(savings)) => {
            let outcome = if savings >= 0.0 {
                format!("annual savings of ${}", format_amount(savings))
            } else {
                format!("an annual cost increase of ${}", format_amount(-savings))
            };
            format!(
                "Based on the {} model, deploying AI is projected to deliver {} and a return on investment of {:.1}%.",
                template.display_name, outcome, roi
            )
        }
        _ => format!(
            "The {} template has no built-in formula, so no ROI was computed.",
            template.display_name
        ),
    }
}

/// Thousands-separated number; two decimals only when the value is fractional.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let rounded = (value * 100.0).round() / 100.0;
    let negative = rounded < 0.0;
    let abs = rounded.abs();
    let cents = ((abs - abs.trunc()) * 100.0).round() as u8;

    // Whole part formatted as f64 so values beyond u64 keep every digit.
    let digits = format!("{:.0}", abs.trunc());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    if cents == 0 {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{cents:02}")
    }
}

/// `annualClosedLoans` -> `Annual Closed Loans`, `numAIAgents` -> `Num AI Agents`.
pub fn humanize_key(key: &str) -> String {
    if key == "roi" {
        return "ROI".to_string();
    }
    let chars: Vec<char> = key.chars().collect();
    let mut out = String::with_capacity(key.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if i == 0 {
            out.extend(c.to_uppercase());
            continue;
        }
        let prev = chars[i - 1];
        let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
        if c.is_uppercase() && (prev.is_lowercase() || (prev.is_uppercase() && next_lower)) {
            out.push(' ');
        }
        out.push(c);
    }
    out
}
