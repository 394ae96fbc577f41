//! Hierarchy validation command

use anyhow::Result;
use prism_hierarchy::{load_hierarchy, HierarchyReport, IntegrityViolation};

pub struct ValidateArgs {
    pub file: String,
    pub format: String,
    pub fail_on_invalid: bool,
}

pub fn run(args: ValidateArgs) -> Result<()> {
    let data = load_hierarchy(&args.file)?;
    let report = data.validate();

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&report_json(&report))?);
    } else {
        print_report_text(&report);
    }

    if !report.is_valid() && args.fail_on_invalid {
        std::process::exit(1);
    }

    Ok(())
}

fn print_report_text(report: &HierarchyReport) {
    println!("{}", report.summary());
    if report.is_valid() {
        return;
    }

    println!();
    for violation in &report.violations {
        println!("  [ERROR] {}", violation);
    }
}

fn report_json(report: &HierarchyReport) -> serde_json::Value {
    let violations: Vec<serde_json::Value> = report
        .violations
        .iter()
        .map(|v| match v {
            IntegrityViolation::MissingRoot { id } => serde_json::json!({
                "kind": "missing_root",
                "id": id.to_string(),
                "message": v.to_string(),
            }),
            IntegrityViolation::MissingChild { parent, child } => serde_json::json!({
                "kind": "missing_child",
                "parent": parent.to_string(),
                "id": child.to_string(),
                "message": v.to_string(),
            }),
        })
        .collect();

    serde_json::json!({
        "valid": report.is_valid(),
        "summary": report.summary(),
        "roots": report.roots.len(),
        "entities": report.entities.len(),
        "violations": violations,
    })
}
