//! Validation configuration demonstration
//!
//! Shows the default validator, the opt-in strict checks, and how
//! diagnostics render through miette.

use run_filter::{FilterValidator, ValidationConfig, parse_filter, parse_filter_with};

fn main() {
    println!("=== Filter Validation Demo ===\n");

    demo_canonical_form();
    demo_rendered_errors();
    demo_strict_config();
}

fn demo_canonical_form() {
    println!("--- Example 1: Canonical Form ---");

    let source = r#"metrics.foobar = 40 AND run_name = "bouncy-boar-498" AND params.`random_state` = "8888""#;
    let outcome = parse_filter(source);
    match outcome.filter {
        Some(filter) => {
            println!("input:     {source}");
            println!("canonical: {filter}");
        }
        None => println!("✗ unexpected errors: {}", outcome.diagnostics.len()),
    }
    println!();
}

fn demo_rendered_errors() {
    println!("--- Example 2: Rendered Errors ---");

    let source = "metricz.acc > 1 AND datasets.size = 'big' AND metrics.loss < 'low'";
    let outcome = parse_filter(source);
    for report in outcome.reports(source) {
        println!("{report:?}");
    }
    println!();
}

fn demo_strict_config() {
    println!("--- Example 3: Strict Configuration ---");

    let config = ValidationConfig {
        strict_attribute_types: true,
        strict_operators: true,
    };
    let validator = FilterValidator::with_config(config);

    for source in [
        "attributes.start_time > 1700000000",
        "attributes.start_time = 'yesterday'",
        "metrics.acc LIKE 1",
        "tags.team = 'vision'",
    ] {
        let outcome = parse_filter_with(source, &validator);
        if outcome.is_success() {
            println!("✓ {source}");
        } else {
            for diag in &outcome.diagnostics {
                println!("✗ {source}: {}", diag.message);
            }
        }
    }
    println!();
}
