//! Build script for segment-ratio validation
//!
//! This script runs at compile time and checks the population ratio tables
//! so a typo in a constant fails the build instead of skewing every solve.

// Include the shared ratio tables
#[path = "src/anthropometry/ratios.rs"]
mod ratios;

use ratios::{RatioTable, FEMALE_RATIOS, MALE_RATIOS, STACK_TOLERANCE};

/// Validate a single table, returning one line per problem
fn validate_table(table: &RatioTable) -> Vec<String> {
    let mut errors = Vec::new();

    for (name, ratio) in table.entries() {
        if !ratio.is_finite() || ratio <= 0.0 {
            errors.push(format!("  {} ratio must be positive, got {}", name, ratio));
        }
    }

    let stack = table.vertical_stack();
    if (stack - 1.0).abs() > STACK_TOLERANCE {
        errors.push(format!(
            "  vertical stack sums to {:.3} of height (allowed 1 ± {:.3})",
            stack, STACK_TOLERANCE
        ));
    }

    errors
}

fn main() {
    println!("cargo:rerun-if-changed=src/anthropometry/ratios.rs");

    let mut has_errors = false;

    for (label, table) in [("male", &MALE_RATIOS), ("female", &FEMALE_RATIOS)] {
        let errors = validate_table(table);
        if !errors.is_empty() {
            println!(
                "cargo:warning=VALIDATION ERROR: {} ratios:\n{}",
                label,
                errors.join("\n")
            );
            has_errors = true;
        }
    }

    if has_errors {
        panic!("Segment ratio validation failed! Fix the tables in src/anthropometry/ratios.rs.");
    }
}
