//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - dynamical decoupling sequences to gate circuits and schedules",
        style("Dynadec").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  dynadec-ir   Gates, circuits, schedules and devices");
    println!("  dynadec-dds  Sequence-to-gate-timeline conversion");
    println!("  dynadec-cli  Command-line interface");
    println!();
    println!(
        "Repository: {}",
        style("https://github.com/dynadec/dynadec").underlined()
    );
    println!("License:    {}", style("Apache-2.0").dim());
}
