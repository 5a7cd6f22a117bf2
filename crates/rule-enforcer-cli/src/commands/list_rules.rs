//! List rules command implementation.

use rule_enforcer::rules::all_detectors;

/// Runs the list-rules command.
pub fn run() {
    println!("Available detectors (in report order):\n");
    println!("{:<8} {:<22} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for detector in all_detectors() {
        println!(
            "{:<8} {:<22} {}",
            detector.code(),
            detector.name(),
            detector.description()
        );
    }

    println!("\nDetectors run only when the rules document enables them, e.g.:");
    println!("  {{ \"disallow\": [\"loops\", \"console\"] }}");
    println!("  {{ \"validDeclarations\": [\"const\"] }}");
}
