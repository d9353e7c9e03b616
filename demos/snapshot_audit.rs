//! Snapshot and Audit
//!
//! This example persists a tracked entity as a snapshot, reloads it, and
//! audits its history after the graph has evolved.
//!
//! Key concepts:
//! - JSON snapshots for readability, binary snapshots for compactness
//! - Version and log-chain validation on load
//! - Audits accumulate every violation instead of stopping at the first
//!
//! Run with: cargo run --example snapshot_audit

use checkstate::snapshot::Snapshot;
use checkstate::{transition_graph, Event, StateMachine, TrackedState};
use stillwater::validation::Validation;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Snapshot and Audit ===\n");

    let original = transition_graph! {
        "OPEN" => ["IN_PROGRESS", "CLOSED"],
        "IN_PROGRESS" => ["OPEN", "RESOLVED"],
        "RESOLVED" => ["CLOSED", "OPEN"],
    };

    let mut ticket = TrackedState::new("OPEN");
    let mut machine = StateMachine::create(&mut ticket, &original)?;
    machine.move_to(&Event::now("Picked up"), "IN_PROGRESS")?;
    machine.move_to(&Event::now("Fix deployed"), "RESOLVED")?;
    machine.move_to(&Event::now("Regression reported"), "OPEN")?;

    let snapshot = Snapshot::capture(&ticket);
    let json = snapshot.to_json()?;
    let bytes = snapshot.to_bytes()?;
    println!("JSON snapshot: {} bytes", json.len());
    println!("Binary snapshot: {} bytes", bytes.len());

    let restored = Snapshot::from_bytes(&bytes)?.restore();
    println!("Restored state: {}", restored.state());

    // The workflow no longer lets resolved tickets reopen
    let revised = transition_graph! {
        "OPEN" => ["IN_PROGRESS", "CLOSED"],
        "IN_PROGRESS" => ["OPEN", "RESOLVED"],
        "RESOLVED" => ["CLOSED"],
    };

    match restored.audit(&revised) {
        Validation::Success(_) => println!("History is consistent with the revised graph"),
        Validation::Failure(violations) => {
            println!("Audit found {} violation(s):", violations.len());
            for violation in violations.iter() {
                println!("  - {violation}");
            }
        }
    }

    Ok(())
}
