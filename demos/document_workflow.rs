//! Document Approval Workflow
//!
//! This example drives a document through a YAML-declared approval graph.
//!
//! Key concepts:
//! - Declarative graph (Draft -> Review -> Approved -> Published)
//! - Host entity embeds `TrackedState` instead of implementing the contract
//! - Rejected moves leave state and log untouched
//! - Terminal state (Published has no destinations)
//!
//! Run with: RUST_LOG=debug cargo run --example document_workflow

use checkstate::{Event, StateMachine, StateTransition, Tracked, TrackedState, TransitionGraph};
use tracing_subscriber::EnvFilter;

const APPROVAL_GRAPH: &str = "
DRAFT: [REVIEW]
REVIEW: [DRAFT, APPROVED]
APPROVED: [PUBLISHED]
PUBLISHED: []
";

struct Document {
    tracking: TrackedState,
    title: String,
    word_count: usize,
}

impl Tracked for Document {
    fn tracked(&self) -> &TrackedState {
        &self.tracking
    }

    fn tracked_mut(&mut self) -> &mut TrackedState {
        &mut self.tracking
    }
}

fn main() -> Result<(), checkstate::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Document Approval Workflow ===\n");

    let graph = TransitionGraph::from_yaml(APPROVAL_GRAPH.as_bytes())?;
    let mut document = Document {
        tracking: TrackedState::new("DRAFT"),
        title: "Quarterly report".to_string(),
        word_count: 1200,
    };

    println!(
        "Document: '{}' ({} words)",
        document.title, document.word_count
    );

    let mut machine = StateMachine::create(&mut document, &graph)?;
    println!("Initial state: {}", machine.current_state());

    machine.move_to(&Event::now("Submitted for review"), "REVIEW")?;
    machine.move_to(&Event::now("Reviewer requested changes"), "DRAFT")?;
    machine.move_to(&Event::now("Resubmitted"), "REVIEW")?;
    machine.move_to(&Event::now("Approved by editor"), "APPROVED")?;

    // Approved documents cannot go back to draft
    if let Err(err) = machine.move_to(&Event::now("Late edit"), "DRAFT") {
        println!("Rejected: {err}");
    }

    machine.move_to(&Event::now("Published"), "PUBLISHED")?;
    println!("Final state: {}", machine.current_state());
    println!("Terminal: {}", machine.is_terminal());

    let bounced = StateTransition::new("REVIEW", "DRAFT");
    println!("Ever bounced back to draft: {}", machine.have_moved(&bounced));

    println!("\nTransition log:");
    for entry in document.tracking.log() {
        println!(
            "  {} {:>9} -> {:<9} {}",
            entry.timestamp.format("%H:%M:%S"),
            entry.from,
            entry.to,
            entry.description
        );
    }

    Ok(())
}
