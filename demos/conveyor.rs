//! Conveyor Belt State Machine
//!
//! This example demonstrates a flat two-state control machine.
//!
//! Key concepts:
//! - Event intake via `send_event` and dispatch via `update`
//! - Transition actions observing the fired rule
//! - Silent drop of events no rule handles
//!
//! Run with: cargo run --example conveyor

use strata::{event_ids, state_ids, MachineBuilder, StateHandler};

state_ids! {
    enum Belt {
        Stopped,
        Moving,
    }
}

event_ids! {
    enum Button {
        Start,
        Stop,
    }
}

struct Announce(&'static str);

impl StateHandler<Belt> for Announce {
    fn on_entry(&mut self) {
        println!("  [{}] entered", self.0);
    }

    fn on_exit(&mut self) {
        println!("  [{}] exited", self.0);
    }
}

fn main() {
    println!("=== Conveyor Belt State Machine ===\n");

    let mut machine = MachineBuilder::new()
        .state(Belt::Stopped, Announce("Stopped"))
        .state(Belt::Moving, Announce("Moving"))
        .on_with(Belt::Stopped, Button::Start, Belt::Moving, |from, ev, to| {
            println!("  action: {:?} --{:?}--> {:?}", from, ev, to);
        })
        .on(Belt::Moving, Button::Stop, Belt::Stopped)
        .build()
        .expect("configuration is well-formed");

    println!("\nInitial state: {:?}", machine.current_state());

    println!("\nPressing Start:");
    machine.send_event(Button::Start);
    machine.update();
    println!("Now in: {:?}", machine.current_state());

    println!("\nPressing Start again (no rule from Moving - dropped):");
    machine.send_event(Button::Start);
    machine.update();
    println!("Still in: {:?}", machine.current_state());

    println!("\nPressing Stop:");
    machine.send_event(Button::Stop);
    machine.update();
    println!("Back in: {:?}", machine.current_state());

    println!("\nTransitions taken: {}", machine.trace().len());
    println!("\n=== Example Complete ===");
}
