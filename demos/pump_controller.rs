//! Pump Controller - Hierarchical States
//!
//! This example demonstrates the statechart features of the engine:
//! - Composite states with default children (cascaded entry)
//! - Event bubbling from the active leaf toward the root
//! - Least-common-ancestor exit/entry on transitions
//! - Supervisory `on_active` hooks observing live descendants
//!
//! Run with: cargo run --example pump_controller

use strata::{event_ids, state_ids, MachineBuilder, StateHandler, StateId};

state_ids! {
    enum Pump {
        Operational,
        Standby,
        Pumping,
        LowFlow,
        HighFlow,
        Maintenance,
        SelfTest,
    }
}

event_ids! {
    enum Signal {
        DemandRise,
        DemandSpike,
        ServiceDue,
        ServiceDone,
    }
}

struct Trace(&'static str);

impl StateHandler<Pump> for Trace {
    fn on_entry(&mut self) {
        println!("  enter {}", self.0);
    }

    fn on_exit(&mut self) {
        println!("  exit  {}", self.0);
    }
}

/// Supervisory root state: reports which branch is live each cycle.
struct Supervisor;

impl StateHandler<Pump> for Supervisor {
    fn on_entry(&mut self) {
        println!("  enter Operational");
    }

    fn on_active(&mut self, descendants: &[Pump]) {
        let names: Vec<&str> = descendants.iter().map(|d| d.name()).collect();
        println!("  supervisor sees live descendants: [{}]", names.join(", "));
    }

    fn on_exit(&mut self) {
        println!("  exit  Operational");
    }
}

fn main() {
    println!("=== Pump Controller (Hierarchical) ===\n");

    println!("Building machine (default state Operational cascades to Standby):");
    let mut machine = MachineBuilder::new()
        .state(Pump::Operational, Supervisor)
        .state(Pump::Standby, Trace("Standby"))
        .state(Pump::Pumping, Trace("Pumping"))
        .state(Pump::LowFlow, Trace("LowFlow"))
        .state(Pump::HighFlow, Trace("HighFlow"))
        .state(Pump::Maintenance, Trace("Maintenance"))
        .state(Pump::SelfTest, Trace("SelfTest"))
        .group(Pump::Operational, Pump::Standby, [Pump::Pumping])
        .group(Pump::Pumping, Pump::LowFlow, [Pump::HighFlow])
        .group(Pump::Maintenance, Pump::SelfTest, [])
        .on(Pump::Standby, Signal::DemandRise, Pump::Pumping)
        .on(Pump::LowFlow, Signal::DemandSpike, Pump::HighFlow)
        // Declared on the composite root: catches the event from any
        // operational leaf via bubbling.
        .on(Pump::Operational, Signal::ServiceDue, Pump::Maintenance)
        .on(Pump::Maintenance, Signal::ServiceDone, Pump::Operational)
        .build()
        .expect("configuration is well-formed");

    println!("Active path: {:?}\n", machine.current_path());

    println!("DemandRise (target Pumping cascades to LowFlow):");
    machine.send_event(Signal::DemandRise);
    machine.update();
    println!("Active path: {:?}\n", machine.current_path());

    println!("DemandSpike:");
    machine.send_event(Signal::DemandSpike);
    machine.update();
    println!("Active path: {:?}\n", machine.current_path());

    println!("ServiceDue (bubbles from HighFlow up to Operational's rule):");
    machine.send_event(Signal::ServiceDue);
    machine.update();
    println!("Active path: {:?}\n", machine.current_path());

    println!("ServiceDone (back to Operational, cascading to Standby):");
    machine.send_event(Signal::ServiceDone);
    machine.update();
    println!("Active path: {:?}\n", machine.current_path());

    println!("Route taken: {:?}", machine.trace().route());
    println!("\n=== Example Complete ===");
}
