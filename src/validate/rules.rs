//! Configuration checks run once at machine-build time.

use super::violations::{ConfigViolation, ValidationReport};
use crate::core::{EventId, StateId, SubstateGroup, TransitionRule};
use std::collections::BTreeSet;

/// Borrowed view of a configuration before it is trusted.
///
/// Assembled by [`MachineBuilder`](crate::builder::MachineBuilder) from its
/// accumulated declarations and handed to [`validate`]. The trigger domain
/// itself needs no membership check: the `E: EventId` parameter fixes it
/// per machine at the type level.
pub struct RawConfig<'a, S: StateId, E: EventId> {
    /// Declared state ids, in registration order.
    pub declared: &'a [S],
    /// Declared transition rules.
    pub transitions: &'a [TransitionRule<S, E>],
    /// Declared substate groups.
    pub groups: &'a [SubstateGroup<S>],
    /// Explicit initial state, if any.
    pub initial: Option<S>,
    /// Configured bound on hierarchy depth.
    pub max_depth: usize,
}

/// Check an entire configuration, returning every violation found.
///
/// An empty report means the configuration is well-formed: states are
/// unique, every reference resolves, the transition table is deterministic,
/// the groups form a single-parent forest, and every root-to-leaf chain
/// fits the configured depth bound.
pub fn validate<S: StateId, E: EventId>(config: &RawConfig<'_, S, E>) -> ValidationReport {
    let mut report = ValidationReport::new();

    check_states(config, &mut report);
    check_transitions(config, &mut report);
    check_groups(config, &mut report);
    let cycle_free = check_forest(config, &mut report);
    if cycle_free {
        check_depth(config, &mut report);
    }
    check_initial(config, &mut report);

    report
}

fn check_states<S: StateId, E: EventId>(
    config: &RawConfig<'_, S, E>,
    report: &mut ValidationReport,
) {
    if config.declared.is_empty() {
        report.push(ConfigViolation::NoStates);
        return;
    }

    let mut seen = BTreeSet::new();
    let mut reported = BTreeSet::new();
    for &state in config.declared {
        if !seen.insert(state) && reported.insert(state) {
            report.push(ConfigViolation::DuplicateState {
                state: state.name().to_string(),
            });
        }
    }
}

fn check_transitions<S: StateId, E: EventId>(
    config: &RawConfig<'_, S, E>,
    report: &mut ValidationReport,
) {
    if config.transitions.is_empty() {
        report.push(ConfigViolation::NoTransitions);
        return;
    }

    let mut seen = BTreeSet::new();
    let mut reported = BTreeSet::new();
    for rule in config.transitions {
        if !is_declared(config, rule.from) {
            report.push(ConfigViolation::UnknownState {
                context: "transition source".to_string(),
                state: rule.from.name().to_string(),
            });
        }
        if !is_declared(config, rule.to) {
            report.push(ConfigViolation::UnknownState {
                context: "transition target".to_string(),
                state: rule.to.name().to_string(),
            });
        }
        if rule.from == rule.to {
            report.push(ConfigViolation::SelfTransition {
                state: rule.from.name().to_string(),
            });
        }

        let key = (rule.from, rule.trigger);
        if !seen.insert(key) && reported.insert(key) {
            report.push(ConfigViolation::DuplicateTransition {
                from: rule.from.name().to_string(),
                trigger: rule.trigger.name().to_string(),
            });
        }
    }
}

fn check_groups<S: StateId, E: EventId>(
    config: &RawConfig<'_, S, E>,
    report: &mut ValidationReport,
) {
    let mut parents = BTreeSet::new();
    for group in config.groups {
        if !is_declared(config, group.parent) {
            report.push(ConfigViolation::UnknownState {
                context: "group parent".to_string(),
                state: group.parent.name().to_string(),
            });
        }
        if !parents.insert(group.parent) {
            report.push(ConfigViolation::DuplicateGroup {
                parent: group.parent.name().to_string(),
            });
        }

        let mut children = BTreeSet::new();
        for child in group.children() {
            if !is_declared(config, child) {
                report.push(ConfigViolation::UnknownState {
                    context: "group child".to_string(),
                    state: child.name().to_string(),
                });
            }
            if child == group.parent {
                report.push(ConfigViolation::ParentAmongChildren {
                    parent: group.parent.name().to_string(),
                });
            }
            if !children.insert(child) {
                report.push(ConfigViolation::DuplicateChild {
                    parent: group.parent.name().to_string(),
                    state: child.name().to_string(),
                });
            }
        }
    }
}

/// Single-parent and acyclicity checks. Returns `true` when no cycle was
/// found, so the depth check can safely walk parent chains.
fn check_forest<S: StateId, E: EventId>(
    config: &RawConfig<'_, S, E>,
    report: &mut ValidationReport,
) -> bool {
    let mut child_seen = BTreeSet::new();
    for group in config.groups {
        // Within-group repeats are already DuplicateChild findings.
        let unique: BTreeSet<S> = group.children().collect();
        for child in unique {
            if !child_seen.insert(child) {
                report.push(ConfigViolation::MultipleParents {
                    child: child.name().to_string(),
                });
            }
        }
    }

    let mut cycle_free = true;
    for &state in config.declared {
        let mut cursor = parent_of(config, state);
        let mut steps = 0;
        while let Some(parent) = cursor {
            if parent == state {
                report.push(ConfigViolation::HierarchyCycle {
                    state: state.name().to_string(),
                });
                cycle_free = false;
                break;
            }
            steps += 1;
            if steps > config.groups.len() {
                // A chain longer than the group count loops somewhere
                // above; the looping states report themselves.
                cycle_free = false;
                break;
            }
            cursor = parent_of(config, parent);
        }
    }
    cycle_free
}

fn check_depth<S: StateId, E: EventId>(
    config: &RawConfig<'_, S, E>,
    report: &mut ValidationReport,
) {
    let mut deepest = 0;
    for &state in config.declared {
        let mut depth = 1;
        let mut cursor = parent_of(config, state);
        while let Some(parent) = cursor {
            depth += 1;
            cursor = parent_of(config, parent);
        }
        deepest = deepest.max(depth);
    }

    if deepest > config.max_depth {
        report.push(ConfigViolation::DepthExceeded {
            depth: deepest,
            max: config.max_depth,
        });
    }
}

fn check_initial<S: StateId, E: EventId>(
    config: &RawConfig<'_, S, E>,
    report: &mut ValidationReport,
) {
    if let Some(initial) = config.initial {
        if !is_declared(config, initial) {
            report.push(ConfigViolation::UnknownState {
                context: "initial state".to_string(),
                state: initial.name().to_string(),
            });
        }
    }
}

fn is_declared<S: StateId, E: EventId>(config: &RawConfig<'_, S, E>, id: S) -> bool {
    config.declared.contains(&id)
}

fn parent_of<S: StateId, E: EventId>(config: &RawConfig<'_, S, E>, id: S) -> Option<S> {
    config
        .groups
        .iter()
        .find(|group| group.contains_child(id))
        .map(|group| group.parent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
    enum Sys {
        Root,
        Idle,
        Running,
        Maintenance,
        Orphan,
    }

    impl StateId for Sys {
        fn name(&self) -> &str {
            match self {
                Self::Root => "Root",
                Self::Idle => "Idle",
                Self::Running => "Running",
                Self::Maintenance => "Maintenance",
                Self::Orphan => "Orphan",
            }
        }
    }

    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
    enum Ev {
        Start,
        Stop,
    }

    impl EventId for Ev {
        fn name(&self) -> &str {
            match self {
                Self::Start => "Start",
                Self::Stop => "Stop",
            }
        }
    }

    fn config<'a>(
        declared: &'a [Sys],
        transitions: &'a [TransitionRule<Sys, Ev>],
        groups: &'a [SubstateGroup<Sys>],
    ) -> RawConfig<'a, Sys, Ev> {
        RawConfig {
            declared,
            transitions,
            groups,
            initial: None,
            max_depth: 8,
        }
    }

    #[test]
    fn clean_configuration_passes() {
        let declared = [Sys::Root, Sys::Idle, Sys::Running];
        let transitions = [
            TransitionRule::new(Sys::Idle, Ev::Start, Sys::Running),
            TransitionRule::new(Sys::Running, Ev::Stop, Sys::Idle),
        ];
        let groups = [SubstateGroup::new(Sys::Root, Sys::Idle, [Sys::Running])];

        let report = validate(&config(&declared, &transitions, &groups));
        assert!(report.is_empty(), "unexpected: {report}");
    }

    #[test]
    fn empty_configuration_reports_missing_pieces() {
        let report = validate(&config(&[], &[], &[]));
        assert!(report.contains(&ConfigViolation::NoStates));
        assert!(report.contains(&ConfigViolation::NoTransitions));
    }

    #[test]
    fn accumulates_all_violations_in_one_pass() {
        let declared = [Sys::Idle, Sys::Idle, Sys::Running];
        let transitions = [
            TransitionRule::new(Sys::Idle, Ev::Start, Sys::Running),
            TransitionRule::new(Sys::Idle, Ev::Start, Sys::Running),
            TransitionRule::new(Sys::Running, Ev::Stop, Sys::Running),
            TransitionRule::new(Sys::Orphan, Ev::Stop, Sys::Idle),
        ];

        let report = validate(&config(&declared, &transitions, &[]));

        assert!(report.contains(&ConfigViolation::DuplicateState {
            state: "Idle".to_string(),
        }));
        assert!(report.contains(&ConfigViolation::DuplicateTransition {
            from: "Idle".to_string(),
            trigger: "Start".to_string(),
        }));
        assert!(report.contains(&ConfigViolation::SelfTransition {
            state: "Running".to_string(),
        }));
        assert!(report.contains(&ConfigViolation::UnknownState {
            context: "transition source".to_string(),
            state: "Orphan".to_string(),
        }));
        assert_eq!(report.len(), 4);
    }

    #[test]
    fn duplicate_from_trigger_pair_is_rejected() {
        let declared = [Sys::Idle, Sys::Running, Sys::Maintenance];
        let transitions = [
            TransitionRule::new(Sys::Idle, Ev::Start, Sys::Running),
            TransitionRule::new(Sys::Idle, Ev::Start, Sys::Maintenance),
        ];

        let report = validate(&config(&declared, &transitions, &[]));
        assert_eq!(report.len(), 1);
        assert!(report.contains(&ConfigViolation::DuplicateTransition {
            from: "Idle".to_string(),
            trigger: "Start".to_string(),
        }));
    }

    #[test]
    fn same_trigger_from_different_states_is_fine() {
        let declared = [Sys::Idle, Sys::Running, Sys::Maintenance];
        let transitions = [
            TransitionRule::new(Sys::Idle, Ev::Start, Sys::Running),
            TransitionRule::new(Sys::Maintenance, Ev::Start, Sys::Running),
        ];

        let report = validate(&config(&declared, &transitions, &[]));
        assert!(report.is_empty());
    }

    #[test]
    fn group_defects_are_reported() {
        let declared = [Sys::Root, Sys::Idle, Sys::Running];
        let transitions = [TransitionRule::new(Sys::Idle, Ev::Start, Sys::Running)];
        let groups = [
            SubstateGroup::new(Sys::Root, Sys::Idle, [Sys::Idle, Sys::Root, Sys::Orphan]),
            SubstateGroup::new(Sys::Root, Sys::Running, []),
        ];

        let report = validate(&config(&declared, &transitions, &groups));

        assert!(report.contains(&ConfigViolation::DuplicateChild {
            parent: "Root".to_string(),
            state: "Idle".to_string(),
        }));
        assert!(report.contains(&ConfigViolation::ParentAmongChildren {
            parent: "Root".to_string(),
        }));
        assert!(report.contains(&ConfigViolation::UnknownState {
            context: "group child".to_string(),
            state: "Orphan".to_string(),
        }));
        assert!(report.contains(&ConfigViolation::DuplicateGroup {
            parent: "Root".to_string(),
        }));
    }

    #[test]
    fn child_under_two_parents_is_rejected() {
        let declared = [Sys::Root, Sys::Maintenance, Sys::Idle, Sys::Running];
        let transitions = [TransitionRule::new(Sys::Idle, Ev::Start, Sys::Running)];
        let groups = [
            SubstateGroup::new(Sys::Root, Sys::Idle, []),
            SubstateGroup::new(Sys::Maintenance, Sys::Idle, [Sys::Running]),
        ];

        let report = validate(&config(&declared, &transitions, &groups));
        assert!(report.contains(&ConfigViolation::MultipleParents {
            child: "Idle".to_string(),
        }));
    }

    #[test]
    fn cycles_are_rejected() {
        let declared = [Sys::Root, Sys::Idle];
        let transitions = [TransitionRule::new(Sys::Root, Ev::Start, Sys::Idle)];
        let groups = [
            SubstateGroup::new(Sys::Root, Sys::Idle, []),
            SubstateGroup::new(Sys::Idle, Sys::Root, []),
        ];

        let report = validate(&config(&declared, &transitions, &groups));
        assert!(report.contains(&ConfigViolation::HierarchyCycle {
            state: "Root".to_string(),
        }));
        assert!(report.contains(&ConfigViolation::HierarchyCycle {
            state: "Idle".to_string(),
        }));
    }

    #[test]
    fn depth_beyond_bound_is_rejected() {
        let declared = [Sys::Root, Sys::Idle, Sys::Running, Sys::Maintenance];
        let transitions = [TransitionRule::new(Sys::Idle, Ev::Start, Sys::Running)];
        let groups = [
            SubstateGroup::new(Sys::Root, Sys::Idle, []),
            SubstateGroup::new(Sys::Idle, Sys::Running, []),
            SubstateGroup::new(Sys::Running, Sys::Maintenance, []),
        ];

        let mut raw = config(&declared, &transitions, &groups);
        raw.max_depth = 3;

        let report = validate(&raw);
        assert!(report.contains(&ConfigViolation::DepthExceeded { depth: 4, max: 3 }));
    }

    #[test]
    fn undeclared_initial_is_rejected() {
        let declared = [Sys::Idle, Sys::Running];
        let transitions = [TransitionRule::new(Sys::Idle, Ev::Start, Sys::Running)];

        let mut raw = config(&declared, &transitions, &[]);
        raw.initial = Some(Sys::Orphan);

        let report = validate(&raw);
        assert!(report.contains(&ConfigViolation::UnknownState {
            context: "initial state".to_string(),
            state: "Orphan".to_string(),
        }));
    }
}
