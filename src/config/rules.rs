//! Definition rules for configurations.
//!
//! Rules use Stillwater's `Validation` so that a bad definition reports
//! every violation at once instead of stopping at the first one.

use crate::config::error::DefinitionViolation;
use crate::transition::{TransitionEntry, TransitionMap};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Notification names emitted by every state slot. A transition may not
/// reuse them, or its specific notification would be indistinguishable.
pub const RESERVED_NAMES: [&str; 2] = ["transition", "init"];

type Check = Validation<(), NonEmptyVec<DefinitionViolation>>;

/// Check a configuration's own definition, accumulating ALL violations.
pub fn validate(name: &str, transitions: &TransitionMap) -> Check {
    let mut checks: Vec<Check> = Vec::new();

    checks.push(if name.trim().is_empty() {
        Validation::fail(DefinitionViolation::EmptyConfigName)
    } else {
        Validation::success(())
    });

    collect(name, transitions, &mut checks);

    Validation::all_vec(checks).map(|_| ())
}

fn collect(parent: &str, transitions: &TransitionMap, checks: &mut Vec<Check>) {
    for (key, entry) in transitions.iter() {
        let path = format!("{parent}.{key}");

        if key.trim().is_empty() {
            checks.push(Validation::fail(DefinitionViolation::EmptyTransitionName {
                parent: parent.to_string(),
            }));
        }

        if RESERVED_NAMES.contains(&key) {
            checks.push(Validation::fail(DefinitionViolation::ReservedName {
                path: path.clone(),
                name: key.to_string(),
            }));
        }

        if let TransitionEntry::Nested(inner) = entry {
            if inner.is_empty() {
                checks.push(Validation::fail(DefinitionViolation::EmptyNestedMap {
                    path: path.clone(),
                }));
            }
            collect(&path, inner, checks);
        }
    }
}
