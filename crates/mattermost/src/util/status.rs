use chrono::Utc;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{Condition, Time};

use crate::util::errors::Result;

pub const DEPENDENCIES_RESOLVED: &str = "DependenciesResolved";

/// Builds the `DependenciesResolved` condition for the outcome of a resolution pass.
pub fn resolution_condition<T>(result: &Result<T>, observed_generation: Option<i64>) -> Condition {
    let (status, reason, message) = match result {
        Ok(_) => (
            "True",
            "Resolved",
            "database and file store dependencies resolved".to_string(),
        ),
        Err(e) => ("False", e.reason(), e.message().to_string()),
    };

    Condition {
        type_: DEPENDENCIES_RESOLVED.to_string(),
        status: status.to_string(),
        reason: reason.to_string(),
        message,
        last_transition_time: Time(Utc::now()),
        observed_generation,
    }
}

/// Sets the corresponding condition in conditions to new_condition and returns
/// a tuple containing the new conditions vector and whether it was changed.
///
/// LastTransitionTime only moves when the status flips or the condition is new.
pub fn set_status_condition(conditions: &[Condition], mut new_condition: Condition) -> (Vec<Condition>, bool) {
    let mut new_conditions = Vec::from(conditions);
    let mut changed = false;

    if let Some(existing) = new_conditions
        .iter_mut()
        .find(|c| c.type_ == new_condition.type_)
    {
        if existing.status != new_condition.status {
            existing.status = new_condition.status;
            existing.last_transition_time = Time(Utc::now());
            changed = true;
        }

        if existing.reason != new_condition.reason {
            existing.reason = new_condition.reason;
            changed = true;
        }

        if existing.message != new_condition.message {
            existing.message = new_condition.message;
            changed = true;
        }

        if existing.observed_generation != new_condition.observed_generation {
            existing.observed_generation = new_condition.observed_generation;
            changed = true;
        }
    } else {
        new_condition.last_transition_time = Time(Utc::now());
        new_conditions.push(new_condition);
        changed = true;
    }

    (new_conditions, changed)
}

/// Returns true when the condition_type is present and set to `True`
pub fn is_status_condition_true(conditions: &[Condition], condition_type: &str) -> bool {
    conditions
        .iter()
        .any(|condition| condition.type_ == condition_type && condition.status == "True")
}
