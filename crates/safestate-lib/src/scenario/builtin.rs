//! Built-in example scenarios

use super::{Scenario, ScenarioError};

/// Names accepted by [`builtin`]
pub const BUILTIN_NAMES: &[&str] = &[
    "classic-safe",
    "unsafe",
    "circular-wait",
    "linear-chain",
    "complex",
    "multi-instance",
];

/// Look up a built-in scenario by name
pub fn builtin(name: &str) -> Result<Scenario, ScenarioError> {
    let scenario = match name {
        "classic-safe" => Scenario {
            description: Some("Three processes that can all finish in one pass".into()),
            available: Some(vec![10, 5, 7]),
            allocation: vec![vec![0, 1, 0], vec![2, 0, 0], vec![3, 0, 2]],
            max_need: Some(vec![vec![7, 5, 3], vec![3, 2, 2], vec![9, 0, 2]]),
            ..Scenario::default()
        },
        "unsafe" => Scenario {
            description: Some("P1 and P2 finish, P0's remaining claim never fits".into()),
            available: Some(vec![1, 1]),
            allocation: vec![vec![2, 2], vec![1, 1], vec![1, 0]],
            max_need: Some(vec![vec![6, 4], vec![2, 2], vec![2, 1]]),
            ..Scenario::default()
        },
        "circular-wait" => Scenario {
            description: Some("P0 and P1 each hold what the other requests".into()),
            allocation: vec![vec![1, 0], vec![0, 1], vec![0, 0]],
            request: Some(vec![vec![0, 1], vec![1, 0], vec![1, 0]]),
            ..Scenario::default()
        },
        "linear-chain" => Scenario {
            description: Some("P0 waits on P1 waits on P2, which needs nothing".into()),
            allocation: vec![vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 1]],
            request: Some(vec![vec![0, 1, 0], vec![0, 0, 1], vec![0, 0, 0]]),
            ..Scenario::default()
        },
        "complex" => Scenario {
            description: Some("Four processes around a P1/P2 cycle".into()),
            allocation: vec![
                vec![1, 1, 0],
                vec![0, 1, 1],
                vec![1, 0, 1],
                vec![0, 0, 0],
            ],
            request: Some(vec![
                vec![0, 0, 1],
                vec![1, 0, 0],
                vec![0, 1, 0],
                vec![1, 1, 1],
            ]),
            ..Scenario::default()
        },
        "multi-instance" => Scenario {
            description: Some("Multi-instance resources with nothing free".into()),
            available: Some(vec![0, 0, 0]),
            allocation: vec![vec![2, 1, 0], vec![0, 2, 1], vec![1, 0, 1]],
            request: Some(vec![vec![0, 1, 1], vec![1, 0, 1], vec![0, 1, 0]]),
            ..Scenario::default()
        },
        _ => {
            return Err(ScenarioError::UnknownExample {
                name: name.to_string(),
                available: BUILTIN_NAMES.join(", "),
            });
        }
    };

    Ok(scenario)
}

/// Every built-in scenario with its name
pub fn builtins() -> Vec<(&'static str, Scenario)> {
    BUILTIN_NAMES
        .iter()
        .filter_map(|&name| builtin(name).ok().map(|s| (name, s)))
        .collect()
}

#[cfg(test)]
mod tests {
    include!("builtin.test.rs");
}
