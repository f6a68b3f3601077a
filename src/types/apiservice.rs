// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use serde::{Deserialize, Serialize};

/// Condition type an aggregated API uses to report that its backend answers
pub const AVAILABLE_CONDITION: &str = "Available";

/// The parts of an APIService `status` needed to spot orphans.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiServiceStatus {
    #[serde(default)]
    pub conditions: Vec<ApiServiceCondition>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiServiceCondition {
    #[serde(rename = "type")]
    pub condition_type: String,
    #[serde(default)]
    pub status: ConditionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConditionStatus {
    True,
    False,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ApiServiceStatus {
    /// Parse the raw `status` field of an APIService; a missing status has no conditions
    pub fn from_raw(status: Option<&serde_json::Value>) -> serde_json::Result<Self> {
        match status {
            Some(value) if !value.is_null() => serde_json::from_value(value.clone()),
            _ => Ok(Self::default()),
        }
    }

    /// An APIService is orphaned when its first `Available` condition is `False`
    pub fn is_orphan(&self) -> bool {
        self.conditions
            .iter()
            .find(|c| c.condition_type == AVAILABLE_CONDITION)
            .is_some_and(|c| c.status == ConditionStatus::False)
    }
}
