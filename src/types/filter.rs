// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::collections::HashSet;

/// Which namespaces a run schedules for deletion.
///
/// Names in `ignore` never make it into the working set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InclusionFilter {
    /// Take every live namespace instead of `include`
    pub include_all: bool,
    pub include: Vec<String>,
    pub ignore: Vec<String>,
    /// Keep only the first occurrence of a repeated name
    pub dedupe: bool,
}

impl InclusionFilter {
    /// Filter `source` (live namespaces or `include`) down to the working set.
    /// Order follows `source`.
    pub fn apply<I>(&self, source: I) -> Vec<String>
    where
        I: IntoIterator<Item = String>,
    {
        let ignored: HashSet<&str> = self.ignore.iter().map(String::as_str).collect();
        let mut seen = HashSet::new();

        source
            .into_iter()
            .filter(|name| !ignored.contains(name.as_str()))
            .filter(|name| !self.dedupe || seen.insert(name.clone()))
            .collect()
    }
}
