// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Value types shared by the reaper phases.

pub mod apiservice;
pub mod filter;
pub mod resource;

pub use apiservice::{ApiServiceCondition, ApiServiceStatus, ConditionStatus};
pub use filter::InclusionFilter;
pub use resource::{ResourceCoordinate, ResourceKind};
