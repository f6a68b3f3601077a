// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use kube::core::GroupVersionKind;
use kube::discovery::ApiResource;
use std::fmt;

/// A type of object the cluster can store, as reported by discovery.
///
/// Two kinds are the same kind when group, version and plural match.
#[derive(Debug, Clone)]
pub struct ResourceKind {
    /// Empty for the core API
    pub group: String,
    pub version: String,
    pub plural: String,
    pub singular: String,
    pub kind: String,
}

impl PartialEq for ResourceKind {
    fn eq(&self, other: &Self) -> bool {
        self.group == other.group && self.version == other.version && self.plural == other.plural
    }
}

impl Eq for ResourceKind {}

impl ResourceKind {
    pub fn new(group: &str, version: &str, kind: &str, plural: &str, singular: &str) -> Self {
        Self {
            group: group.to_string(),
            version: version.to_string(),
            plural: plural.to_string(),
            singular: singular.to_string(),
            kind: kind.to_string(),
        }
    }

    /// The core `v1/namespaces` kind
    pub fn namespaces() -> Self {
        Self::new("", "v1", "Namespace", "namespaces", "namespace")
    }

    /// The cluster-scoped `apiregistration.k8s.io/v1/apiservices` kind
    pub fn api_services() -> Self {
        Self::new(
            "apiregistration.k8s.io",
            "v1",
            "APIService",
            "apiservices",
            "apiservice",
        )
    }

    /// `group/version`, or just `version` for the core API
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }

    pub fn api_resource(&self) -> ApiResource {
        ApiResource::from_gvk_with_plural(
            &GroupVersionKind::gvk(&self.group, &self.version, &self.kind),
            &self.plural,
        )
    }

    /// Address one instance of this kind
    pub fn coordinate(&self, namespace: Option<&str>, name: &str) -> ResourceCoordinate {
        ResourceCoordinate {
            group: self.group.clone(),
            version: self.version.clone(),
            plural: self.plural.clone(),
            namespace: namespace.map(str::to_string),
            name: name.to_string(),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.api_version(), self.plural)
    }
}

/// One concrete object: a kind, an optional namespace and a name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceCoordinate {
    pub group: String,
    pub version: String,
    pub plural: String,
    /// `None` for cluster-scoped objects
    pub namespace: Option<String>,
    pub name: String,
}

impl ResourceCoordinate {
    /// Coordinate of a namespace object itself
    pub fn namespace(name: &str) -> Self {
        ResourceKind::namespaces().coordinate(None, name)
    }

    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }

    /// Only group, version and plural matter for addressing; the kind name is left empty.
    pub fn api_resource(&self) -> ApiResource {
        ApiResource::from_gvk_with_plural(
            &GroupVersionKind::gvk(&self.group, &self.version, ""),
            &self.plural,
        )
    }

    /// Whether this coordinate addresses an instance of `kind`
    pub fn is_of(&self, kind: &ResourceKind) -> bool {
        self.group == kind.group && self.version == kind.version && self.plural == kind.plural
    }
}

impl fmt::Display for ResourceCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{}/{} {}/{}", self.api_version(), self.plural, ns, self.name),
            None => write!(f, "{}/{} {}", self.api_version(), self.plural, self.name),
        }
    }
}
