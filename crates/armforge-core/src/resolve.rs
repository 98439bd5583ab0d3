//! Folds builder output into the final resource list.
//!
//! Specs are applied in declaration order. An automatically created reference
//! appends a new resource; an external reference merges into the resource of
//! the same kind and name that an earlier builder declared.

use tracing::{debug, warn};

use crate::builders::{Contribution, ResourceSpec};
use crate::error::{ArmforgeError, Result};
use crate::model::{Resource, ResourceKind, ResourceName, ResourceRef};

/// Resolve every spec, in order, into a list of resources.
pub fn resolve(specs: impl IntoIterator<Item = ResourceSpec>) -> Result<Vec<Resource>> {
    specs.into_iter().try_fold(Vec::new(), apply)
}

/// Apply one spec to the resources accumulated so far.
pub fn apply(mut resources: Vec<Resource>, spec: ResourceSpec) -> Result<Vec<Resource>> {
    let kind = spec.kind;
    match spec.reference.clone() {
        ResourceRef::AutomaticPlaceholder => Err(ArmforgeError::UnresolvedReference { kind }),
        ResourceRef::AutomaticallyCreated(name) => {
            if find(&resources, kind, &name).is_some() {
                warn!(%kind, %name, "resource declared more than once");
            }
            let resource = spec
                .materialize()
                .ok_or_else(|| ArmforgeError::MissingDefinition {
                    name: name.to_string(),
                    kind,
                })?;
            debug!(%kind, %name, "created resource");
            resources.push(resource);
            Ok(resources)
        }
        ResourceRef::External(name) => {
            let Some(index) = find(&resources, kind, &name) else {
                return Err(missing_external(&resources, kind, &name));
            };
            merge(&mut resources[index], spec.contribution)?;
            debug!(%kind, %name, "merged into existing resource");
            Ok(resources)
        }
    }
}

fn find(resources: &[Resource], kind: ResourceKind, name: &ResourceName) -> Option<usize> {
    resources
        .iter()
        .position(|r| r.kind() == kind && r.name() == name)
}

fn missing_external(
    resources: &[Resource],
    kind: ResourceKind,
    name: &ResourceName,
) -> ArmforgeError {
    match resources.iter().find(|r| r.name() == name) {
        Some(other) => ArmforgeError::ReferenceKindMismatch {
            name: name.to_string(),
            expected: kind,
            found: other.kind(),
        },
        None => ArmforgeError::DanglingExternalReference {
            name: name.to_string(),
            kind,
        },
    }
}

fn merge(existing: &mut Resource, contribution: Contribution) -> Result<()> {
    match contribution {
        Contribution::Container { instance, .. } => match existing {
            Resource::ContainerGroup(group) => {
                group.add_container(instance);
                Ok(())
            }
            other => Err(ArmforgeError::ReferenceKindMismatch {
                name: other.name().to_string(),
                expected: ResourceKind::ContainerGroup,
                found: other.kind(),
            }),
        },
        Contribution::Link => Ok(()),
        Contribution::Definition(ignored) => {
            // The earlier declaration wins.
            warn!(
                kind = %ignored.kind(),
                name = %ignored.name(),
                "definition for an external reference ignored"
            );
            Ok(())
        }
    }
}

/// Fail if any resolved resource still carries the empty name.
pub fn ensure_named(resources: &[Resource]) -> Result<()> {
    match resources.iter().find(|r| r.name().is_empty()) {
        Some(unnamed) => Err(ArmforgeError::EmptyResourceName {
            kind: unnamed.kind(),
        }),
        None => Ok(()),
    }
}
