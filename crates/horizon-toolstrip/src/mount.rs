//! Resolution of where the toolbar is mounted.
//!
//! A toolbar lives either inline in the editor's own toolbar section or in a
//! container supplied by the host application. An external container can be
//! handed over directly or looked up by identifier; a missing or invalid
//! identifier never fails construction, it falls back to the inline section
//! with a warning.

use std::collections::HashMap;

use horizon_toolstrip_core::logging::targets;

use crate::config::MountOption;
use crate::flow::FlowContainer;

/// Where the host asked the toolbar to be mounted.
#[derive(Debug, Clone, Default)]
pub enum MountTarget {
    /// The editor's own toolbar section.
    #[default]
    Inline,
    /// An external container looked up by identifier.
    ContainerId(String),
    /// An external container handed over directly.
    Container(FlowContainer),
}

impl From<MountOption> for MountTarget {
    fn from(option: MountOption) -> Self {
        match option {
            MountOption::Inline => Self::Inline,
            MountOption::ContainerId(id) => Self::ContainerId(id),
        }
    }
}

/// Where the toolbar actually ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountLocation {
    Inline,
    External,
}

/// A resolved mount: the container the main strip renders into.
#[derive(Debug, Clone)]
pub struct ResolvedMount {
    pub container: FlowContainer,
    pub location: MountLocation,
}

/// Looks up host containers by identifier.
pub trait ContainerLookup {
    fn find_container(&self, id: &str) -> Option<FlowContainer>;
}

impl ContainerLookup for HashMap<String, FlowContainer> {
    fn find_container(&self, id: &str) -> Option<FlowContainer> {
        self.get(id).cloned()
    }
}

/// A lookup that knows no containers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContainers;

impl ContainerLookup for NoContainers {
    fn find_container(&self, _id: &str) -> Option<FlowContainer> {
        None
    }
}

/// Resolve `target`, falling back to `inline` when the target can't be found.
pub fn resolve_mount(
    target: MountTarget,
    inline: &FlowContainer,
    lookup: &dyn ContainerLookup,
) -> ResolvedMount {
    let inline_mount = || ResolvedMount {
        container: inline.clone(),
        location: MountLocation::Inline,
    };

    match target {
        MountTarget::Inline => inline_mount(),
        MountTarget::Container(container) => ResolvedMount {
            container,
            location: MountLocation::External,
        },
        MountTarget::ContainerId(id) if id.trim().is_empty() => {
            tracing::warn!(target: targets::MOUNT, "empty toolbar container id, mounting inline");
            inline_mount()
        }
        MountTarget::ContainerId(id) => match lookup.find_container(&id) {
            Some(container) => {
                tracing::debug!(target: targets::MOUNT, container = %id, "mounting toolbar in external container");
                ResolvedMount {
                    container,
                    location: MountLocation::External,
                }
            }
            None => {
                tracing::warn!(target: targets::MOUNT, container = %id, "toolbar container not found, mounting inline");
                inline_mount()
            }
        },
    }
}
