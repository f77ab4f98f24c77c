// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the menu tree: node identifiers, flags, close options.

/// Identifier for a node (one menu level) in a [`MenuTree`](crate::MenuTree).
///
/// Identifiers are plain indices into the tree's arena. Nodes are constructed
/// once at attachment time and never removed individually, so an identifier
/// stays valid for the lifetime of its tree.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) const fn from_index(idx: usize) -> Self {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices by design."
        )]
        let idx = idx as u32;
        Self(idx)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Node flags: disclosure capability and held resources.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub(crate) struct NodeFlags: u8 {
        /// Node has a controlling trigger and can be opened/closed.
        /// Nodes without this flag are permanently open and ignore
        /// open/close calls.
        const TOGGLEABLE = 0b0000_0001;
        /// Node currently holds the document-level outside-click watch.
        const WATCHING   = 0b0000_0010;
    }
}

/// Options for closing a node.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CloseOptions {
    /// Bypass the resolved transition strategy and hide immediately.
    pub instant: bool,
    /// Do not return keyboard focus to the controlling trigger.
    pub skip_focus: bool,
}
