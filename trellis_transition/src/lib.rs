// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Transition: strategy selection for menu reveal/hide effects.
//!
//! A transition strategy is the pair of visual effects run when a menu
//! container opens or closes. The controller treats strategies as opaque: it
//! only needs to know *which* [`TransitionKind`] applies to a node, and
//! whether that kind completes synchronously. The concrete visual work for
//! animated kinds (timing, frames, styles) belongs to the host; the
//! [`TransitionKind::Instant`] fallback needs no host work at all and always
//! completes within the call that requested it.
//!
//! Two resolution schemes are supported, selected per tree by
//! [`TransitionConfig`]:
//!
//! - **By depth** ([`DepthTable`]): a per-depth table supplied at root
//!   construction. An explicit entry at the node's depth wins; otherwise the
//!   nearest shallower entry marked inheritable applies; otherwise
//!   [`TransitionKind::Instant`].
//! - **By marker** ([`TransitionKind::from_marker`]): a data marker on the
//!   node's own container, looked up in the fixed name table. Unknown or
//!   absent markers fall back to [`TransitionKind::Instant`] rather than
//!   erroring — a menu that cannot animate must still open.
//!
//! ## Minimal example
//!
//! ```rust
//! use trellis_transition::{DepthTable, TransitionKind};
//!
//! let mut table = DepthTable::new();
//! table.set_inherit(0, TransitionKind::Fade);
//! table.set(2, TransitionKind::Slide);
//!
//! assert_eq!(table.resolve(0), TransitionKind::Fade);
//! // Depth 1 has no entry; it inherits the nearest shallower inheritable one.
//! assert_eq!(table.resolve(1), TransitionKind::Fade);
//! // An explicit entry ignores ancestor markers.
//! assert_eq!(table.resolve(2), TransitionKind::Slide);
//! // Beyond the table, inheritance still applies.
//! assert_eq!(table.resolve(5), TransitionKind::Fade);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

/// The closed set of built-in transition strategies.
///
/// `Instant` toggles visibility and completes synchronously. `Fade` and
/// `Slide` are performed by the host, which reports completion back to the
/// controller so focus management can run exactly once per open/close.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    /// Toggle visibility immediately; completion is synchronous.
    #[default]
    Instant,
    /// Opacity fade, host-driven.
    Fade,
    /// Positional slide, host-driven.
    Slide,
}

impl TransitionKind {
    /// Resolve a container marker name against the fixed registry.
    ///
    /// Unknown names fall back to [`Self::Instant`]; resolution never fails.
    pub fn from_marker(name: &str) -> Self {
        match name {
            "instant" => Self::Instant,
            "fade" => Self::Fade,
            "slide" => Self::Slide,
            _ => Self::Instant,
        }
    }

    /// The registry name of this kind.
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Instant => "instant",
            Self::Fade => "fade",
            Self::Slide => "slide",
        }
    }

    /// Whether this kind completes within the call that starts it.
    pub const fn is_instant(self) -> bool {
        matches!(self, Self::Instant)
    }
}

/// Which half of a strategy is running.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TransitionPhase {
    /// The reveal effect of `open`.
    Opening,
    /// The hide effect of `close`.
    Closing,
}

/// One entry in a [`DepthTable`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DepthSlot {
    /// The strategy applied at this depth.
    pub kind: TransitionKind,
    /// Whether deeper depths without an explicit entry inherit this one.
    pub inherit: bool,
}

/// Depth-indexed strategy table with inheritance fallback.
///
/// Depth 0 is the root container. An empty table resolves every depth to
/// [`TransitionKind::Instant`].
#[derive(Clone, Debug, Default)]
pub struct DepthTable {
    slots: Vec<Option<DepthSlot>>,
}

impl DepthTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Set a non-inheritable strategy for one depth.
    pub fn set(&mut self, depth: usize, kind: TransitionKind) {
        self.put(depth, DepthSlot { kind, inherit: false });
    }

    /// Set a strategy that also applies to deeper, unconfigured depths.
    pub fn set_inherit(&mut self, depth: usize, kind: TransitionKind) {
        self.put(depth, DepthSlot { kind, inherit: true });
    }

    fn put(&mut self, depth: usize, slot: DepthSlot) {
        if self.slots.len() <= depth {
            self.slots.resize(depth + 1, None);
        }
        self.slots[depth] = Some(slot);
    }

    /// Resolve the strategy for a node at `depth`.
    ///
    /// An explicit slot at `depth` wins. Otherwise the nearest shallower
    /// inheritable slot applies. Otherwise [`TransitionKind::Instant`].
    pub fn resolve(&self, depth: usize) -> TransitionKind {
        if let Some(Some(slot)) = self.slots.get(depth) {
            return slot.kind;
        }
        let shallower = depth.min(self.slots.len());
        for d in (0..shallower).rev() {
            if let Some(Some(slot)) = self.slots.get(d)
                && slot.inherit
            {
                return slot.kind;
            }
        }
        TransitionKind::Instant
    }
}

/// Per-tree resolution scheme, chosen at root construction.
#[derive(Clone, Debug)]
pub enum TransitionConfig {
    /// Resolve from a depth-indexed table.
    ByDepth(DepthTable),
    /// Resolve from the node's own container marker via
    /// [`TransitionKind::from_marker`].
    ByMarker,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self::ByDepth(DepthTable::new())
    }
}
