// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Controller outputs: attribute patches, host commands, menu events.
//!
//! Every tree operation returns an [`Update`]. Applying its contents in order
//! brings the host document and input plumbing in sync with the controller's
//! state. Nothing in an [`Update`] is optional: patches carry the ARIA
//! contract, commands carry focus moves and scoped resources, events carry
//! the public open/close notifications.

use alloc::vec::Vec;

use trellis_aria::{Patch, PatchOp};
use trellis_transition::{TransitionKind, TransitionPhase};

use crate::types::NodeId;

/// Completion handle for a host-driven transition effect.
///
/// Returned inside [`Command::Animate`]; the host passes it back to
/// [`MenuTree::finish_transition`](crate::MenuTree::finish_transition) when
/// the visual effect ends. A ticket completes at most once, and a ticket
/// superseded by a newer open/close on the same node is silently stale.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Ticket {
    pub(crate) node: NodeId,
    pub(crate) seq: u32,
}

/// Side effects the host must perform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command<E> {
    /// Move keyboard focus to this element.
    Focus(E),
    /// Begin delivering document-level clicks for this node via
    /// [`MenuTree::on_document_click`](crate::MenuTree::on_document_click).
    ///
    /// Emitted exactly once per open; paired with exactly one
    /// [`Command::Unwatch`] on close, through every exit path.
    Watch(NodeId),
    /// Stop delivering document-level clicks for this node.
    Unwatch(NodeId),
    /// Run a visual transition effect over `container` and call
    /// [`MenuTree::finish_transition`](crate::MenuTree::finish_transition)
    /// with `ticket` when it completes.
    Animate {
        /// The node whose container is transitioning.
        node: NodeId,
        /// The container element to animate.
        container: E,
        /// Which built-in effect to run.
        kind: TransitionKind,
        /// Whether this is the reveal or the hide half.
        phase: TransitionPhase,
        /// Completion handle.
        ticket: Ticket,
    },
}

/// Public open/close notifications, the analogue of custom events emitted on
/// the menu container.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuEvent<E> {
    /// A menu container was opened.
    Opened {
        /// The container element.
        menu: E,
    },
    /// A menu container was closed.
    Closed {
        /// The container element.
        menu: E,
    },
}

/// The batched output of one tree operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Update<E> {
    /// Attribute operations, in application order.
    pub patches: Vec<Patch<E>>,
    /// Host side effects, in application order.
    pub commands: Vec<Command<E>>,
    /// Open/close notifications for surrounding application code.
    pub events: Vec<MenuEvent<E>>,
}

impl<E> Update<E> {
    /// An empty update.
    pub fn new() -> Self {
        Self {
            patches: Vec::new(),
            commands: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Whether the operation had no effect.
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty() && self.commands.is_empty() && self.events.is_empty()
    }

    pub(crate) fn patch(&mut self, target: E, op: PatchOp) {
        self.patches.push(Patch { target, op });
    }
}

impl<E> Default for Update<E> {
    fn default() -> Self {
        Self::new()
    }
}
