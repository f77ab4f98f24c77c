// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Menu: a recursive, accessible menu-tree controller.
//!
//! This crate attaches menu semantics — roles, disclosure state, keyboard
//! interaction — to pre-existing nested markup described by the host. It is
//! the interaction core of a multi-level dropdown/menubar widget: a tree of
//! disclosure nodes with sibling-exclusive open state, a roving-tabindex
//! keyboard state machine, scoped outside-click subscriptions, and pluggable
//! open/close transition strategies that never block the state machine.
//!
//! ## How it fits together
//!
//! - The host scrapes its markup into a [`MenuSpec`] outline (containers,
//!   items, triggers, optional nested menus) and calls [`MenuTree::build`],
//!   receiving the tree plus the bootstrap [`Update`] of attribute patches.
//! - Input events are fed to the tree ([`MenuTree::on_click`],
//!   [`MenuTree::on_key`], [`MenuTree::on_document_click`]); each call
//!   returns an [`Update`] of patches, [`Command`]s, and [`MenuEvent`]s to
//!   apply.
//! - Animated transitions are host-driven: the tree hands out a [`Ticket`]
//!   inside [`Command::Animate`] and chains its focus management off
//!   [`MenuTree::finish_transition`], exactly once per open/close.
//!
//! Invariants maintained at all times:
//!
//! - At most one item per sibling group has an open submenu.
//! - Closing a node force-closes its whole subtree in the same step.
//! - Exactly one root-level trigger is in the tab sequence (roving
//!   tabindex); deeper triggers are programmatically focusable only.
//! - The outside-click watch is acquired exactly once per open and released
//!   exactly once per close, through every exit path.
//!
//! ## API overview
//!
//! - [`MenuTree`]: the controller; one instance per widget.
//! - [`MenuSpec`] / [`ItemSpec`] / [`TriggerRef`] / [`ElementRef`]: the
//!   outline a host feeds to [`MenuTree::build`].
//! - [`MenuOptions`]: root configuration (external trigger, label override,
//!   transition scheme, id prefix).
//! - [`Update`] / [`Command`] / [`MenuEvent`]: operation outputs.
//! - [`Key`]: keyboard input accepted by [`MenuTree::on_key`].
//! - [`CloseOptions`] / [`NodeId`] / [`Ticket`]: control-surface details.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod nav;
mod outline;
mod tree;
mod types;
mod update;

pub use nav::Key;
pub use outline::{BuildError, ElementRef, ItemSpec, MenuOptions, MenuSpec, TriggerRef};
pub use tree::MenuTree;
pub use types::{CloseOptions, NodeId};
pub use update::{Command, MenuEvent, Ticket, Update};
