// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis ARIA: the attribute contract of the menu controller.
//!
//! The menu controller never touches a document directly. Instead it emits
//! [`Patch`] values — one host element plus one attribute operation — and the
//! host applies them to whatever document representation it owns (a browser
//! DOM, a server-rendered tree, or a test fixture). This crate defines that
//! vocabulary and renders each operation to the exact attribute name/value
//! strings assistive tooling expects, so the produced contract can be checked
//! bit for bit.
//!
//! ## Minimal example
//!
//! ```rust
//! use trellis_aria::{Patch, PatchOp, Role};
//!
//! let patch = Patch {
//!     target: 7_u32,
//!     op: PatchOp::SetRole(Role::MenuItem),
//! };
//! assert_eq!(patch.op.render(), ("role", Some("menuitem".into())));
//!
//! // A `None` value means the attribute is removed.
//! assert_eq!(
//!     Patch { target: 7_u32, op: PatchOp::SetHidden(false) }.op.render(),
//!     ("hidden", None),
//! );
//! ```
//!
//! The element type is generic: callers use any small, copyable handle for
//! their document nodes, mirroring the node-key convention of the rest of
//! the Trellis crates.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::format;

/// Accessible label applied when markup offers nothing better.
pub const DEFAULT_LABEL: &str = "Menu";

/// Widget roles assigned by the controller.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// A toggleable menu container.
    Menu,
    /// A persistent, always-visible menu container.
    Menubar,
    /// An actionable entry inside a menu container.
    MenuItem,
    /// An external trigger controlling a toggleable root.
    Button,
}

impl Role {
    /// The exact `role` attribute value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Menu => "menu",
            Self::Menubar => "menubar",
            Self::MenuItem => "menuitem",
            Self::Button => "button",
        }
    }
}

/// Attributes managed by the controller.
///
/// Used both internally to render [`PatchOp`] values and in
/// [`PatchOp::Remove`] during teardown.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AttrName {
    /// `id`
    Id,
    /// `role`
    Role,
    /// `aria-label`
    Label,
    /// `aria-labelledby`
    LabelledBy,
    /// `aria-haspopup`
    HasPopup,
    /// `aria-controls`
    Controls,
    /// `aria-expanded`
    Expanded,
    /// `tabindex`
    TabIndex,
    /// `data-trellis-index`, the sibling-index tag on item triggers.
    ItemIndex,
    /// `hidden`
    Hidden,
}

impl AttrName {
    /// The exact attribute name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Role => "role",
            Self::Label => "aria-label",
            Self::LabelledBy => "aria-labelledby",
            Self::HasPopup => "aria-haspopup",
            Self::Controls => "aria-controls",
            Self::Expanded => "aria-expanded",
            Self::TabIndex => "tabindex",
            Self::ItemIndex => "data-trellis-index",
            Self::Hidden => "hidden",
        }
    }
}

/// One attribute operation on one element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatchOp {
    /// Assign a (minted) unique identifier.
    SetId(String),
    /// Assign a widget role.
    SetRole(Role),
    /// Assign an explicit accessible label (`aria-label`).
    SetLabel(String),
    /// Point the accessible label at another element (`aria-labelledby`).
    SetLabelledBy(String),
    /// Mark a trigger as disclosing a popup (`aria-haspopup="true"`).
    SetHasPopup,
    /// Record which container a trigger controls (`aria-controls`).
    SetControls(String),
    /// Reflect disclosure state (`aria-expanded`).
    SetExpanded(bool),
    /// Tab-sequence membership: `true` renders `tabindex="0"`, `false`
    /// renders `tabindex="-1"` (programmatically focusable only).
    SetTabStop(bool),
    /// Sibling-index tag used to resolve which item issued an event.
    SetItemIndex(usize),
    /// Presence of the `hidden` attribute; `false` removes it.
    SetHidden(bool),
    /// Remove a managed attribute (teardown).
    Remove(AttrName),
}

impl PatchOp {
    /// The attribute this operation touches.
    pub const fn attr(&self) -> AttrName {
        match self {
            Self::SetId(_) => AttrName::Id,
            Self::SetRole(_) => AttrName::Role,
            Self::SetLabel(_) => AttrName::Label,
            Self::SetLabelledBy(_) => AttrName::LabelledBy,
            Self::SetHasPopup => AttrName::HasPopup,
            Self::SetControls(_) => AttrName::Controls,
            Self::SetExpanded(_) => AttrName::Expanded,
            Self::SetTabStop(_) => AttrName::TabIndex,
            Self::SetItemIndex(_) => AttrName::ItemIndex,
            Self::SetHidden(_) => AttrName::Hidden,
            Self::Remove(attr) => *attr,
        }
    }

    /// Render to the exact `(attribute name, value)` pair.
    ///
    /// `None` means the attribute is absent after the patch. The strings are
    /// the contract: accessibility tooling compatibility depends on them
    /// matching character for character.
    pub fn render(&self) -> (&'static str, Option<String>) {
        let value = match self {
            Self::SetId(id) | Self::SetLabelledBy(id) | Self::SetControls(id) => {
                Some(id.clone())
            }
            Self::SetRole(role) => Some(String::from(role.as_str())),
            Self::SetLabel(text) => Some(text.clone()),
            Self::SetHasPopup => Some(String::from("true")),
            Self::SetExpanded(open) => {
                Some(String::from(if *open { "true" } else { "false" }))
            }
            Self::SetTabStop(stop) => Some(String::from(if *stop { "0" } else { "-1" })),
            Self::SetItemIndex(i) => Some(i.to_string()),
            Self::SetHidden(true) => Some(String::new()),
            Self::SetHidden(false) | Self::Remove(_) => None,
        };
        (self.attr().as_str(), value)
    }
}

/// One attribute operation bound to a host element.
///
/// `E` is the host's element key; the controller references elements, never
/// owns them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Patch<E> {
    /// The host element to mutate.
    pub target: E,
    /// The attribute operation to apply.
    pub op: PatchOp,
}

/// Mints unique identifiers for elements whose markup carries none.
///
/// Identifiers are unique per minter (and therefore per tree). Hosts that
/// attach several trees to one document should give each a distinct prefix.
#[derive(Clone, Debug)]
pub struct IdMinter {
    prefix: String,
    next: u32,
}

impl IdMinter {
    /// Create a minter with the default `trellis` prefix.
    pub fn new() -> Self {
        Self::with_prefix(String::from("trellis"))
    }

    /// Create a minter with a custom prefix.
    pub fn with_prefix(prefix: String) -> Self {
        Self { prefix, next: 1 }
    }

    /// Mint the next identifier.
    pub fn mint(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

impl Default for IdMinter {
    fn default() -> Self {
        Self::new()
    }
}
