// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Markup outline: the structural description a host feeds to
//! [`MenuTree::build`](crate::MenuTree::build).
//!
//! The outline mirrors the nesting of pre-existing markup: a menu container
//! holds direct-child items, each item holds one trigger and optionally one
//! nested menu container. Discovering this structure from concrete markup
//! (class-name conventions, element queries) is the host's job; the
//! controller only consumes the result.
//!
//! Outline validation fails loudly: an item without a trigger or a host key
//! registered twice aborts construction with a [`BuildError`], since every
//! downstream event lookup depends on those invariants.

use alloc::string::String;
use alloc::vec::Vec;

use trellis_transition::TransitionConfig;

/// Reference to one host-owned element, with its markup-declared id if any.
#[derive(Clone, Debug)]
pub struct ElementRef<E> {
    /// The host's key for this element.
    pub key: E,
    /// The element's pre-existing `id` attribute, when the markup has one.
    /// Elements without one receive a minted id during construction.
    pub id: Option<String>,
}

impl<E> ElementRef<E> {
    /// Reference an element with no markup-declared id.
    pub fn new(key: E) -> Self {
        Self { key, id: None }
    }

    /// Reference an element that already carries an id.
    pub fn with_id(key: E, id: impl Into<String>) -> Self {
        Self {
            key,
            id: Some(id.into()),
        }
    }
}

/// A trigger element plus its visible label text.
///
/// The label's first character drives character-search navigation.
#[derive(Clone, Debug)]
pub struct TriggerRef<E> {
    /// The trigger element.
    pub element: ElementRef<E>,
    /// The trigger's visible label text.
    pub label: String,
}

impl<E> TriggerRef<E> {
    /// Reference a trigger with no markup-declared id.
    pub fn new(key: E, label: impl Into<String>) -> Self {
        Self {
            element: ElementRef::new(key),
            label: label.into(),
        }
    }
}

/// One entry of a menu container.
///
/// `trigger` is an `Option` so that hosts scraping loose markup can report
/// what they found; construction rejects `None` with
/// [`BuildError::MissingTrigger`].
#[derive(Clone, Debug)]
pub struct ItemSpec<E> {
    /// The item's actionable control. Exactly one is required.
    pub trigger: Option<TriggerRef<E>>,
    /// The nested menu container this item discloses, if any.
    pub submenu: Option<MenuSpec<E>>,
}

impl<E> ItemSpec<E> {
    /// An item with a trigger and no submenu.
    pub fn new(trigger: TriggerRef<E>) -> Self {
        Self {
            trigger: Some(trigger),
            submenu: None,
        }
    }

    /// Attach a submenu to this item.
    pub fn with_submenu(mut self, submenu: MenuSpec<E>) -> Self {
        self.submenu = Some(submenu);
        self
    }
}

/// One menu container and its direct-child items, in markup order.
#[derive(Clone, Debug)]
pub struct MenuSpec<E> {
    /// The container element.
    pub container: ElementRef<E>,
    /// Optional transition marker from the container's markup, consulted by
    /// marker-based strategy resolution.
    pub transition: Option<String>,
    /// Direct-child items in document order. Order is significant: it drives
    /// arrow navigation and character search.
    pub items: Vec<ItemSpec<E>>,
}

impl<E> MenuSpec<E> {
    /// An empty menu over `container`.
    pub fn new(container: ElementRef<E>) -> Self {
        Self {
            container,
            transition: None,
            items: Vec::new(),
        }
    }

    /// Set the container's transition marker.
    pub fn with_transition(mut self, name: impl Into<String>) -> Self {
        self.transition = Some(name.into());
        self
    }

    /// Append an item.
    pub fn item(mut self, item: ItemSpec<E>) -> Self {
        self.items.push(item);
        self
    }
}

/// Root-level configuration supplied at construction.
#[derive(Clone, Debug)]
pub struct MenuOptions<E> {
    /// External trigger gating the root. `Some` makes the root a toggleable
    /// menu; `None` makes it a persistent menubar.
    pub trigger: Option<TriggerRef<E>>,
    /// Explicit accessible label for the root container. When absent, the
    /// label is derived from the external trigger's id, falling back to the
    /// hardcoded default.
    pub label: Option<String>,
    /// Transition strategy resolution scheme for the whole tree.
    pub transitions: TransitionConfig,
    /// Prefix for minted element ids; defaults to `trellis`.
    pub id_prefix: Option<String>,
}

impl<E> Default for MenuOptions<E> {
    fn default() -> Self {
        Self {
            trigger: None,
            label: None,
            transitions: TransitionConfig::default(),
            id_prefix: None,
        }
    }
}

/// Structural errors reported by [`MenuTree::build`](crate::MenuTree::build).
///
/// These are load-bearing invariants, not recoverable conditions: proceeding
/// with partial state would corrupt every downstream index lookup, so
/// construction aborts instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BuildError {
    /// An item carried no trigger element.
    MissingTrigger {
        /// Depth of the offending container (root = 0).
        depth: u32,
        /// Index of the offending item among its siblings.
        item: usize,
    },
    /// The same host element key was supplied for two roles in the outline.
    DuplicateElement {
        /// Depth at which the duplicate was encountered.
        depth: u32,
        /// Sibling index of the duplicate, when it was an item trigger.
        item: Option<usize>,
    },
}

impl core::fmt::Display for BuildError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingTrigger { depth, item } => write!(
                f,
                "item {item} at depth {depth} has no trigger element"
            ),
            Self::DuplicateElement { depth, item: Some(item) } => write!(
                f,
                "duplicate element key for item {item} at depth {depth}"
            ),
            Self::DuplicateElement { depth, item: None } => {
                write!(f, "duplicate element key at depth {depth}")
            }
        }
    }
}

impl core::error::Error for BuildError {}
