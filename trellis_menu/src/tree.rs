// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: construction, open/close state machine, cascades.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use smallvec::SmallVec;

use trellis_aria::{AttrName, DEFAULT_LABEL, IdMinter, PatchOp, Role};
use trellis_transition::{TransitionConfig, TransitionKind, TransitionPhase};

use crate::outline::{BuildError, ItemSpec, MenuOptions, MenuSpec};
use crate::types::{CloseOptions, NodeFlags, NodeId};
use crate::update::{Command, MenuEvent, Ticket, Update};

/// Which role a registered host element plays in the tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Owner {
    /// A menu container, owned by the given node.
    Container(NodeId),
    /// The root's external trigger.
    Trigger(NodeId),
    /// An item trigger: owning node plus sibling index.
    Item(NodeId, usize),
}

#[derive(Clone, Debug)]
pub(crate) struct Item<E> {
    pub(crate) trigger: E,
    pub(crate) label: String,
    pub(crate) submenu: Option<NodeId>,
}

#[derive(Copy, Clone, Debug)]
struct Pending {
    seq: u32,
    phase: TransitionPhase,
    skip_focus: bool,
}

#[derive(Clone, Debug)]
pub(crate) struct Node<E> {
    pub(crate) flags: NodeFlags,
    pub(crate) open: bool,
    pub(crate) depth: u32,
    /// Owning (parent node, item index). `None` for the root.
    pub(crate) parent: Option<(NodeId, usize)>,
    pub(crate) container: E,
    /// Controlling trigger: the owning item's trigger for submenus, the
    /// external trigger for a toggleable root, `None` for a bare menubar.
    pub(crate) trigger: Option<E>,
    pub(crate) items: SmallVec<[Item<E>; 4]>,
    /// Transition marker from the container's markup.
    marker: Option<String>,
    pending: Option<Pending>,
    /// Transition sequence; bumped on every open/close so in-flight
    /// completion tickets go stale.
    seq: u32,
    /// Roving tabindex anchor. Meaningful on the root only.
    pub(crate) tab_anchor: usize,
}

/// Recursive menu-tree controller.
///
/// A `MenuTree` is built once, synchronously, over a host-described outline
/// of pre-existing nested markup. Afterwards only its open/closed and
/// tabindex state mutates, driven by the host feeding input events
/// ([`Self::on_click`], [`Self::on_key`], [`Self::on_document_click`]) and
/// transition completions ([`Self::finish_transition`]). Every operation
/// returns an [`Update`] the host applies to its document.
///
/// Nodes form a strict hierarchy stored in an arena: children are reached
/// through their owning items, parents through a back index. At most one
/// item per sibling group has an open submenu, and closing a node closes its
/// whole subtree in the same step.
///
/// The host should deliver element-level clicks via [`Self::on_click`]
/// before the document-level click via [`Self::on_document_click`],
/// mirroring target-then-document event order.
///
/// ## Example
///
/// ```rust
/// use trellis_menu::{Command, ElementRef, ItemSpec, MenuOptions, MenuSpec, MenuTree, TriggerRef};
///
/// // A menubar with one disclosing item and one plain item. Keys are the
/// // host's handles for the underlying elements.
/// let spec = MenuSpec::new(ElementRef::new(1_u32))
///     .item(ItemSpec::new(TriggerRef::new(10, "Products")).with_submenu(
///         MenuSpec::new(ElementRef::new(2))
///             .item(ItemSpec::new(TriggerRef::new(20, "Widgets"))),
///     ))
///     .item(ItemSpec::new(TriggerRef::new(11, "About")));
///
/// let (mut tree, setup) = MenuTree::build(spec, MenuOptions::default()).unwrap();
/// assert!(!setup.patches.is_empty());
///
/// // Clicking the disclosing trigger opens its submenu and moves focus to
/// // the first entry.
/// let update = tree.on_click(10);
/// assert!(update.commands.contains(&Command::Focus(20)));
/// ```
pub struct MenuTree<E> {
    nodes: Vec<Node<E>>,
    pub(crate) owners: HashMap<E, Owner>,
    ids: HashMap<E, String>,
    /// Elements whose id we minted (and must remove on detach).
    minted: Vec<E>,
    minter: IdMinter,
    config: TransitionConfig,
    pub(crate) detached: bool,
}

impl<E> core::fmt::Debug for MenuTree<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MenuTree")
            .field("nodes", &self.nodes.len())
            .field("open", &self.nodes.iter().filter(|n| n.open).count())
            .field("detached", &self.detached)
            .finish_non_exhaustive()
    }
}

impl<E: Copy + Eq + core::hash::Hash> MenuTree<E> {
    /// Construct a tree over an outline and return it with the initial
    /// attribute patches.
    ///
    /// Construction walks the outline recursively, registering every
    /// container and trigger, minting ids where the markup has none, and
    /// emitting the full bootstrap attribute contract (roles, disclosure
    /// triads, roving tabindex, hidden submenus, label resolution).
    ///
    /// Fails loudly on structural violations; see [`BuildError`].
    pub fn build(
        spec: MenuSpec<E>,
        options: MenuOptions<E>,
    ) -> Result<(Self, Update<E>), BuildError> {
        let MenuOptions {
            trigger,
            label,
            transitions,
            id_prefix,
        } = options;
        let minter = match id_prefix {
            Some(prefix) => IdMinter::with_prefix(prefix),
            None => IdMinter::new(),
        };
        let mut tree = Self {
            nodes: Vec::new(),
            owners: HashMap::new(),
            ids: HashMap::new(),
            minted: Vec::new(),
            minter,
            config: transitions,
            detached: false,
        };
        let mut out = Update::new();

        let toggleable = trigger.is_some();
        let root_key = spec.container.key;
        tree.insert_node(spec, None, 0, toggleable, &mut out)?;
        let root = NodeId::from_index(0);

        if let Some(trig) = trigger {
            let tkey = trig.element.key;
            let tid = tree.ensure_id(tkey, trig.element.id, &mut out);
            tree.register(tkey, Owner::Trigger(root), 0, None)?;
            tree.nodes[0].trigger = Some(tkey);
            let root_cid = tree.ids[&root_key].clone();
            out.patch(tkey, PatchOp::SetRole(Role::Button));
            out.patch(tkey, PatchOp::SetHasPopup);
            out.patch(tkey, PatchOp::SetControls(root_cid));
            out.patch(tkey, PatchOp::SetExpanded(false));
            if trig.label.is_empty() {
                out.patch(tkey, PatchOp::SetLabel(String::from(DEFAULT_LABEL)));
            }
            // Label resolution: explicit override, else derive from the
            // trigger's identifier, else the hardcoded default.
            match label {
                Some(text) => out.patch(root_key, PatchOp::SetLabel(text)),
                None => out.patch(root_key, PatchOp::SetLabelledBy(tid)),
            }
        } else {
            match label {
                Some(text) => out.patch(root_key, PatchOp::SetLabel(text)),
                None => out.patch(root_key, PatchOp::SetLabel(String::from(DEFAULT_LABEL))),
            }
        }

        Ok((tree, out))
    }

    fn insert_node(
        &mut self,
        spec: MenuSpec<E>,
        parent: Option<(NodeId, usize)>,
        depth: u32,
        toggleable: bool,
        out: &mut Update<E>,
    ) -> Result<NodeId, BuildError> {
        let MenuSpec {
            container,
            transition,
            items,
        } = spec;
        let ckey = container.key;
        self.ensure_id(ckey, container.id, out);
        let id = NodeId::from_index(self.nodes.len());
        self.register(ckey, Owner::Container(id), depth, None)?;

        let mut flags = NodeFlags::empty();
        if toggleable {
            flags |= NodeFlags::TOGGLEABLE;
        }
        self.nodes.push(Node {
            flags,
            open: !toggleable,
            depth,
            parent,
            container: ckey,
            trigger: None,
            items: SmallVec::new(),
            marker: transition,
            pending: None,
            seq: 0,
            tab_anchor: 0,
        });

        let role = if depth == 0 && !toggleable {
            Role::Menubar
        } else {
            Role::Menu
        };
        out.patch(ckey, PatchOp::SetRole(role));
        if toggleable {
            out.patch(ckey, PatchOp::SetHidden(true));
        }

        for (i, item) in items.into_iter().enumerate() {
            let ItemSpec { trigger, submenu } = item;
            let trig = trigger.ok_or(BuildError::MissingTrigger { depth, item: i })?;
            let tkey = trig.element.key;
            let tid = self.ensure_id(tkey, trig.element.id, out);
            self.register(tkey, Owner::Item(id, i), depth, Some(i))?;
            out.patch(tkey, PatchOp::SetRole(Role::MenuItem));
            out.patch(tkey, PatchOp::SetItemIndex(i));
            // Roving tabindex at the root: the first trigger anchors the tab
            // sequence. Deeper levels are programmatically focusable only.
            out.patch(tkey, PatchOp::SetTabStop(depth == 0 && i == 0));

            let child = match submenu {
                Some(sub) => {
                    let sub_key = sub.container.key;
                    let sub_cid = self.ensure_id(sub_key, sub.container.id.clone(), out);
                    out.patch(tkey, PatchOp::SetHasPopup);
                    out.patch(tkey, PatchOp::SetControls(sub_cid));
                    out.patch(tkey, PatchOp::SetExpanded(false));
                    out.patch(sub_key, PatchOp::SetLabelledBy(tid));
                    let child = self.insert_node(sub, Some((id, i)), depth + 1, true, out)?;
                    self.nodes[child.idx()].trigger = Some(tkey);
                    Some(child)
                }
                None => None,
            };

            self.nodes[id.idx()].items.push(Item {
                trigger: tkey,
                label: trig.label,
                submenu: child,
            });
        }

        Ok(id)
    }

    /// Record an element's id, minting one when the markup declares none.
    fn ensure_id(&mut self, key: E, declared: Option<String>, out: &mut Update<E>) -> String {
        if let Some(existing) = self.ids.get(&key) {
            return existing.clone();
        }
        let id = match declared {
            Some(id) => id,
            None => {
                let id = self.minter.mint();
                out.patch(key, PatchOp::SetId(id.clone()));
                self.minted.push(key);
                id
            }
        };
        self.ids.insert(key, id.clone());
        id
    }

    fn register(
        &mut self,
        key: E,
        owner: Owner,
        depth: u32,
        item: Option<usize>,
    ) -> Result<(), BuildError> {
        match self.owners.entry(key) {
            Entry::Occupied(_) => Err(BuildError::DuplicateElement { depth, item }),
            Entry::Vacant(slot) => {
                slot.insert(owner);
                Ok(())
            }
        }
    }

    // --- state machine ---

    /// Open a node's menu.
    ///
    /// No-op for already-open or non-toggleable nodes (a root without a
    /// trigger is permanently open).
    pub fn open(&mut self, id: NodeId) -> Update<E> {
        let mut out = Update::new();
        self.open_into(id, &mut out);
        out
    }

    /// Close a node's menu.
    ///
    /// No-op for already-closed or non-toggleable nodes.
    pub fn close(&mut self, id: NodeId, options: CloseOptions) -> Update<E> {
        let mut out = Update::new();
        self.close_into(id, options, &mut out);
        out
    }

    /// Toggle a node: open if closed, close if open.
    pub fn toggle(&mut self, id: NodeId) -> Update<E> {
        let mut out = Update::new();
        self.toggle_into(id, &mut out);
        out
    }

    /// Cascade-close from `id` up to the nearest closable ancestor.
    ///
    /// If `id` is the root, it closes when toggleable and the cascade stops.
    /// If its parent is a bare persistent menubar root, `id` closes and the
    /// cascade stops. Otherwise the cascade recurses upward, and closing the
    /// ancestor force-closes everything beneath it. Focus is left where the
    /// triggering interaction put it.
    pub fn close_all(&mut self, id: NodeId) -> Update<E> {
        let mut out = Update::new();
        self.close_all_into(
            id,
            CloseOptions {
                instant: false,
                skip_focus: true,
            },
            &mut out,
        );
        out
    }

    fn open_into(&mut self, id: NodeId, out: &mut Update<E>) {
        if self.detached || !self.contains(id) {
            return;
        }
        {
            let n = self.node(id);
            if n.open || !n.flags.contains(NodeFlags::TOGGLEABLE) {
                return;
            }
        }
        let (container, trigger, parent) = {
            let n = self.node_mut(id);
            n.open = true;
            n.seq = n.seq.wrapping_add(1);
            n.pending = None;
            (n.container, n.trigger, n.parent)
        };
        if let Some(t) = trigger {
            out.patch(t, PatchOp::SetExpanded(true));
        }
        self.acquire_watch(id, out);
        // Sibling-exclusivity: at most one open submenu per sibling group.
        // Unrelated branches elsewhere in the tree are left alone.
        if let Some((pid, _)) = parent {
            let open_sibling = self
                .node(pid)
                .items
                .iter()
                .filter_map(|item| item.submenu)
                .find(|&sib| sib != id && self.node(sib).open);
            if let Some(sib) = open_sibling {
                self.close_into(
                    sib,
                    CloseOptions {
                        instant: true,
                        skip_focus: true,
                    },
                    out,
                );
            }
        }
        out.events.push(MenuEvent::Opened { menu: container });
        // Unhide up front so a host-driven effect has something to animate.
        out.patch(container, PatchOp::SetHidden(false));
        let kind = self.resolve_kind(id);
        if kind.is_instant() {
            self.finish_open(id, out);
        } else {
            let seq = self.node(id).seq;
            self.node_mut(id).pending = Some(Pending {
                seq,
                phase: TransitionPhase::Opening,
                skip_focus: false,
            });
            out.commands.push(Command::Animate {
                node: id,
                container,
                kind,
                phase: TransitionPhase::Opening,
                ticket: Ticket { node: id, seq },
            });
        }
    }

    /// Completion half of `open`: runs synchronously for the instant
    /// strategy, otherwise when the host reports the effect finished.
    fn finish_open(&mut self, id: NodeId, out: &mut Update<E>) {
        let (open, first, parent, depth) = {
            let n = self.node(id);
            (
                n.open,
                n.items.first().map(|item| item.trigger),
                n.parent,
                n.depth,
            )
        };
        // The node may have been closed while the effect ran.
        if !open {
            return;
        }
        if let Some(target) = first {
            out.commands.push(Command::Focus(target));
        }
        // A roving root trigger leaves the tab sequence while its submenu is
        // open; close restores it.
        if depth == 1
            && let Some((pid, idx)) = parent
        {
            let t = self.node(pid).items[idx].trigger;
            out.patch(t, PatchOp::SetTabStop(false));
        }
    }

    pub(crate) fn close_into(&mut self, id: NodeId, options: CloseOptions, out: &mut Update<E>) {
        if self.detached || !self.contains(id) {
            return;
        }
        {
            let n = self.node(id);
            if !n.open || !n.flags.contains(NodeFlags::TOGGLEABLE) {
                return;
            }
        }
        let (container, trigger) = {
            let n = self.node_mut(id);
            n.open = false;
            n.seq = n.seq.wrapping_add(1);
            n.pending = None;
            (n.container, n.trigger)
        };
        if let Some(t) = trigger {
            out.patch(t, PatchOp::SetExpanded(false));
        }
        self.release_watch(id, out);
        // Closed implies subtree closed: force-close descendants instantly,
        // with no nested animation waterfalls. The parent is already gone
        // from view.
        let children: Vec<NodeId> = self
            .node(id)
            .items
            .iter()
            .filter_map(|item| item.submenu)
            .collect();
        for child in children {
            if self.node(child).open {
                self.close_into(
                    child,
                    CloseOptions {
                        instant: true,
                        skip_focus: true,
                    },
                    out,
                );
            }
        }
        out.events.push(MenuEvent::Closed { menu: container });
        let kind = if options.instant {
            TransitionKind::Instant
        } else {
            self.resolve_kind(id)
        };
        if kind.is_instant() {
            self.finish_close(id, options.skip_focus, out);
        } else {
            let seq = self.node(id).seq;
            self.node_mut(id).pending = Some(Pending {
                seq,
                phase: TransitionPhase::Closing,
                skip_focus: options.skip_focus,
            });
            out.commands.push(Command::Animate {
                node: id,
                container,
                kind,
                phase: TransitionPhase::Closing,
                ticket: Ticket { node: id, seq },
            });
        }
    }

    /// Completion half of `close`: hides the container, restores the
    /// controlling trigger's tab membership, and returns focus to it unless
    /// suppressed.
    fn finish_close(&mut self, id: NodeId, skip_focus: bool, out: &mut Update<E>) {
        let (open, container, parent, trigger) = {
            let n = self.node(id);
            (n.open, n.container, n.parent, n.trigger)
        };
        // The node may have been reopened while the effect ran.
        if open {
            return;
        }
        out.patch(container, PatchOp::SetHidden(true));
        if let Some((pid, idx)) = parent {
            let t = self.node(pid).items[idx].trigger;
            if self.node(pid).parent.is_none() {
                self.reanchor(pid, idx, out);
            }
            if !skip_focus {
                out.commands.push(Command::Focus(t));
            }
        } else if let Some(t) = trigger
            && !skip_focus
        {
            out.commands.push(Command::Focus(t));
        }
    }

    pub(crate) fn toggle_into(&mut self, id: NodeId, out: &mut Update<E>) {
        if self.detached || !self.contains(id) {
            return;
        }
        if self.node(id).open {
            self.close_into(id, CloseOptions::default(), out);
        } else {
            self.open_into(id, out);
        }
    }

    pub(crate) fn close_all_into(
        &mut self,
        id: NodeId,
        options: CloseOptions,
        out: &mut Update<E>,
    ) {
        if self.detached || !self.contains(id) {
            return;
        }
        match self.node(id).parent {
            None => {
                if self.node(id).flags.contains(NodeFlags::TOGGLEABLE) {
                    self.close_into(id, options, out);
                }
            }
            Some((pid, _)) => {
                let parent_is_bare_root = self.node(pid).parent.is_none()
                    && !self.node(pid).flags.contains(NodeFlags::TOGGLEABLE);
                if parent_is_bare_root {
                    self.close_into(id, options, out);
                } else {
                    self.close_all_into(pid, options, out);
                }
            }
        }
    }

    // --- input dispatch ---

    /// Handle a click on a registered element.
    ///
    /// A click on an item trigger toggles that item's submenu; a click on
    /// the external root trigger toggles the root. Clicks on anything else
    /// (plain items, containers) are the host's business.
    pub fn on_click(&mut self, target: E) -> Update<E> {
        let mut out = Update::new();
        if self.detached {
            return out;
        }
        match self.owners.get(&target).copied() {
            Some(Owner::Item(node, index)) => {
                if let Some(sub) = self.node(node).items[index].submenu {
                    self.toggle_into(sub, &mut out);
                }
            }
            Some(Owner::Trigger(root)) => self.toggle_into(root, &mut out),
            _ => {}
        }
        out
    }

    /// Handle a document-level click while one or more nodes are watching.
    ///
    /// `target` is the clicked element's key, or `None` when the click
    /// landed on an element unknown to this tree. Every watching node whose
    /// container subtree and controlling trigger both exclude the target
    /// closes its full open cascade, with focus left where the click put it.
    pub fn on_document_click(&mut self, target: Option<E>) -> Update<E> {
        let mut out = Update::new();
        if self.detached {
            return out;
        }
        let watchers: Vec<NodeId> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.flags.contains(NodeFlags::WATCHING))
            .map(|(i, _)| NodeId::from_index(i))
            .collect();
        for id in watchers {
            // An earlier cascade in this same click may have closed it.
            if !self.node(id).open {
                continue;
            }
            let inside = match target {
                Some(t) => self.click_is_inside(id, t),
                None => false,
            };
            if !inside {
                self.close_all_into(
                    id,
                    CloseOptions {
                        instant: false,
                        skip_focus: true,
                    },
                    &mut out,
                );
            }
        }
        out
    }

    fn click_is_inside(&self, id: NodeId, target: E) -> bool {
        if self.node(id).trigger == Some(target) {
            return true;
        }
        match self.owners.get(&target) {
            Some(&Owner::Container(n)) | Some(&Owner::Item(n, _)) => self.is_in_subtree(id, n),
            Some(&Owner::Trigger(_)) | None => false,
        }
    }

    fn is_in_subtree(&self, ancestor: NodeId, mut node: NodeId) -> bool {
        loop {
            if node == ancestor {
                return true;
            }
            match self.node(node).parent {
                Some((pid, _)) => node = pid,
                None => return false,
            }
        }
    }

    // --- transitions ---

    /// Report completion of a host-driven transition effect.
    ///
    /// Each ticket completes at most once; tickets superseded by a newer
    /// open/close on the same node are stale and ignored, so a close racing
    /// an in-flight open effect can never run the open's focus chain.
    pub fn finish_transition(&mut self, ticket: Ticket) -> Update<E> {
        let mut out = Update::new();
        let id = ticket.node;
        if self.detached || !self.contains(id) {
            return out;
        }
        let pending = {
            let n = self.node_mut(id);
            match n.pending {
                Some(p) if p.seq == ticket.seq => {
                    n.pending = None;
                    Some(p)
                }
                _ => None,
            }
        };
        match pending {
            Some(Pending {
                phase: TransitionPhase::Opening,
                ..
            }) => self.finish_open(id, &mut out),
            Some(Pending {
                phase: TransitionPhase::Closing,
                skip_focus,
                ..
            }) => self.finish_close(id, skip_focus, &mut out),
            None => {}
        }
        out
    }

    fn resolve_kind(&self, id: NodeId) -> TransitionKind {
        let n = self.node(id);
        match &self.config {
            TransitionConfig::ByDepth(table) => table.resolve(n.depth as usize),
            TransitionConfig::ByMarker => n
                .marker
                .as_deref()
                .map(TransitionKind::from_marker)
                .unwrap_or_default(),
        }
    }

    // --- scoped outside-click subscription ---

    fn acquire_watch(&mut self, id: NodeId, out: &mut Update<E>) {
        let n = self.node_mut(id);
        debug_assert!(
            !n.flags.contains(NodeFlags::WATCHING),
            "outside-click watch acquired twice"
        );
        if !n.flags.contains(NodeFlags::WATCHING) {
            n.flags.insert(NodeFlags::WATCHING);
            out.commands.push(Command::Watch(id));
        }
    }

    fn release_watch(&mut self, id: NodeId, out: &mut Update<E>) {
        let n = self.node_mut(id);
        if n.flags.contains(NodeFlags::WATCHING) {
            n.flags.remove(NodeFlags::WATCHING);
            out.commands.push(Command::Unwatch(id));
        }
    }

    // --- roving tabindex ---

    /// Move the root's roving tabindex anchor, keeping exactly one trigger
    /// in the tab sequence.
    pub(crate) fn reanchor(&mut self, root: NodeId, index: usize, out: &mut Update<E>) {
        let old = self.node(root).tab_anchor;
        if old != index
            && let Some(item) = self.node(root).items.get(old)
        {
            out.patch(item.trigger, PatchOp::SetTabStop(false));
        }
        let target = self.node(root).items[index].trigger;
        out.patch(target, PatchOp::SetTabStop(true));
        self.node_mut(root).tab_anchor = index;
    }

    // --- teardown ---

    /// Detach the controller from the markup.
    ///
    /// Releases every live outside-click watch, cancels in-flight
    /// transitions, and emits patches reverting the attribute contract
    /// (roles, aria state, tabindex, index tags, minted ids, visibility).
    /// The tree is inert afterwards: all further operations are no-ops.
    pub fn detach(&mut self) -> Update<E> {
        let mut out = Update::new();
        if self.detached {
            return out;
        }
        for i in 0..self.nodes.len() {
            let id = NodeId::from_index(i);
            self.release_watch(id, &mut out);
            self.node_mut(id).pending = None;
        }
        for i in 0..self.nodes.len() {
            let (container, toggleable) = {
                let n = &self.nodes[i];
                (n.container, n.flags.contains(NodeFlags::TOGGLEABLE))
            };
            out.patch(container, PatchOp::Remove(AttrName::Role));
            out.patch(container, PatchOp::Remove(AttrName::Label));
            out.patch(container, PatchOp::Remove(AttrName::LabelledBy));
            if toggleable {
                out.patch(container, PatchOp::SetHidden(false));
            }
            let triggers: Vec<(E, bool)> = self.nodes[i]
                .items
                .iter()
                .map(|item| (item.trigger, item.submenu.is_some()))
                .collect();
            for (t, discloses) in triggers {
                out.patch(t, PatchOp::Remove(AttrName::Role));
                out.patch(t, PatchOp::Remove(AttrName::TabIndex));
                out.patch(t, PatchOp::Remove(AttrName::ItemIndex));
                if discloses {
                    out.patch(t, PatchOp::Remove(AttrName::HasPopup));
                    out.patch(t, PatchOp::Remove(AttrName::Controls));
                    out.patch(t, PatchOp::Remove(AttrName::Expanded));
                }
            }
        }
        if let Some(t) = self.nodes[0].trigger {
            out.patch(t, PatchOp::Remove(AttrName::Role));
            out.patch(t, PatchOp::Remove(AttrName::HasPopup));
            out.patch(t, PatchOp::Remove(AttrName::Controls));
            out.patch(t, PatchOp::Remove(AttrName::Expanded));
            out.patch(t, PatchOp::Remove(AttrName::Label));
        }
        let minted = core::mem::take(&mut self.minted);
        for key in minted {
            out.patch(key, PatchOp::Remove(AttrName::Id));
        }
        self.detached = true;
        out
    }

    // --- accessors ---

    /// The root node.
    pub fn root(&self) -> NodeId {
        NodeId::from_index(0)
    }

    /// Whether `id` names a node of this tree.
    pub fn contains(&self, id: NodeId) -> bool {
        id.idx() < self.nodes.len()
    }

    /// Whether a node's menu is open. Non-toggleable nodes are always open.
    pub fn is_open(&self, id: NodeId) -> bool {
        self.contains(id) && self.node(id).open
    }

    /// Whether a node has a controlling trigger.
    pub fn is_toggleable(&self, id: NodeId) -> bool {
        self.contains(id) && self.node(id).flags.contains(NodeFlags::TOGGLEABLE)
    }

    /// Distance from the root (root = 0).
    pub fn depth_of(&self, id: NodeId) -> Option<u32> {
        self.contains(id).then(|| self.node(id).depth)
    }

    /// The parent node, or `None` for the root.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.contains(id)
            .then(|| self.node(id).parent.map(|(pid, _)| pid))
            .flatten()
    }

    /// The container element a node controls.
    pub fn container_of(&self, id: NodeId) -> Option<E> {
        self.contains(id).then(|| self.node(id).container)
    }

    /// The node's controlling trigger element, if any.
    pub fn trigger_of(&self, id: NodeId) -> Option<E> {
        self.contains(id)
            .then(|| self.node(id).trigger)
            .flatten()
    }

    /// Number of items in a node's menu.
    pub fn item_count(&self, id: NodeId) -> usize {
        if self.contains(id) {
            self.node(id).items.len()
        } else {
            0
        }
    }

    /// The submenu disclosed by item `index` of node `id`, if any.
    pub fn submenu_at(&self, id: NodeId, index: usize) -> Option<NodeId> {
        if !self.contains(id) {
            return None;
        }
        self.node(id).items.get(index).and_then(|item| item.submenu)
    }

    /// The node owning a container element.
    pub fn node_of_container(&self, container: E) -> Option<NodeId> {
        match self.owners.get(&container) {
            Some(&Owner::Container(id)) => Some(id),
            _ => None,
        }
    }

    /// Whether [`Self::detach`] has run.
    pub fn is_detached(&self) -> bool {
        self.detached
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node<E> {
        &self.nodes[id.idx()]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<E> {
        &mut self.nodes[id.idx()]
    }
}
