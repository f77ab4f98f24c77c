// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard navigation: sibling traversal, character search, roving tabindex.
//!
//! Keys are dispatched to whichever node owns the focused trigger, resolved
//! from the originating element rather than captured state, so the state
//! machine stays explicit and testable. Arrow keys move between siblings
//! with wrap-around; a printable character jumps to the next sibling whose
//! label starts with it; Escape closes the current level; Tab closes the
//! whole cascade and lets focus follow the natural tab sequence.

use crate::tree::{MenuTree, Owner};
use crate::types::{CloseOptions, NodeId};
use crate::update::{Command, Update};

/// Keyboard input relevant to menu navigation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Close the current menu level.
    Escape,
    /// Leave the widget; closes the open cascade. Forward and backward tab
    /// behave identically here.
    Tab {
        /// Whether Shift was held.
        shift: bool,
    },
    /// Previous sibling.
    ArrowLeft,
    /// Next sibling.
    ArrowRight,
    /// Previous sibling.
    ArrowUp,
    /// Next sibling.
    ArrowDown,
    /// First sibling.
    Home,
    /// Last sibling.
    End,
    /// First sibling.
    PageUp,
    /// Last sibling.
    PageDown,
    /// Character search among sibling labels.
    Char(char),
}

impl<E: Copy + Eq + core::hash::Hash> MenuTree<E> {
    /// Handle a key pressed while `origin` (a trigger element) has focus.
    ///
    /// Unknown origins are no-ops; the sibling index is resolved from the
    /// element map, never from the key event itself.
    pub fn on_key(&mut self, origin: E, key: Key) -> Update<E> {
        let mut out = Update::new();
        if self.detached {
            return out;
        }
        match self.owners.get(&origin).copied() {
            Some(Owner::Item(node, index)) => self.item_key(node, index, key, &mut out),
            Some(Owner::Trigger(root)) => self.trigger_key(root, key, &mut out),
            _ => {}
        }
        out
    }

    fn item_key(&mut self, node: NodeId, index: usize, key: Key, out: &mut Update<E>) {
        let len = self.node(node).items.len();
        match key {
            Key::Escape => self.close_into(node, CloseOptions::default(), out),
            Key::Tab { .. } => self.close_all_into(
                node,
                CloseOptions {
                    instant: false,
                    skip_focus: true,
                },
                out,
            ),
            Key::ArrowLeft | Key::ArrowUp => {
                let to = if index == 0 { len - 1 } else { index - 1 };
                self.move_focus(node, to, out);
            }
            Key::ArrowRight | Key::ArrowDown => {
                let to = if index + 1 == len { 0 } else { index + 1 };
                self.move_focus(node, to, out);
            }
            Key::Home | Key::PageUp => self.move_focus(node, 0, out),
            Key::End | Key::PageDown => self.move_focus(node, len - 1, out),
            Key::Char(c) => {
                if let Some(to) = self.char_target(node, index, c) {
                    self.move_focus(node, to, out);
                }
            }
        }
    }

    /// Keys on the external root trigger: only the closing gestures apply.
    fn trigger_key(&mut self, root: NodeId, key: Key, out: &mut Update<E>) {
        match key {
            Key::Escape => self.close_into(root, CloseOptions::default(), out),
            Key::Tab { .. } => self.close_all_into(
                root,
                CloseOptions {
                    instant: false,
                    skip_focus: true,
                },
                out,
            ),
            _ => {}
        }
    }

    fn move_focus(&mut self, node: NodeId, to: usize, out: &mut Update<E>) {
        let target = self.node(node).items[to].trigger;
        // Root level rides the roving tabindex; deeper levels are focused
        // programmatically and keep tabindex -1.
        if self.node(node).parent.is_none() {
            self.reanchor(node, to, out);
        }
        out.commands.push(Command::Focus(target));
    }

    /// Next sibling whose label starts with `c`, case-insensitively.
    ///
    /// The search runs strictly after the current index first and only then
    /// wraps from the start up to (excluding) the current index, so repeated
    /// keystrokes of the same letter progress instead of sticking on the
    /// first match. The current item never matches itself.
    fn char_target(&self, node: NodeId, index: usize, c: char) -> Option<usize> {
        if c.is_whitespace() || c.is_control() {
            return None;
        }
        let items = &self.node(node).items;
        let len = items.len();
        for offset in 1..len {
            let probe = (index + offset) % len;
            if first_char_matches(&items[probe].label, c) {
                return Some(probe);
            }
        }
        None
    }
}

fn first_char_matches(label: &str, c: char) -> bool {
    label
        .chars()
        .next()
        .is_some_and(|first| first.to_lowercase().eq(c.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::{ElementRef, ItemSpec, MenuOptions, MenuSpec, TriggerRef};
    use trellis_aria::{Patch, PatchOp};

    // Root container 1 with triggers 10 "Alpha", 11 "Beta", 12 "Gamma",
    // 13 "Apricot"; "Beta" discloses submenu 2 { 20 "One", 21 "Two" }.
    fn build() -> MenuTree<u32> {
        let spec = MenuSpec::new(ElementRef::new(1))
            .item(ItemSpec::new(TriggerRef::new(10, "Alpha")))
            .item(
                ItemSpec::new(TriggerRef::new(11, "Beta")).with_submenu(
                    MenuSpec::new(ElementRef::new(2))
                        .item(ItemSpec::new(TriggerRef::new(20, "One")))
                        .item(ItemSpec::new(TriggerRef::new(21, "Two"))),
                ),
            )
            .item(ItemSpec::new(TriggerRef::new(12, "Gamma")))
            .item(ItemSpec::new(TriggerRef::new(13, "Apricot")));
        let (tree, _) = MenuTree::build(spec, MenuOptions::default()).expect("valid outline");
        tree
    }

    fn focus_of(update: &Update<u32>) -> Option<u32> {
        update.commands.iter().find_map(|c| match c {
            Command::Focus(e) => Some(*e),
            _ => None,
        })
    }

    fn has_patch(update: &Update<u32>, target: u32, op: PatchOp) -> bool {
        update.patches.contains(&Patch { target, op })
    }

    #[test]
    fn arrows_move_between_siblings() {
        let mut tree = build();
        assert_eq!(focus_of(&tree.on_key(10, Key::ArrowRight)), Some(11));
        assert_eq!(focus_of(&tree.on_key(11, Key::ArrowDown)), Some(12));
        assert_eq!(focus_of(&tree.on_key(12, Key::ArrowLeft)), Some(11));
        assert_eq!(focus_of(&tree.on_key(11, Key::ArrowUp)), Some(10));
    }

    #[test]
    fn arrows_wrap_at_both_ends() {
        let mut tree = build();
        // Last → first.
        assert_eq!(focus_of(&tree.on_key(13, Key::ArrowRight)), Some(10));
        assert_eq!(focus_of(&tree.on_key(13, Key::ArrowDown)), Some(10));
        // First → last.
        assert_eq!(focus_of(&tree.on_key(10, Key::ArrowLeft)), Some(13));
        assert_eq!(focus_of(&tree.on_key(10, Key::ArrowUp)), Some(13));
    }

    #[test]
    fn home_and_end_jump_to_the_edges() {
        let mut tree = build();
        assert_eq!(focus_of(&tree.on_key(12, Key::Home)), Some(10));
        assert_eq!(focus_of(&tree.on_key(12, Key::PageUp)), Some(10));
        assert_eq!(focus_of(&tree.on_key(10, Key::End)), Some(13));
        assert_eq!(focus_of(&tree.on_key(10, Key::PageDown)), Some(13));
    }

    #[test]
    fn root_moves_ride_the_roving_tabindex() {
        let mut tree = build();
        let update = tree.on_key(10, Key::ArrowRight);
        assert!(has_patch(&update, 10, PatchOp::SetTabStop(false)));
        assert!(has_patch(&update, 11, PatchOp::SetTabStop(true)));

        // Exactly one trigger gains the tab stop per move.
        let gains = update
            .patches
            .iter()
            .filter(|p| p.op == PatchOp::SetTabStop(true))
            .count();
        assert_eq!(gains, 1);
    }

    #[test]
    fn submenu_moves_do_not_touch_tabindex() {
        let mut tree = build();
        let submenu = tree.submenu_at(tree.root(), 1).unwrap();
        let _ = tree.open(submenu);

        let update = tree.on_key(20, Key::ArrowRight);
        assert_eq!(focus_of(&update), Some(21));
        assert!(
            !update.patches.iter().any(|p| matches!(p.op, PatchOp::SetTabStop(_))),
            "non-root levels are programmatically focusable only"
        );
    }

    #[test]
    fn character_search_skips_the_current_match_and_wraps() {
        let mut tree = build();
        // Labels: [Alpha, Beta, Gamma, Apricot]. From "Alpha", pressing "a"
        // must reach "Apricot" (wrap past the current match), not stick.
        assert_eq!(focus_of(&tree.on_key(10, Key::Char('a'))), Some(13));
        // From "Apricot", "a" wraps back to "Alpha".
        assert_eq!(focus_of(&tree.on_key(13, Key::Char('a'))), Some(10));
        // Case-insensitive in both directions.
        assert_eq!(focus_of(&tree.on_key(10, Key::Char('G'))), Some(12));
        assert_eq!(focus_of(&tree.on_key(10, Key::Char('b'))), Some(11));
    }

    #[test]
    fn character_search_without_match_moves_nothing() {
        let mut tree = build();
        assert!(tree.on_key(10, Key::Char('z')).is_empty());
        // Whitespace and control characters never match.
        assert!(tree.on_key(10, Key::Char(' ')).is_empty());
        assert!(tree.on_key(10, Key::Char('\n')).is_empty());
    }

    #[test]
    fn escape_closes_the_current_level_and_restores_focus() {
        let mut tree = build();
        let submenu = tree.submenu_at(tree.root(), 1).unwrap();
        let _ = tree.open(submenu);

        let update = tree.on_key(20, Key::Escape);
        assert!(!tree.is_open(submenu));
        assert_eq!(focus_of(&update), Some(11));
        assert!(has_patch(&update, 11, PatchOp::SetTabStop(true)));
    }

    #[test]
    fn escape_at_a_bare_menubar_root_is_a_noop() {
        let mut tree = build();
        assert!(tree.on_key(10, Key::Escape).is_empty());
    }

    #[test]
    fn tab_closes_the_cascade_without_grabbing_focus() {
        let mut tree = build();
        let submenu = tree.submenu_at(tree.root(), 1).unwrap();
        let _ = tree.open(submenu);

        let update = tree.on_key(20, Key::Tab { shift: false });
        assert!(!tree.is_open(submenu));
        assert!(focus_of(&update).is_none(), "focus follows the tab sequence");
        // Tab membership of the controlling trigger is still restored.
        assert!(has_patch(&update, 11, PatchOp::SetTabStop(true)));

        // Shift+Tab behaves the same.
        let _ = tree.open(submenu);
        let update = tree.on_key(21, Key::Tab { shift: true });
        assert!(!tree.is_open(submenu));
        assert!(focus_of(&update).is_none());
    }

    #[test]
    fn keys_from_unknown_elements_are_ignored() {
        let mut tree = build();
        assert!(tree.on_key(777, Key::ArrowRight).is_empty());
    }

    #[test]
    fn external_trigger_escape_closes_the_root() {
        let spec = MenuSpec::new(ElementRef::new(1_u32))
            .item(ItemSpec::new(TriggerRef::new(10, "Alpha")));
        let options = MenuOptions {
            trigger: Some(TriggerRef::new(99, "Site")),
            ..MenuOptions::default()
        };
        let (mut tree, _) = MenuTree::build(spec, options).unwrap();
        let root = tree.root();
        let _ = tree.on_click(99);
        assert!(tree.is_open(root));

        let update = tree.on_key(99, Key::Escape);
        assert!(!tree.is_open(root));
        assert_eq!(focus_of(&update), Some(99));
    }

    #[test]
    fn exactly_one_root_trigger_holds_the_tab_stop() {
        let mut tree = build();
        // Mirror the tabindex state of the root triggers across a run of
        // keyboard moves; the invariant must hold after every step.
        let mut stops = [true, false, false, false];
        let keys = [
            (10, Key::ArrowRight),
            (11, Key::End),
            (13, Key::Char('g')),
            (12, Key::Home),
            (10, Key::ArrowLeft),
        ];
        for (origin, key) in keys {
            let update = tree.on_key(origin, key);
            for patch in &update.patches {
                let slot = match patch.target {
                    10 => 0,
                    11 => 1,
                    12 => 2,
                    13 => 3,
                    _ => continue,
                };
                if let PatchOp::SetTabStop(stop) = patch.op {
                    stops[slot] = stop;
                }
            }
            let zeros = stops.iter().filter(|&&s| s).count();
            assert_eq!(zeros, 1, "roving tabindex must have exactly one anchor");
        }
    }
}
