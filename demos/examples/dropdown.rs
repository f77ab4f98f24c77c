// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A complete fake host: builds a menubar over an imagined markup snippet,
//! applies every update to an attribute store, and drives the widget with
//! clicks and keys. Run with `cargo run -p trellis_demos --example dropdown`.

use std::collections::BTreeMap;

use trellis_menu::{
    Command, ElementRef, ItemSpec, MenuOptions, MenuSpec, MenuTree, Key, TriggerRef, Update,
};
use trellis_transition::{DepthTable, TransitionConfig, TransitionKind};

/// The host's "document": per element, a sorted attribute map.
#[derive(Default)]
struct Document {
    attrs: BTreeMap<&'static str, BTreeMap<&'static str, String>>,
}

impl Document {
    /// Apply one update, running any requested transition effects to
    /// completion immediately (a real host would do this over frames).
    fn apply(&mut self, tree: &mut MenuTree<&'static str>, update: Update<&'static str>) {
        let mut pending = vec![update];
        while let Some(update) = pending.pop() {
            for patch in &update.patches {
                let (name, value) = patch.op.render();
                let element = self.attrs.entry(patch.target).or_default();
                match value {
                    Some(v) => {
                        element.insert(name, v);
                    }
                    None => {
                        element.remove(name);
                    }
                }
            }
            for event in &update.events {
                println!("  event: {event:?}");
            }
            for command in update.commands {
                match command {
                    Command::Focus(element) => println!("  focus → {element}"),
                    Command::Watch(node) => println!("  watch outside clicks for {node:?}"),
                    Command::Unwatch(node) => println!("  unwatch {node:?}"),
                    Command::Animate {
                        container,
                        kind,
                        phase,
                        ticket,
                        ..
                    } => {
                        println!("  animate {container} ({kind:?}, {phase:?})");
                        pending.push(tree.finish_transition(ticket));
                    }
                }
            }
        }
    }

    fn dump(&self) {
        for (element, attrs) in &self.attrs {
            let rendered: Vec<String> = attrs
                .iter()
                .map(|(name, value)| {
                    if value.is_empty() {
                        (*name).to_string()
                    } else {
                        format!("{name}=\"{value}\"")
                    }
                })
                .collect();
            println!("  <{element} {}>", rendered.join(" "));
        }
    }
}

fn main() {
    // The markup this outline mirrors:
    //
    //   <ul class="menu">                         nav
    //     <li><a>Products</a>                     products
    //       <ul class="menu">                     products-menu
    //         <li><a>Widgets</a></li>             widgets
    //         <li><a>Gadgets</a></li>             gadgets
    //         <li><a>Gizmos</a></li>              gizmos
    //       </ul></li>
    //     <li><a>Pricing</a></li>                 pricing
    //     <li><a>About</a></li>                   about
    //   </ul>
    let spec = MenuSpec::new(ElementRef::new("nav"))
        .item(
            ItemSpec::new(TriggerRef::new("products", "Products")).with_submenu(
                MenuSpec::new(ElementRef::new("products-menu"))
                    .item(ItemSpec::new(TriggerRef::new("widgets", "Widgets")))
                    .item(ItemSpec::new(TriggerRef::new("gadgets", "Gadgets")))
                    .item(ItemSpec::new(TriggerRef::new("gizmos", "Gizmos"))),
            ),
        )
        .item(ItemSpec::new(TriggerRef::new("pricing", "Pricing")))
        .item(ItemSpec::new(TriggerRef::new("about", "About")));

    let mut table = DepthTable::new();
    table.set_inherit(1, TransitionKind::Fade);
    let options = MenuOptions {
        transitions: TransitionConfig::ByDepth(table),
        ..MenuOptions::default()
    };

    let (mut tree, setup) = MenuTree::build(spec, options).expect("outline is well-formed");
    let mut document = Document::default();

    println!("bootstrap:");
    document.apply(&mut tree, setup);
    document.dump();

    println!("\nclick \"Products\":");
    let update = tree.on_click("products");
    document.apply(&mut tree, update);

    println!("\narrow to the next entry, then search for \"g\":");
    let update = tree.on_key("widgets", Key::ArrowRight);
    document.apply(&mut tree, update);
    let update = tree.on_key("gadgets", Key::Char('g'));
    document.apply(&mut tree, update);

    println!("\nclick outside the widget:");
    let update = tree.on_document_click(None);
    document.apply(&mut tree, update);

    println!("\nfinal attributes:");
    document.dump();
}
