//! A renderer-agnostic virtual DOM reconciliation core.
//!
//! `vnode-dom` builds a [`VNode`] tree with [`h`], hands it to a [`Patcher`]
//! built over a [`DomApi`] backend, and lets the keyed two-pointer diff in
//! [`patch`] decide what to create, move, patch, or tear down. The core
//! itself knows nothing about attributes, classes, styles, or event
//! listeners — those live in modules, small hook bundles installed at
//! [`init`] time that see every node pass through create/update/remove.

mod create;
mod dom;
mod engine;
mod hyperscript;
mod module;
mod node;
mod patch;
mod remove;
mod selector;

#[cfg(any(test, feature = "test-util"))]
pub mod test_dom;

#[cfg(feature = "web")]
pub mod web_sys_dom;

pub mod modules;

pub use create::{create_elm, InsertionQueue};
pub use dom::DomApi;
pub use engine::{init, PatchTarget, Patcher};
pub use hyperscript::{children, h, h_with, keyed, HArg, IntoChild, IntoHArg};
pub use module::{ModuleHooks, ModuleRegistry};
pub use node::{
    same_vnode, InitHook, InsertHook, Key, NodeCreateHook, NodeDestroyHook, NodeHooks,
    NodeRemoveHook, NodeUpdateHook, PostPatchHook, PrePatchHook, RemoveCallback, VNode, VNodeData,
};
pub use patch::patch_vnode;
pub use remove::{invoke_destroy_hook, remove_vnodes};
pub use selector::{parse_selector, ParsedSelector, SVG_NS, XLINK_NS};
