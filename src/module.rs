//! The module hook registry (§2, §6): at engine construction time, collects
//! from each registered module any of the six global hooks, grouping them
//! into parallel ordered lists keyed by hook name — read-heavy, write-once,
//! exactly as the design note in §9 describes.

use std::rc::Rc;

use crate::node::{RemoveCallback, VNode};

pub type PreHook = Rc<dyn Fn()>;
pub type CreateHook<N> = Rc<dyn Fn(&VNode<N>, &VNode<N>)>;
pub type UpdateHook<N> = Rc<dyn Fn(&VNode<N>, &VNode<N>)>;
pub type RemoveHook<N> = Rc<dyn Fn(&VNode<N>, RemoveCallback)>;
pub type DestroyHook<N> = Rc<dyn Fn(&VNode<N>)>;
pub type PostHook = Rc<dyn Fn()>;

/// A module's partial hook bundle, passed to [`crate::init`]. Any field left
/// `None` simply does not participate in that hook's phase — there is no
/// "default" behavior to opt out of.
#[derive(Clone, Default)]
pub struct ModuleHooks<N> {
    pub pre: Option<PreHook>,
    pub create: Option<CreateHook<N>>,
    pub update: Option<UpdateHook<N>>,
    pub remove: Option<RemoveHook<N>>,
    pub destroy: Option<DestroyHook<N>>,
    pub post: Option<PostHook>,
}

impl<N> ModuleHooks<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_create(mut self, f: impl Fn(&VNode<N>, &VNode<N>) + 'static) -> Self {
        self.create = Some(Rc::new(f));
        self
    }

    pub fn with_update(mut self, f: impl Fn(&VNode<N>, &VNode<N>) + 'static) -> Self {
        self.update = Some(Rc::new(f));
        self
    }

    pub fn with_remove(mut self, f: impl Fn(&VNode<N>, RemoveCallback) + 'static) -> Self {
        self.remove = Some(Rc::new(f));
        self
    }

    pub fn with_destroy(mut self, f: impl Fn(&VNode<N>) + 'static) -> Self {
        self.destroy = Some(Rc::new(f));
        self
    }

    pub fn with_pre(mut self, f: impl Fn() + 'static) -> Self {
        self.pre = Some(Rc::new(f));
        self
    }

    pub fn with_post(mut self, f: impl Fn() + 'static) -> Self {
        self.post = Some(Rc::new(f));
        self
    }
}

/// The grouped, registration-ordered hook lists built once in [`crate::init`]
/// and read on every patch cycle thereafter.
pub struct ModuleRegistry<N> {
    pre: Vec<PreHook>,
    create: Vec<CreateHook<N>>,
    update: Vec<UpdateHook<N>>,
    remove: Vec<RemoveHook<N>>,
    destroy: Vec<DestroyHook<N>>,
    post: Vec<PostHook>,
}

impl<N> ModuleRegistry<N> {
    pub fn new(modules: Vec<ModuleHooks<N>>) -> Self {
        let mut registry = ModuleRegistry {
            pre: Vec::new(),
            create: Vec::new(),
            update: Vec::new(),
            remove: Vec::new(),
            destroy: Vec::new(),
            post: Vec::new(),
        };
        for module in modules {
            if let Some(h) = module.pre {
                registry.pre.push(h);
            }
            if let Some(h) = module.create {
                registry.create.push(h);
            }
            if let Some(h) = module.update {
                registry.update.push(h);
            }
            if let Some(h) = module.remove {
                registry.remove.push(h);
            }
            if let Some(h) = module.destroy {
                registry.destroy.push(h);
            }
            if let Some(h) = module.post {
                registry.post.push(h);
            }
        }
        registry
    }

    pub fn run_pre(&self) {
        for hook in &self.pre {
            hook();
        }
    }

    pub fn run_create(&self, empty: &VNode<N>, vnode: &VNode<N>) {
        for hook in &self.create {
            hook(empty, vnode);
        }
    }

    pub fn run_update(&self, old: &VNode<N>, vnode: &VNode<N>) {
        for hook in &self.update {
            hook(old, vnode);
        }
    }

    /// The number of modules with a registered `remove` hook. The engine
    /// adds its own `+1` completion obligation on top of this count (§4.5).
    pub fn remove_hook_count(&self) -> usize {
        self.remove.len()
    }

    pub fn run_remove(&self, vnode: &VNode<N>, callback: RemoveCallback) {
        for hook in &self.remove {
            hook(vnode, callback.clone());
        }
    }

    pub fn run_destroy(&self, vnode: &VNode<N>) {
        for hook in &self.destroy {
            hook(vnode);
        }
    }

    pub fn run_post(&self) {
        for hook in &self.post {
            hook();
        }
    }
}
