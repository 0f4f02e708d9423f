//! Navigation settling based on Chrome page lifecycle events.
//!
//! Chrome emits `Page.lifecycleEvent` for every frame and document loader
//! (`init`, `DOMContentLoaded`, `load`, `networkAlmostIdle`, `networkIdle`, ...).
//! Events can arrive before the `Page.navigate` response names the loader that
//! belongs to our navigation, so the watcher buffers them until [`bind`] is
//! called.
//!
//! [`bind`]: LifecycleWatcher::bind

use std::collections::{HashMap, HashSet};

use crate::models::WaitUntil;

/// Tracks lifecycle events for one navigation.
#[derive(Debug, Clone)]
pub struct LifecycleWatcher {
    wait_until: WaitUntil,
    /// Lifecycle event names seen so far, keyed by `(frame_id, loader_id)`.
    seen: HashMap<(String, String), HashSet<String>>,
    target: Option<Target>,
}

#[derive(Debug, Clone)]
enum Target {
    /// A new document is loading in `frame_id` under `loader_id`.
    Document { frame_id: String, loader_id: String },
    /// Same-document navigation: nothing to wait for.
    SameDocument,
}

impl LifecycleWatcher {
    pub fn new(wait_until: WaitUntil) -> Self {
        Self {
            wait_until,
            seen: HashMap::new(),
            target: None,
        }
    }

    pub fn wait_until(&self) -> WaitUntil {
        self.wait_until
    }

    /// Records a lifecycle event.
    pub fn observe(&mut self, frame_id: &str, loader_id: &str, name: &str) {
        let key = (frame_id.to_string(), loader_id.to_string());
        let names = self.seen.entry(key).or_default();
        // A fresh `init` restarts the lifecycle for that loader.
        if name == "init" {
            names.clear();
        }
        names.insert(name.to_string());
    }

    /// Binds the watcher to the navigation's main frame and loader.
    ///
    /// `loader_id` is `None` when the navigation stayed within the current
    /// document (e.g. a fragment change), which settles immediately.
    pub fn bind(&mut self, frame_id: &str, loader_id: Option<&str>) {
        self.target = Some(match loader_id {
            Some(loader_id) => Target::Document {
                frame_id: frame_id.to_string(),
                loader_id: loader_id.to_string(),
            },
            None => Target::SameDocument,
        });
    }

    /// True once the awaited lifecycle event fired for the bound document.
    pub fn is_settled(&self) -> bool {
        match &self.target {
            None => false,
            Some(Target::SameDocument) => true,
            Some(Target::Document {
                frame_id,
                loader_id,
            }) => self
                .seen
                .get(&(frame_id.clone(), loader_id.clone()))
                .is_some_and(|names| names.contains(self.wait_until.lifecycle_event())),
        }
    }
}
