//! The logger repository: node table, root, lifecycle

use super::{
    appender::Appender,
    diagnostics,
    level::Level,
    logger::Logger,
    properties::ContextProperties,
};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Arc;

/// State shared between a hierarchy and every logger it owns.
///
/// Kept separate from [`Hierarchy`] so loggers can hold it without a
/// reference cycle back to the node table.
pub(crate) struct HierarchyState {
    /// Ordinal of the repository threshold, read on every enablement check
    threshold_value: AtomicI32,
    threshold: RwLock<Level>,
    warned_no_appenders: AtomicBool,
    context: ContextProperties,
}

impl HierarchyState {
    fn new() -> Self {
        Self {
            threshold_value: AtomicI32::new(Level::ALL.value()),
            threshold: RwLock::new(Level::ALL),
            warned_no_appenders: AtomicBool::new(false),
            context: ContextProperties::new(),
        }
    }

    pub(crate) fn passes_threshold(&self, level: &Level) -> bool {
        level.value() >= self.threshold_value.load(Ordering::Relaxed)
    }

    pub(crate) fn threshold(&self) -> Level {
        self.threshold.read().clone()
    }

    pub(crate) fn set_threshold(&self, level: Level) {
        self.threshold_value.store(level.value(), Ordering::Relaxed);
        *self.threshold.write() = level;
    }

    pub(crate) fn context(&self) -> &ContextProperties {
        &self.context
    }

    /// True exactly once per hierarchy, for the missing-appender warning
    pub(crate) fn note_missing_appenders(&self) -> bool {
        !self.warned_no_appenders.swap(true, Ordering::Relaxed)
    }

    fn reset_missing_appender_warning(&self) {
        self.warned_no_appenders.store(false, Ordering::Relaxed);
    }
}

/// A named repository of loggers forming one tree.
///
/// The hierarchy owns all nodes: lookups create loggers lazily, link them to
/// their nearest existing ancestor, and re-link descendants created out of
/// order. All tree mutation happens under the repository write lock, so
/// concurrent readers observe fully-old or fully-new linkage, never partial.
pub struct Hierarchy {
    name: String,
    root: Arc<Logger>,
    loggers: RwLock<HashMap<String, Arc<Logger>>>,
    state: Arc<HierarchyState>,
}

impl std::fmt::Debug for Hierarchy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hierarchy")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl Hierarchy {
    pub fn new(name: impl Into<String>) -> Self {
        let state = Arc::new(HierarchyState::new());
        Self {
            name: name.into(),
            root: Logger::new_root(Arc::clone(&state)),
            loggers: RwLock::new(HashMap::new()),
            state,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The root node. Not reachable by name: `get_logger("root")` creates an
    /// ordinary logger that happens to be called "root".
    pub fn root(&self) -> Arc<Logger> {
        Arc::clone(&self.root)
    }

    /// Look up a logger, creating it (and any linkage fixups) on first use.
    ///
    /// Names are case-sensitive and dot-delimited. Repeated calls with the
    /// same name return the same instance.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty.
    pub fn get_logger(&self, name: &str) -> Arc<Logger> {
        assert!(!name.is_empty(), "logger name must not be empty");

        if let Some(existing) = self.loggers.read().get(name) {
            return Arc::clone(existing);
        }

        let mut table = self.loggers.write();
        // Raced creations resolve to the instance that won.
        if let Some(existing) = table.get(name) {
            return Arc::clone(existing);
        }

        let logger = Logger::new(name, Arc::clone(&self.state));

        // Nearest existing ancestor: progressively strip trailing segments.
        let mut search = name.to_string();
        let mut parent: Option<Arc<Logger>> = None;
        while let Some(dot) = search.rfind('.') {
            search.truncate(dot);
            if let Some(candidate) = table.get(search.as_str()) {
                parent = Some(Arc::clone(candidate));
                break;
            }
        }
        let parent = parent.unwrap_or_else(|| Arc::clone(&self.root));

        // Link the new node upward before any descendant is pointed at it.
        // Readers walk parent pointers without the table lock, so a child
        // must never reach a node whose own parent link is still unset.
        logger.set_parent_link(&parent);

        // Descendants created before this node currently sit directly under
        // `parent` (their parent is always their longest existing proper
        // prefix). Move them under the new node; their own subtrees follow.
        let prefix = format!("{}.", name);
        for child_name in parent.child_names() {
            if !child_name.starts_with(&prefix) {
                continue;
            }
            let Some(child) = table.get(&child_name) else {
                continue;
            };
            parent.remove_child_name(&child_name);
            child.set_parent_link(&logger);
            logger.add_child_name(&child_name);
        }

        parent.add_child_name(name);
        table.insert(name.to_string(), Arc::clone(&logger));
        logger
    }

    /// Look up a logger without creating it
    pub fn exists(&self, name: &str) -> Option<Arc<Logger>> {
        self.loggers.read().get(name).cloned()
    }

    /// All loggers created so far, excluding the root. Unspecified order.
    pub fn current_loggers(&self) -> Vec<Arc<Logger>> {
        self.loggers.read().values().cloned().collect()
    }

    /// Repository-wide disable gate: events below the threshold are denied
    /// before any per-logger level is consulted.
    pub fn threshold(&self) -> Level {
        self.state.threshold()
    }

    pub fn set_threshold(&self, level: Level) {
        self.state.set_threshold(level);
    }

    /// Properties merged into every event this hierarchy accepts
    pub fn context(&self) -> &ContextProperties {
        self.state.context()
    }

    /// Return every node to its unconfigured state.
    ///
    /// Non-root nodes lose their assigned level and appenders (detached, not
    /// closed) and turn additive again; the root's level returns to DEBUG and
    /// the threshold to ALL. The root keeps its appenders. Use
    /// [`shutdown`](Self::shutdown) to close appenders.
    pub fn reset_configuration(&self) {
        let table = self.loggers.write();
        for logger in table.values() {
            logger.reset();
        }
        drop(table);

        self.root.set_level(Some(Level::DEBUG));
        self.state.set_threshold(Level::ALL);
        self.state.reset_missing_appender_warning();
    }

    /// Close every distinct appender reachable from any node, then detach
    /// them all.
    ///
    /// An appender attached to several nodes closes once (pointer identity).
    /// Container appenders close before the appenders they expose through
    /// `nested()`, so buffering containers can drain into still-open sinks.
    /// In-flight log calls are not quiesced; stopping emitters first is the
    /// caller's responsibility.
    pub fn shutdown(&self) {
        let nodes: Vec<Arc<Logger>> = {
            let table = self.loggers.read();
            let mut nodes = Vec::with_capacity(table.len() + 1);
            nodes.push(Arc::clone(&self.root));
            nodes.extend(table.values().cloned());
            nodes
        };

        let mut attached: Vec<Arc<dyn Appender>> = Vec::new();
        for node in &nodes {
            attached.extend(node.appenders());
        }

        close_appender_graph(attached);

        for node in &nodes {
            node.clear_appenders();
        }
    }
}

impl Default for Hierarchy {
    fn default() -> Self {
        Self::new(super::selector::DEFAULT_REPOSITORY)
    }
}

/// Close each distinct appender in the reachability graph exactly once,
/// wrapping appenders strictly before the appenders they wrap.
fn close_appender_graph(attached: Vec<Arc<dyn Appender>>) {
    type Key = *const ();
    fn key_of(appender: &Arc<dyn Appender>) -> Key {
        Arc::as_ptr(appender) as Key
    }

    // Discover the full graph, deduplicated by allocation identity.
    let mut discovered: Vec<Arc<dyn Appender>> = Vec::new();
    let mut seen: HashSet<Key> = HashSet::new();
    let mut stack = attached;
    while let Some(appender) = stack.pop() {
        if !seen.insert(key_of(&appender)) {
            continue;
        }
        stack.extend(appender.nested());
        discovered.push(appender);
    }

    // Count, for each appender, how many discovered containers wrap it.
    let mut wrappers_left: HashMap<Key, usize> =
        discovered.iter().map(|a| (key_of(a), 0)).collect();
    for appender in &discovered {
        for child in appender.nested() {
            if let Some(count) = wrappers_left.get_mut(&key_of(&child)) {
                *count += 1;
            }
        }
    }

    let mut ready: Vec<Arc<dyn Appender>> = Vec::new();
    let mut pending: HashMap<Key, Arc<dyn Appender>> = HashMap::new();
    for appender in discovered {
        if wrappers_left.get(&key_of(&appender)).copied().unwrap_or(0) == 0 {
            ready.push(appender);
        } else {
            pending.insert(key_of(&appender), appender);
        }
    }

    while let Some(appender) = ready.pop() {
        close_one(appender.as_ref());
        for child in appender.nested() {
            let key = key_of(&child);
            let Some(count) = wrappers_left.get_mut(&key) else {
                continue;
            };
            if *count > 0 {
                *count -= 1;
                if *count == 0 {
                    if let Some(next) = pending.remove(&key) {
                        ready.push(next);
                    }
                }
            }
        }
    }

    // A nesting cycle would strand appenders here; close them regardless.
    for (_, appender) in pending {
        close_one(appender.as_ref());
    }
}

fn close_one(appender: &dyn Appender) {
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| appender.close()));
    match result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            diagnostics::error(&format!(
                "Appender '{}' failed to close: {}",
                appender.name(),
                e
            ));
        }
        Err(_) => {
            diagnostics::critical(&format!(
                "Appender '{}' panicked during close.",
                appender.name()
            ));
        }
    }
}
