//! Logger node and dispatch engine

use super::{
    appender::Appender,
    diagnostics,
    event::LoggingEvent,
    hierarchy::HierarchyState,
    level::Level,
    properties::Properties,
};
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

/// One named node in a logger hierarchy.
///
/// Loggers are only created through [`Hierarchy::get_logger`]: the hierarchy
/// owns every node and wires parent links, so two lookups of the same name
/// always return the same `Arc`. A logger with no assigned level inherits the
/// nearest ancestor's level; a logger with `additive` set walks its ancestors
/// when dispatching so their appenders see the event too.
///
/// [`Hierarchy::get_logger`]: super::hierarchy::Hierarchy::get_logger
pub struct Logger {
    name: String,
    level: RwLock<Option<Level>>,
    appenders: RwLock<Vec<Arc<dyn Appender>>>,
    additive: AtomicBool,
    /// Navigation-only back-reference; `None` exactly for the root.
    parent: RwLock<Option<Weak<Logger>>>,
    /// Names of direct children, maintained for descendant re-linking.
    children: RwLock<HashSet<String>>,
    shared: Arc<HierarchyState>,
    is_root: bool,
}

impl Logger {
    pub(crate) fn new(name: impl Into<String>, shared: Arc<HierarchyState>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            level: RwLock::new(None),
            appenders: RwLock::new(Vec::new()),
            additive: AtomicBool::new(true),
            parent: RwLock::new(None),
            children: RwLock::new(HashSet::new()),
            shared,
            is_root: false,
        })
    }

    /// The distinguished root node: always has an assigned level, no parent.
    pub(crate) fn new_root(shared: Arc<HierarchyState>) -> Arc<Self> {
        Arc::new(Self {
            name: "root".to_string(),
            level: RwLock::new(Some(Level::DEBUG)),
            appenders: RwLock::new(Vec::new()),
            additive: AtomicBool::new(true),
            parent: RwLock::new(None),
            children: RwLock::new(HashSet::new()),
            shared,
            is_root: true,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_root(&self) -> bool {
        self.is_root
    }

    /// The level assigned directly to this node, if any
    pub fn level(&self) -> Option<Level> {
        self.level.read().clone()
    }

    /// Assign a level, or `None` to inherit from the parent chain.
    ///
    /// The root ignores `None`: the hierarchy guarantees every resolution
    /// walk terminates at an assigned level.
    pub fn set_level(&self, level: Option<Level>) {
        if self.is_root && level.is_none() {
            diagnostics::warning("Ignoring attempt to clear the root logger's level.");
            return;
        }
        *self.level.write() = level;
    }

    /// Resolve the effective level: the first assigned level walking
    /// self -> parent -> ... -> root.
    pub fn effective_level(&self) -> Level {
        if let Some(level) = self.level.read().clone() {
            return level;
        }
        let mut current = self.parent();
        while let Some(node) = current {
            if let Some(level) = node.level.read().clone() {
                return level;
            }
            current = node.parent();
        }
        // Unreachable while the root keeps an assigned level.
        diagnostics::error(&format!(
            "No assigned level found on the ancestor chain of '{}'; defaulting to DEBUG.",
            self.name
        ));
        Level::DEBUG
    }

    /// Check whether a call at `level` would be delivered.
    ///
    /// The repository threshold is consulted first (one relaxed atomic load),
    /// then the effective level. Callers doing expensive message construction
    /// should gate on this.
    pub fn is_enabled_for(&self, level: &Level) -> bool {
        if !self.shared.passes_threshold(level) {
            return false;
        }
        level.is_at_least(&self.effective_level())
    }

    pub fn additivity(&self) -> bool {
        self.additive.load(Ordering::Relaxed)
    }

    /// Control whether dispatch continues into ancestor appenders
    pub fn set_additivity(&self, additive: bool) {
        self.additive.store(additive, Ordering::Relaxed);
    }

    pub fn parent(&self) -> Option<Arc<Logger>> {
        self.parent.read().as_ref().and_then(Weak::upgrade)
    }

    /// Attach an appender. Order of attachment is order of delivery;
    /// attaching the same appender twice means it fires twice.
    pub fn add_appender(&self, appender: Arc<dyn Appender>) {
        self.appenders.write().push(appender);
    }

    /// Detach and return the first appender with the given name
    pub fn remove_appender(&self, name: &str) -> Option<Arc<dyn Appender>> {
        let mut appenders = self.appenders.write();
        let index = appenders.iter().position(|a| a.name() == name)?;
        Some(appenders.remove(index))
    }

    /// Detach all appenders without closing them
    pub fn clear_appenders(&self) {
        self.appenders.write().clear();
    }

    /// Find a directly attached appender by name
    pub fn appender(&self, name: &str) -> Option<Arc<dyn Appender>> {
        self.appenders.read().iter().find(|a| a.name() == name).cloned()
    }

    /// Snapshot of the directly attached appenders
    pub fn appenders(&self) -> Vec<Arc<dyn Appender>> {
        self.appenders.read().clone()
    }

    /// Log a pre-formatted message
    pub fn log(&self, level: Level, message: impl Into<String>) {
        if !self.is_enabled_for(&level) {
            return;
        }
        self.emit(level, message.into(), None, Properties::new());
    }

    /// Log with a lazily built message. The closure is never invoked when
    /// the call is disabled.
    pub fn log_with<F>(&self, level: Level, message: F)
    where
        F: FnOnce() -> String,
    {
        if !self.is_enabled_for(&level) {
            return;
        }
        self.emit(level, message(), None, Properties::new());
    }

    /// Log with per-event properties
    pub fn log_with_properties(
        &self,
        level: Level,
        message: impl Into<String>,
        properties: Properties,
    ) {
        if !self.is_enabled_for(&level) {
            return;
        }
        self.emit(level, message.into(), None, properties);
    }

    /// Log a message together with an error's rendered source chain
    pub fn log_error(
        &self,
        level: Level,
        message: impl Into<String>,
        error: &dyn std::error::Error,
    ) {
        if !self.is_enabled_for(&level) {
            return;
        }
        self.emit(level, message.into(), Some(error), Properties::new());
    }

    /// Dispatch a pre-built event, subject to the same enablement checks
    pub fn log_event(&self, event: LoggingEvent) {
        if !self.is_enabled_for(event.level()) {
            return;
        }
        self.call_appenders(&event);
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(Level::DEBUG, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(Level::INFO, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(Level::WARN, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(Level::ERROR, message);
    }

    #[inline]
    pub fn fatal(&self, message: impl Into<String>) {
        self.log(Level::FATAL, message);
    }

    /// Helper for structured info logging
    pub fn info_with_properties(&self, message: impl Into<String>, properties: Properties) {
        self.log_with_properties(Level::INFO, message, properties);
    }

    /// Helper for structured error logging
    pub fn error_with_properties(&self, message: impl Into<String>, properties: Properties) {
        self.log_with_properties(Level::ERROR, message, properties);
    }

    /// Build the event snapshot for an accepted call and dispatch it
    fn emit(
        &self,
        level: Level,
        message: String,
        error: Option<&dyn std::error::Error>,
        mut properties: Properties,
    ) {
        self.shared.context().merge_into(&mut properties);
        let mut event =
            LoggingEvent::new(self.name.clone(), level, message).with_properties(properties);
        if let Some(error) = error {
            event = event.with_exception(error);
        }
        self.call_appenders(&event);
    }

    /// Deliver an event to this node's appenders and, while additivity holds,
    /// to each ancestor's appenders up to the root.
    ///
    /// **Per-appender isolation**: each appender call is individually guarded.
    /// Errors go to that appender's `handle_error`; panics are caught so the
    /// remaining appenders still run. Appender lists are snapshotted and the
    /// lock released before invocation, since appenders may block.
    pub fn call_appenders(&self, event: &LoggingEvent) {
        let mut delivered = 0usize;

        let snapshot = self.appenders.read().clone();
        for appender in &snapshot {
            Self::invoke_appender(appender.as_ref(), event);
        }
        delivered += snapshot.len();

        let mut additive = self.additive.load(Ordering::Relaxed);
        let mut current = self.parent();
        while additive {
            let Some(node) = current else { break };
            let snapshot = node.appenders.read().clone();
            for appender in &snapshot {
                Self::invoke_appender(appender.as_ref(), event);
            }
            delivered += snapshot.len();
            additive = node.additive.load(Ordering::Relaxed);
            current = node.parent();
        }

        if delivered == 0 && self.shared.note_missing_appenders() {
            diagnostics::warning(&format!(
                "No appenders could be found for logger '{}'. \
                 Please configure at least one appender.",
                self.name
            ));
        }
    }

    fn invoke_appender(appender: &dyn Appender, event: &LoggingEvent) {
        let result =
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| appender.append(event)));
        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                appender.handle_error(&e);
            }
            Err(panic_info) => {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                diagnostics::critical(&format!(
                    "Appender '{}' panicked: {}. Other appenders continue to function.",
                    appender.name(),
                    panic_msg
                ));
            }
        }
    }

    // Linkage below is maintained by the hierarchy, always under its
    // repository write lock.

    pub(crate) fn set_parent_link(&self, parent: &Arc<Logger>) {
        *self.parent.write() = Some(Arc::downgrade(parent));
    }

    pub(crate) fn add_child_name(&self, name: &str) {
        self.children.write().insert(name.to_string());
    }

    pub(crate) fn remove_child_name(&self, name: &str) {
        self.children.write().remove(name);
    }

    pub(crate) fn child_names(&self) -> Vec<String> {
        self.children.read().iter().cloned().collect()
    }

    /// Restore the node to its unconfigured state: inherit level, no
    /// appenders (detached, not closed), additive.
    pub(crate) fn reset(&self) {
        *self.level.write() = None;
        self.appenders.write().clear();
        self.additive.store(true, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hierarchy::Hierarchy;

    #[test]
    fn root_keeps_an_assigned_level() {
        let hierarchy = Hierarchy::new("test");
        let root = hierarchy.root();
        assert_eq!(root.level(), Some(Level::DEBUG));

        root.set_level(None);
        assert_eq!(root.level(), Some(Level::DEBUG));

        root.set_level(Some(Level::WARN));
        assert_eq!(root.level(), Some(Level::WARN));
    }

    #[test]
    fn unassigned_logger_inherits_from_root() {
        let hierarchy = Hierarchy::new("test");
        let logger = hierarchy.get_logger("app.service");
        assert_eq!(logger.level(), None);
        assert_eq!(logger.effective_level(), Level::DEBUG);
    }

    #[test]
    fn assigned_level_shadows_ancestors() {
        let hierarchy = Hierarchy::new("test");
        let parent = hierarchy.get_logger("app");
        parent.set_level(Some(Level::WARN));

        let child = hierarchy.get_logger("app.service");
        assert_eq!(child.effective_level(), Level::WARN);

        child.set_level(Some(Level::INFO));
        assert_eq!(child.effective_level(), Level::INFO);
    }

    #[test]
    fn enablement_compares_ordinals() {
        let hierarchy = Hierarchy::new("test");
        let logger = hierarchy.get_logger("app");
        logger.set_level(Some(Level::WARN));

        assert!(logger.is_enabled_for(&Level::ERROR));
        assert!(logger.is_enabled_for(&Level::WARN));
        assert!(!logger.is_enabled_for(&Level::INFO));
    }

    #[test]
    fn log_with_skips_closure_when_disabled() {
        use std::sync::atomic::AtomicUsize;

        let hierarchy = Hierarchy::new("test");
        let logger = hierarchy.get_logger("app");
        logger.set_level(Some(Level::ERROR));

        let calls = AtomicUsize::new(0);
        logger.log_with(Level::DEBUG, || {
            calls.fetch_add(1, Ordering::SeqCst);
            "expensive".to_string()
        });
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        logger.log_with(Level::ERROR, || {
            calls.fetch_add(1, Ordering::SeqCst);
            "cheap enough".to_string()
        });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn remove_appender_returns_the_detached_instance() {
        use crate::appenders::MemoryAppender;

        let hierarchy = Hierarchy::new("test");
        let logger = hierarchy.get_logger("app");
        let memory = Arc::new(MemoryAppender::new("capture"));
        logger.add_appender(memory);

        assert!(logger.appender("capture").is_some());
        let removed = logger.remove_appender("capture").unwrap();
        assert_eq!(removed.name(), "capture");
        assert!(logger.appender("capture").is_none());
    }
}
