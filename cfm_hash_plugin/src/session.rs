//! Process-wide plugin session
//!
//! A session spans one `cfmp_initialize` .. `cfmp_finalize` pair. It holds the
//! configuration loaded at initialize time and installs the diagnostic sink
//! that configuration selects. Handles are not owned by the session: they
//! outlive `finalize` until the host destroys them.

use crate::config::PluginConfig;
use crate::diagnostics::{StderrSink, set_default_sink};
use crate::error::{Result, UsageError};
use crate::ffi::handles::live_handles;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Version of the plugin interface this library implements
pub const INTERFACE_VERSION: u32 = 0;

/// State of an initialized session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub interface_version: u32,
    pub config: PluginConfig,
}

static SESSION: Mutex<Option<SessionInfo>> = Mutex::new(None);

fn lock() -> MutexGuard<'static, Option<SessionInfo>> {
    SESSION.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Start a session with configuration read from the environment.
///
/// Calling this while a session is active succeeds without reloading.
pub fn initialize() -> Result<()> {
    let mut session = lock();
    if session.is_some() {
        log::debug!("Plugin already initialized; keeping current configuration");
        return Ok(());
    }
    let config = PluginConfig::load()?;
    start(&mut session, config)
}

/// Start a session with an explicit configuration
pub fn initialize_with(config: PluginConfig) -> Result<()> {
    let mut session = lock();
    if session.is_some() {
        log::debug!("Plugin already initialized; ignoring supplied configuration");
        return Ok(());
    }
    config.validate()?;
    start(&mut session, config)
}

fn start(session: &mut Option<SessionInfo>, config: PluginConfig) -> Result<()> {
    let sink = config.build_sink()?;
    set_default_sink(sink);
    log::debug!(
        "Plugin initialized (interface v{INTERFACE_VERSION}, diagnostics {:?}, max {} handles)",
        config.diagnostics,
        config.effective_max_handles()
    );
    *session = Some(SessionInfo {
        interface_version: INTERFACE_VERSION,
        config,
    });
    Ok(())
}

/// End the session. Live handles stay valid.
pub fn finalize() {
    let mut session = lock();
    if session.take().is_none() {
        log::debug!("Finalize called without an active session");
        return;
    }
    let live = live_handles();
    if live > 0 {
        log::warn!("Plugin finalized with {live} hash handle(s) still live");
    }
    set_default_sink(Arc::new(StderrSink));
    log::debug!("Plugin finalized");
}

pub fn is_initialized() -> bool {
    lock().is_some()
}

/// Snapshot of the active session, if any
pub fn current() -> Option<SessionInfo> {
    lock().clone()
}

/// Handle limit of the active session, or `NotInitialized`
pub(crate) fn handle_limit() -> Result<usize> {
    lock()
        .as_ref()
        .map(|session| session.config.effective_max_handles())
        .ok_or_else(|| UsageError::NotInitialized.into())
}
