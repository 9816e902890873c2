//! Process-wide instances of the activity log and the community registry.
//!
//! Both are created lazily on first access behind a [`OnceLock`], so exactly
//! one instance exists no matter how many threads race on first use. The
//! registry records into the global activity log.
//!
//! Code that can take its collaborators explicitly should do so; these
//! accessors exist for drivers (the CLI) that need one shared instance.

use std::sync::{Arc, OnceLock};

use cafe_core::application::{ActivityLog, ApplicationError, CommunityRegistry};
use cafe_core::error::CafeResult;
use tracing::debug;

use crate::clock::SystemClock;
use crate::log_sink::FileLogSink;

/// Log file used when nothing was installed before first access.
pub const DEFAULT_LOG_PATH: &str = "community_log.txt";

static ACTIVITY_LOG: OnceLock<Arc<ActivityLog>> = OnceLock::new();
static COMMUNITY: OnceLock<CommunityRegistry> = OnceLock::new();

/// The process-wide activity log.
///
/// Defaults to a [`FileLogSink`] at [`DEFAULT_LOG_PATH`] and the
/// [`SystemClock`] unless [`install_activity_log`] ran first.
pub fn activity_log() -> &'static Arc<ActivityLog> {
    ACTIVITY_LOG.get_or_init(|| {
        debug!(path = DEFAULT_LOG_PATH, "Creating default activity log");
        Arc::new(ActivityLog::new(
            Box::new(FileLogSink::new(DEFAULT_LOG_PATH)),
            Box::new(SystemClock),
        ))
    })
}

/// Choose the process-wide activity log before anything uses it.
///
/// Fails with `GlobalAlreadyInitialized` once the log exists, including
/// when [`community`] created it implicitly.
pub fn install_activity_log(log: ActivityLog) -> CafeResult<&'static Arc<ActivityLog>> {
    let mut installed = false;
    let current = ACTIVITY_LOG.get_or_init(|| {
        installed = true;
        Arc::new(log)
    });

    if installed {
        debug!("Installed activity log");
        Ok(current)
    } else {
        Err(ApplicationError::GlobalAlreadyInitialized {
            name: "activity log",
        }
        .into())
    }
}

/// The process-wide community registry.
pub fn community() -> &'static CommunityRegistry {
    COMMUNITY.get_or_init(|| {
        debug!("Creating community registry");
        CommunityRegistry::new(Arc::clone(activity_log()))
    })
}
