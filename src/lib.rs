//! Static configuration for the XRootD local site mover.
//!
//! The site mover shells out to the XRootD client tools (`xrd`, `xrdcp`,
//! `xrdadler32`) to move files between a worker node and the cluster's
//! storage. This crate holds the deployment-time settings those
//! invocations need: the client executable locations, the library search
//! path, the redirector address, the SRM URL prefix, the storage base
//! path, the virtual mapping string used for remote checksums, and the
//! log directory.
//!
//! Settings are loaded once from a flat `NAME = "value"` file and are
//! immutable afterwards. A loaded [`SiteMoverConfig`] is plain owned
//! strings, so it can be shared across threads without locking.

pub mod config;
pub mod error;

// Re-exports for convenience
pub use config::{ConfigKey, SiteMoverConfig, CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH};
pub use error::{ConfigError, Result};
