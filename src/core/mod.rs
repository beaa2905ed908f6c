//! Core infrastructure for the classifier metrics engine.
//!
//! # Organization
//!
//! - [`types`]: Observations, per-class metrics and label counters
//! - [`constants`]: Defaults and the binary index convention
//! - [`error`]: Error taxonomy and the crate `Result` alias
//! - [`traits`]: The [`ConfusionReport`] capability shared by all matrices
//!
//! ```rust
//! use classifier_metrics::core::{
//!     types::{Observation, ClassMetrics},
//!     constants::DEFAULT_THRESHOLD,
//!     error::{Result, MetricsError},
//! };
//!
//! let obs = Observation::with_count("cat", "dog", 3);
//! assert_eq!(obs.count, 3);
//! assert_eq!(DEFAULT_THRESHOLD, 0.5);
//! ```

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

pub use constants::*;
pub use error::{MetricsError, Result, ValidationError};
pub use traits::*;
pub use types::*;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;

/// Optional ingestion backends compiled into this build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreCapabilities {
    /// Observations can be read from Polars DataFrames
    pub polars_ingestion: bool,
    /// Observations can be read from CSV
    pub csv_ingestion: bool,
}

impl Default for CoreCapabilities {
    fn default() -> Self {
        CoreCapabilities {
            polars_ingestion: cfg!(feature = "polars"),
            csv_ingestion: cfg!(feature = "csv"),
        }
    }
}

impl CoreCapabilities {
    /// Get current core capabilities
    pub fn current() -> Self {
        Self::default()
    }

    /// Get a summary of available capabilities
    pub fn summary(&self) -> String {
        let mut features = vec!["Row Ingestion", "Count Ingestion"];
        if self.polars_ingestion {
            features.push("Polars DataFrames");
        }
        if self.csv_ingestion {
            features.push("CSV");
        }
        format!("Core capabilities: {}", features.join(", "))
    }
}

static CORE_INIT: Once = Once::new();
static CORE_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Initialize logging. Safe to call repeatedly.
pub fn initialize_core() -> Result<()> {
    CORE_INIT.call_once(|| {
        if std::env::var("RUST_LOG").is_err() {
            std::env::set_var("RUST_LOG", "info");
        }
        // Another logger may already be installed by the host application.
        let _ = env_logger::try_init();

        CORE_INITIALIZED.store(true, Ordering::SeqCst);
        log::info!("Core module initialized successfully");
        log::debug!("{}", CoreCapabilities::current().summary());
    });
    Ok(())
}

/// Check if the core module is initialized
pub fn is_core_initialized() -> bool {
    CORE_INITIALIZED.load(Ordering::SeqCst)
}
