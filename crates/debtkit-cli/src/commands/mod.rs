//! CLI command implementations.

pub mod brake;
pub mod cost;
pub mod covenants;
pub mod export;
pub mod funding;
pub mod history;
pub mod insights;
pub mod snowball;
pub mod swap;

// Re-export submodules for convenience
pub use brake::BrakeArgs;
pub use cost::CostArgs;
pub use covenants::CovenantArgs;
pub use export::ExportArgs;
pub use funding::FundingArgs;
pub use history::HistoryArgs;
pub use snowball::SnowballArgs;
pub use swap::SwapArgs;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use debtkit_analytics::policy::DebtPolicy;
use debtkit_history::{AnalyticsTracker, Calculation, CalculationRecord, RedbHistoryStore};

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::output::{print_info, print_warning};

/// Where calculations are recorded.
#[derive(Debug, Clone)]
pub enum HistoryLocation {
    /// Tracking switched off
    Disabled,
    /// Redb file
    File(PathBuf),
}

impl HistoryLocation {
    /// Resolves the location from the global flags.
    pub fn resolve(path: Option<PathBuf>, disabled: bool) -> CliResult<Self> {
        if disabled {
            return Ok(HistoryLocation::Disabled);
        }
        match path {
            Some(path) => Ok(HistoryLocation::File(path)),
            None => default_history_path().map(HistoryLocation::File),
        }
    }
}

/// Default history file in the user data directory.
pub fn default_history_path() -> CliResult<PathBuf> {
    let dir = dirs::data_dir().ok_or(CliError::NoDataDir)?;
    Ok(dir.join("debtkit").join("history.redb"))
}

/// State shared by all commands.
pub struct Context {
    /// Output format
    pub format: OutputFormat,
    /// Calculator thresholds
    pub policy: DebtPolicy,
    history: HistoryLocation,
}

impl Context {
    /// Creates a context.
    pub fn new(format: OutputFormat, history: HistoryLocation) -> Self {
        Self {
            format,
            policy: DebtPolicy::default(),
            history,
        }
    }

    /// Opens the history store.
    pub fn tracker(&self) -> CliResult<AnalyticsTracker> {
        match &self.history {
            HistoryLocation::Disabled => Err(CliError::HistoryDisabled),
            HistoryLocation::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)?;
                }
                debug!("opening history at {}", path.display());
                let store = RedbHistoryStore::open(path)?;
                Ok(AnalyticsTracker::new(Arc::new(store)))
            }
        }
    }

    /// Files a calculation in history.
    ///
    /// A failing store never fails the calculation; it is reported and the
    /// calculation is returned untracked.
    pub fn track(&self, calculation: Calculation) -> Option<CalculationRecord> {
        if matches!(self.history, HistoryLocation::Disabled) {
            return None;
        }

        let tracked = self
            .tracker()
            .and_then(|tracker| tracker.track(calculation, None).map_err(CliError::from));
        match tracked {
            Ok(record) => {
                if self.format == OutputFormat::Table {
                    print_info(&format!("Saved to history as {}", record.id));
                }
                Some(record)
            }
            Err(e) => {
                print_warning(&format!("Calculation not recorded: {}", e));
                None
            }
        }
    }
}
