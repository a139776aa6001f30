//! Quarterly incentive computation engine.
//!
//! Given a team's uploaded target sheet and the period's actual
//! performance figures, the engine derives achievement percentages,
//! applies the team's weighting and threshold rules, and produces the
//! payable incentive per employee. Results land in a SQLite bonus ledger
//! with replace-by-period semantics so recalculation is idempotent.
//!
//! RULES:
//!   - The calculators are pure: no I/O, no stored state, safe to call
//!     concurrently for different employees and periods.
//!   - Team behavior is a closed enum (`TeamRules`), selected once at
//!     input construction. No string dispatch inside formulas.
//!   - A zero target means "no target set" and yields 0% achievement.
//!     Only negative or non-finite figures are errors, and one bad
//!     employee never aborts the rest of the batch.
//!   - Only the store talks SQL.

pub mod batch;
pub mod config;
pub mod error;
pub mod import;
pub mod legal;
pub mod loan;
pub mod metrics;
pub mod provider;
pub mod record;
pub mod report;
pub mod servicing;
pub mod store;
pub mod team;
pub mod types;

pub use batch::{run_batch, BatchOutcome};
pub use config::IncentivePolicy;
pub use error::{EngineError, EngineResult};
pub use record::EmployeeIncentiveRecord;
pub use store::BonusStore;
pub use team::{EmployeeInput, TeamKind, TeamRules};
pub use types::{PeriodKey, Quarter};
