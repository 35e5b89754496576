// Request-scoped status models

mod container;
mod ledger_index;
mod status;
mod validator;

pub use container::ContainerStatus;
pub use ledger_index::{
    CLOSED_AT_UNAVAILABLE, LedgerIndexInfo, LedgerIndexReport, LedgerIndexStatus, PLACEHOLDER,
};
pub use status::AggregatedStatus;
pub use validator::{PeerCount, ValidatorState, ValidatorStatus};
