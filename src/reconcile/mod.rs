//! Scan reconciliation: classifies observed tag identifiers against a task's
//! expected set and folds the results through an explicit session reducer.
//! Everything in this module is pure; data access and timing live with the
//! callers.

pub mod classify;
pub mod session;
pub mod tally;

pub use classify::{classify, Classification, ExpectedSet, ScanResult};
pub use session::{MatchedLine, ScanSession, SessionEvent, SessionPhase, SessionSnapshot};
pub use tally::tally;
