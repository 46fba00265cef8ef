//! Run history persistence for neurodrive.
//!
//! Generation reports are appended to a JSONL log so a run can be analysed
//! after the fact. Populations themselves are never written to disk.

pub mod error;
pub mod history;

pub use error::{IoError, Result};
pub use history::{read_events, read_generation_reports, HistoryLogger};
