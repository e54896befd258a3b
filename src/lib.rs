//! Persistent run counter with caller history.
//!
//! Each recorded run bumps a counter stored in a JSON file and prepends an
//! entry naming the file that triggered it.
//!
//! ```no_run
//! let run = run_recorder::record_run!()?;
//! println!("this is run #{run}");
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod model;
pub mod recorder;
pub mod storage;

pub use config::RecorderConfig;
pub use model::{Caller, LogEntry, LogState};
pub use recorder::{record_run, Recorder};

/// Record a run attributed to the invoking source file.
///
/// With no arguments the default backing store is used; pass a [`Recorder`]
/// to record against its configuration instead.
#[macro_export]
macro_rules! record_run {
    () => {
        $crate::recorder::record_run(&$crate::model::Caller::new(file!()))
    };
    ($recorder:expr) => {
        $crate::recorder::Recorder::record_run(&$recorder, &$crate::model::Caller::new(file!()))
    };
}
