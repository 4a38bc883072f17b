//! Command modules for the slugt CLI.
//!
//! Each subcommand is implemented in its own file following a
//! standardized pattern: an args struct filled in by `main` and a
//! `run_*` function doing the work.

pub mod check;
pub mod inspect;
pub mod suggest;

pub use check::{run_check, CheckArgs};
pub use inspect::{run_inspect, InspectArgs};
pub use suggest::{run_suggest, SuggestArgs};
