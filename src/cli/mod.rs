//! Workflows behind the command line

pub mod orchestration;

pub use orchestration::{
    run_passthrough, run_release, run_unrelease, ReleaseOutcome, UnreleaseOutcome,
};
