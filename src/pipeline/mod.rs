//! Run pipeline: input preparation, scoring, and timing.

mod builder;
mod input;
mod timing;

pub use builder::{Diagnostic, RunOutcome, TableBuilder};
pub use input::parse_sentences;
pub use timing::{MethodTiming, TimingRecorder, TimingSummary};
