//! CLI domain: parse, route, output, and presentation only.
//! The CLI stands in for a template host: it drives the wizard callbacks in order.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::{exit_code, map_error, EXIT_CANCELLED, EXIT_FAILURE};
pub use parse::{Cli, Commands};
pub use presentation::{
    format_generation_summary, format_init_outcome, format_init_preview, format_snapshot,
    GenerationSummary, ItemDecision,
};
pub use route::RunContext;
