//! Workflow Module
//!
//! Orchestrates the complete analysis flow from recorded session to
//! pattern report.

pub mod demo;
pub mod labeler;
pub mod pipeline;

pub use demo::demo_session;
pub use labeler::{Labeler, ScriptedLabeler};
pub use pipeline::{PipelineReport, SessionPipeline};
