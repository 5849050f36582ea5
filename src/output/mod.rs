//! Output module
//! Display models, report formatters and the loading indicator

pub mod display;
pub mod formatter;
pub mod loading;

pub use display::{AnalysisDisplay, AnalysisReport, AtsDisplay, ReportMetadata, ResumeDisplay};
pub use formatter::{OutputFormatter, ReportGenerator};
pub use loading::{LoadingIndicator, SpinnerIndicator};
