// Mon Oct 19 2026 - Alex

pub mod exclusion;
pub mod progress;
pub mod scanner;

pub use exclusion::ModuleExclusion;
pub use progress::{ProgressSink, ScanControl, ScanProgress};
pub use scanner::{ObjectScanner, ScanSummary};
