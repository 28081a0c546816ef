// Combined analytics: fan out to both platforms, merge into one report.
//
// `service` owns the clients and the catalog cache and runs both builders
// concurrently. `outcome` is the partial-failure decision table. `report`
// composes the final UnifiedReport from whichever platforms succeeded.

pub mod outcome;
pub mod report;
pub mod service;

pub use outcome::{resolve_outcomes, PlatformOutcome};
pub use report::{compose, UnifiedReport};
pub use service::AnalyticsService;
