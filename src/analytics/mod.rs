// Shared analytics value types.
//
// Both platform builders produce a `PlatformAnalytics`; the mergers and the
// orchestrator consume them. Nothing here performs I/O.

pub mod models;
