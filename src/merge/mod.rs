// Mergers: combine per-platform calendars and topic tables.
//
// Both mergers are pure functions over already-fetched data. They sum
// overlapping keys rather than overwrite, and their outputs carry the
// ordering invariants the report relies on (calendar ascending by date,
// topics descending by count).

pub mod calendar;
pub mod topics;

pub use calendar::merge_calendars;
pub use topics::merge_topics;
