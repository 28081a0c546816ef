// Topic merger: union of two tag tables with summed counts.

use crate::analytics::models::TopicFrequencyTable;

/// Merge two topic tables. Tags present in both are summed; the result is
/// ordered by descending count (ties by name). Never fails.
pub fn merge_topics(a: &TopicFrequencyTable, b: &TopicFrequencyTable) -> TopicFrequencyTable {
    a.iter().chain(b.iter()).collect()
}
