// LeetCode: profile stats, calendar, contest ranking and solved list.
//
// LeetCode is read through a community REST mirror of its GraphQL API.
// Topic attribution needs the full problem catalog, which is large and
// rarely changes, so it sits behind a TTL cache (`catalog`).

pub mod analytics;
pub mod catalog;
pub mod client;
