// Codeforces: profile, rating history and submission feed.
//
// `client` talks to the public Codeforces API; `analytics` turns the three
// feeds into a PlatformAnalytics. The builder only depends on the
// `CodeforcesFeed` trait so it can run against fakes.

pub mod analytics;
pub mod client;
