// codetally: unified competitive-programming analytics.
//
// This is the library root. Each module corresponds to one stage of the
// fetch -> normalize -> merge pipeline that turns a LeetCode profile and a
// Codeforces profile into a single combined report.

pub mod analytics;
pub mod codeforces;
pub mod combined;
pub mod config;
pub mod error;
pub mod leetcode;
pub mod merge;
pub mod output;

#[cfg(feature = "web")]
pub mod web;
