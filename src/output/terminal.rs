// Colored terminal output for platform analytics and combined reports.
//
// The CLI prints these unless `--json` is passed, in which case it prints
// the same JSON the web API returns.

use colored::Colorize;

use crate::analytics::models::{
    ActivityCalendar, Breakdown, ContestSummary, PlatformAnalytics, TopicFrequencyTable,
};
use crate::combined::report::UnifiedReport;

/// Topics shown in terminal listings.
const TOPICS_SHOWN: usize = 15;
const BAR_WIDTH: usize = 20;

/// Display one platform's analytics.
pub fn display_platform(analytics: &PlatformAnalytics) {
    println!(
        "\n{}",
        format!(
            "=== {} analytics for {} ===",
            analytics.platform, analytics.identifier
        )
        .bold()
    );
    println!();
    println!("  Total solved: {}", analytics.total_solved.to_string().bold());

    match &analytics.breakdown {
        Breakdown::Difficulty(d) => {
            println!(
                "  Easy: {}  Medium: {}  Hard: {}",
                d.easy.to_string().green(),
                d.medium.to_string().yellow(),
                d.hard.to_string().red(),
            );
        }
        Breakdown::Rank(r) => {
            let rating = r.rating.map_or("-".to_string(), |v| v.to_string());
            let max_rating = r.max_rating.map_or("-".to_string(), |v| v.to_string());
            println!(
                "  Rating: {} ({})  Max: {} ({})",
                rating.bold(),
                r.rank,
                max_rating,
                r.max_rank
            );
        }
    }

    println!("  Active days: {}", analytics.calendar.len());
    display_contests(&analytics.contest);
    display_topics(&analytics.topics);
}

/// Display a combined report.
pub fn display_report(report: &UnifiedReport) {
    let covered: Vec<&str> = report
        .summary
        .platforms_covered
        .iter()
        .map(|p| p.as_str())
        .collect();

    println!(
        "\n{}",
        format!("=== Combined analytics ({}) ===", covered.join(" + ")).bold()
    );
    println!();

    let metrics = &report.combined_metrics;
    println!(
        "  Solved: {} total  (LeetCode {}, Codeforces {})",
        metrics.combined_total.to_string().bold(),
        metrics.total_solved_leetcode,
        metrics.total_solved_codeforces,
    );

    if report.profiles.leetcode.is_none() {
        println!("  {}", "LeetCode: unavailable".dimmed());
    }
    if report.profiles.codeforces.is_none() {
        println!("  {}", "Codeforces: unavailable".dimmed());
    }

    display_calendar(&report.activity_calendar);

    if let Some(contest) = &report.contest_data.leetcode {
        println!("\n  {}", "LeetCode contests".bold());
        display_contests(contest);
    }
    if let Some(contest) = &report.contest_data.codeforces {
        println!("\n  {}", "Codeforces contests".bold());
        display_contests(contest);
    }

    display_topics(&report.topic_analysis);

    if !report.summary.top_skills.is_empty() {
        println!(
            "\n  Top skills: {}",
            report.summary.top_skills.join(", ").bright_green()
        );
    }
    println!(
        "  {}",
        format!("Generated {}", report.summary.last_updated.to_rfc3339()).dimmed()
    );
}

fn display_calendar(calendar: &ActivityCalendar) {
    match (calendar.iter().next(), calendar.iter().last()) {
        (Some((first, _)), Some((last, _))) => {
            println!(
                "  Activity: {} submissions over {} active days ({} to {})",
                calendar.total(),
                calendar.len(),
                first,
                last
            );
        }
        _ => println!("  Activity: {}", "none recorded".dimmed()),
    }
}

fn display_contests(contest: &ContestSummary) {
    let rating = contest.rating.map_or("-".to_string(), |r| r.to_string());
    let ranking = contest
        .global_ranking
        .map_or("-".to_string(), |r| r.to_string());
    println!(
        "  Contests attended: {}  Rating: {}  Global ranking: {}",
        contest.attended_contests, rating, ranking
    );

    for c in &contest.recent_contests {
        let delta = c.new_rating - c.old_rating;
        let delta_str = if delta >= 0 {
            format!("+{delta}").green()
        } else {
            delta.to_string().red()
        };
        println!(
            "    {:<48} rank {:>6}  {} -> {} ({})",
            c.contest_name, c.rank, c.old_rating, c.new_rating, delta_str
        );
    }
}

fn display_topics(topics: &TopicFrequencyTable) {
    if topics.is_empty() {
        println!("\n  Topics: {}", "no topic data".dimmed());
        return;
    }

    println!("\n  {}", "Topics".bold());
    let max = topics.iter().next().map_or(0, |(_, count)| count);
    for (name, count) in topics.iter().take(TOPICS_SHOWN) {
        println!(
            "    {:<32} {} {}",
            name,
            super::proportion_bar(count, max, BAR_WIDTH).bright_blue(),
            count
        );
    }
    if topics.len() > TOPICS_SHOWN {
        println!(
            "    {}",
            format!("... and {} more", topics.len() - TOPICS_SHOWN).dimmed()
        );
    }
}
