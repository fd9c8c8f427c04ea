//! Terminal output formatting.

use colored::{ColoredString, Colorize};
use unicode_width::UnicodeWidthStr;

use taxo_core::Activity;
use taxo_graph::{DetailedObjectiveMatch, GraphCounts, IngestReport, ObjectiveMatch};

/// Print activities as a table.
pub fn print_activities_table(activities: &[Activity]) {
    if activities.is_empty() {
        println!("{}", "No activities found.".dimmed());
        return;
    }

    println!("{:<8} {:<48} {:<24} {:<8}", "ID", "Name", "Sector", "Ref");
    println!("{}", "─".repeat(90));

    for activity in activities {
        println!(
            "{:<8} {:<48} {:<24} {:<8}",
            activity.id.map(|id| id.to_string()).unwrap_or_default().dimmed(),
            truncate_visual(&activity.name, 46),
            truncate_visual(activity.sector.as_deref().unwrap_or("-"), 22),
            activity.reference.map(|r| r.to_string()).unwrap_or_default()
        );
    }

    println!("\n{} activities", activities.len().to_string().bold());
}

/// Print a single activity.
pub fn print_activity(activity: &Activity) {
    let id = activity.id.map(|id| format!("({})", id)).unwrap_or_default();
    println!("{} {}", activity.name.cyan().bold(), id.dimmed());
    println!();

    if let Some(desc) = &activity.description {
        println!("{}", desc);
        println!();
    }

    if let Some(sector) = &activity.sector {
        println!("{}: {}", "Sector".bold(), sector);
    }
    if let Some(reference) = activity.reference {
        println!("{}: {}", "Reference".bold(), reference);
    }
}

fn contribution(contribution_type: Option<&str>) -> ColoredString {
    match contribution_type {
        Some("direct") => "direct".green(),
        Some("enabling") => "enabling".cyan(),
        Some("transitional") => "transitional".yellow(),
        Some(other) => other.normal(),
        None => "-".dimmed(),
    }
}

fn print_match_line(m: &ObjectiveMatch) {
    println!(
        "  {} {} {} [{}]",
        "→".dimmed(),
        m.objective.key.magenta(),
        m.objective.name,
        contribution(m.activity_contribution_type.as_deref())
    );
    if let Some(desc) = &m.contribution_description {
        println!("      {}", truncate_visual(desc, 100).dimmed());
    }
}

/// Print main-objective matches grouped by activity.
pub fn print_matches(matches: &[ObjectiveMatch]) {
    if matches.is_empty() {
        println!("{}", "No main objectives found.".dimmed());
        return;
    }

    let mut current: Option<&str> = None;
    for m in matches {
        if current != Some(m.activity.name.as_str()) {
            println!("{}", m.activity.name.cyan().bold());
            current = Some(m.activity.name.as_str());
        }
        print_match_line(m);
    }
}

/// Print matches with their DNSH chain and substantial-contribution criteria.
pub fn print_detailed_matches(matches: &[DetailedObjectiveMatch]) {
    if matches.is_empty() {
        println!("{}", "No main objectives found.".dimmed());
        return;
    }

    let mut current: Option<&str> = None;
    for detailed in matches {
        let m = &detailed.matched;
        if current != Some(m.activity.name.as_str()) {
            println!("\n{}", m.activity.name.cyan().bold());
            current = Some(m.activity.name.as_str());
        }
        print_match_line(m);

        for criteria in &detailed.substantial_contribution_criteria {
            println!("      {} {}", "SC".green(), truncate_visual(criteria, 96));
        }
        for dnsh in &detailed.dnsh {
            println!("      {} {}", "DNSH".red(), dnsh.key.magenta());
            for criteria in &dnsh.criteria {
                println!("        {} {}", "•".dimmed(), truncate_visual(criteria, 92));
            }
        }
    }
}

/// Print node and relationship counts.
pub fn print_counts(counts: &GraphCounts, uri: &str) {
    println!("{}", "Knowledge Graph Status".bold());
    println!("{}", "─".repeat(40));
    println!("  {:<16} {}", "Neo4j", uri.cyan());
    println!();
    println!("  {}", "Nodes".bold());
    println!("    {:<14} {}", "Sector", counts.sectors);
    println!("    {:<14} {}", "Activity", counts.activities);
    println!("    {:<14} {}", "Objective", counts.objectives);
    println!("    {:<14} {}", "Criteria", counts.criteria);
    println!("  {}", "Relationships".bold());
    println!("    {:<14} {}", "HAS_ACTIVITY", counts.has_activity);
    println!("    {:<14} {}", "CONTRIBUTES", counts.contributes);
    println!("    {:<14} {}", "DNSH_LINK", counts.dnsh_link);
    println!("    {:<14} {}", "DNSH_CRITERIA", counts.dnsh_criteria);
    println!("    {:<14} {}", "SC_CRITERIA", counts.sc_criteria);
    println!();
    println!(
        "  {} nodes, {} relationships",
        counts.nodes().to_string().bold(),
        counts.relationships().to_string().bold()
    );
}

/// Print an ingestion report.
pub fn print_report(report: &IngestReport) {
    let title = if report.is_clean() {
        "Ingestion complete:".green().bold()
    } else {
        "Ingestion complete with skipped records:".yellow().bold()
    };
    println!("\n{}", title);
    println!("  Run:                   {}", report.run_id.to_string().dimmed());
    println!(
        "  Nodes merged:          {} sectors, {} objectives, {} activities",
        report.sectors, report.objectives, report.activities
    );
    println!("  Matches linked:        {}", report.matches);
    println!("  Criteria upserted:     {}", report.criteria_upserted);
    println!("  Relationships created: {}", report.relationships_created);
    println!("  Duration:              {} ms", report.duration_ms());

    if !report.failures.is_empty() {
        println!("\n{} ({}):", "Skipped".yellow().bold(), report.failures.len());
        for failure in &report.failures {
            println!("  {} {}", "✗".red(), failure);
        }
    }
}

/// Truncate a string respecting visual width.
fn truncate_visual(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut result = String::new();
    let mut current_width = 0;
    for ch in s.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > max_width - 2 {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }
    result.push_str("..");
    result
}
