//! Plain-text views of the session state.
use std::fmt::Write;

use aura_core::{AppViewModel, Job, JobRowView, Preferences, SearchState, ELIGIBLE_THRESHOLD};

const NOT_AVAILABLE: &str = "N/A";

pub fn dashboard(view: &AppViewModel) -> String {
    let mut out = String::new();
    if view.loading_batch {
        out.push_str("Loading jobs...\n");
        return out;
    }
    if let Some(error) = &view.last_error {
        let _ = writeln!(out, "Error: {error}");
    }
    if view.jobs.is_empty() {
        out.push_str("No jobs loaded. Use `load` or `new`.\n");
        return out;
    }

    match view.batch_id {
        Some(id) => {
            let _ = writeln!(out, "Batch #{id}");
        }
        None => out.push_str("Recent jobs\n"),
    }
    for job in &view.jobs {
        let stars = match job.stars {
            Some(n) => format!("{}{}", "*".repeat(n.into()), ".".repeat(5 - usize::from(n))),
            None => "not rated".to_string(),
        };
        let _ = writeln!(out, "  [{:>4}] {:<10} {}", job.row.job_id, stars, headline(&job.row));
    }
    let progress = view.progress;
    let _ = writeln!(
        out,
        "Rated {}/{} ({}%)",
        progress.rated, progress.total, progress.percent
    );
    if view.review_ready {
        let _ = writeln!(out, "All rated. Use `review` to see jobs with {ELIGIBLE_THRESHOLD}+ stars.");
    }
    out
}

pub fn review(view: &AppViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "You rated these jobs {ELIGIBLE_THRESHOLD}+ stars:");
    if view.eligible.is_empty() {
        out.push_str("  No jobs meet the threshold. Adjust preferences or run a new search.\n");
        return out;
    }
    for row in &view.eligible {
        let mark = if row.selected { "x" } else { " " };
        let _ = writeln!(out, "  [{mark}] {:>4} {}", row.job_id, headline(row));
    }
    if view.can_prepare {
        out.push_str("Use `apps` to prepare applications.\n");
    } else {
        out.push_str("Select jobs with `toggle <id>`.\n");
    }
    out
}

pub fn applications(view: &AppViewModel) -> String {
    let mut out = String::from("Application packages:\n");
    if view.chosen.is_empty() {
        out.push_str("  Select jobs in the review step to prepare applications.\n");
        return out;
    }
    for row in &view.chosen {
        let _ = writeln!(out, "  {} - {} ({})", row.title, row.company, row.url);
    }
    out
}

pub fn search(state: &SearchState) -> String {
    let mut out = String::new();
    if state.loading {
        let _ = writeln!(out, "Searching for {:?}...", state.query);
        return out;
    }
    if let Some(error) = &state.error {
        let _ = writeln!(out, "Search failed: {error}");
        return out;
    }
    if let Some(took) = state.took {
        let _ = writeln!(
            out,
            "{} results in {} ms",
            state.results.len(),
            took.as_millis()
        );
    }
    if state.results.is_empty() {
        if aura_core::can_search(&state.query) {
            out.push_str("No results. Try broadening your query or removing niche terms.\n");
        } else {
            out.push_str("Type at least two characters to search.\n");
        }
        return out;
    }
    for scored in &state.results {
        let job = &scored.job;
        let _ = writeln!(
            out,
            "  {:>5.3}  [{:>4}] {} - {} ({})",
            scored.score,
            job.id,
            job.title,
            job.company,
            job.location.as_deref().unwrap_or(NOT_AVAILABLE)
        );
    }
    out
}

pub fn job_detail(job: &Job) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} at {}", job.title, job.company);
    let _ = writeln!(
        out,
        "  location: {}",
        job.location.as_deref().unwrap_or(NOT_AVAILABLE)
    );
    let _ = writeln!(
        out,
        "  posted:   {}",
        job.date_posted.as_deref().unwrap_or(NOT_AVAILABLE)
    );
    let _ = writeln!(out, "  url:      {}", job.url);
    out
}

pub fn preferences(preferences: Option<&Preferences>) -> String {
    let Some(prefs) = preferences else {
        return "No preferences saved yet.\n".to_string();
    };
    let mut out = String::new();
    let _ = writeln!(out, "Roles:      {}", list(&prefs.roles));
    let _ = writeln!(out, "Locations:  {}", list(&prefs.locations));
    let _ = writeln!(out, "Industries: {}", list(&prefs.industries));
    if let Some(min) = prefs.min_salary {
        let _ = writeln!(out, "Min salary: {min:.0}");
    }
    if let Some(weight) = prefs.remote_weight {
        let _ = writeln!(out, "Remote weight: {weight:.2}");
    }
    out
}

fn headline(row: &JobRowView) -> String {
    format!(
        "{} - {} - {}",
        row.title,
        row.company,
        row.location.as_deref().unwrap_or(NOT_AVAILABLE)
    )
}

fn list(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}
