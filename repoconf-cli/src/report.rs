//! Console rendering of reconciliation progress and the final summary.

use colored::Colorize;
use serde_json::Value;

use repoconf_sync::{Event, OrgWarning, RepoOutcome, RunSummary, SettingChange};

/// Print one progress event as it happens.
pub fn print_event(event: Event<'_>) {
    match event {
        Event::OrgNotAccessible(warning) => eprintln!("{}", warning_line(warning).yellow()),
        Event::Processed(outcome) => {
            println!("processing {}... ", outcome.repo().bold());
            for line in outcome_lines(outcome) {
                println!("{line}");
            }
            if let RepoOutcome::Failed { error, .. } = outcome {
                eprintln!("{}", format!("  ! patch failed: {error}").red());
            }
            println!();
        }
    }
}

/// Print the closing line of a run.
pub fn print_summary(summary: &RunSummary) {
    println!("{}", summary_line(summary));
}

fn warning_line(warning: &OrgWarning) -> String {
    format!(
        "warning: the 'orgs' key in the config includes '{}' but you do not seem to have \
         access to that org. Accessible orgs are [{}].",
        warning.login,
        warning.accessible.join(", ")
    )
}

/// Per-field lines; a failed patch lists what it would have changed.
fn outcome_lines(outcome: &RepoOutcome) -> Vec<String> {
    let verb = match outcome {
        RepoOutcome::Patched { .. } => "changed",
        RepoOutcome::Failed { .. } => "not changed, would change",
    };
    outcome
        .changes()
        .iter()
        .map(|change| change_line(verb, change))
        .collect()
}

fn change_line(verb: &str, change: &SettingChange) -> String {
    format!(
        "  - {verb} {} from {} to {}",
        change.field,
        display_value(&change.from),
        display_value(&change.to)
    )
}

fn summary_line(summary: &RunSummary) -> String {
    let changed = summary.changed_count();
    let failed = summary.failed_count();
    if changed == 0 && failed == 0 {
        return format!(
            "\n{}",
            "Nothing to do, all repos already conform to config.".green()
        );
    }
    if failed == 0 {
        return format!(
            "\n{} Modified settings on {} repos.",
            "Done!".green().bold(),
            group_thousands(changed)
        );
    }
    format!(
        "\n{} Modified settings on {} repos, {} failed.",
        "Done with failures.".yellow().bold(),
        group_thousands(changed),
        group_thousands(failed)
    )
}

/// Strings print bare; everything else prints as JSON.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
