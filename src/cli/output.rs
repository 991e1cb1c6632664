//! Terminal rendering of errors and reports.

use console::style;

use capsule::models::{CategoryProgress, CompletionReport, ErrorCategory, ValidationError};

pub fn print_errors(errors: &[ValidationError]) {
    println!(
        "\n{} ({})",
        style("Manifest errors:").red().bold(),
        errors.len()
    );

    for error in errors {
        let label = match error.category() {
            ErrorCategory::Format => "format",
            ErrorCategory::Delimiter => "delimiter",
        };
        println!(
            "\n  {} Line {} [{}]: {}",
            style("✗").red(),
            error.line_number,
            label,
            error.message
        );
        println!("    {} {}", style("line:").dim(), error.raw_line);
        println!(
            "    {} {}",
            style("expected:").dim(),
            error.expected_format_hint
        );

        for part in error.problems() {
            let what = if part.is_missing {
                "missing"
            } else if !part.is_within_expected_count {
                "unexpected"
            } else if part.is_empty {
                "empty"
            } else {
                "invalid"
            };
            println!(
                "    {} field {} ({}): {:?} {}",
                style("→").dim(),
                part.index + 1,
                part.field_name,
                part.raw_text,
                style(what).yellow()
            );
        }
    }
}

pub fn print_report(report: &CompletionReport) {
    println!("\n{}", style("Completion:").cyan());
    for (name, progress) in report.categories() {
        println!(
            "  {} {:<22} {}/{}",
            mark(&progress),
            name,
            progress.achieved,
            progress.required
        );
    }

    let failing_tags: Vec<_> = report.tag_checks.iter().filter(|c| !c.passed).collect();
    if !failing_tags.is_empty() {
        println!("\n{}", style("Tags:").cyan());
        for check in failing_tags {
            println!(
                "  {} {}: {}",
                style("✗").red(),
                check.filename,
                check.reason.as_deref().unwrap_or("not enough tags")
            );
        }
    }

    let failing_explanations: Vec<_> = report
        .explanation_checks
        .iter()
        .filter(|c| !c.passed)
        .collect();
    if !failing_explanations.is_empty() {
        println!("\n{}", style("Explanations:").cyan());
        for check in failing_explanations {
            let detail = match (&check.explanation_file, &check.error) {
                (None, _) => "no explanation file".to_string(),
                (Some(file), Some(err)) => format!("{}: {}", file, err),
                (Some(file), None) => format!(
                    "{}: {} of {} words",
                    file, check.word_count, check.required_words
                ),
            };
            println!("  {} {}: {}", style("✗").red(), check.filename, detail);
        }
    }

    print_file_list("Missing from archive:", &report.missing_files);
    print_file_list("Not in manifest:", &report.extra_files);

    let summary = format!(
        "{}% ({}/{})",
        report.percentage, report.achieved, report.required
    );
    if report.is_complete() {
        println!("\n{} {}", style("✓ Complete").green().bold(), summary);
    } else {
        println!("\n{} {}", style("✗ Incomplete").red().bold(), summary);
    }
}

fn print_file_list(title: &str, files: &[String]) {
    if files.is_empty() {
        return;
    }
    println!("\n{}", style(title).yellow());
    for file in files {
        println!("  {} {}", style("→").dim(), file);
    }
}

fn mark(progress: &CategoryProgress) -> console::StyledObject<&'static str> {
    if progress.passed {
        style("✓").green()
    } else {
        style("✗").red()
    }
}
