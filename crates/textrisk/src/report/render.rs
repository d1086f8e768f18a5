use super::views::ReportSummary;
use std::fmt::{self, Write};

/// Plain-text rendering of a report summary.
pub fn render_text(summary: &ReportSummary) -> String {
    let mut out = String::new();
    // Formatting into a String never fails.
    let _ = write_report(&mut out, summary);
    out
}

fn write_report(out: &mut String, summary: &ReportSummary) -> fmt::Result {
    writeln!(out, "Risk level: {}", summary.level_label.to_uppercase())?;
    writeln!(out)?;
    writeln!(out, "Matches: {} (score {})", summary.hit_count, summary.total)?;

    if !summary.categories.is_empty() {
        writeln!(out, "Categories:")?;
        for entry in &summary.categories {
            writeln!(out, "- {}: {}", entry.category_label, entry.count)?;
        }
    }

    if !summary.reasons.is_empty() {
        writeln!(out, "\nScore adjustments:")?;
        for reason in &summary.reasons {
            writeln!(out, "- {reason}")?;
        }
    }

    if !summary.findings.is_empty() {
        writeln!(out, "\nFindings:")?;
        for finding in &summary.findings {
            write!(out, "- \"{}\" -> {}", finding.matched, finding.category_label)?;
            match &finding.note {
                Some(note) => writeln!(out, " ({note})")?,
                None => writeln!(out)?,
            }
        }
        if summary.omitted > 0 {
            writeln!(out, "... and {} more", summary.omitted)?;
        }
    }

    writeln!(out, "\nAssessment: {}", summary.interpretation)?;
    if let Some(outlook) = summary.outlook {
        writeln!(out, "Outlook: {outlook}")?;
    }

    writeln!(out, "\nRecommendations:")?;
    for recommendation in &summary.recommendations {
        writeln!(out, "- {recommendation}")?;
    }

    writeln!(out, "\nDisclaimer:")?;
    write!(out, "{}", summary.disclaimer)
}

/// Cuts `text` to at most `max_chars` characters without splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte, _)) => &text[..byte],
        None => text,
    }
}
