//! Plain-text before/after report for a completed enhancement.

use std::fmt::Write as _;

use enhancer_core::history::HistoryLedger;
use enhancer_core::result::{EnhancementResult, QualityBand};

/// Score with one decimal, e.g. `7.9`.
pub fn format_score(score: f64) -> String {
    format!("{score:.1}")
}

/// Seconds with two decimals, e.g. `3.10s`.
pub fn format_seconds(seconds: f64) -> String {
    format!("{seconds:.2}s")
}

/// Rounded percentage with an explicit sign for gains, e.g. `+52%`.
pub fn format_percentage(percentage: f64) -> String {
    let rounded = percentage.round();
    if rounded > 0.0 {
        format!("+{rounded:.0}%")
    } else if rounded < 0.0 {
        format!("{rounded:.0}%")
    } else {
        "0%".to_string()
    }
}

fn format_size([width, height]: [u32; 2]) -> String {
    format!("{width}x{height}")
}

fn scored(score: f64) -> String {
    format!("{} ({})", format_score(score), QualityBand::from_score(score).label())
}

/// Render the comparison shown after a successful enhancement.
pub fn render(result: &EnhancementResult) -> String {
    let original = &result.original_rating;
    let info = &original.image_info;
    let enhancement = &result.enhancement_info;
    let enhanced = &result.enhanced_rating;
    let analysis = &result.improvement_analysis;

    let mut out = String::new();
    let _ = writeln!(out, "Enhancement report for {}", result.filename);
    let _ = writeln!(
        out,
        "  Original     score {}  {}x{} {} {}  rated in {}",
        scored(original.quality_score),
        info.width,
        info.height,
        info.format.as_deref().unwrap_or("unknown"),
        info.mode,
        format_seconds(original.processing_time),
    );
    let _ = writeln!(
        out,
        "  Enhancement  {} -> {}  x{}  ({}x pixels)  in {}",
        format_size(enhancement.original_size),
        format_size(enhancement.enhanced_size),
        enhancement.scale_factor,
        enhancement.size_increase,
        format_seconds(enhancement.processing_time),
    );
    let _ = writeln!(
        out,
        "  Enhanced     score {}  rated in {}",
        scored(enhanced.quality_score),
        format_seconds(enhanced.processing_time),
    );
    let verdict = if analysis.improved { "improved" } else { "not improved" };
    let _ = writeln!(
        out,
        "  Improvement  {} (score {:+.1}, {verdict})",
        format_percentage(analysis.percentage_improvement),
        analysis.score_improvement,
    );
    out
}

/// One line per history entry, most recent first; `active` is marked.
pub fn render_history(history: &HistoryLedger, active: Option<&str>) -> String {
    let mut out = String::new();
    for entry in history.iter() {
        let marker = if Some(entry.filename.as_str()) == active { '*' } else { ' ' };
        let _ = writeln!(
            out,
            "{marker} {}  {}",
            entry.filename,
            format_percentage(entry.improvement_analysis.percentage_improvement),
        );
    }
    out
}
