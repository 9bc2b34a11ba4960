//! Heuristic extraction of the "limitations / scope" passage from an
//! analysis. Best-effort by design: it assumes the analysis is structured
//! prose with a section that names limitations or scope, and it can both
//! over- and under-capture on unconventional output.

const TRIGGERS: [&str; 2] = ["limitation", "scope"];
const STOPS: [&str; 5] = ["application", "potential", "relationship", "finding", "conclusion"];

/// Scans line by line; capture starts at the first line containing a trigger
/// substring (that line included) and stops after the first captured line
/// containing a stop word. Returns the captured lines joined and trimmed, or
/// an empty string when no trigger line exists.
pub fn extract_limitations_scope(analysis: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut capture = false;
    for line in analysis.lines() {
        let lower = line.to_lowercase();
        if TRIGGERS.iter().any(|t| lower.contains(t)) {
            capture = true;
        }
        if capture {
            lines.push(line);
            if STOPS.iter().any(|s| lower.contains(s)) {
                break;
            }
        }
    }
    lines.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANALYSIS: &str = "\
1. Main research question: how to route experts.
2. Methodology: ablation studies.
3. Key findings: routing collapses without noise.
4. Limitations: the study only covers English corpora
and small models.
5. Potential applications: multilingual routing.
6. Relationship to other work: extends switch transformers.";

    #[test]
    fn captures_between_trigger_and_stop() {
        let got = extract_limitations_scope(ANALYSIS);
        assert!(got.starts_with("4. Limitations:"));
        assert!(got.contains("small models"));
        assert!(got.ends_with("5. Potential applications: multilingual routing."));
        assert!(!got.contains("Relationship"));
    }

    #[test]
    fn no_trigger_yields_empty() {
        assert_eq!(extract_limitations_scope("Methods and results only."), "");
        assert_eq!(extract_limitations_scope(""), "");
    }

    #[test]
    fn scope_also_triggers() {
        let got = extract_limitations_scope("Scope for future work: larger datasets.");
        assert_eq!(got, "Scope for future work: larger datasets.");
    }

    #[test]
    fn trigger_line_with_stop_word_is_still_captured() {
        let got = extract_limitations_scope("Limitations and potential: narrow cohort.\nNext line.");
        assert_eq!(got, "Limitations and potential: narrow cohort.");
    }

    // Re-running the extractor on its own output must be a no-op as long as
    // the excerpt still contains a trigger keyword.
    #[test]
    fn idempotent_on_own_output() {
        let once = extract_limitations_scope(ANALYSIS);
        let twice = extract_limitations_scope(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn output_without_trigger_extracts_to_empty() {
        // An excerpt that lost its trigger keyword re-extracts to empty.
        assert_eq!(extract_limitations_scope("narrow cohort only"), "");
    }
}
