//! Batch orchestration: fetch papers, analyze each in source order, collect
//! limitation excerpts, then synthesize new research ideas once at the end.
//! Per-paper failures never abort the run; the loop degrades to skip
//! notices and sentinel analysis text and always advances.

use crate::app::AppHandles;
use crate::research::excerpt::extract_limitations_scope;
use crate::research::ideas;
use crate::research::types::{Paper, PaperAnalysis, PipelineParams};
use tracing::warn;

pub const NO_PAPERS_MSG: &str = "No papers found for your topic. Try a different search term.";
pub const SKIPPED_MSG: &str = "Skipped: Full text not available for analysis";
pub const ANALYSIS_UNAVAILABLE: &str = "AI analysis unavailable.";

/// Runs the analyzer over each paper in order. Text comes from the inline
/// full text when present, otherwise from the linked PDF; papers with
/// neither are marked skipped and contribute no excerpt.
pub async fn analyze_batch(h: &AppHandles, papers: &[Paper], prompt: &str) -> Vec<PaperAnalysis> {
    let mut out = Vec::with_capacity(papers.len());
    for paper in papers {
        let mut text = paper.full_text.clone();
        if text.trim().is_empty() {
            if let Some(url) = &paper.download_url {
                text = h.pdf.fetch_text(url).await;
            }
        }

        let (analysis, lim_scope, skipped) = if text.trim().is_empty() {
            (SKIPPED_MSG.to_string(), String::new(), true)
        } else {
            match h.gemini.generate(&format!("{prompt}\n\n{text}")).await {
                Ok(analysis) => {
                    let lim = extract_limitations_scope(&analysis);
                    (analysis, lim, false)
                }
                Err(e) => {
                    warn!(error = %e, title = %paper.title, "paper analysis failed; continuing batch");
                    (ANALYSIS_UNAVAILABLE.to_string(), String::new(), false)
                }
            }
        };

        out.push(PaperAnalysis {
            title: paper.title.clone(),
            link: paper.link().map(|s| s.to_string()),
            analysis,
            lim_scope,
            keywords: paper.keywords.clone(),
            skipped,
        });
    }
    out
}

/// Full orchestration behind /analyze: one pass over up to `num_papers`
/// papers, then a single idea-generation call over the accumulated
/// excerpts. Returns a human-readable transcript of every step.
pub async fn process_papers(h: &AppHandles, p: &PipelineParams) -> String {
    let mut out: Vec<String> = Vec::new();
    let sep = "=".repeat(50);

    let papers = match h.papers.search(&p.topic, p.num_papers, p.sort).await {
        Ok(papers) => papers,
        Err(e) => {
            warn!(error = %e, topic = %p.topic, "paper search failed");
            vec![]
        }
    };
    let papers: Vec<Paper> = papers.into_iter().take(p.num_papers.max(1)).collect();
    if papers.is_empty() {
        out.push(format!("\n{NO_PAPERS_MSG}"));
        return out.join("\n");
    }

    let total = papers.len();
    out.push(format!(
        "\nFound {} relevant papers. Analyzing top {} (sorted by {})...",
        total,
        total,
        p.sort.as_str()
    ));

    let prompt = if p.analysis_prompt.trim().is_empty() {
        ideas::DEFAULT_ANALYSIS_PROMPT
    } else {
        p.analysis_prompt.as_str()
    };

    let analyses = analyze_batch(h, &papers, prompt).await;
    let mut limitations: Vec<String> = Vec::new();
    for (idx, a) in analyses.iter().enumerate() {
        out.push(format!("\n{sep}\nAnalyzing paper {}/{}", idx + 1, total));
        out.push(format!("Title: {}", a.title));
        match &a.link {
            Some(link) => out.push(format!("Link: {link}")),
            None => out.push("Link: Not available".to_string()),
        }
        if a.skipped {
            out.push(format!("\n{SKIPPED_MSG}"));
        } else {
            out.push(format!("\nAnalysis:\n{}", a.analysis));
            if !a.lim_scope.is_empty() {
                limitations.push(a.lim_scope.clone());
            }
        }
    }

    if limitations.is_empty() {
        out.push("\nCould not extract limitations/scope from the analyzed papers. No new ideas generated.".to_string());
    } else {
        out.push(format!("\n{sep}"));
        out.push(format!(
            "Generating {} new research ideas based on identified gaps (each >100 and <= {} words)...",
            p.num_ideas, p.word_limit
        ));
        let all_limitations = limitations.join("\n\n");
        let idea_prompt = ideas::idea_prompt(&all_limitations, &p.topic, p.num_ideas, p.word_limit);
        match h.gemini.generate(&idea_prompt).await {
            Ok(text) => {
                out.push("\nSuggested Research Ideas:\n".to_string());
                out.push(text);
            }
            Err(e) => {
                warn!(error = %e, "idea generation failed");
                out.push(format!("\nError generating new ideas: {e}"));
            }
        }
    }

    out.join("\n")
}
