//! Prompt construction and output parsing for idea generation and
//! elaboration, plus the fixed fallback ideas served when every external
//! backend is unavailable.

use crate::research::types::Paper;
use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use regex::Regex;

/// Analysis instructions used when a request does not supply its own prompt.
pub const DEFAULT_ANALYSIS_PROMPT: &str = "Please provide a detailed analysis of this research paper covering:
    1. Main research question/hypothesis
    2. Methodology used
    3. Key findings
    4. Limitations
    5. Potential applications
    6. Relationship to other work in the field";

/// Served by /random_ideas when CORE or Gemini is unavailable.
pub const FALLBACK_IDEAS: [&str; 5] = [
    "Explainable AI for medical imaging diagnosis",
    "Quantum algorithms for large-scale optimization",
    "Privacy-preserving federated learning in healthcare",
    "Bias detection in language models for legal documents",
    "Energy-efficient deep learning for edge devices",
];

pub fn idea_prompt(limitations: &str, topic: &str, num_ideas: usize, word_limit: usize) -> String {
    format!(
        "You are an expert research assistant. Based on the following limitations and scope found in recent research papers about '{topic}', \
suggest {num_ideas} innovative research ideas or directions that address these gaps. \
For each idea, elaborate thoroughly in a separate paragraph, ensuring each idea is explained in more than 100 words and within {word_limit} words. \
Number each idea and do not combine them. Be specific, detailed, and concise. List them as numbered points.\n\n\
Limitations and Scope:\n{limitations}"
    )
}

pub fn elaboration_prompt(idea_text: &str, topic: &str, word_limit: usize) -> String {
    format!(
        "You are an expert research assistant. Please elaborate in detail (up to {word_limit} words) on the following research idea related to '{topic}'. \
Discuss its significance, possible methodology, expected challenges, and potential impact. Be thorough and insightful.\n\n\
Idea:\n{idea_text}"
    )
}

/// Prompt over trending papers asking for unaddressed gaps as bullet points.
pub fn gap_prompt(papers: &[Paper], count: usize) -> String {
    let mut prompt = format!(
        "Given the following recent research papers, identify {count} new research gaps or ideas that have not been addressed. \
For each, provide a concise and specific research idea or gap:\n\n"
    );
    for (idx, paper) in papers.iter().enumerate() {
        prompt.push_str(&format!(
            "Paper {}: {}\nAbstract: {}\n\n",
            idx + 1,
            paper.title,
            paper.abstract_text
        ));
    }
    prompt.push_str("List the new research gaps or ideas as bullet points.");
    prompt
}

static NUMBERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\d+\.\s+(.*)$").unwrap());
static BULLETED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[-*]\s+(.+)$").unwrap());

/// Splits generated idea text into individual ideas. Numbered items
/// ("1. ...", bodies may span lines until the next number) are preferred;
/// bulleted items ("- ..." / "* ...") are used only when no numbered item
/// was found.
pub fn split_idea_list(text: &str) -> Vec<String> {
    let mut numbered: Vec<String> = Vec::new();
    let mut current: Option<String> = None;
    for line in text.lines() {
        if let Some(caps) = NUMBERED.captures(line) {
            if let Some(done) = current.take() {
                push_trimmed(&mut numbered, done);
            }
            current = Some(caps[1].to_string());
        } else if let Some(body) = current.as_mut() {
            body.push('\n');
            body.push_str(line);
        }
    }
    if let Some(done) = current.take() {
        push_trimmed(&mut numbered, done);
    }
    if !numbered.is_empty() {
        return numbered;
    }

    text.lines()
        .filter_map(|line| BULLETED.captures(line).map(|caps| caps[1].trim().to_string()))
        .filter(|s| !s.is_empty())
        .collect()
}

fn push_trimmed(out: &mut Vec<String>, s: String) {
    let t = s.trim().to_string();
    if !t.is_empty() {
        out.push(t);
    }
}

/// Cleans the gap-listing output of the generative backend into at most
/// `count` distinct idea lines: bullet/number decoration stripped, echoed
/// "Paper N:" lines dropped, duplicates removed in order.
pub fn clean_gap_lines(text: &str, count: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.to_lowercase().starts_with("paper") {
            continue;
        }
        let idea = line
            .trim_matches(|c: char| "-\u{2022}*0123456789. ".contains(c))
            .trim()
            .to_string();
        if idea.is_empty() || out.contains(&idea) {
            continue;
        }
        out.push(idea);
        if out.len() >= count {
            break;
        }
    }
    out
}

/// Random sample of the fixed fallback set, `min(count, 5)` distinct ideas.
pub fn fallback_sample(count: usize) -> Vec<String> {
    let mut rng = rand::thread_rng();
    FALLBACK_IDEAS
        .choose_multiple(&mut rng, count.min(FALLBACK_IDEAS.len()))
        .map(|s| s.to_string())
        .collect()
}
