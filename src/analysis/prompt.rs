// src/analysis/prompt.rs
// Prompt templates for ticket critique and business-idea critique

use super::{AnalysisMode, Criterion};

/// Ticket persona. User text is inserted between the two halves.
const TICKET_PERSONA: &str = r#"You are a Senior QA Engineer and Technical Architect known for finding edge cases that break systems.
Review the following JIRA Ticket or Technical Specification."#;

const TICKET_INSTRUCTIONS: &str = r#"Your goal is to find AMBIGUITY and RISK. Do not be helpful. Be brutally critical.
Imagine you are the developer who has to implement this. What will make you fail?"#;

const TICKET_OUTPUT_SCHEMA: &str = r#"Output a JSON response with this exact structure:
{
    "score": (integer 1-100, where 100 is perfectly clear and actionable, 0 is vague disaster),
    "risk_level": "High/Medium/Low",
    "critiques": [
        "List 3-5 specific phrases or sections that are ambiguous or risky.",
        "Explain WHY a developer might misinterpret them or fail during implementation."
    ],
    "blind_spots": [
        "List 2-4 scenarios, edge cases, or requirements the author forgot to define.",
        "Think about error handling, permissions, performance, and edge user behavior."
    ]
}"#;

const BUSINESS_PERSONA: &str = r#"You are a battle-hardened Venture Capitalist and Industry Architect. You've seen 10,000 pitches.
90% of them failed because founders were blinded by their own optimism.
Your job is to be the voice of brutal, market-aware reality.
Do NOT be encouraging. Find the holes. Find the delusion. Find the overlooked competitor."#;

const CRITERIA_HEADER: &str = "The user has specifically asked you to evaluate the following dimensions. Weight your critique accordingly:";

/// Severity guidance for user criteria. Priorities are only matched by the model.
const CRITERIA_WEIGHTING: &str = "For 'Critical' items, be EXTRA harsh. For 'Low' items, a brief mention is fine.";

const DEFAULT_DIMENSIONS: &str = "Evaluate on general business viability: Market Fit, Monetization Potential, Scalability, and Competitive Moat.";

const BUSINESS_OUTPUT_SCHEMA: &str = r#"Output a JSON response with this exact structure:
{
    "score": (integer 1-100, where 100 is a rare, investable idea, 0 is a delusional fantasy),
    "risk_level": "High/Medium/Low",
    "critiques": [
        "List 3-5 sharp, direct criticisms of the idea based on the criteria.",
        "For each, explain the business or market reality the founder is ignoring."
    ],
    "blind_spots": [
        "List 2-4 things the founder clearly hasn't thought about.",
        "Competitors, regulations, unit economics, customer acquisition cost, etc."
    ]
}"#;

/// Build the prompt for `mode`. Criteria are ignored in ticket mode.
pub fn build_prompt(mode: AnalysisMode, text: &str, criteria: &[Criterion]) -> String {
    match mode {
        AnalysisMode::Ticket => build_ticket_prompt(text),
        AnalysisMode::Business => build_business_prompt(text, criteria),
    }
}

/// Ticket/spec critique prompt. `text` is interpolated verbatim.
pub fn build_ticket_prompt(text: &str) -> String {
    format!(
        "\n{}\n\nContent: \"{}\"\n\n{}\n\n{}\n",
        TICKET_PERSONA, text, TICKET_INSTRUCTIONS, TICKET_OUTPUT_SCHEMA
    )
}

/// Business-idea critique prompt, weighted by the user's criteria
pub fn build_business_prompt(text: &str, criteria: &[Criterion]) -> String {
    format!(
        "\n{}\n\nReview the following business idea or concept:\n\"{}\"\n\n{}\n\n{}\n",
        BUSINESS_PERSONA,
        text,
        criteria_section(criteria),
        BUSINESS_OUTPUT_SCHEMA
    )
}

fn criteria_section(criteria: &[Criterion]) -> String {
    if criteria.is_empty() {
        return DEFAULT_DIMENSIONS.to_string();
    }

    let lines: Vec<String> = criteria.iter().map(criterion_line).collect();
    format!("{}\n{}\n\n{}", CRITERIA_HEADER, lines.join("\n"), CRITERIA_WEIGHTING)
}

fn criterion_line(criterion: &Criterion) -> String {
    match criterion.description() {
        Some(desc) => format!(
            "- **{}** (Importance: {}): User defines this as '{}'",
            criterion.name, criterion.priority, desc
        ),
        None => format!("- **{}** (Importance: {})", criterion.name, criterion.priority),
    }
}
