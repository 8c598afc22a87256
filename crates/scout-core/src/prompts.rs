//! Prompt construction for the three generation operations.
//!
//! Wording here is an internal collaborator, not a contract: the
//! pipeline only depends on the reply being a single JSON document in
//! the shapes `normalize` enforces.

use crate::types::{Item, Opportunity};

/// Prompt for the daily brief. Asks for the full document shape in one
/// JSON object, grounded by search.
pub fn daily_brief(today: &str) -> String {
    format!(
        "You are a competitive-intelligence analyst for a B2B SaaS company. Using web \
         search, compile today's ({today}) intelligence brief on our market.\n\n\
         Respond with a single JSON object and nothing else, in this exact shape:\n\
         {{\n\
           \"date\": \"{today}\",\n\
           \"executive_summary\": \"...\",\n\
           \"sections\": [{{\"title\": \"...\", \"items\": [{{\"headline\": \"...\", \
         \"source\": \"...\", \"url\": \"...\", \"summary\": \"...\", \"tags\": [\"...\"]}}]}}],\n\
           \"top_10_opportunities\": [{{\"id\": 1, \"feature_name\": \"...\", \
         \"description\": \"...\", \"why_build_it\": \"...\", \"competitor_activity\": \"...\"}}]\n\
         }}\n\n\
         Cover product launches, pricing moves, funding, and notable positioning changes. \
         Opportunity ids must be unique integers."
    )
}

/// Prompt for a competitor battlecard derived from one brief item.
pub fn battlecard(item: &Item) -> String {
    format!(
        "Build a sales battlecard reacting to this competitor development:\n\
         headline: {}\nsource: {}\nsummary: {}\n\n\
         Respond with a single JSON object and nothing else:\n\
         {{\"competitor\": \"...\", \"their_strengths\": \"...\", \"their_weaknesses\": \
         \"...\", \"our_angle\": \"...\", \"talking_points\": [\"...\"]}}",
        item.headline, item.source, item.summary
    )
}

/// Prompt for a research deep-dive on one opportunity.
pub fn research(opportunity: &Opportunity) -> String {
    format!(
        "Research this product opportunity in depth:\nfeature: {}\ndescription: {}\n\
         rationale: {}\n\n\
         Respond with a single JSON object and nothing else:\n\
         {{\"topic\": \"...\", \"market_context\": \"...\", \"technical_approach\": \"...\", \
         \"recommendation\": \"...\", \"effort_estimate\": \"...\"}}",
        opportunity.feature_name, opportunity.description, opportunity.why_build_it
    )
}
