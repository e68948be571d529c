use crate::model::idea::Idea;

/// Title used when handing an idea to a share target
pub fn share_title(idea: &Idea) -> String {
    format!("Check out {}", idea.startup_name)
}

/// Full share text, with a header and a sign-off
pub fn share_message(idea: &Idea) -> String {
    format!(
        "🚀 Check out this startup idea!\n\n{}\n\nShared from Startup Idea Evaluator",
        clipboard_text(idea)
    )
}

/// Plain summary for copying
pub fn clipboard_text(idea: &Idea) -> String {
    format!(
        "{}\n\"{}\"\n\nRating: {}/100\nVotes: {}\n\n{}",
        idea.startup_name, idea.tagline, idea.rating, idea.votes, idea.description
    )
}
