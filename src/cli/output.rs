use std::io::IsTerminal;

use crossterm::style::{Color, Stylize, style};
use serde::Serialize;

use crate::model::idea::Idea;
use crate::model::preference::DisplayMode;

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// Terminal colors for the active display mode. Plain text when color is
/// disabled.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub mode: DisplayMode,
    color: bool,
}

impl Palette {
    pub fn new(mode: DisplayMode, color: bool) -> Self {
        Palette { mode, color }
    }

    /// Color only when stdout is a terminal and NO_COLOR is unset.
    pub fn detect(mode: DisplayMode) -> Self {
        let color = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Palette::new(mode, color)
    }

    pub fn plain(mode: DisplayMode) -> Self {
        Palette::new(mode, false)
    }

    fn paint(&self, text: &str, color: Color, bold: bool) -> String {
        if !self.color {
            return text.to_string();
        }
        let styled = style(text).with(color);
        if bold {
            styled.bold().to_string()
        } else {
            styled.to_string()
        }
    }

    pub fn heading(&self, text: &str) -> String {
        let color = match self.mode {
            DisplayMode::Light => Color::DarkMagenta,
            DisplayMode::Dark => Color::Magenta,
        };
        self.paint(text, color, true)
    }

    pub fn score(&self, text: &str) -> String {
        let color = match self.mode {
            DisplayMode::Light => Color::DarkYellow,
            DisplayMode::Dark => Color::Yellow,
        };
        self.paint(text, color, false)
    }

    pub fn muted(&self, text: &str) -> String {
        let color = match self.mode {
            DisplayMode::Light => Color::DarkGrey,
            DisplayMode::Dark => Color::Grey,
        };
        self.paint(text, color, false)
    }
}

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ListedIdeaJson<'a> {
    #[serde(flatten)]
    pub idea: &'a Idea,
    pub voted: bool,
}

#[derive(Serialize)]
pub struct LeaderboardEntryJson<'a> {
    pub rank: usize,
    #[serde(flatten)]
    pub idea: &'a Idea,
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteStatus {
    Recorded,
    AlreadyVoted,
    UnknownIdea,
}

#[derive(Serialize)]
pub struct VoteJson<'a> {
    pub id: &'a str,
    pub status: VoteStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub votes: Option<u32>,
}

#[derive(Serialize)]
pub struct DeleteJson<'a> {
    pub id: &'a str,
    pub deleted: bool,
    pub remaining: usize,
}

#[derive(Serialize)]
pub struct ShareJson {
    pub title: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ThemeJson {
    pub mode: DisplayMode,
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// Message shown right after a successful submit
pub fn format_rating_result(idea: &Idea, palette: &Palette) -> String {
    format!(
        "🎉 AI Rating: {}\n{}\n{}",
        palette.score(&format!("{}/100", idea.rating)),
        idea.feedback,
        palette.muted(&format!("saved as {}", idea.id)),
    )
}

/// One row of `idea list`
pub fn format_idea_line(idea: &Idea, voted: bool, palette: &Palette) -> String {
    let marker = if voted { " ✓" } else { "" };
    format!(
        "{}  {}  {:>3} votes  {} - \"{}\"{}",
        palette.muted(&idea.id),
        palette.score(&format!("{:>3}/100", idea.rating)),
        idea.votes,
        palette.heading(&idea.startup_name),
        idea.tagline,
        marker,
    )
}

/// Everything about one idea, for `idea show`
pub fn format_idea_detail(idea: &Idea, voted: bool, palette: &Palette) -> String {
    let mut lines = vec![
        palette.heading(&idea.startup_name),
        format!("\"{}\"", idea.tagline),
        String::new(),
        idea.description.clone(),
        String::new(),
        format!("Rating: {}", palette.score(&format!("{}/100", idea.rating))),
        format!("Feedback: {}", idea.feedback),
        format!("Votes: {}", idea.votes),
        palette.muted(&format!("id: {}", idea.id)),
    ];
    if voted {
        lines.push(palette.muted("you voted for this idea"));
    }
    lines.join("\n")
}

/// Medal for the first three places, position number after that
pub fn badge(index: usize) -> String {
    match index {
        0 => "🥇".to_string(),
        1 => "🥈".to_string(),
        2 => "🥉".to_string(),
        n => (n + 1).to_string(),
    }
}

/// One row of `idea leaderboard`
pub fn format_leaderboard_row(index: usize, idea: &Idea, palette: &Palette) -> String {
    format!(
        "{}  {}  {}  ★ {}  ▲ {}",
        badge(index),
        palette.heading(&idea.startup_name),
        palette.muted(&format!("\"{}\"", idea.tagline)),
        palette.score(&idea.rating.to_string()),
        idea.votes,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Idea {
        Idea {
            id: "1700000000000".into(),
            startup_name: "Acme".into(),
            tagline: "Anvils as a service".into(),
            description: "Drop-shipped anvils.".into(),
            rating: 72,
            feedback: "👍 \"Solid concept! With some polish, this could be a winner.\"".into(),
            votes: 2,
        }
    }

    #[test]
    fn test_badges() {
        assert_eq!(badge(0), "🥇");
        assert_eq!(badge(1), "🥈");
        assert_eq!(badge(2), "🥉");
        assert_eq!(badge(3), "4");
        assert_eq!(badge(4), "5");
    }

    #[test]
    fn test_plain_palette_adds_no_escapes() {
        let palette = Palette::plain(DisplayMode::Dark);
        assert_eq!(palette.heading("x"), "x");
        assert_eq!(palette.score("x"), "x");
        assert_eq!(palette.muted("x"), "x");
    }

    #[test]
    fn test_colored_palette_differs_by_mode() {
        let light = Palette::new(DisplayMode::Light, true).heading("x");
        let dark = Palette::new(DisplayMode::Dark, true).heading("x");
        assert!(light.contains('\u{1b}'));
        assert_ne!(light, dark);
    }

    #[test]
    fn test_idea_line_plain() {
        let palette = Palette::plain(DisplayMode::Light);
        assert_eq!(
            format_idea_line(&sample(), true, &palette),
            "1700000000000   72/100    2 votes  Acme - \"Anvils as a service\" ✓"
        );
    }

    #[test]
    fn test_rating_result_plain() {
        let palette = Palette::plain(DisplayMode::Light);
        let text = format_rating_result(&sample(), &palette);
        assert!(text.starts_with("🎉 AI Rating: 72/100\n👍"));
        assert!(text.ends_with("saved as 1700000000000"));
    }

    #[test]
    fn test_detail_mentions_vote() {
        let palette = Palette::plain(DisplayMode::Light);
        let text = format_idea_detail(&sample(), true, &palette);
        assert!(text.contains("Drop-shipped anvils."));
        assert!(text.contains("Votes: 2"));
        assert!(text.ends_with("you voted for this idea"));
        assert!(!format_idea_detail(&sample(), false, &palette).contains("you voted"));
    }

    #[test]
    fn test_leaderboard_row_plain() {
        let palette = Palette::plain(DisplayMode::Light);
        let row = format_leaderboard_row(0, &sample(), &palette);
        assert!(row.starts_with("🥇  Acme"));
        assert!(row.ends_with("★ 72  ▲ 2"));
    }

    #[test]
    fn test_listed_idea_json_flattens() {
        let idea = sample();
        let json = serde_json::to_value(ListedIdeaJson {
            idea: &idea,
            voted: false,
        })
        .unwrap();
        assert_eq!(json["startupName"], "Acme");
        assert_eq!(json["voted"], false);
    }
}
