use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::model::idea::SortKey;
use crate::model::preference::DisplayMode;

#[derive(Parser)]
#[command(
    name = "idea",
    about = concat!(
        "ideabox v",
        env!("CARGO_PKG_VERSION"),
        " - rate, rank and upvote startup ideas"
    ),
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different data directory
    #[arg(short = 'C', long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Submit a new idea and get its rating
    Submit(SubmitArgs),
    /// List stored ideas
    List(ListArgs),
    /// Show one idea in full
    Show(IdArgs),
    /// Upvote an idea (once per installation)
    Upvote(IdArgs),
    /// Permanently delete an idea
    Delete(IdArgs),
    /// Show the most-voted ideas
    Leaderboard(LeaderboardArgs),
    /// Print an idea as shareable text
    Share(ShareArgs),
    /// Show or set the display mode
    Theme(ThemeArgs),
}

#[derive(Args)]
pub struct SubmitArgs {
    /// Startup name
    pub name: String,
    /// One-line tagline
    pub tagline: String,
    /// What the startup does
    pub description: String,
}

#[derive(Args)]
pub struct ListArgs {
    /// Sort order (default: list.default_sort from config.toml)
    #[arg(long, value_enum)]
    pub sort: Option<SortKey>,
}

#[derive(Args)]
pub struct IdArgs {
    /// Idea ID
    pub id: String,
}

#[derive(Args)]
pub struct LeaderboardArgs {
    /// How many ideas to show (default: leaderboard.size from config.toml)
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Args)]
pub struct ShareArgs {
    /// Idea ID
    pub id: String,
    /// Print the short copy text instead of the share message
    #[arg(long)]
    pub copy: bool,
}

#[derive(Args)]
pub struct ThemeArgs {
    /// New display mode (omit to print the current one)
    #[arg(value_enum)]
    pub mode: Option<DisplayMode>,
}
