use std::path::PathBuf;
use std::time::Duration;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::kv_store::DirStore;
use crate::io::lock::{DataDirLock, LockError};
use crate::model::config::AppConfig;
use crate::model::idea::IdeaDraft;
use crate::ops::idea_ops::{IdeaStore, VoteOutcome};
use crate::ops::preference_ops;
use crate::ops::rating::RandomRating;
use crate::ops::share;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Everything a command needs, resolved once from the global flags.
pub struct Context {
    pub data_dir: PathBuf,
    pub config: AppConfig,
    pub json: bool,
}

impl Context {
    /// Resolve the data directory and read its config.toml.
    pub fn load(cli: &Cli) -> Result<Self, config_io::ConfigError> {
        let data_dir = config_io::resolve_data_dir(cli.data_dir.as_deref());
        let config = config_io::read_config(&data_dir)?;
        Ok(Context {
            data_dir,
            config,
            json: cli.json,
        })
    }

    fn storage(&self) -> DirStore {
        DirStore::new(&self.data_dir)
    }

    fn store(&self) -> IdeaStore<DirStore> {
        IdeaStore::new(self.storage())
    }

    fn palette(&self) -> Palette {
        Palette::detect(preference_ops::display_mode(&self.storage()))
    }

    /// Serializes write commands against other `idea` processes.
    fn lock(&self) -> Result<DataDirLock, LockError> {
        let timeout = Duration::from_millis(self.config.lock.timeout_ms);
        DataDirLock::acquire(&self.data_dir, timeout)
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(ctx: &Context, command: Commands) -> CmdResult {
    match command {
        // Read commands
        Commands::List(args) => cmd_list(ctx, args),
        Commands::Show(args) => cmd_show(ctx, args),
        Commands::Leaderboard(args) => cmd_leaderboard(ctx, args),
        Commands::Share(args) => cmd_share(ctx, args),

        // Write commands
        Commands::Submit(args) => cmd_submit(ctx, args),
        Commands::Upvote(args) => cmd_upvote(ctx, args),
        Commands::Delete(args) => cmd_delete(ctx, args),
        Commands::Theme(args) => cmd_theme(ctx, args),
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(ctx: &Context, args: ListArgs) -> CmdResult {
    let store = ctx.store();
    let sort = args.sort.unwrap_or(ctx.config.list.default_sort);
    let ideas = store.list_ideas(sort);
    let voted = store.voted_ids();
    let has_voted = |id: &str| voted.iter().any(|v| v == id);

    if ctx.json {
        let items: Vec<ListedIdeaJson> = ideas
            .iter()
            .map(|idea| ListedIdeaJson {
                idea,
                voted: has_voted(&idea.id),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if ideas.is_empty() {
        println!("(no ideas yet - try `idea submit`)");
        return Ok(());
    }
    let palette = ctx.palette();
    println!("{}", palette.muted(&format!("sorted by {}", sort)));
    for idea in &ideas {
        println!("{}", format_idea_line(idea, has_voted(&idea.id), &palette));
    }
    Ok(())
}

fn cmd_show(ctx: &Context, args: IdArgs) -> CmdResult {
    let store = ctx.store();
    let idea = store
        .get_idea(&args.id)
        .ok_or_else(|| format!("idea not found: {}", args.id))?;

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&idea)?);
    } else {
        let voted = store.voted_ids().contains(&idea.id);
        println!("{}", format_idea_detail(&idea, voted, &ctx.palette()));
    }
    Ok(())
}

fn cmd_leaderboard(ctx: &Context, args: LeaderboardArgs) -> CmdResult {
    let limit = args.limit.unwrap_or(ctx.config.leaderboard.size);
    let top = ctx.store().top_voted(limit);

    if ctx.json {
        let entries: Vec<LeaderboardEntryJson> = top
            .iter()
            .enumerate()
            .map(|(i, idea)| LeaderboardEntryJson { rank: i + 1, idea })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    let palette = ctx.palette();
    println!("{}", palette.heading("Top Startup Ideas"));
    if top.is_empty() {
        println!("(no ideas yet)");
    }
    for (i, idea) in top.iter().enumerate() {
        println!("{}", format_leaderboard_row(i, idea, &palette));
    }
    Ok(())
}

fn cmd_share(ctx: &Context, args: ShareArgs) -> CmdResult {
    let idea = ctx
        .store()
        .get_idea(&args.id)
        .ok_or_else(|| format!("idea not found: {}", args.id))?;
    let message = if args.copy {
        share::clipboard_text(&idea)
    } else {
        share::share_message(&idea)
    };

    if ctx.json {
        let out = ShareJson {
            title: share::share_title(&idea),
            message,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", message);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_submit(ctx: &Context, args: SubmitArgs) -> CmdResult {
    let _lock = ctx.lock()?;
    let draft = IdeaDraft::new(args.name, args.tagline, args.description);
    let idea = ctx
        .store()
        .create_idea(&draft, &mut RandomRating::thread_local())?;

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&idea)?);
    } else {
        println!("{}", format_rating_result(&idea, &ctx.palette()));
    }
    Ok(())
}

fn cmd_upvote(ctx: &Context, args: IdArgs) -> CmdResult {
    let _lock = ctx.lock()?;
    let outcome = ctx.store().upvote_idea(&args.id)?;

    let (status, votes) = match &outcome {
        VoteOutcome::Recorded(ideas) => (
            VoteStatus::Recorded,
            ideas.iter().find(|i| i.id == args.id).map(|i| i.votes),
        ),
        VoteOutcome::AlreadyVoted => (VoteStatus::AlreadyVoted, None),
        VoteOutcome::UnknownIdea(_) => (VoteStatus::UnknownIdea, None),
    };

    if ctx.json {
        let out = VoteJson {
            id: &args.id,
            status,
            votes,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    match status {
        VoteStatus::Recorded => println!("Vote recorded!"),
        VoteStatus::AlreadyVoted => println!("You have already voted for this idea."),
        VoteStatus::UnknownIdea => println!("no idea with id {}; nothing changed", args.id),
    }
    Ok(())
}

fn cmd_delete(ctx: &Context, args: IdArgs) -> CmdResult {
    let _lock = ctx.lock()?;
    let mut store = ctx.store();
    let existed = store.get_idea(&args.id).is_some();
    let remaining = store.delete_idea(&args.id)?;

    if ctx.json {
        let out = DeleteJson {
            id: &args.id,
            deleted: existed,
            remaining: remaining.len(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if existed {
        println!("Idea deleted successfully!");
    } else {
        println!("no idea with id {}; nothing deleted", args.id);
    }
    Ok(())
}

fn cmd_theme(ctx: &Context, args: ThemeArgs) -> CmdResult {
    let mode = match args.mode {
        Some(mode) => {
            let _lock = ctx.lock()?;
            preference_ops::set_display_mode(&mut ctx.storage(), mode)?;
            mode
        }
        None => preference_ops::display_mode(&ctx.storage()),
    };

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&ThemeJson { mode })?);
    } else {
        println!("display mode: {}", mode);
    }
    Ok(())
}
