use std::path::PathBuf;

use clap::{Parser, Subcommand};
use perkwise_catalog::{Role, SelectionContext};

use self::{explain::ExplainArg, random::RandomArg, recommend::RecommendArg};

mod explain;
mod random;
mod recommend;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Recommend a build by greedy scoring
    Recommend(#[clap(flatten)] RecommendArg),
    /// Generate random builds honoring bans and mutex groups
    Random(#[clap(flatten)] RandomArg),
    /// Show the per-rule score of every candidate
    Explain(#[clap(flatten)] ExplainArg),
}

/// Input and output files shared by every subcommand.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct FilesArg {
    /// Catalog file (JSON array of perk records)
    #[arg(long)]
    catalog: PathBuf,
    /// Recommender configuration file (JSON); defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output file path (defaults to stdout)
    #[arg(long)]
    output: Option<PathBuf>,
}

/// User constraints for a selection.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ContextArg {
    /// Role to build for (survivor or killer)
    #[arg(long)]
    role: Role,
    /// Tag the build should cover (repeatable)
    #[arg(long = "tag")]
    tags: Vec<String>,
    /// Perk name or id that must be included (repeatable)
    #[arg(long = "lock")]
    locks: Vec<String>,
    /// Perk name or id that must never be included (repeatable)
    #[arg(long = "ban")]
    bans: Vec<String>,
    /// Focus key for the focus ranking bonus
    #[arg(long)]
    focus: Option<String>,
}

impl ContextArg {
    fn to_context(&self) -> SelectionContext {
        let context = SelectionContext::new(self.role)
            .with_desired_tags(&self.tags)
            .with_locked(&self.locks)
            .with_banned(&self.bans);
        match &self.focus {
            Some(focus) => context.with_focus(focus),
            None => context,
        }
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Recommend(arg) => recommend::run(&arg)?,
        Mode::Random(arg) => random::run(&arg)?,
        Mode::Explain(arg) => explain::run(&arg)?,
    }
    Ok(())
}
