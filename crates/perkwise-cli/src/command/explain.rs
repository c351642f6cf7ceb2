use anyhow::Context as _;
use perkwise_catalog::Build;
use perkwise_recommender::scoring::RuleBasedScorer;

use crate::{
    command::{ContextArg, FilesArg},
    schema::report::{ExplainEntry, ExplainReport},
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ExplainArg {
    #[clap(flatten)]
    files: FilesArg,
    #[clap(flatten)]
    context: ContextArg,
    /// Perk already in the partial build, by name or id (repeatable, at most 4)
    #[arg(long = "with")]
    partial: Vec<String>,
}

pub(crate) fn run(arg: &ExplainArg) -> anyhow::Result<()> {
    let ExplainArg {
        files,
        context,
        partial,
    } = arg;

    let catalog = util::read_catalog_file(&files.catalog)?;
    let config = util::read_config_file(files.config.as_deref())?;
    let context = context.to_context();

    let mut build = Build::new();
    for query in partial {
        let perk = catalog
            .find(query)
            .ok_or_else(|| anyhow::anyhow!("Perk '{query}' not found in catalog"))?;
        build
            .try_push(perk)
            .with_context(|| format!("Cannot add '{query}' to the partial build"))?;
    }

    let scorer = RuleBasedScorer::from_config(&config);
    let mut candidates: Vec<_> = catalog
        .role_pool(context.role())
        .filter(|perk| !build.contains_name(perk.name_key()))
        .filter_map(|perk| {
            scorer
                .breakdown(perk, &build, &context)
                .map(|breakdown| ExplainEntry::new(perk, breakdown))
        })
        .collect();
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));

    let report = ExplainReport {
        generated_at: chrono::Utc::now(),
        role: context.role(),
        partial_build: build.names().into_iter().map(str::to_owned).collect(),
        candidates,
    };
    Output::save_json(&report, files.output.clone())
}
