use perkwise_recommender::{scoring::RuleBasedScorer, selector::BuildSelector};

use crate::{
    command::{ContextArg, FilesArg},
    schema::report::RecommendReport,
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct RecommendArg {
    #[clap(flatten)]
    files: FilesArg,
    #[clap(flatten)]
    context: ContextArg,
}

pub(crate) fn run(arg: &RecommendArg) -> anyhow::Result<()> {
    let RecommendArg { files, context } = arg;

    let catalog = util::read_catalog_file(&files.catalog)?;
    let config = util::read_config_file(files.config.as_deref())?;
    let context = context.to_context();

    let scorer = RuleBasedScorer::from_config(&config);
    let selector = BuildSelector::new(Box::new(scorer));
    let selection = selector.select(catalog.perks(), &context);

    if selection.build().is_empty() {
        eprintln!("No {} perk is available for this selection", context.role());
    }

    let report = RecommendReport::new(context.role(), &selection, &config.mutex_tags);
    Output::save_json(&report, files.output.clone())
}
