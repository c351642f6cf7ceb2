use perkwise_catalog::{NameSet, Role};
use perkwise_recommender::random::{BuildSeed, RandomBuildGenerator};
use rand::Rng as _;

use crate::{
    command::FilesArg,
    schema::report::{RandomBuildEntry, RandomReport},
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct RandomArg {
    #[clap(flatten)]
    files: FilesArg,
    /// Role to build for (survivor or killer)
    #[arg(long)]
    role: Role,
    /// Perk name or id that must never be included (repeatable)
    #[arg(long = "ban")]
    bans: Vec<String>,
    /// Seed as 32 hex characters; a random seed is drawn and reported when omitted
    #[arg(long)]
    seed: Option<BuildSeed>,
    /// Number of builds to generate
    #[arg(long, default_value_t = 1)]
    count: usize,
}

pub(crate) fn run(arg: &RandomArg) -> anyhow::Result<()> {
    let RandomArg {
        files,
        role,
        bans,
        seed,
        count,
    } = arg;

    let catalog = util::read_catalog_file(&files.catalog)?;
    let config = util::read_config_file(files.config.as_deref())?;
    let bans: NameSet = bans.iter().collect();
    let seed = seed.unwrap_or_else(|| rand::rng().random());

    let mut generator = RandomBuildGenerator::with_seed(config.mutex_tags.clone(), seed);
    let builds = (0..*count)
        .map(|_| {
            let build = generator.generate(catalog.perks(), *role, &bans);
            RandomBuildEntry::new(&build, &config.mutex_tags)
        })
        .collect();

    let report = RandomReport {
        generated_at: chrono::Utc::now(),
        role: *role,
        seed,
        builds,
    };
    Output::save_json(&report, files.output.clone())
}
