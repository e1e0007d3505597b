mod cli;
mod commands;
mod input;

use std::path::Path;

use anyhow::Context;
use bqdml::{Composer, ComposerConfig};

pub fn run(args: Vec<String>) -> anyhow::Result<()> {
    let cmd = cli::parse_args(&args)?;
    let sql = match cmd {
        cli::Command::Help(topic) => {
            cli::print_help(topic);
            return Ok(());
        }
        cli::Command::Insert(args) => {
            let composer = load_composer(args.config.as_deref())?;
            let records = input::read_json(&args.records)?;
            commands::compose_insert(&composer, &args.table, &records, args.columns.as_deref())?
        }
        cli::Command::Update(args) => {
            let composer = load_composer(args.config.as_deref())?;
            let set = input::read_json(&args.set)?;
            match &args.condition {
                cli::WhereSource::Predicate { input, grouping } => {
                    let predicate = input::read_json(input)?;
                    commands::compose_update(
                        &composer,
                        &args.table,
                        &set,
                        commands::UpdateCondition::Predicate {
                            value: &predicate,
                            grouping,
                        },
                    )?
                }
                cli::WhereSource::Sql(text) => commands::compose_update(
                    &composer,
                    &args.table,
                    &set,
                    commands::UpdateCondition::Sql(text),
                )?,
            }
        }
        cli::Command::Where(args) => {
            let composer = load_composer(args.config.as_deref())?;
            let predicate = input::read_json(&args.predicate)?;
            commands::compose_where(&composer, &predicate, &args.grouping)?
        }
    };

    println!("{sql}");
    Ok(())
}

fn load_composer(config: Option<&Path>) -> anyhow::Result<Composer> {
    let Some(path) = config else {
        return Ok(Composer::default());
    };
    let config = ComposerConfig::load(path)
        .with_context(|| format!("failed to load config {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config.composer())
}
