use std::{path::PathBuf, process::ExitCode};

use chrono::{Local, NaiveDate};
use clap::{command, value_parser, Arg, ArgAction, ArgMatches, Command};
use context::{Context, DEFAULT_TIL_LIMIT};
use generator::{collect_entries, generate};
use scaffold::Scaffolded;

mod context;
mod generator;
mod metadata;
mod renderer;
mod scaffold;
mod updater;

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

fn cli() -> Command {
    command!()
        .about("Keeps the index of case studies and TILs in README.md up to date")
        .args(&[
            Arg::new("root")
                .long("root")
                .help("Project root containing notes/case-studies, til and README.md")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .default_value("."),
            Arg::new("til_limit")
                .long("til-limit")
                .help("How many of the latest TILs to list")
                .value_parser(value_parser!(usize))
                .default_value("12"),
            Arg::new("readme")
                .long("readme")
                .help("README to update. Defaults to README.md under the root.")
                .value_parser(value_parser!(PathBuf)),
            Arg::new("dry_run")
                .long("dry-run")
                .help("Print the generated index instead of writing the README")
                .action(ArgAction::SetTrue),
        ])
        .subcommand(
            Command::new("new")
                .about("Create a TIL note for today")
                .arg(Arg::new("title").help("Short title").required(true))
                .arg(
                    Arg::new("date")
                        .long("date")
                        .help("Date of the note (YYYY-MM-DD). Defaults to today.")
                        .value_parser(parse_date_arg),
                )
                .arg(
                    Arg::new("template")
                        .long("template")
                        .help("Handlebars template replacing the built-in note skeleton")
                        .value_parser(value_parser!(PathBuf)),
                ),
        )
        .subcommand(Command::new("list").about("Print collected entries as JSON"))
}

fn context_from(matches: &ArgMatches, root_matches: &ArgMatches) -> Context {
    let root = root_matches
        .get_one::<PathBuf>("root")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."));
    let til_limit = matches
        .get_one::<usize>("til_limit")
        .copied()
        .unwrap_or(DEFAULT_TIL_LIMIT);
    Context::new(root, matches.get_one::<PathBuf>("readme").cloned(), til_limit)
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();

    let matches = cli().get_matches();

    match matches.subcommand() {
        Some(("new", sub)) => {
            let ctx = context_from(&matches, sub);
            let template = sub.get_one::<PathBuf>("template");
            let handlebars = renderer::generate_renderer(template.map(|p| p.as_path()))?;
            let title: &String = sub.get_one("title").unwrap();
            let date = sub
                .get_one::<NaiveDate>("date")
                .copied()
                .unwrap_or_else(|| Local::now().date_naive());

            match scaffold::new_til(&ctx, &handlebars, title, date)? {
                Scaffolded::Created(path) => println!("Created {}", path.display()),
                Scaffolded::AlreadyExists(path) => {
                    println!("Refusing to overwrite existing file: {}", path.display());
                    return Ok(ExitCode::from(2));
                }
            }
        }
        Some(("list", sub)) => {
            let ctx = context_from(&matches, sub);
            let collected = collect_entries(&ctx)?;
            serde_json::to_writer_pretty(std::io::stdout().lock(), &collected)?;
            println!();
        }
        _ => {
            let ctx = context_from(&matches, &matches);
            if matches.get_flag("dry_run") {
                let collected = collect_entries(&ctx)?;
                println!(
                    "{}",
                    renderer::render_index(
                        &collected.case_studies,
                        &collected.tils,
                        ctx.til_limit,
                        chrono::Utc::now(),
                    )
                );
            } else if generate(&ctx)? {
                println!("README updated.");
            } else {
                println!("No changes needed.");
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
