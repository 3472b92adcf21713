use crate::{
    error::CliError,
    records::{build_mapper, infer_schema, parse_records, parse_schema},
};
use clap::Parser;
use commands::Commands;
use engine_runtime::{FilterError, apply};
use expression_engine::MapperConfig;
use filter_syntax::{Lexer, SyntaxError, parse_filter};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;
mod records;

#[derive(Parser)]
#[command(name = "sift", version = "0.1.0", about = "Filter JSON records with compact filter expressions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<(), CliError> {
    // Initialize logger; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Filter {
            input,
            filter,
            schema,
            config,
            output,
        } => {
            let config = load_config(config.as_deref())?;
            let records = parse_records(&std::fs::read_to_string(&input)?)?;

            let schema = match schema {
                Some(path) => parse_schema(&std::fs::read_to_string(path)?)?,
                None => records
                    .first()
                    .map(|first| infer_schema(first, config.max_nesting_depth))
                    .unwrap_or_default(),
            };
            let mapper = build_mapper(&schema, config)?;

            let total = records.len();
            let matched = apply(records, &filter, &mapper).inspect_err(|err| {
                if let FilterError::Syntax(syntax) = err {
                    report_syntax_error(&filter, syntax);
                }
            })?;
            info!("{} of {} record(s) matched '{}'", matched.len(), total, filter);

            match output {
                Some(path) => output::write_records(&matched, &path)?,
                None => output::print_records(&matched)?,
            }
        }
        Commands::Ast { filter } => {
            let node = parse_filter(&filter).inspect_err(|err| report_syntax_error(&filter, err))?;
            let json = serde_json::to_string_pretty(&node)?;
            println!("{json}");
        }
        Commands::Tokens { filter, json } => {
            let tokens = Lexer::new()
                .tokenize(&filter)
                .inspect_err(|err| report_syntax_error(&filter, err))?;
            output::print_tokens(&tokens, json)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&str>) -> Result<MapperConfig, CliError> {
    match path {
        Some(path) => {
            let source = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&source)?)
        }
        None => Ok(MapperConfig::default()),
    }
}

fn report_syntax_error(filter: &str, err: &SyntaxError) {
    eprintln!("{}", err.format_error(filter));
}
