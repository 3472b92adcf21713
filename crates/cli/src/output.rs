use crate::{error::CliError, records::Record};
use filter_syntax::Token;

fn records_json(records: &[Record]) -> Result<String, CliError> {
    let json = serde_json::to_string_pretty(records)?;
    Ok(json)
}

pub fn write_records(records: &[Record], path: &str) -> Result<(), CliError> {
    let json = records_json(records)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn print_records(records: &[Record]) -> Result<(), CliError> {
    let json = records_json(records)?;
    println!("{json}");
    Ok(())
}

pub fn print_tokens(tokens: &[Token], as_json: bool) -> Result<(), CliError> {
    if as_json {
        let json = serde_json::to_string_pretty(tokens)?;
        println!("{json}");
        return Ok(());
    }

    println!("{:<8} {:<14} {}", "Column", "Kind", "Text");
    println!("-----------------------------");
    for token in tokens {
        let kind = format!("{:?}", token.kind);
        let kind = kind.split('(').next().unwrap_or_default().to_string();
        println!("{:<8} {:<14} {}", token.span.column, kind, token.kind);
    }
    Ok(())
}
