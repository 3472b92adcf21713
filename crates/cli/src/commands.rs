use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Filter a JSON array of records
    Filter {
        #[arg(long, help = "Path to a JSON file holding an array of objects")]
        input: String,

        #[arg(long, help = "Filter expression, e.g. \"Name=*a&Id>5\"")]
        filter: String,

        #[arg(
            long,
            help = "JSON object mapping field names to value types; inferred from the first record when absent"
        )]
        schema: Option<String>,

        #[arg(long, help = "JSON file with mapper settings")]
        config: Option<String>,

        #[arg(
            long,
            help = "If specified, writes the matching records to this file instead of stdout"
        )]
        output: Option<String>,
    },
    /// Print the parsed filter tree as JSON
    Ast {
        /// Filter expression
        filter: String,
    },
    /// Print the token stream of a filter
    Tokens {
        /// Filter expression
        filter: String,

        #[arg(long, help = "If set, prints the tokens as JSON instead of a table")]
        json: bool,
    },
}
