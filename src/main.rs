use clap::{Parser as ClapParser, Subcommand};
use sprig::cli::{self, CliError, CompileOptions, RunOptions};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "sprig")]
#[command(about = "Sprig - compile and run typed filter queries against Weaviate-compatible databases")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a query spec document into GraphQL
    Compile {
        /// Query spec JSON (reads from stdin if not provided)
        spec: Option<String>,

        /// Compile under the aggregation grammar
        #[arg(long)]
        aggregate: bool,
    },

    /// Compile a query spec document and execute it against a deployment
    Run {
        /// Query spec JSON (reads from stdin if not provided)
        spec: Option<String>,

        /// Base URL of the deployment
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,

        /// API key sent as a bearer token
        #[arg(long)]
        api_key: Option<String>,

        /// Execute under the aggregation grammar
        #[arg(long)]
        aggregate: bool,

        /// Pretty-print the rows
        #[arg(short, long)]
        pretty: bool,
    },

    /// List the collections of a deployment
    Collections {
        /// Base URL of the deployment
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,

        /// API key sent as a bearer token
        #[arg(long)]
        api_key: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compile { spec, aggregate } => run_compile(spec, aggregate),
        Commands::Run {
            spec,
            url,
            api_key,
            aggregate,
            pretty,
        } => run_run(spec, url, api_key, aggregate, pretty),
        Commands::Collections { url, api_key } => run_collections(url, api_key),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn read_spec(spec: Option<String>) -> Result<String, CliError> {
    match spec {
        Some(s) => Ok(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(CliError::Io)?;
            Ok(buffer)
        }
        None => Err(CliError::NoInput),
    }
}

fn run_compile(spec: Option<String>, aggregate: bool) -> Result<(), CliError> {
    let options = CompileOptions {
        spec: read_spec(spec)?,
        aggregate,
    };
    println!("{}", cli::execute_compile(&options)?);
    Ok(())
}

fn run_run(
    spec: Option<String>,
    url: String,
    api_key: Option<String>,
    aggregate: bool,
    pretty: bool,
) -> Result<(), CliError> {
    let options = RunOptions {
        spec: read_spec(spec)?,
        url,
        api_key,
        aggregate,
    };
    let rows = cli::execute_run(&options)?;

    let json = if pretty {
        serde_json::to_string_pretty(&rows)
    } else {
        serde_json::to_string(&rows)
    }
    .unwrap();
    println!("{}", json);
    Ok(())
}

fn run_collections(url: String, api_key: Option<String>) -> Result<(), CliError> {
    for name in cli::execute_collections(&url, api_key.as_deref())? {
        println!("{}", name);
    }
    Ok(())
}
