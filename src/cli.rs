// command line interface

use clap::{Args, Parser, Subcommand};
use miette::Result;
use std::io::Read;
use std::path::PathBuf;

use crate::logging::{self, LogTarget};
use crate::output::Output;
use crate::{Client, DEFAULT_ENDPOINT, PdfUpload, Server, ServerConfig};

#[derive(Parser)]
#[command(name = "agreewise", about = "Contract risk analysis from your terminal")]
struct Cli {
    /// analysis service url
    #[arg(long, short, env = "AGREEWISE_ENDPOINT", default_value = DEFAULT_ENDPOINT, global = true)]
    endpoint: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// analyze a contract once and print the report
    Analyze(AnalyzeArgs),

    /// start the analysis service
    Serve {
        /// port number
        #[arg(long, short, default_value = "5000")]
        port: u16,

        /// host to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct Source {
    /// pdf file to upload
    #[arg(long, short)]
    file: Option<PathBuf>,

    /// contract text
    #[arg(long, short)]
    text: Option<String>,

    /// read contract text from stdin
    #[arg(long)]
    stdin: bool,
}

#[derive(Args)]
struct AnalyzeArgs {
    #[command(flatten)]
    source: Source,

    /// print raw json instead of the report
    #[arg(long)]
    json: bool,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve { port, host }) => {
            let _guard = logging::init(LogTarget::Stdout, "info")?;
            Ok(Server::run(&host, port, ServerConfig::default()).await?)
        }

        Some(Commands::Analyze(args)) => {
            let _guard = logging::init(LogTarget::Stderr, "warn")?;
            analyze(&cli.endpoint, args).await
        }

        None => {
            let _guard = logging::init(LogTarget::File, "info")?;
            tracing::info!(endpoint = %cli.endpoint, "starting tui");
            Ok(crate::tui::run(Client::new(&cli.endpoint)).await?)
        }
    }
}

async fn analyze(endpoint: &str, args: AnalyzeArgs) -> Result<()> {
    let client = Client::new(endpoint);

    let analysis = match (args.source.file, args.source.text) {
        (Some(path), _) => {
            // validation happens before the request goes out
            let pdf = PdfUpload::open(&path)?;
            client.upload(pdf).await?
        }
        (None, Some(text)) => client.analyze_text(&text).await?,
        (None, None) => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(crate::Error::from)?;
            client.analyze_text(&text).await?
        }
    };

    if args.json {
        Output::raw(&analysis)?;
    } else {
        Output::pretty(&analysis);
    }

    Ok(())
}
