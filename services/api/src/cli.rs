use crate::export::{run_export, run_locate, ExportArgs, LocateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use district_stats::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "District Stats",
    about = "Serve and inspect district employment-programme statistics",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Write the fallback dataset for every supported state as JSON or CSV
    Export(ExportArgs),
    /// Find the district closest to a coordinate
    Locate(LocateArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Export(args) => run_export(args),
        Command::Locate(args) => run_locate(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["district-stats-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn locate_accepts_negative_longitude() {
        let cli = Cli::try_parse_from([
            "district-stats-api",
            "locate",
            "--latitude",
            "21.17",
            "--longitude",
            "-72.83",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Locate(args)) => {
                assert_eq!(args.latitude, 21.17);
                assert_eq!(args.longitude, -72.83);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn export_defaults_to_json() {
        let cli = Cli::try_parse_from(["district-stats-api", "export"]).expect("parses");
        match cli.command {
            Some(Command::Export(args)) => {
                assert_eq!(args.format, crate::export::ExportFormat::Json);
                assert!(args.output.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
