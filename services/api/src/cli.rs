use crate::commands::{run_check, run_render, RenderArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use crvs_forms::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "CRVS Forms",
    about = "Compose and serve civil-registration forms with generated address fields",
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
    /// Print one decorated form as JSON
    Render(RenderArgs),
    /// Build every form and report what was generated, without serving
    Check,
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
        Command::Render(args) => run_render(args).await,
        Command::Check => run_check().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crvs_forms::forms::Event;

    #[test]
    fn render_parses_the_event_name() {
        let cli = Cli::try_parse_from(["crvs-forms", "render", "death", "--compact"])
            .expect("arguments parse");
        match cli.command {
            Some(Command::Render(args)) => {
                assert_eq!(args.event, Event::Death);
                assert!(args.compact);
            }
            other => panic!("expected render command, got {other:?}"),
        }
    }

    #[test]
    fn unknown_events_are_rejected() {
        assert!(Cli::try_parse_from(["crvs-forms", "render", "adoption"]).is_err());
    }

    #[test]
    fn serve_is_the_default() {
        let cli = Cli::try_parse_from(["crvs-forms"]).expect("arguments parse");
        assert!(cli.command.is_none());
    }
}
