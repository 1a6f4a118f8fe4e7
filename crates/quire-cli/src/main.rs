use clap::Parser;
use quire_cli::config_handlers::handle_config_command;
use quire_cli::{BaseCommand, CliArgs, QuireCli};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    // Config commands must work even when the current config does not load.
    let result = if let Some(BaseCommand::Config(cmd)) = args.command {
        handle_config_command(args.config.as_deref(), cmd.command)
    } else {
        match QuireCli::from_args("quire", &args) {
            Ok(cli) => cli.run(args).await,
            Err(e) => Err(e),
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
