use clap::Parser;

use walle::{
    Result,
    cli::{Args, Command},
    command,
    forge::{gitlab::Gitlab, manager::ForgeManager},
};

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("walle")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

#[tokio::main]
async fn main() -> color_eyre::eyre::Result<()> {
    color_eyre::install()?;

    let cli_args = Args::parse();

    initialize_logger(cli_args.debug)?;

    let remote = cli_args.get_remote()?;
    let forge = Gitlab::new(remote).await?;
    let manager = ForgeManager::new(Box::new(forge));

    let notes = match &cli_args.command {
        Command::Release(args) => command::release::execute(&manager, args).await?,
        Command::Changelog(args) => {
            command::changelog::execute(&manager, args).await?
        }
    };

    println!("{notes}");

    Ok(())
}
