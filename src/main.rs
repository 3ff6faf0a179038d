use anyhow::Result;
use clap::Parser;

use spec_sync::bump::RpmdevBumpspec;
use spec_sync::git::Git2SpecRepository;
use spec_sync::github::GithubClient;
use spec_sync::sync::SyncRunner;
use spec_sync::{config, ui};

#[derive(clap::Parser)]
#[command(
    name = "spec-sync",
    about = "Monitor upstream releases and open spec update pull requests"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Perform all read-only steps but do not commit, push, or open a pull request")]
    dry_run: bool,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("spec-sync {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Load configuration
    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    // Open the spec repository working copy, cloning it on first run
    ui::display_status(&format!(
        "Preparing working copy at '{}'",
        config.git.workdir.display()
    ));
    let repo = match Git2SpecRepository::open_or_clone(
        &config.spec.clone_url,
        &config.git.workdir,
        &config.spec.branch,
        config.credentials(),
        config.identity(),
    ) {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("Spec repository error: {}", e));
            std::process::exit(1);
        }
    };

    let host = match GithubClient::new(&config.github) {
        Ok(client) => client,
        Err(e) => {
            ui::display_error(&format!("Hosting API client error: {}", e));
            std::process::exit(1);
        }
    };

    let bump = RpmdevBumpspec::new(&config.spec.bump_tool);

    let runner = SyncRunner::new(&repo, &host, &bump, &config);
    match runner.run(args.dry_run) {
        Ok(_) => Ok(()),
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }
}
