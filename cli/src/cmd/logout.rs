use acstats_core::{action, client::SessionPersistentClient};
use colored::Colorize as _;

use super::{ArgPlatform, GlobalArgs, SubcmdResult};
use crate::config::GlobalConfig;

#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg()] // positional argument
    pub platform: ArgPlatform,
}

pub async fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let platform = args.platform.into();
    let cfg = GlobalConfig::from_file_and_args(global_args);

    let mut cli = SessionPersistentClient::new(platform, &cfg.cache_dir);

    action::logout(&mut cli).await?;
    println!(
        "{}",
        format!("Successfully logged out from {}", platform).green()
    );
    Ok(())
}
