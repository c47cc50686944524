use acstats_core::{action, client::SessionPersistentClient};
use acstats_webclient::Platform;
use colored::Colorize as _;

use super::{GlobalArgs, SubcmdResult};
use crate::config::GlobalConfig;

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Number of archive pages to fetch.
    #[arg(short, long, default_value_t = 1)]
    pub pages: u32,
}

pub async fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let cfg = GlobalConfig::from_file_and_args(global_args);

    let cli = SessionPersistentClient::new(Platform::AtCoder, &cfg.cache_dir);
    let entries = action::fetch_contest_archive(&cli, args.pages).await?;

    for (duration_min, contests) in action::group_contests_by_duration(entries) {
        println!("{}", format!("## {} minutes", duration_min).bold());
        for c in contests {
            println!(
                "{}  {:<12}  {}",
                c.start_at.format("%Y-%m-%d"),
                c.id,
                c.name
            );
        }
        println!();
    }
    Ok(())
}
