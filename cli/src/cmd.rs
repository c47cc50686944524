pub mod contests;
pub mod crawl;
pub mod login;
pub mod logout;

use std::path::PathBuf;

#[derive(Debug, clap::Parser)]
#[command(author, version, about, long_about = None)]
pub struct GlobalArgs {
    #[command(subcommand)]
    pub subcmd: Subcommand,

    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
pub enum Subcommand {
    Contests(contests::Args),

    #[command(alias("c"))]
    Crawl(crawl::Args),

    Login(login::Args),
    Logout(logout::Args),
}

pub type SubcmdResult = anyhow::Result<()>;

impl GlobalArgs {
    pub async fn exec_subcmd(&self) -> SubcmdResult {
        use Subcommand::*;
        match &self.subcmd {
            Contests(args) => contests::exec(args, self).await,
            Crawl(args) => crawl::exec(args, self).await,
            Login(args) => login::exec(args, self).await,
            Logout(args) => logout::exec(args, self).await,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
#[clap(rename_all = "lower")]
pub enum ArgPlatform {
    AtCoder,
}

impl From<ArgPlatform> for acstats_webclient::Platform {
    fn from(value: ArgPlatform) -> Self {
        use acstats_webclient::Platform;
        use ArgPlatform::*;
        match value {
            AtCoder => Platform::AtCoder,
        }
    }
}
