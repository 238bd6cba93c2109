use clap::Parser;
use std::path::PathBuf;

const ENVIRONMENT_HELP: &str = "\
Connection settings are read from the environment (and a .env file):
  KEYDB_HOST          store host                [localhost]
  KEYDB_PORT          store port                [6379]
  KEYDB_PASSWORD      store password            [none]
  KEYDB_DB            logical database index    [0]
  KEY_PREFIX          record key namespace      [libro]
  KEYDB_TIMEOUT_SECS  connect/command timeout   [4]";

#[derive(Parser, Debug)]
#[command(name = "biblio", version = env!("BIBLIO_VERSION"))]
#[command(about = "Interactive book inventory backed by KeyDB/Redis", long_about = None)]
#[command(after_help = ENVIRONMENT_HELP)]
pub struct Cli {
    /// Log store traffic to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Load environment variables from this file instead of ./.env
    #[arg(long, value_name = "PATH")]
    pub env_file: Option<PathBuf>,
}
