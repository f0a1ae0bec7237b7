use std::path::PathBuf;

use clap::{ArgAction, Parser};

#[derive(Debug, Parser)]
#[command(
    name = "derek",
    about = "Interpret a Derek comment command against an issue snapshot without mutating anything",
    version
)]
pub struct Cli {
    #[arg(
        long,
        conflicts_with = "comment_file",
        help = "Comment body to interpret. Reads --comment-file or stdin when omitted."
    )]
    pub comment: Option<String>,

    #[arg(
        long = "comment-file",
        help = "Path to a file containing the comment body"
    )]
    pub comment_file: Option<PathBuf>,

    #[arg(
        long,
        env = "DEREK_SNAPSHOT",
        help = "Path to a GitHub issue JSON payload describing the current issue state"
    )]
    pub snapshot: Option<PathBuf>,

    #[arg(
        long,
        env = "DEREK_COMMENTER",
        default_value = "",
        help = "Login of the commenting user; resolves the `me` assignment alias"
    )]
    pub commenter: String,

    #[arg(
        long,
        env = "DEREK_CONFIG",
        help = "Path to a TOML command config (triggers, multilabel_limit, protected_labels)"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        env = "DEREK_POLICY",
        help = "Path to a JSON repository policy (features, maintainers, messages)"
    )]
    pub policy: Option<PathBuf>,

    #[arg(
        long,
        default_value_t = false,
        action = ArgAction::SetTrue,
        help = "Print the interpreted command, plan and dry-run calls as JSON"
    )]
    pub json: bool,
}
