use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "booking-desk")]
#[command(about = "Front-desk appointment booking with confirm-before-commit notifications")]
pub struct CliArgs {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "booking-desk.toml")]
    pub config: String,

    /// JSON file containing an array of booking requests
    #[arg(short, long)]
    pub requests: String,

    /// Status filter for the final listing: all, scheduled, completed, cancelled
    #[arg(long, default_value = "all")]
    pub filter: String,

    /// Log notifications instead of sending them
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
