use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use skillswap_cli::tokens::{inspect, issue};
use skillswap_config::JwtConfig;

#[derive(Parser)]
#[command(name = "skillswap-cli")]
#[command(about = "SkillSwap CLI - Developer tools for the feedback API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a signed credential for a user, using SECRET_KEY
    IssueToken {
        /// User id to put in the `userId` claim
        #[arg(short = 'u', long)]
        user_id: String,

        /// Lifetime in seconds (defaults to JWT_EXPIRY)
        #[arg(short = 'e', long, allow_negative_numbers = true)]
        expiry: Option<i64>,
    },
    /// Verify a credential and print the identity or the rejection
    InspectToken {
        /// The JWT to check
        token: String,
    },
}

fn main() {
    dotenv().ok();

    let cli = Cli::parse();
    let config = JwtConfig::from_env();

    match cli.command {
        Commands::IssueToken { user_id, expiry } => match issue(&user_id, expiry, &config) {
            Ok(token) => println!("{}", token),
            Err(e) => {
                eprintln!("Error issuing token: {}", e);
                std::process::exit(1);
            }
        },
        Commands::InspectToken { token } => {
            let inspection = inspect(&token, &config);
            println!("{}", inspection);
            if !inspection.is_valid() {
                std::process::exit(1);
            }
        }
    }
}
