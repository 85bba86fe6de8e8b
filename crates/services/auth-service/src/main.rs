//! Auth Service - command-line login.

use clap::{Parser, Subcommand};

use auth_service_lib::config::AuthServiceConfig;
use auth_service_lib::session::Session;
use domain::AuthenticationMode;

/// Environment variable read for the password (stdin otherwise)
const PASSWORD_ENV: &str = "AUTH_PASSWORD";

#[derive(Parser)]
#[command(name = "auth-service")]
#[command(about = "Authenticate helpdesk users")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in once (password from AUTH_PASSWORD or stdin)
    Login {
        #[arg(long)]
        username: String,
        /// "local" or "directory"
        #[arg(long, default_value = "local")]
        mode: AuthenticationMode,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    common::init_tracing(cli.verbose);

    let config = AuthServiceConfig::from_env();

    match cli.command {
        Commands::Login { username, mode } => {
            let secret = common::read_secret(PASSWORD_ENV)?;
            let authenticator = auth_service_lib::build_authenticator(&config).await?;

            let mut session = Session::new();
            match session.login(&authenticator, &username, &secret, mode).await {
                Ok(user) => {
                    println!("Logged in as {} ({})", user.username(), user.role);
                }
                Err(failure) => {
                    eprintln!("{}: {}", failure.code(), failure);
                    std::process::exit(1);
                }
            }
            session.logout();
        }
    }

    Ok(())
}
