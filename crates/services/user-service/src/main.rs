//! User Service - account, role and schema administration.

use clap::{Parser, Subcommand};

use domain::{CreateUser, UserResponse, ROLE_USER};
use user_service_lib::config::UserServiceConfig;
use user_service_lib::service::UserService;
use user_service_lib::MigrateAction;

/// Environment variable read for the new account's password (stdin otherwise)
const PASSWORD_ENV: &str = "USER_PASSWORD";

#[derive(Parser)]
#[command(name = "user-service")]
#[command(about = "User and role administration")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
    #[command(flatten)]
    Admin(AdminCommands),
}

#[derive(Subcommand)]
enum AdminCommands {
    /// Create a local account (password from USER_PASSWORD or stdin)
    CreateUser {
        #[arg(long)]
        username: String,
        #[arg(long, default_value = "")]
        full_name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = ROLE_USER)]
        role: String,
    },
    /// Activate or deactivate an account
    SetActive {
        #[arg(long)]
        username: String,
        #[arg(long, action = clap::ArgAction::Set)]
        active: bool,
    },
    /// Assign a role to an account
    AssignRole {
        #[arg(long)]
        username: String,
        #[arg(long)]
        role: String,
    },
    /// List all accounts as JSON
    ListUsers,
    /// List all roles
    ListRoles,
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    common::init_tracing(cli.verbose);

    let config = UserServiceConfig::from_env();

    let command = match cli.command {
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            };
            return user_service_lib::run_migrations(migrate_action, &config).await;
        }
        Commands::Admin(command) => command,
    };

    let service = user_service_lib::user_manager(&config).await?;

    let result = match command {
        AdminCommands::CreateUser {
            username,
            full_name,
            email,
            role,
        } => {
            let password = common::read_secret(PASSWORD_ENV)?;
            let request = CreateUser {
                username,
                full_name,
                email,
                role_name: role,
            };
            service
                .create_local_user(request, &password)
                .await
                .map(|user| print_json(&UserResponse::from(user)))
        }
        AdminCommands::SetActive { username, active } => service
            .set_active(&username, active)
            .await
            .map(|user| print_json(&UserResponse::from(user))),
        AdminCommands::AssignRole { username, role } => service
            .assign_role(&username, &role)
            .await
            .map(|user| print_json(&UserResponse::from(user))),
        AdminCommands::ListUsers => service.list_users().await.map(|users| {
            let users: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();
            print_json(&users)
        }),
        AdminCommands::ListRoles => service.list_roles().await.map(|roles| {
            for role in roles {
                println!("{}\t{}", role.id, role.name);
            }
        }),
    };

    if let Err(e) = result {
        tracing::error!(code = e.code(), "Command failed: {}", e);
        eprintln!("error: {}", e.user_message());
        std::process::exit(1);
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("error: failed to render output: {}", e),
    }
}
