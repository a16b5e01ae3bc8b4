use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

use instructor_led::cli::create_admin;
use instructor_led::instructor_config::DatabaseConfig;
use instructor_led::instructor_db::{Store, init_db_pool, run_migrations};

#[derive(Parser)]
#[command(name = "instructor-cli")]
#[command(about = "Instructor-Led CLI - Administrative tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an administrator account
    CreateAdmin {
        /// Display name of the admin
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Apply pending database migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    let pool = init_db_pool(&DatabaseConfig::from_env())
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::CreateAdmin {
            name,
            email,
            password,
        } => {
            let name = match name {
                Some(name) => name,
                None => Input::<String>::new().with_prompt("Name").interact_text()?,
            };

            let email = match email {
                Some(email) => email,
                None => Input::<String>::new().with_prompt("Email address").interact_text()?,
            };

            let password = match password {
                Some(password) => password,
                None => Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords don't match")
                    .interact()?,
            };

            let store = Store::postgres(pool);
            match create_admin(&store, &name, &email, &password).await {
                Ok(user) => {
                    println!("\n✅ Admin created successfully!");
                    println!("   ID: {}", user.id);
                    println!("   Email: {}", user.email);
                }
                Err(e) => bail!("Error creating admin: {}", e.error),
            }
        }
        Commands::Migrate => {
            run_migrations(&pool).await.context("Failed to run migrations")?;
            println!("✅ Migrations applied");
        }
    }

    Ok(())
}
