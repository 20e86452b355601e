use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use gsms_auth::postgres::purge_expired_sessions;
use gsms_cache::CacheConfig;
use gsms_cli::admin::create_admin;
use gsms_cli::seeder::{self, SeedConfig};
use sqlx::PgPool;

#[derive(Parser)]
#[command(name = "gsms-cli")]
#[command(about = "GSMS CLI - Administrative tools for the school management system", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an administrator account
    CreateAdmin {
        /// Full name shown on the dashboard
        #[arg(short = 'n', long)]
        full_name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake students, staff and parents
    Seed {
        #[arg(long, default_value = "120")]
        students: usize,

        #[arg(long, default_value = "20")]
        staff: usize,

        #[arg(long, default_value = "60")]
        parents: usize,
    },
    /// Delete every seeded user (admins and registered users are kept)
    ClearSeed,
    /// Delete expired sessions
    PurgeSessions,
    /// Apply pending database migrations
    Migrate,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let pool = match gsms_db::init_db_pool().await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("❌ Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::CreateAdmin {
            full_name,
            email,
            password,
        } => handle_create_admin(&pool, full_name, email, password).await,
        Commands::Seed {
            students,
            staff,
            parents,
        } => {
            let config = SeedConfig {
                students,
                staff,
                parents,
            };
            match seeder::seed_all(&pool, config).await {
                Ok(()) => refresh_pages().await,
                Err(e) => Err(e),
            }
        }
        Commands::ClearSeed => match seeder::clear_seed(&pool).await {
            Ok(deleted) => {
                println!("✅ Deleted {} seeded users", deleted);
                refresh_pages().await
            }
            Err(e) => Err(e),
        },
        Commands::PurgeSessions => purge_expired_sessions(&pool)
            .await
            .map(|purged| println!("✅ Deleted {} expired sessions", purged))
            .map_err(Into::into),
        Commands::Migrate => gsms_db::run_migrations(&pool)
            .await
            .map(|()| println!("✅ Migrations applied"))
            .map_err(Into::into),
    };

    if let Err(e) = result {
        eprintln!("\n❌ {:#}", e);
        std::process::exit(1);
    }
}

async fn refresh_pages() -> anyhow::Result<()> {
    match seeder::refresh_page_cache(&CacheConfig::from_env()).await? {
        Some(removed) => println!("🧹 Cleared {} cached pages", removed),
        None => println!("ℹ️  REDIS_URL not set, no page cache to clear"),
    }
    Ok(())
}

async fn handle_create_admin(
    pool: &PgPool,
    full_name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let full_name = match full_name {
        Some(name) => name,
        None => Input::<String>::new().with_prompt("Full name").interact_text()?,
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

    let identity_id = create_admin(pool, &email, &password, &full_name).await?;

    println!("\n✅ Admin created successfully!");
    println!("   Id: {}", identity_id);
    println!("   Email: {}", email);
    println!("   Name: {}", full_name);

    Ok(())
}
