/// Register teacher usernames in the credential table.
///
/// Usage: seed-teachers USERNAME... [--display-name NAME]
///   Existing usernames are left untouched.

use clap::Parser;

use announcements_api::db::{self, teachers::PgCredentialGate};

#[derive(Parser)]
#[command(name = "seed-teachers", about = "Register teachers allowed to manage announcements")]
struct Args {
    /// Usernames to register
    #[arg(required = true)]
    usernames: Vec<String>,

    /// Display name stored with every username in this run
    #[arg(long)]
    display_name: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable not set"))?;

    let pool = db::create_pool(&database_url).await?;
    db::run_migrations(&pool).await?;
    let gate = PgCredentialGate::new(pool);

    for username in args.usernames.iter().map(|u| u.trim()).filter(|u| !u.is_empty()) {
        if gate.register(username, args.display_name.as_deref()).await? {
            tracing::info!("Registered teacher {}", username);
        } else {
            tracing::info!("Teacher {} already registered", username);
        }
    }

    Ok(())
}
