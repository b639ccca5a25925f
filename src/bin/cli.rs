use anyhow::Context;
use clap::{Parser, Subcommand};
use alumni_search_engine::{Candidate, Config, DirectoryFilter, SearchEngine};

#[derive(Parser)]
#[command(name = "alumni-search-cli")]
#[command(about = "Alumni Search Engine CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Database path (overrides DB_PATH)
    #[arg(short, long)]
    db: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search verified alumni
    Search {
        /// Search query
        query: String,

        /// Skip the semantic ranker even if configured
        #[arg(long)]
        local: bool,
    },

    /// List the public directory
    List {
        #[arg(long)]
        branch: Option<String>,

        /// Substring of field
        #[arg(long)]
        field: Option<String>,

        /// Substring of city
        #[arg(long)]
        city: Option<String>,

        #[arg(long)]
        year: Option<i32>,
    },

    /// Import alumni records from a JSON array file
    Import {
        /// Path to JSON file
        path: String,
    },

    /// Mark an alumni record verified (or unverified with --revoke)
    Verify {
        id: i64,

        #[arg(long)]
        revoke: bool,
    },

    /// Get store statistics
    Stats,
}

fn print_alumni(alumni: &[Candidate]) {
    for (i, alumnus) in alumni.iter().enumerate() {
        let work = match (&alumnus.field, &alumnus.company) {
            (Some(field), Some(company)) => format!("{} at {}", field, company),
            (Some(field), None) => field.clone(),
            (None, Some(company)) => company.clone(),
            (None, None) => "N/A".to_string(),
        };
        println!(
            "   {}. {} - {} [{}]",
            i + 1,
            alumnus.display_name(),
            work,
            alumnus.location().unwrap_or_else(|| "Unknown".to_string())
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(db) = cli.db {
        config.db_path = db;
    }

    let engine = SearchEngine::from_config(&config)?;

    match cli.command {
        Commands::Search { query, local } => {
            println!("🔍 Searching for: {}", query);

            let result = if local {
                engine.search_local(&query).await?
            } else {
                engine.search(&query).await?
            };

            println!(
                "\n✅ Found {} alumni ({})",
                result.count,
                if result.ai_powered { "AI-powered" } else { "fuzzy match" }
            );
            print_alumni(&result.data);
        }

        Commands::List { branch, field, city, year } => {
            let filter = DirectoryFilter {
                branch,
                field,
                city,
                graduation_year: year,
            };

            let result = engine.directory(&filter).await?;

            println!("📋 {} alumni", result.count);
            print_alumni(&result.data);
        }

        Commands::Import { path } => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path))?;
            let alumni: Vec<Candidate> = serde_json::from_str(&raw)
                .with_context(|| format!("parsing {}", path))?;

            let written = engine.import(&alumni).await?;

            println!("✅ Imported {} alumni", written);
        }

        Commands::Verify { id, revoke } => {
            engine.verify(id, !revoke).await?;

            println!("✅ Alumni {} {}", id, if revoke { "unverified" } else { "verified" });
        }

        Commands::Stats => {
            let stats = engine.stats().await?;

            println!("📊 Store Statistics:");
            println!("   Total alumni: {}", stats.total);
            println!("   Verified: {}", stats.verified);
            println!("   Pending verification: {}", stats.pending);

            if !stats.by_branch.is_empty() {
                println!("\n   By branch:");
                for entry in &stats.by_branch {
                    println!("   {:<8} {}", entry.branch, entry.count);
                }
            }
        }
    }

    Ok(())
}
