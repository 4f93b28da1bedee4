use clap::{Parser, Subcommand};
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};

use wordchain_engine::{
    check_move, rank_of, GameConfig, LeaderboardEntry, LongestSequenceMatcher, WordChainEngine,
};

#[derive(Parser)]
#[command(name = "wordchain-cli")]
#[command(about = "Word-chain game CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Database path
    #[arg(short, long, default_value = "wordchain.db")]
    db: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a timed run in the terminal
    Play {
        /// Starting word (must be in the configured rotation)
        #[arg(short, long)]
        word: Option<String>,

        /// Submit the final score under this user id
        #[arg(short, long)]
        user: Option<String>,
    },

    /// Score a single move without a session
    Check {
        /// Current word
        base: String,

        /// Proposed new word
        candidate: String,
    },

    /// Show the rank for a score
    Rank {
        score: u32,
    },

    /// Show the top scores for a starting word
    Top {
        /// Starting word (defaults to the first configured word)
        #[arg(short, long)]
        word: Option<String>,

        /// Maximum results
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Show a player's best score
    Best {
        user: String,

        #[arg(short, long)]
        word: Option<String>,
    },

    /// Get leaderboard statistics
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = GameConfig::from_env()?;

    match cli.command {
        Commands::Check { base, candidate } => {
            match check_move(&LongestSequenceMatcher::new(), &base, &candidate) {
                Ok(turn) => {
                    println!("✅ {} -> {}", turn.from, turn.to);
                    println!("   {}", turn.describe());
                }
                Err(rejection) => println!("❌ {}", rejection),
            }
        }

        Commands::Rank { score } => {
            let rank = rank_of(score);
            println!("{}: {} - {}", score, rank.grade, rank.title);
        }

        Commands::Play { word, user } => {
            let engine = WordChainEngine::new(&cli.db, config).await?;
            play(&engine, word.as_deref(), user.as_deref()).await?;
        }

        Commands::Top { word, limit } => {
            let engine = WordChainEngine::new(&cli.db, config).await?;
            let entries = engine.top_scores(Some(limit), word.as_deref()).await?;

            if entries.is_empty() {
                println!("No scores yet.");
            }
            for (i, entry) in entries.iter().enumerate() {
                print_entry(i + 1, entry);
            }
        }

        Commands::Best { user, word } => {
            let engine = WordChainEngine::new(&cli.db, config).await?;
            match engine.user_best_score(&user, word.as_deref()).await? {
                Some(entry) => print_entry(1, &entry),
                None => println!("No scores for {}.", user),
            }
        }

        Commands::Stats => {
            let engine = WordChainEngine::new(&cli.db, config).await?;
            let stats = engine.stats().await?;

            println!("📊 Leaderboard Statistics:");
            println!("   Total entries: {}", stats.total_entries);
            println!("   Players: {}", stats.total_players);
            println!(
                "   Best score: {}",
                stats.best_score.map(|s| s.to_string()).unwrap_or_else(|| "N/A".to_string())
            );
            println!("   Avg score: {:.2}", stats.avg_score);
        }
    }

    Ok(())
}

async fn play(engine: &WordChainEngine, word: Option<&str>, user: Option<&str>) -> anyhow::Result<()> {
    let mut session = engine.new_session(word)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("🔤 Starting word: {}", session.current_word());
    println!(
        "   Keep 2+ consecutive letters, add letters only at the ends. The {}s timer starts with your first move.",
        session.time_limit().as_secs()
    );

    loop {
        let line = if session.turns().is_empty() {
            lines.next_line().await?
        } else {
            let remaining = session.remaining_at(Instant::now());
            if remaining.is_zero() {
                break;
            }
            match tokio::time::timeout(remaining, lines.next_line()).await {
                Ok(line) => line?,
                Err(_) => break,
            }
        };

        let Some(line) = line else { break };
        if line.trim().is_empty() {
            continue;
        }

        match engine.submit_move(&mut session, &line) {
            Ok(turn) => println!(
                "✅ {} | score {} | {}s left",
                turn.describe(),
                turn.running_total,
                session.remaining_at(Instant::now()).as_secs()
            ),
            Err(rejection) => println!("❌ {}", rejection),
        }

        if session.is_over() {
            break;
        }
    }

    session.expire_if_due(Instant::now());
    session.end();
    let summary = session.summary();

    println!("\n⏱️  Game over!");
    println!("   Final score: {}", summary.score);
    println!("   Rank: {} ({})", summary.rank.grade, summary.rank.title);
    println!("   Turns: {}", summary.turns_count);
    println!("   Avg/turn: {:.1}", summary.average_points);
    println!("   Best move: {}", summary.best_move);

    if !session.turns().is_empty() {
        println!("\n🔗 Word chain:");
        for turn in session.turns() {
            println!("   {} -> {} (\"{}\", +{})", turn.from, turn.to, turn.sequence, turn.points);
        }
    }

    if let Some(user) = user {
        let entry = engine.submit_score(user, session.submission()).await?;
        println!("\n🏆 Submitted as #{} ({} - {})", entry.id, entry.score, entry.rank);
    }

    Ok(())
}

fn print_entry(position: usize, entry: &LeaderboardEntry) {
    println!(
        "   {}. {} - {} [{}] {} turns ({})",
        position,
        entry.user_id,
        entry.score,
        entry.rank,
        entry.turns_count,
        entry.created_at.format("%Y-%m-%d %H:%M")
    );
}
