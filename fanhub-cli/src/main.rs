//! FanHub CLI
//!
//! Command-line client for the esports fan dashboard: browse panels, watch
//! the dashboard refresh through the cache, or run the API server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fanhub_api::{ApiConfig, ApiServer};
use fanhub_cache::CacheConfig;
use fanhub_content::{ContentService, Dashboard, DashboardSnapshot, ProviderConfig, SimulatedProvider};
use fanhub_core::constants::{
    DEFAULT_CACHE_TTL_MINUTES, DEFAULT_NEWS_COUNT, DEFAULT_SCHEDULE_COUNT, DEFAULT_TRENDS_COUNT,
    DEFAULT_VIDEOS_COUNT,
};
use fanhub_core::types::{Esport, Match, NewsItem, Platform, Team, TeamStat, Trend, Video};

/// FanHub - Esports fan dashboard
#[derive(Parser)]
#[command(name = "fanhub")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Content cache lifetime in minutes
    #[arg(long, global = true, env = "FANHUB_CACHE_TTL_MINUTES", default_value_t = DEFAULT_CACHE_TTL_MINUTES)]
    ttl_minutes: u64,

    /// Skip the simulated provider's artificial delays
    #[arg(long, global = true)]
    no_delay: bool,

    /// Print JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Copy)]
struct Panel {
    /// csgo, valorant or lol
    #[arg(default_value = "csgo")]
    esport: Esport,
}

#[derive(Args, Clone, Copy)]
struct ListPanel {
    /// csgo, valorant or lol
    #[arg(default_value = "csgo")]
    esport: Esport,
    /// Number of items
    #[arg(short, long)]
    count: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Latest news
    News(ListPanel),

    /// Team roster
    Team(Panel),

    /// Upcoming matches
    Schedule(ListPanel),

    /// Season statistics
    Stats(Panel),

    /// Trending posts
    Trends {
        #[command(flatten)]
        panel: ListPanel,
        /// Only this platform (twitter, reddit, google)
        #[arg(short, long)]
        platform: Option<Platform>,
    },

    /// Videos
    Videos(ListPanel),

    /// Every panel at once
    Dashboard {
        /// csgo, valorant or lol
        #[arg(default_value = "csgo")]
        esport: Esport,
        /// Reload every N seconds until Ctrl+C
        #[arg(short, long)]
        refresh: Option<u64>,
        /// Stop after this many loads when refreshing
        #[arg(long)]
        rounds: Option<u32>,
    },

    /// Run the API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3001")]
        port: u16,
        /// Bind address
        #[arg(short, long, default_value = "0.0.0.0")]
        bind: String,
        /// Seconds between expired-entry sweeps (0 disables)
        #[arg(long, env = "FANHUB_SWEEP_INTERVAL_SECS", default_value = "0")]
        sweep_interval: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "fanhub=debug,info"
    } else {
        "fanhub=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let out = Output { json: cli.json };
    let service = || build_service(cli.ttl_minutes, cli.no_delay).map(Arc::new);

    match cli.command {
        Commands::News(p) => {
            let count = p.count.unwrap_or(DEFAULT_NEWS_COUNT);
            let news = out.loading("news", service()?.news(p.esport, count)).await?;
            out.emit(&news, || print_news(p.esport, &news))
        }
        Commands::Team(p) => {
            let team = out.loading("roster", service()?.team(p.esport)).await?;
            out.emit(&team, || print_team(&team))
        }
        Commands::Schedule(p) => {
            let count = p.count.unwrap_or(DEFAULT_SCHEDULE_COUNT);
            let matches = out
                .loading("schedule", service()?.schedule(p.esport, count))
                .await?;
            out.emit(&matches, || print_schedule(p.esport, &matches))
        }
        Commands::Stats(p) => {
            let stats = out.loading("stats", service()?.team_stats(p.esport)).await?;
            out.emit(&stats, || print_stats(p.esport, &stats))
        }
        Commands::Trends { panel, platform } => {
            let count = panel.count.unwrap_or(DEFAULT_TRENDS_COUNT);
            let trends = out
                .loading("trends", service()?.trends_on(panel.esport, count, platform))
                .await?;
            out.emit(&trends, || print_trends(panel.esport, &trends))
        }
        Commands::Videos(p) => {
            let count = p.count.unwrap_or(DEFAULT_VIDEOS_COUNT);
            let videos = out.loading("videos", service()?.videos(p.esport, count)).await?;
            out.emit(&videos, || print_videos(p.esport, &videos))
        }
        Commands::Dashboard {
            esport,
            refresh,
            rounds,
        } => cmd_dashboard(service()?, esport, refresh, rounds, out).await,
        Commands::Serve {
            port,
            bind,
            sweep_interval,
        } => {
            let config = ApiConfig {
                cache_ttl_minutes: cli.ttl_minutes,
                simulate_latency: !cli.no_delay,
                sweep_interval_secs: sweep_interval,
            };
            cmd_serve(config, port, &bind).await
        }
    }
}

fn build_service(ttl_minutes: u64, no_delay: bool) -> Result<ContentService> {
    let provider_config = if no_delay {
        ProviderConfig::instant()
    } else {
        ProviderConfig::default()
    };
    let provider = Arc::new(SimulatedProvider::with_config(provider_config));

    ContentService::with_cache_config(provider, CacheConfig::with_ttl_minutes(ttl_minutes))
        .context("Invalid cache configuration")
}

/// Load the dashboard once, or on a timer through the same cache
async fn cmd_dashboard(
    service: Arc<ContentService>,
    esport: Esport,
    refresh: Option<u64>,
    rounds: Option<u32>,
    out: Output,
) -> Result<()> {
    let dashboard = Dashboard::new(Arc::clone(&service));

    let Some(secs) = refresh.filter(|s| *s > 0) else {
        let snapshot = out.loading("dashboard", async { Ok(dashboard.load(esport).await) }).await?;
        return out.emit(&snapshot, || print_dashboard(&snapshot));
    };

    if !out.json {
        println!(
            "{} every {}s {}",
            "🔄 Refreshing".cyan().bold(),
            secs,
            "(Ctrl+C to stop)".dimmed()
        );
    }

    let mut interval = tokio::time::interval(Duration::from_secs(secs));
    let mut round = 0u32;
    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = tokio::signal::ctrl_c() => break,
        }

        round += 1;
        let started = std::time::Instant::now();
        let snapshot = dashboard.load(esport).await;
        let stats = service.cache_stats();

        out.emit(&snapshot, || {
            print_dashboard(&snapshot);
            println!(
                "\n   {} #{} in {:?} · {} hits / {} misses · {} cached",
                "Round".dimmed(),
                round,
                started.elapsed(),
                stats.hits,
                stats.misses,
                stats.valid_entries
            );
        })?;

        if rounds.is_some_and(|max| round >= max) {
            break;
        }
    }

    Ok(())
}

/// Run API server
async fn cmd_serve(config: ApiConfig, port: u16, bind: &str) -> Result<()> {
    println!("{}", "🚀 Starting FanHub API server...".cyan().bold());
    println!("   {} http://{}:{}", "Listening on:".green(), bind, port);
    println!("   {} http://{}:{}/health", "Health check:".dimmed(), bind, port);
    println!("   {} {} min", "Cache TTL:".dimmed(), config.cache_ttl_minutes);
    println!("\n   Press Ctrl+C to stop.\n");

    let server = ApiServer::new(config).context("Invalid server configuration")?;

    let addr: SocketAddr = format!("{}:{}", bind, port).parse()?;
    server.run(addr).await?;

    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// Output
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy)]
struct Output {
    json: bool,
}

impl Output {
    /// Shows a spinner while `fut` runs, unless printing JSON.
    async fn loading<T, F>(&self, what: &str, fut: F) -> Result<T>
    where
        F: std::future::Future<Output = fanhub_core::Result<T>>,
    {
        let spinner = (!self.json).then(|| {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
                pb.set_style(style);
            }
            pb.set_message(format!("Loading {}...", what));
            pb.enable_steady_tick(Duration::from_millis(80));
            pb
        });

        let result = fut.await;
        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }
        result.with_context(|| format!("Failed to load {}", what))
    }

    fn emit<T: Serialize>(&self, value: &T, pretty: impl FnOnce()) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            pretty();
        }
        Ok(())
    }
}

fn header(icon: &str, title: &str, esport: Esport) {
    println!("\n{} {} {}", icon, title.cyan().bold(), format!("[{}]", esport.label()).dimmed());
}

fn print_news(esport: Esport, news: &[NewsItem]) {
    header("📰", "News", esport);
    for item in news {
        println!("   {} {}", "•".green(), item.title.bold());
        println!(
            "     {} · {} · {}",
            item.category.yellow(),
            item.source.dimmed(),
            item.date.format("%Y-%m-%d").to_string().dimmed()
        );
        println!("     {}", item.excerpt);
    }
}

fn print_team(team: &Team) {
    header("🛡️ ", &team.name, team.esport);
    for player in &team.players {
        println!(
            "   {} {} {} {}",
            format!("{:<12}", player.nickname).green().bold(),
            format!("{:<10}", player.role).yellow(),
            player.name,
            format!("({})", player.country).dimmed()
        );
    }
    println!("   {} {} \"{}\"", "Coach:".dimmed(), team.coach.name, team.coach.nickname);
    for achievement in &team.achievements {
        println!("   {} {} ({})", "🏆", achievement.title, achievement.year);
    }
}

fn print_schedule(esport: Esport, matches: &[Match]) {
    header("📅", "Schedule", esport);
    for m in matches {
        println!(
            "   {} vs {} {} {}",
            m.date.format("%a %d %b %H:%M").to_string().yellow(),
            m.opponent.name.bold(),
            format!("{:?}", m.format).dimmed(),
            m.tournament.dimmed()
        );
    }
}

fn print_stats(esport: Esport, stats: &[TeamStat]) {
    header("📊", "Statistics", esport);
    for stat in stats {
        let filled = usize::from(stat.percentage.min(100)) / 5;
        println!(
            "   {:<16} {:>8}  {}{}",
            stat.label,
            stat.value.to_string().bold(),
            "█".repeat(filled).green(),
            "░".repeat(20 - filled).dimmed()
        );
    }
}

fn print_trends(esport: Esport, trends: &[Trend]) {
    header("🔥", "Trending", esport);
    for trend in trends {
        println!("   {} {}", format!("[{}]", trend.platform).magenta(), trend.content);
        println!(
            "     {} ♥ {} ↻ {} 💬 {}",
            trend.timestamp.format("%H:%M").to_string().dimmed(),
            trend.stats.likes,
            trend.stats.shares,
            trend.stats.comments
        );
    }
}

fn print_videos(esport: Esport, videos: &[Video]) {
    header("🎬", "Videos", esport);
    for video in videos {
        println!("   {} {}", "▶".red(), video.title.bold());
        println!("     {} · {} views", video.channel_name.dimmed(), video.views);
    }
}

fn print_dashboard(snapshot: &DashboardSnapshot) {
    print_news(snapshot.esport, &snapshot.news);
    match &snapshot.team {
        Some(team) => print_team(team),
        None => header("🛡️ ", "Team unavailable", snapshot.esport),
    }
    print_schedule(snapshot.esport, &snapshot.schedule);
    print_stats(snapshot.esport, &snapshot.stats);
    print_trends(snapshot.esport, &snapshot.trends);
    print_videos(snapshot.esport, &snapshot.videos);

    if !snapshot.is_complete() {
        let failed: Vec<_> = snapshot.failed_panels.iter().map(|k| k.as_str()).collect();
        println!("\n{} {}", "⚠️  Failed panels:".yellow().bold(), failed.join(", "));
    }
}
