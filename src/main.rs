use std::io::IsTerminal;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use miette::{Context, IntoDiagnostic, Result};

use tailed_core::{ContributionSummary, OutputFormat, TailedConfig};
use tailed_github::calendar::{parse_calendar_response, parse_weeks};
use tailed_github::client::GitHubClient;
use tailed_github::fetch::{fetch_two_years, TwoYearCalendar};

const CONFIG_FILE: &str = ".tailed.toml";

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Parser)]
#[command(
    name = "tailed",
    version,
    about = "GitHub contribution analytics for Tail'ed profiles",
    long_about = "Derives the contribution statistics shown on a Tail'ed student profile:\n\
                   totals, current and longest streak, weekly heatmap, weekday and monthly activity.\n\n\
                   Examples:\n  \
                     tailed fetch --user octocat          Fetch two years from GitHub and analyze\n  \
                     tailed analyze --file calendar.json  Analyze a saved calendar\n  \
                     tailed fetch --user octocat --format json"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to configuration file (default: .tailed.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        global = true,
        default_value = "text",
        long_help = "Output format for command results.\n\n\
                       Formats:\n  \
                         text      Human-readable summary (default)\n  \
                         json      Profile summary JSON with camelCase keys\n  \
                         markdown  GitHub-flavored Markdown"
    )]
    format: OutputFormat,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a saved contributions calendar
    #[command(long_about = "Analyze a saved contributions calendar.\n\n\
        Accepts a raw GraphQL response, a JSON array of weeks, or an object with\n\
        \"older\" and \"newer\" week arrays. Reads stdin when --file is omitted.\n\n\
        Examples:\n  tailed analyze --file calendar.json --today 2024-06-15\n  cat response.json | tailed analyze")]
    Analyze {
        /// Read the calendar from a file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,

        /// Reference date for the current streak (default: today, local time)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Fetch two years of contributions from GitHub and analyze them
    #[command(long_about = "Fetch two years of contributions from GitHub and analyze them.\n\n\
        Queries the GraphQL contributions calendar for the most recent year and the\n\
        year before it, concurrently. A window that fails is treated as empty.\n\
        Requires GITHUB_TOKEN, GH_TOKEN, --token, or [github].token in .tailed.toml.\n\n\
        Examples:\n  tailed fetch --user octocat\n  tailed fetch --user octocat --format json")]
    Fetch {
        /// GitHub login (default: default_user from config)
        #[arg(long)]
        user: Option<String>,

        /// GitHub token (overrides config and environment)
        #[arg(long)]
        token: Option<String>,

        /// Reference date for the windows and streak (default: today, local time)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Create a default .tailed.toml configuration file
    Init,
    /// Generate shell completion scripts
    #[command(hide = true)]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

const DEFAULT_CONFIG: &str = r#"# Tail'ed Configuration

# GitHub login used by `tailed fetch` when --user is omitted
# default_user = "octocat"

[github]
# api_url = "https://api.github.com/graphql"
# token = "ghp_..."   # prefer the GITHUB_TOKEN env var
# timeout_secs = 30
# user_agent = "tailed"
"#;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();
}

fn load_config(path: Option<&Path>) -> Result<TailedConfig> {
    let config = match path {
        Some(path) => TailedConfig::from_file(path)?,
        None => {
            let default_path = Path::new(CONFIG_FILE);
            if default_path.exists() {
                TailedConfig::from_file(default_path)?
            } else {
                TailedConfig::default()
            }
        }
    };
    Ok(config)
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err(format!("reading {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .into_diagnostic()
                .wrap_err("reading stdin")?;
            Ok(input)
        }
    }
}

/// Interpret a saved calendar in any of the accepted shapes.
fn parse_calendar_input(input: &str) -> Result<TwoYearCalendar> {
    let value: serde_json::Value = serde_json::from_str(input)
        .into_diagnostic()
        .wrap_err("calendar input is not valid JSON")?;

    if value.is_array() {
        return Ok(TwoYearCalendar {
            older: Vec::new(),
            newer: parse_weeks(&value)?,
        });
    }
    if value.get("data").is_some() || value.get("errors").is_some() {
        return Ok(TwoYearCalendar {
            older: Vec::new(),
            newer: parse_calendar_response(&value)?,
        });
    }
    if value.get("older").is_some() || value.get("newer").is_some() {
        let window = |key: &str| match value.get(key) {
            Some(weeks) => parse_weeks(weeks),
            None => Ok(Vec::new()),
        };
        return Ok(TwoYearCalendar {
            older: window("older")?,
            newer: window("newer")?,
        });
    }

    miette::bail!(miette::miette!(
        help = "expected a GraphQL response, an array of weeks, or {\"older\": [...], \"newer\": [...]}",
        "unrecognized calendar input"
    ))
}

fn today_or_local(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| chrono::Local::now().date_naive())
}

fn print_summary(
    summary: &ContributionSummary,
    login: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(summary).into_diagnostic()?);
        }
        OutputFormat::Markdown => {
            match login {
                Some(login) => println!("# Contributions: {login}\n"),
                None => println!("# Contributions\n"),
            }
            println!("| Metric | Value |");
            println!("|--------|-------|");
            println!("| Total contributions | {} |", summary.contribution_count);
            println!("| Current streak | {} days |", summary.current_streak);
            println!("| Longest streak | {} days |", summary.max_streak);
            println!("| Active days per week | {:.1} |", summary.active_days_per_week);
            println!(
                "| Average per day | {:.1} |",
                summary.average_contributions_per_day
            );
            match &summary.most_productive_day {
                Some(day) => println!(
                    "| Most productive day | {} ({}) |",
                    day.date, day.contributions
                ),
                None => println!("| Most productive day | n/a |"),
            }
            println!();

            println!("## Activity by weekday\n");
            println!("| Day | Contributions |");
            println!("|-----|---------------|");
            for (label, count) in WEEKDAYS.iter().zip(summary.day_of_week_activity) {
                println!("| {label} | {count} |");
            }
            println!();

            println!("## Most active months\n");
            if summary.monthly_activity.is_empty() {
                println!("No activity recorded.\n");
            } else {
                println!("| Rank | Month | Contributions |");
                println!("|------|-------|---------------|");
                for (i, month) in summary.monthly_activity.iter().take(12).enumerate() {
                    println!("| {} | {} | {} |", i + 1, month.month, month.count);
                }
                println!();
            }
        }
        OutputFormat::Text => {
            if let Some(login) = login {
                println!("Contributions for {login}\n");
            }
            println!("Total contributions:  {}", summary.contribution_count);
            println!("Current streak:       {} days", summary.current_streak);
            println!("Longest streak:       {} days", summary.max_streak);
            println!("Active days per week: {:.1}", summary.active_days_per_week);
            println!(
                "Average per day:      {:.1}",
                summary.average_contributions_per_day
            );
            match &summary.most_productive_day {
                Some(day) => println!(
                    "Most productive day:  {} ({} contributions)",
                    day.date, day.contributions
                ),
                None => println!("Most productive day:  n/a"),
            }
            println!("Weeks in calendar:    {}", summary.weekly_contributions.len());

            println!("\nBy weekday:");
            for (label, count) in WEEKDAYS.iter().zip(summary.day_of_week_activity) {
                println!("  {label}  {count}");
            }

            if !summary.monthly_activity.is_empty() {
                println!("\nMost active months:");
                for month in summary.monthly_activity.iter().take(5) {
                    println!("  {}  {}", month.month, month.count);
                }
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .build(),
        )
    }))
    .into_diagnostic()?;
    human_panic::setup_panic!();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Analyze { ref file, today } => {
            let input = read_input(file.as_deref())?;
            let calendar = parse_calendar_input(&input)?;
            let today = today_or_local(today);
            tracing::debug!(
                %today,
                older = calendar.older.len(),
                newer = calendar.newer.len(),
                "analyzing calendar input"
            );

            let summary = tailed_streaks::analyze(&calendar.older, &calendar.newer, today);
            print_summary(&summary, None, cli.format)?;
        }
        Command::Fetch {
            ref user,
            ref token,
            today,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let Some(login) = user.clone().or_else(|| config.default_user.clone()) else {
                miette::bail!(miette::miette!(
                    help = "Pass --user or set default_user in .tailed.toml",
                    "No GitHub user to fetch"
                ));
            };
            let today = today_or_local(today);
            let client = GitHubClient::new(&config.github, token.as_deref())?;

            let spinner = if std::io::stderr().is_terminal() {
                let pb = indicatif::ProgressBar::new_spinner();
                pb.set_style(
                    indicatif::ProgressStyle::with_template("{spinner:.cyan} {msg} ({elapsed})")
                        .unwrap_or_else(|_| indicatif::ProgressStyle::default_spinner()),
                );
                pb.set_message(format!("Fetching contributions for {login}..."));
                pb.enable_steady_tick(std::time::Duration::from_millis(120));
                Some(pb)
            } else {
                None
            };

            let calendar = fetch_two_years(&client, &login, today).await;

            if let Some(pb) = spinner {
                pb.finish_and_clear();
            }
            if calendar.is_empty() {
                tracing::warn!(login = %login, "no contribution data returned for either window");
            }

            let summary = tailed_streaks::analyze(&calendar.older, &calendar.newer, today);
            print_summary(&summary, Some(&login), cli.format)?;
        }
        Command::Init => {
            let path = Path::new(CONFIG_FILE);
            if path.exists() {
                miette::bail!("{CONFIG_FILE} already exists");
            }
            std::fs::write(path, DEFAULT_CONFIG).into_diagnostic()?;
            println!("Created {CONFIG_FILE} with default configuration");
        }
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "tailed", &mut std::io::stdout());
        }
    }

    Ok(())
}
