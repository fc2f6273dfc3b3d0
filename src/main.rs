//! Sparq CLI
//!
//! Usage:
//!   sparq --interactive --user alice             # Swipe through the catalog
//!   sparq --interactive --gender female          # Only show women
//!   sparq --insights --user alice                # Print learned preferences
//!   sparq --serve                                # HTTP API server
//!   sparq --insights --user alice --json         # JSON output

use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sparq::core::{
    build_insights, predict, record_swipe_with_outcome, run_server, GenderFilter, JsonFileRepository,
    PreferenceRepository, ProfileCatalog,
};
use sparq::types::{PreferenceInsights, PreferenceModel, Profile};
use sparq::{PREDICTION_MIN_CONFIDENCE, VERSION};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GenderArg {
    Male,
    Female,
    All,
}

impl From<GenderArg> for GenderFilter {
    fn from(arg: GenderArg) -> Self {
        match arg {
            GenderArg::Male => GenderFilter::Male,
            GenderArg::Female => GenderFilter::Female,
            GenderArg::All => GenderFilter::All,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "sparq",
    version = VERSION,
    about = "Sparq - learn visual dating preferences from swipes",
    long_about = "Sparq learns which visual types and features a user prefers from\n\
                  like/dislike swipes, and predicts how much they will like\n\
                  profiles they have not seen yet.\n\n\
                  Modes:\n  \
                  --interactive  Swipe through the demo catalog\n  \
                  --insights     Print what has been learned so far\n  \
                  --serve        HTTP API server mode\n\n\
                  Predictions stay neutral (0.50) until 4 swipes are recorded;\n\
                  confidence reaches 100% at 20 swipes."
)]
struct Args {
    /// Interactive swipe mode - read y/n from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Print insights for the user and exit
    #[arg(long)]
    insights: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address (default: 127.0.0.1:3000)
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// User whose model is loaded and saved
    #[arg(short, long, default_value = "demo-user")]
    user: String,

    /// Which profiles to show in interactive mode
    #[arg(short, long, value_enum, default_value = "all")]
    gender: GenderArg,

    /// Directory holding saved preference models
    #[arg(long, default_value = "./preferences")]
    data_dir: PathBuf,

    /// Profile catalog JSON (default: bundled demo profiles)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors; swipe results print as key=value lines
    #[arg(long)]
    no_color: bool,

    /// Show the prediction for each profile before swiping
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    let catalog = match &args.catalog {
        Some(path) => match ProfileCatalog::load(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                error!(code = e.code(), path = %path.display(), "could not load catalog");
                eprintln!("Could not load catalog {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => ProfileCatalog::builtin(),
    };
    let repository = JsonFileRepository::new(&args.data_dir);

    if args.serve {
        run_serve(&args, repository, catalog).await;
    } else if args.insights {
        run_insights(&args, &repository);
    } else {
        // Default to interactive if no mode specified
        run_interactive(&args, &repository, &catalog);
    }
}

fn load_or_exit(repository: &JsonFileRepository, user: &str) -> PreferenceModel {
    match repository.load(user) {
        Ok(model) => model,
        Err(e) => {
            error!(code = e.code(), user, "could not load model");
            eprintln!("Could not load model for {}: {}", user, e);
            std::process::exit(1);
        }
    }
}

/// Print insights and exit
fn run_insights(args: &Args, repository: &JsonFileRepository) {
    let model = load_or_exit(repository, &args.user);
    let insights = build_insights(&model);

    if args.json {
        match serde_json::to_string_pretty(&insights) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Could not serialize insights: {}", e),
        }
    } else {
        print_insights(&insights);
    }
}

/// Run interactive swipe mode
fn run_interactive(args: &Args, repository: &JsonFileRepository, catalog: &ProfileCatalog) {
    let profiles = catalog.by_gender(args.gender.into());
    if profiles.is_empty() {
        println!("No profiles to show.");
        return;
    }

    let mut model = load_or_exit(repository, &args.user);
    info!(user = %args.user, swipes = model.total_swipes(), "interactive session started");

    print_header(&args.user);
    println!("y = like, n = pass, s = insights, quit = save and exit");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut index = 0usize;

    loop {
        let profile = profiles[index % profiles.len()];
        print_profile(profile, &model, args.verbose);
        print!("{} ", format!("[{}%] >", model.confidence()).purple());
        if stdout.flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        let liked = match line.to_ascii_lowercase().as_str() {
            "quit" | "exit" => break,
            "y" | "yes" | "like" => true,
            "n" | "no" | "pass" => false,
            "s" | "stats" | "insights" => {
                print_insights(&build_insights(&model));
                continue;
            }
            _ => continue,
        };

        match record_swipe_with_outcome(model.clone(), profile, liked) {
            Ok((next, outcome)) => {
                model = next;
                if args.json {
                    match serde_json::to_string(&outcome) {
                        Ok(json) => println!("{}", json),
                        Err(e) => eprintln!("Could not serialize outcome: {}", e),
                    }
                } else if args.no_color {
                    println!("{}", outcome.to_parseable_string());
                } else {
                    println!("{}", outcome.to_terminal_string());
                }
                if let Err(e) = repository.save(&model) {
                    eprintln!("Could not save model: {}", e);
                }
            }
            Err(e) => eprintln!("Skipping {}: {}", profile.id, e),
        }
        println!();
        index += 1;
    }

    println!("\nSession ended. Swipes: {} | confidence: {}%", model.total_swipes(), model.confidence());
}

async fn run_serve(args: &Args, repository: JsonFileRepository, catalog: ProfileCatalog) {
    println!("{} Sparq API on {}", "♥".red(), args.addr);
    println!("  GET  /profiles                          - Filtered catalog");
    println!("  GET  /users/:id/model                   - Stored model");
    println!("  POST /users/:id/swipe                   - Record swipe");
    println!("  GET  /users/:id/predict/:profile_id     - Prediction");
    println!("  GET  /users/:id/top-categories          - Ranked categories");
    println!("  GET  /users/:id/insights                - Insights");
    println!("  GET  /users/:id/recommendations         - Ranked candidates");
    println!("  WS   /ws/:id                            - Live updates");
    println!("  GET  /health                            - Health check");
    println!("  models stored in {}", repository.dir().display());

    let repository: Arc<dyn PreferenceRepository> = Arc::new(repository);
    if let Err(e) = run_server(&args.addr, repository, catalog).await {
        error!(error = %e, "server stopped");
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}

// =============================================================================
// DISPLAY HELPERS
// =============================================================================

fn print_header(user: &str) {
    println!("{}", "═══════════════════════════════════════════".purple());
    println!("  {} Sparq v{} - Discover", "♥".red(), VERSION);
    println!("  user: {}", user.bold());
    println!("{}", "═══════════════════════════════════════════".purple());
}

fn print_profile(profile: &Profile, model: &PreferenceModel, verbose: bool) {
    println!("{}, {}  {}", profile.name.bold(), profile.age, profile.location.dimmed());
    if let Some(category) = profile.visual_type {
        println!("  {}", category.as_str().purple());
    }
    println!("  {}", profile.bio);
    if !profile.interests.is_empty() {
        println!("  {}", profile.interests.join(" · ").cyan());
    }
    if verbose {
        let score = predict(model, profile);
        let note = if model.confidence() < PREDICTION_MIN_CONFIDENCE {
            " (still learning)"
        } else {
            ""
        };
        println!("  predicted match: {:.2}{}", score, note);
    }
}

fn print_insights(insights: &PreferenceInsights) {
    println!();
    println!(
        "{} based on {} swipes (confidence {}%)",
        "Visual Preference Insights".bold(),
        insights.total_swipes,
        insights.confidence
    );
    println!();
    for c in &insights.categories {
        let bar_len = (c.percentage / 10.0).round() as usize;
        let bar = format!("{:<10}", "█".repeat(bar_len));
        let name = format!("{:<13}", c.category.as_str());
        let name = if c.score > 0.0 { name.purple().bold() } else { name.normal() };
        println!("  {} {} {:>3.0}%  {}", name, bar.purple(), c.percentage, c.strength.to_string().dimmed());
    }
    println!();
    for f in insights.features.iter().filter(|f| !f.top_values.is_empty()) {
        let values: Vec<String> = f
            .top_values
            .iter()
            .map(|v| format!("{} ({:.0}%)", v.value, v.percentage))
            .collect();
        println!("  {:<12} {}", f.feature.as_str(), values.join(", "));
    }
    println!();
}
