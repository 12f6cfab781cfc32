use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use ich_risk::config::ColorMode;
use ich_risk::scoring::{ScoreTable, ScoreVariant, ScoringError, Selection};

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;
const EXIT_IO: i32 = 5;

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
    Tsv,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score the given risk factors (by name or id, see `factors`)
    Score {
        /// Risk factors present, e.g. va-ecmo "Acute ischemic stroke"
        factors: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Also print the reference chart
        #[arg(long)]
        chart: bool,
    },
    /// List the risk factors and their points
    Factors,
    /// Print the reference chart of risk by score range
    Chart,
    /// Interactive checklist calculator (default if no subcommand)
    Tui,
    /// Create a config file
    Init {
        /// Write the default config without prompting
        #[arg(long)]
        defaults: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "ich-risk")]
#[command(about = "ICH risk score calculator for AMI-CS", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/ich-risk/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Point table variant (overrides config)
    #[arg(long, value_enum, global = true)]
    variant: Option<ScoreVariant>,

    /// When to color output (overrides config)
    #[arg(long, value_enum, global = true)]
    color: Option<ColorMode>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    ich_risk::logging::init(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Tui);
    let config_path = cli.config.map(PathBuf::from);

    // Init runs before config loading so it can replace a broken config
    if let Commands::Init { defaults } = command {
        if let Err(e) = ich_risk::config::run_init_wizard(config_path, defaults) {
            eprintln!("Init failed: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    let config = match ich_risk::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let variant = cli.variant.unwrap_or_else(|| config.variant());
    let use_colors = cli.color.unwrap_or_else(|| config.color()).use_colors();
    log::debug!("Using {} point table", variant);

    // Validate the score table at startup
    let table = ScoreTable::new(variant);
    if let Err(errors) = ich_risk::scoring::validate_table(&table) {
        eprintln!("Score table errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    match command {
        Commands::Score { factors, format, chart } => {
            let selection: Selection = factors.into_iter().collect();
            let evaluation = match ich_risk::scoring::evaluate(&table, &selection) {
                Ok(e) => e,
                Err(e @ ScoringError::UnknownFactor(_)) => {
                    eprintln!("{}", e);
                    eprintln!("Run `ich-risk factors` to see valid names and ids.");
                    std::process::exit(EXIT_INPUT);
                }
                Err(e) => {
                    eprintln!("Scoring error: {}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };
            log::debug!(
                "Evaluated {} factors: score {}",
                evaluation.breakdown.len(),
                evaluation.score
            );

            match format {
                OutputFormat::Text => {
                    println!(
                        "{}",
                        ich_risk::output::format_result(&evaluation, use_colors, cli.verbose)
                    );
                    if chart {
                        println!();
                        println!(
                            "{}",
                            ich_risk::output::format_chart(
                                &table.chart_rows(),
                                Some(evaluation.category),
                                use_colors
                            )
                        );
                    }
                }
                OutputFormat::Json => match ich_risk::output::format_json(&evaluation) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Failed to serialize result: {:#}", e);
                        std::process::exit(EXIT_IO);
                    }
                },
                OutputFormat::Tsv => println!("{}", ich_risk::output::format_tsv(&evaluation)),
            }
        }
        Commands::Factors => {
            println!(
                "This score estimates the risk of intracranial hemorrhage (ICH) in patients with AMI-CS."
            );
            println!();
            println!("{}", ich_risk::output::format_factor_list(&table, use_colors));
        }
        Commands::Chart => {
            println!(
                "{}",
                ich_risk::output::format_chart(&table.chart_rows(), None, use_colors)
            );
        }
        Commands::Tui => {
            let colors = ich_risk::tui::resolve_theme(config.theme());
            let app = ich_risk::tui::App::new(variant, colors);
            if let Err(e) = ich_risk::tui::run_tui(app).await {
                eprintln!("Terminal error: {:#}", e);
                std::process::exit(EXIT_IO);
            }
        }
        // Handled before config loading
        Commands::Init { .. } => {}
    }

    std::process::exit(EXIT_SUCCESS);
}
