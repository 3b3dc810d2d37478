use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use pointpilot_core::{ScoringConfig, Transaction};
use pointpilot_ingest::{
    ReaderOptions, ScoredRow, read_amex_csv, read_transactions_csv, write_csv, write_json,
    write_scored_csv,
};
use pointpilot_rewards::{
    DropCounts, InsightKind, InsightOptions, Overview, ScoringEngine, best_cards_by_category,
    generate_insights, summarize_by_card, summarize_by_category, top_missed_categories,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod report;
mod state;

use config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "pointpilot",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("POINTPILOT_BUILD_SHA"), ")"),
    about = "Score card transactions against the best card in your wallet"
)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Transactions CSV (defaults to scoring.transactions_path from config)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Treat --csv as an AMEX statement export attributed to this card
    #[arg(long, value_name = "CARD")]
    amex: Option<String>,

    #[command(flatten)]
    rules: RulesArg,
}

#[derive(Args, Debug)]
struct RulesArg {
    /// Card table + override rules (.toml/.yaml)
    #[arg(long)]
    rules: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Json,
    Csv,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum GroupBy {
    Card,
    Category,
    Both,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score every transaction and print or save the enriched rows
    Score {
        #[command(flatten)]
        input: InputArgs,

        /// Write enriched rows to this CSV instead of printing
        #[arg(long)]
        out: Option<PathBuf>,

        /// Only show rows where a better card existed
        #[arg(long)]
        only_missed: bool,

        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },

    /// Per-card / per-category totals and optimization rates
    Summary {
        #[command(flatten)]
        input: InputArgs,

        #[arg(long, value_enum, default_value_t = GroupBy::Both)]
        by: GroupBy,

        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },

    /// Best card for each category from the rules alone
    BestCards {
        #[command(flatten)]
        rules: RulesArg,

        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },

    /// Plain-language insights about missed points
    Insights {
        #[command(flatten)]
        input: InputArgs,

        /// Limit number of insights printed
        #[arg(long, default_value_t = 20)]
        limit: usize,

        /// Skip per-transaction messages
        #[arg(long)]
        no_transactions: bool,
    },

    /// Manage ~/.pointpilot/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write default config if none exists
    Init,
    /// Print the effective config
    Show,
}

/// Directive used when RUST_LOG is unset. Scoped to our crates so
/// dependencies stay quiet.
fn default_log_directive(verbose: bool) -> &'static str {
    if verbose { "pointpilot=debug" } else { "pointpilot=info" }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_directive(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cfg = config::load_config()?;

    match cli.command {
        Command::Score {
            input,
            out,
            only_missed,
            format,
        } => {
            let (engine, txns) = load(&input, &cfg)?;
            let outcome = engine.score_batch(&txns);
            report_drops(txns.len(), &outcome.dropped);

            let rows: Vec<_> = outcome
                .scored
                .into_iter()
                .filter(|s| !only_missed || !s.used_best_card)
                .collect();

            if let Some(path) = out {
                write_scored_csv(&path, &rows)?;
                info!(rows = rows.len(), path = %path.display(), "wrote scored transactions");
                return Ok(());
            }

            match format {
                Format::Table => {
                    report::print_overview(&Overview::from_scored(&rows));
                    report::print_scored(&rows);
                }
                Format::Json => write_json(std::io::stdout().lock(), &rows)?,
                Format::Csv => {
                    let flat: Vec<ScoredRow> = rows.iter().map(ScoredRow::from).collect();
                    write_csv(std::io::stdout().lock(), &flat)?;
                }
            }
        }

        Command::Summary { input, by, format } => {
            let (engine, txns) = load(&input, &cfg)?;
            let outcome = engine.score_batch(&txns);
            report_drops(txns.len(), &outcome.dropped);

            let scored = &outcome.scored;
            let cards = summarize_by_card(scored);
            let categories = summarize_by_category(scored);
            let want_cards = matches!(by, GroupBy::Card | GroupBy::Both);
            let want_categories = matches!(by, GroupBy::Category | GroupBy::Both);

            match format {
                Format::Table => {
                    report::print_overview(&Overview::from_scored(scored));
                    if want_cards {
                        report::print_card_summary(&cards, cfg.report.point_value);
                    }
                    if want_categories {
                        report::print_category_summary("By category (points earned)", &categories);
                        report::print_category_summary(
                            "Top missed categories",
                            &top_missed_categories(scored),
                        );
                    }
                }
                Format::Json => {
                    let body = serde_json::json!({
                        "overview": Overview::from_scored(scored),
                        "cards": if want_cards { Some(&cards) } else { None },
                        "categories": if want_categories { Some(&categories) } else { None },
                    });
                    write_json(std::io::stdout().lock(), &body)?;
                }
                Format::Csv => {
                    if want_cards && want_categories {
                        bail!("--format csv needs a single table: pass --by card or --by category");
                    }
                    if want_cards {
                        write_csv(std::io::stdout().lock(), &cards)?;
                    } else {
                        write_csv(std::io::stdout().lock(), &categories)?;
                    }
                }
            }
        }

        Command::BestCards { rules, format } => {
            let scoring = load_rules(&rules, &cfg)?;
            let engine = ScoringEngine::new(&scoring);
            let rows = best_cards_by_category(engine.rule_store());
            match format {
                Format::Table => report::print_best_cards(&rows),
                Format::Json => write_json(std::io::stdout().lock(), &rows)?,
                Format::Csv => bail!("best-cards supports --format table or json"),
            }
        }

        Command::Insights {
            input,
            limit,
            no_transactions,
        } => {
            let (engine, txns) = load(&input, &cfg)?;
            let outcome = engine.score_batch(&txns);
            report_drops(txns.len(), &outcome.dropped);

            let opts = InsightOptions {
                per_transaction: !no_transactions,
                point_value: cfg.report.point_value,
                redemption_threshold: cfg.report.redemption_threshold,
                ..InsightOptions::default()
            };
            let mut insights = generate_insights(&outcome.scored, &opts);
            // Aggregate insights are more useful than the per-row tail.
            insights.sort_by_key(|i| {
                matches!(i.kind, InsightKind::Optimal | InsightKind::Missed)
            });
            insights.truncate(limit);
            report::print_insights(&insights);
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn load_rules(arg: &RulesArg, cfg: &Config) -> Result<ScoringConfig> {
    let path = arg
        .rules
        .clone()
        .unwrap_or_else(|| PathBuf::from(&cfg.scoring.rules_path));
    ScoringConfig::from_path(&path).with_context(|| format!("loading rules from {}", path.display()))
}

fn load(input: &InputArgs, cfg: &Config) -> Result<(ScoringEngine, Vec<Transaction>)> {
    let scoring = load_rules(&input.rules, cfg)?;
    let csv_path = input
        .csv
        .clone()
        .unwrap_or_else(|| PathBuf::from(&cfg.scoring.transactions_path));

    let txns = match &input.amex {
        Some(card) => read_amex_csv(&csv_path, card)?,
        None => {
            let opts = ReaderOptions {
                charges_negative: cfg.scoring.charges_negative,
                default_account: None,
            };
            read_transactions_csv(&csv_path, &opts)?
        }
    };
    info!(rows = txns.len(), path = %csv_path.display(), "read transactions");

    Ok((ScoringEngine::new(&scoring), txns))
}

fn report_drops(total: usize, dropped: &DropCounts) {
    if dropped.total() > 0 {
        eprintln!(
            "{} of {} rows excluded: {} non-credit accounts, {} unrecognized accounts, {} transfers/payments/refunds",
            dropped.total(),
            total,
            dropped.non_credit_account,
            dropped.unrecognized_account,
            dropped.ineligible
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_directive_scoped_to_pointpilot() {
        assert_eq!(default_log_directive(false), "pointpilot=info");
        assert_eq!(default_log_directive(true), "pointpilot=debug");
        assert!(EnvFilter::try_new(default_log_directive(true)).is_ok());
    }

    #[test]
    fn test_verbose_flag_is_global() {
        let cli = Cli::try_parse_from(["pointpilot", "best-cards", "--verbose"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::BestCards { .. }));
    }
}
