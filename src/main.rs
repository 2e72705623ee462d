use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use vote_ratios::analysis::MonotonicPolicy;
use vote_ratios::commands::{analyze, download, info, PipelineError};
use vote_ratios::config::PipelineConfig;
use vote_ratios::download::DEFAULT_URL_TEMPLATE;
use vote_ratios::formats::nyt::{CandidateKeys, DEFAULT_DEM_KEY, DEFAULT_REP_KEY};
use vote_ratios::states::select_states;

#[derive(Parser)]
struct Opts {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Download raw race pages for each state.
    Download {
        /// Raw data directory
        #[clap(long, default_value = "data")]
        data_dir: PathBuf,
        /// Only these states (name or slug); repeatable
        #[clap(long = "state")]
        states: Vec<String>,
        /// Race page URL, with `{slug}` standing in for the state
        #[clap(long, default_value = DEFAULT_URL_TEMPLATE)]
        url_template: String,
    },
    /// Compute per-batch D/R ratios, write the CSV table and plots.
    Analyze {
        /// Raw data directory
        #[clap(long, default_value = "data")]
        data_dir: PathBuf,
        /// CSV output path
        #[clap(long, default_value = "vote_ratios.csv")]
        output: PathBuf,
        /// Plot output directory
        #[clap(long, default_value = ".")]
        plot_dir: PathBuf,
        /// Only these states (name or slug); repeatable
        #[clap(long = "state")]
        states: Vec<String>,
        /// Download race pages before analyzing
        #[clap(long)]
        download: bool,
        /// Fail when a state's cumulative vote count ever decreases
        #[clap(long)]
        strict: bool,
        /// Skip writing plots
        #[clap(long)]
        no_plots: bool,
        /// Vote share key of the Republican candidate
        #[clap(long, default_value = DEFAULT_REP_KEY)]
        rep_key: String,
        /// Vote share key of the Democratic candidate
        #[clap(long, default_value = DEFAULT_DEM_KEY)]
        dem_key: String,
        /// Race page URL, with `{slug}` standing in for the state
        #[clap(long, default_value = DEFAULT_URL_TEMPLATE)]
        url_template: String,
    },
    /// Validate and summarize one stored race page.
    Info {
        /// Race page JSON file
        file: PathBuf,
        /// Vote share key of the Republican candidate
        #[clap(long, default_value = DEFAULT_REP_KEY)]
        rep_key: String,
        /// Vote share key of the Democratic candidate
        #[clap(long, default_value = DEFAULT_DEM_KEY)]
        dem_key: String,
    },
}

#[tokio::main]
async fn main() {
    let opts = Opts::parse();

    if let Err(e) = run(opts.command).await {
        eprintln!("{} {}", "❌".red(), e.to_string().red());
        std::process::exit(1);
    }
}

async fn run(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Download {
            data_dir,
            states,
            url_template,
        } => {
            let states = resolve_states(&states)?;
            download(&data_dir, &states, &url_template).await?;
        }
        Command::Analyze {
            data_dir,
            output,
            plot_dir,
            states,
            download,
            strict,
            no_plots,
            rep_key,
            dem_key,
            url_template,
        } => {
            let config = PipelineConfig {
                data_dir,
                output_csv: output,
                plot_dir,
                states: resolve_states(&states)?,
                candidate_keys: CandidateKeys {
                    rep: rep_key,
                    dem: dem_key,
                },
                url_template,
                download,
                plots: !no_plots,
                policy: if strict {
                    MonotonicPolicy::Strict
                } else {
                    MonotonicPolicy::Permissive
                },
            };
            analyze(&config).await?;
        }
        Command::Info {
            file,
            rep_key,
            dem_key,
        } => {
            info(
                &file,
                &CandidateKeys {
                    rep: rep_key,
                    dem: dem_key,
                },
            )?;
        }
    }

    Ok(())
}

fn resolve_states(filter: &[String]) -> Result<Vec<String>, PipelineError> {
    let (selected, unknown) = select_states(filter);
    if !unknown.is_empty() {
        return Err(PipelineError::UnknownStates(unknown.join(", ")));
    }
    Ok(selected)
}
