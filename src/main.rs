//! HydroMonitor CLI
//!
//! Command-line front end for the dashboard client:
//! - Show the dashboard, analytics and model pages
//! - Add a reading through the entry form
//! - Import and export CSV files

use anyhow::Context;
use clap::{Parser, Subcommand};
use hydromonitor::config::{generate_default_config, Config};
use hydromonitor::dashboard::{self, DashboardState, Page};
use hydromonitor::logging;
use hydromonitor::remote::ReadingsClient;
use hydromonitor::validation::ReadingForm;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hydromonitor")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Record, sync, and analyze hydroponic sensor readings")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Readings server URL (overrides the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Render pages in light mode
    #[arg(long, global = true)]
    pub light: bool,

    /// Log at the configured level instead of warnings only
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show a page with readings from the server
    Dashboard {
        /// Page to show (dashboard, entry, analytics, mlModel)
        #[arg(short, long, default_value = "dashboard")]
        page: Page,
        /// Trailing window in days
        #[arg(short, long)]
        days: Option<String>,
    },

    /// Add a reading
    Add {
        /// Date of the reading (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
        /// pH level (0-14)
        #[arg(long)]
        ph: String,
        /// TDS in ppm
        #[arg(long)]
        tds: String,
        /// Temperature in °C
        #[arg(long)]
        temperature: String,
        /// Relative humidity in %
        #[arg(long)]
        humidity: String,
        /// Dissolved oxygen in mg/L
        #[arg(long)]
        dissolved_oxy: String,
    },

    /// Show trends for every metric
    Analytics {
        /// Trailing window in days
        #[arg(short, long)]
        days: Option<String>,
    },

    /// Show a mock leaf prediction
    Predict {
        /// Seed for a repeatable prediction
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Export all readings to CSV
    Export {
        /// Output file (default: hydro_monitor_data_<date>.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import readings from a CSV file
    Import {
        /// Path to CSV file
        path: PathBuf,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::resolve(cli.config.as_deref())?;

    let mut log_config = config.logging.clone();
    if !cli.verbose && log_config.file.is_none() {
        log_config.level = "warn".to_string();
    }
    logging::init(&log_config)?;

    let mut client_config = config.client_config();
    if let Some(url) = &cli.api_url {
        client_config.base_url = url.clone();
    }
    let client = ReadingsClient::new(client_config)?;

    let mut state = DashboardState::new();
    state.past_days = config.dashboard.past_days.max(1);
    state.set_dark_mode(!cli.light);

    let ok = match cli.command {
        Commands::Dashboard { page, days } => {
            if let Some(days) = days {
                state.set_past_days(&days);
            }
            state.navigate(page);
            let loaded = state.load(&client).await.is_ok();
            show(&state);
            loaded
        }

        Commands::Analytics { days } => {
            if let Some(days) = days {
                state.set_past_days(&days);
            }
            state.navigate(Page::Analytics);
            let loaded = state.load(&client).await.is_ok();
            show(&state);
            loaded
        }

        Commands::Add {
            date,
            ph,
            tds,
            temperature,
            humidity,
            dissolved_oxy,
        } => {
            let blank = ReadingForm::blank();
            state.navigate(Page::Entry);
            state.form = ReadingForm {
                date: date.unwrap_or(blank.date),
                ph,
                tds,
                temperature,
                humidity,
                dissolved_oxy,
            };

            match state.submit(&client).await {
                Ok(reading) => {
                    println!("Saved reading {} at {}", reading.id, reading.timestamp);
                    true
                }
                Err(e) => {
                    eprintln!("{}", e);
                    false
                }
            }
        }

        Commands::Predict { seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_rng(&mut rand::rng()),
            };
            state.refresh_prediction(&mut rng);
            state.navigate(Page::MlModel);
            show(&state);
            true
        }

        Commands::Export { output } => {
            if state.load(&client).await.is_err() {
                show_notice(&state);
                false
            } else {
                match state.export_csv_today() {
                    Ok(download) => {
                        let path = output.unwrap_or_else(|| PathBuf::from(&download.file_name));
                        std::fs::write(&path, &download.contents)
                            .with_context(|| format!("Failed to write {:?}", path))?;
                        println!("Exported {} readings to {:?}", state.readings.len(), path);
                        true
                    }
                    Err(e) => {
                        eprintln!("{}", e);
                        false
                    }
                }
            }
        }

        Commands::Import { path } => {
            if !path.exists() {
                eprintln!("File not found: {:?}", path);
                std::process::exit(1);
            }
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {:?}", path))?;

            let imported = state.import_csv(&client, &text).await;
            show_notice(&state);
            if let Ok(count) = imported {
                println!("Imported {} readings", count);
            }
            imported.is_ok()
        }

        Commands::Config { output } => {
            write_default_config(output.as_ref())?;
            true
        }
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

fn show(state: &DashboardState) {
    print!("{}", dashboard::render(state, chrono::Utc::now()));
}

fn show_notice(state: &DashboardState) {
    if let Some(notice) = &state.notice {
        match notice.kind {
            dashboard::NoticeKind::Error => eprintln!("{}", notice.text),
            dashboard::NoticeKind::Success => println!("{}", notice.text),
        }
    }
}

fn write_default_config(output: Option<&PathBuf>) -> anyhow::Result<()> {
    let config = generate_default_config();

    match output {
        Some(path) => {
            // Create parent directory if needed
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)?;
            println!("Config written to {:?}", path);
        }
        None => {
            print!("{}", config);
        }
    }
    Ok(())
}
