use std::{path::PathBuf, sync::Arc, sync::Mutex};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use taxi_fare_predictor::{
    config::AppConfig,
    model::ModelState,
    report::EstimateReport,
    server::{self, AppState},
    tui,
    types::{PaymentType, RideInput, TripType, Weekday},
};

#[derive(Parser)]
#[command(name = "taxi_fare")]
#[command(about = "NYC green taxi fare estimator", long_about = None)]
struct Cli {
    /// JSON config file
    #[arg(long, global = true, env = "TAXI_FARE_CONFIG")]
    config: Option<PathBuf>,

    /// Model artifact; overrides config and MODEL_PATH
    #[arg(long, global = true)]
    model: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive fare form (default)
    Tui,

    /// Print one estimate with its breakdown
    Estimate(EstimateArgs),

    /// Serve estimates over HTTP
    Serve {
        /// Address to bind, e.g. 0.0.0.0:8080
        #[arg(long)]
        bind: Option<String>,
    },
}

#[derive(Args, Debug)]
struct EstimateArgs {
    /// Trip distance in miles
    #[arg(long, default_value_t = 2.5)]
    distance: f64,

    #[arg(long, default_value_t = 1)]
    passengers: u8,

    /// Trip duration in minutes
    #[arg(long, default_value_t = 15)]
    duration: u32,

    #[arg(long, value_enum, default_value_t = PaymentType::CreditCard)]
    payment: PaymentType,

    #[arg(long, value_enum, default_value_t = TripType::StreetHail)]
    trip_type: TripType,

    #[arg(long, value_enum, default_value_t = Weekday::Monday)]
    weekday: Weekday,

    /// Hour of the day, 0-23
    #[arg(long, default_value_t = 12)]
    hour: u8,

    #[arg(long, default_value_t = 2.5)]
    base_fare: f64,

    #[arg(long, default_value_t = 0.0)]
    extra: f64,

    #[arg(long, default_value_t = 0.5)]
    mta_tax: f64,

    #[arg(long, default_value_t = 0.0)]
    tip: f64,

    #[arg(long, default_value_t = 0.0)]
    tolls: f64,

    #[arg(long, default_value_t = 0.3)]
    improvement_surcharge: f64,

    #[arg(long, default_value_t = 2.5)]
    congestion_surcharge: f64,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

impl EstimateArgs {
    fn ride(&self) -> RideInput {
        RideInput {
            trip_distance: self.distance,
            passenger_count: self.passengers,
            trip_duration: self.duration,
            payment_type: self.payment,
            trip_type: self.trip_type,
            weekday: self.weekday,
            hour: self.hour,
            fare_amount: self.base_fare,
            extra: self.extra,
            mta_tax: self.mta_tax,
            tip_amount: self.tip,
            tolls_amount: self.tolls,
            improvement_surcharge: self.improvement_surcharge,
            congestion_surcharge: self.congestion_surcharge,
        }
    }
}

fn init_stderr_logging(cfg: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// The form owns the terminal, so it only logs when given a file.
fn init_file_logging(cfg: &AppConfig) -> anyhow::Result<()> {
    let Some(path) = &cfg.log_file else {
        return Ok(());
    };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cfg = AppConfig::resolve(cli.config.as_deref())?;
    if let Some(model) = cli.model {
        cfg.model_path = Some(model);
    }

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            init_file_logging(&cfg)?;
            let state = ModelState::load(cfg.model_path().as_deref());
            tui::run(state)
        }
        Commands::Estimate(args) => {
            init_stderr_logging(&cfg);
            let ride = args.ride();
            ride.validate()?;
            let state = ModelState::load(cfg.model_path().as_deref());
            let report = EstimateReport::build(&state, &ride);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report.render_text());
            }
            Ok(())
        }
        Commands::Serve { bind } => {
            init_stderr_logging(&cfg);
            let bind_addr = bind.unwrap_or_else(|| cfg.bind_addr.clone());
            let state = AppState {
                model: Arc::new(ModelState::load(cfg.model_path().as_deref())),
            };
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?
                .block_on(server::serve(&bind_addr, state))
        }
    }
}
