//! Cardio Control - CLI client for the cardiod risk service
//!
//! Submits a patient profile to cardiod and renders the assessment.

use cardio_common::api::PatientProfile;
use cardioctl::client::{CardioClient, ClientError, DEFAULT_URL};
use cardioctl::commands;
use cardioctl::errors::{EXIT_GENERAL_ERROR, EXIT_SUCCESS};
use clap::{Args, Parser, Subcommand};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "cardioctl")]
#[command(about = "Cardiovascular risk assessment client", long_about = None)]
#[command(version)]
struct Cli {
    /// cardiod base URL
    #[arg(long, env = "CARDIO_API_URL", default_value = DEFAULT_URL, global = true)]
    url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10, global = true)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show service status and whether the model is loaded
    Status,

    /// List the features the model expects
    Features,

    /// Assess a patient
    Predict {
        #[command(flatten)]
        patient: PatientArgs,

        /// Read attributes from a JSON file instead of flags
        #[arg(long)]
        file: Option<PathBuf>,

        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },
}

/// Defaults are the example patient
#[derive(Args)]
struct PatientArgs {
    /// 1: female, 2: male
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(1..=2))]
    gender: u8,

    /// Height in cm
    #[arg(long, default_value_t = 170.0)]
    height: f64,

    /// Weight in kg
    #[arg(long, default_value_t = 70.0)]
    weight: f64,

    /// Systolic blood pressure
    #[arg(long, default_value_t = 120)]
    ap_hi: u16,

    /// Diastolic blood pressure
    #[arg(long, default_value_t = 80)]
    ap_lo: u16,

    /// 1: normal, 2: above normal, 3: well above normal
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=3))]
    cholesterol: u8,

    /// 1: normal, 2: above normal, 3: well above normal
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=3))]
    gluc: u8,

    /// Smoker (0/1)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=1))]
    smoke: u8,

    /// Alcohol intake (0/1)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=1))]
    alco: u8,

    /// Physically active (0/1)
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(0..=1))]
    active: u8,

    /// Age in years
    #[arg(long, default_value_t = 50)]
    age: u16,
}

impl From<PatientArgs> for PatientProfile {
    fn from(args: PatientArgs) -> Self {
        Self {
            gender: args.gender,
            height: args.height,
            weight: args.weight,
            ap_hi: args.ap_hi,
            ap_lo: args.ap_lo,
            cholesterol: args.cholesterol,
            gluc: args.gluc,
            smoke: args.smoke,
            alco: args.alco,
            active: args.active,
            age: args.age,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let code = match run(cli).await {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            e.downcast_ref::<ClientError>()
                .map(ClientError::exit_code)
                .unwrap_or(EXIT_GENERAL_ERROR)
        }
    };
    std::process::exit(code);
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let client = CardioClient::new(&cli.url, Duration::from_secs(cli.timeout))?;

    match cli.command {
        Commands::Status => commands::status(&client).await,
        Commands::Features => commands::features(&client).await,
        Commands::Predict { patient, file, json } => {
            let profile = PatientProfile::from(patient);
            let body = commands::load_patient(file.as_deref(), &profile)?;
            commands::predict(&client, body, json).await
        }
    }
}
