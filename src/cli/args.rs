use crate::models::CustomerFilter;
use crate::utils::constants::{DEFAULT_CACHE_FILE, DEFAULT_TOP_COMPANIES, DEFAULT_TOP_ROLES};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cocoa-atlas")]
#[command(about = "Cocoa supply-chain dataset processor")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load and normalize the dataset, filter it, and optionally export
    Process {
        #[arg(short, long, help = "Input CSV file")]
        input: PathBuf,

        #[arg(short, long, help = "Write the filtered records to this CSV file")]
        output: Option<PathBuf>,

        #[arg(long, help = "Restrict to these roles (repeatable)")]
        role: Vec<String>,

        #[arg(long, help = "Restrict to these countries (repeatable)")]
        country: Vec<String>,

        #[arg(long, help = "Restrict to these companies (repeatable)")]
        company: Vec<String>,

        #[arg(
            long,
            default_value = "0",
            help = "Minimum volume in tons/year; records with unknown volume are kept"
        )]
        min_volume: f64,

        #[arg(long, value_enum, default_value_t = CustomerFilter::Any)]
        customer: CustomerFilter,
    },

    /// Resolve missing coordinates through the persistent geocoding cache
    Geocode {
        #[arg(short, long, help = "Input CSV file")]
        input: PathBuf,

        #[arg(short, long, default_value = DEFAULT_CACHE_FILE, help = "Geocode cache file")]
        cache: PathBuf,

        #[arg(short, long, help = "Write the resolved records to this CSV file")]
        output: Option<PathBuf>,

        #[arg(
            long,
            default_value = "1000",
            help = "Minimum milliseconds between external lookups"
        )]
        rate_limit_ms: u64,

        #[arg(
            long,
            default_value = "false",
            help = "Clear tombstones for this dataset's places and retry them"
        )]
        retry_tombstones: bool,
    },

    /// Print volume summaries by role, country, and company
    Report {
        #[arg(short, long, help = "Input CSV file")]
        input: PathBuf,

        #[arg(long, default_value_t = DEFAULT_TOP_ROLES)]
        top_roles: usize,

        #[arg(long, default_value_t = DEFAULT_TOP_COMPANIES)]
        top_companies: usize,
    },

    /// List the distinct roles, countries, and companies in the dataset
    Options {
        #[arg(short, long, help = "Input CSV file")]
        input: PathBuf,
    },
}
