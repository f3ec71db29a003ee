use crate::analyzers::VolumeAnalyzer;
use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::filters::{self, FilterOptions};
use crate::geocode::{GeocodeCache, GeocodeResolver, NominatimClient};
use crate::models::FilterCriteria;
use crate::readers::CompanyReader;
use crate::utils::progress::ProgressReporter;
use crate::writers::CsvWriter;
use std::time::Duration;

/// Warnings (cache degradation, failed lookups) always surface; `--verbose`
/// adds per-place resolver output
fn log_level(verbose: bool) -> tracing::Level {
    if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(log_level(cli.verbose))
        .init();

    match cli.command {
        Commands::Process {
            input,
            output,
            role,
            country,
            company,
            min_volume,
            customer,
        } => {
            println!("Loading companies from {}", input.display());

            let reader = CompanyReader::new();
            let (records, report) = reader.read_companies(&input)?;
            println!("{}", report.generate_summary());

            let criteria = FilterCriteria::new()
                .with_roles(role)
                .with_countries(country)
                .with_companies(company)
                .with_min_volume(min_volume)
                .with_customer(customer);

            let filtered = filters::apply(&records, &criteria);
            if criteria.is_unrestricted() {
                println!("\n{} records", filtered.len());
            } else {
                println!("\n{} of {} records match", filtered.len(), records.len());
            }

            let with_coordinates = filtered.iter().filter(|r| r.has_coordinates()).count();
            println!(
                "{} have coordinates, {} still need geocoding",
                with_coordinates,
                filtered.len() - with_coordinates
            );

            if let Some(output) = output {
                let written = CsvWriter::new().write_records(&filtered, &output)?;
                println!("Wrote {} records to {}", written, output.display());
            }
        }

        Commands::Geocode {
            input,
            cache,
            output,
            rate_limit_ms,
            retry_tombstones,
        } => {
            println!("Loading companies from {}", input.display());

            let reader = CompanyReader::new();
            let (mut records, load_report) = reader.read_companies(&input)?;
            println!("{}", load_report.generate_summary());

            let mut geocode_cache = GeocodeCache::load_or_empty(&cache);
            println!(
                "Cache: {} entries ({} tombstones)",
                geocode_cache.len(),
                geocode_cache.tombstone_count()
            );

            let places: std::collections::HashSet<_> = records
                .iter()
                .filter(|r| !r.has_coordinates())
                .filter_map(|r| r.place_key())
                .collect();
            let progress =
                ProgressReporter::new(places.len() as u64, "Resolving coordinates...");

            let resolver = GeocodeResolver::new(NominatimClient::new()?)
                .with_min_request_interval(Duration::from_millis(rate_limit_ms))
                .with_retry_tombstones(retry_tombstones);

            let report = resolver
                .resolve(&mut records, &mut geocode_cache, Some(&progress))
                .await?;
            progress.finish_with_message("Resolution complete");

            geocode_cache.save(&cache)?;
            println!("\n{}", report.generate_summary());
            println!("Cache saved to {}", cache.display());

            if let Some(output) = output {
                let written = CsvWriter::new().write_records(&records, &output)?;
                println!("Wrote {} records to {}", written, output.display());
            }
        }

        Commands::Report {
            input,
            top_roles,
            top_companies,
        } => {
            let reader = CompanyReader::new();
            let (records, _) = reader.read_companies(&input)?;
            let analyzer = VolumeAnalyzer::new();

            println!("Volume by role (top {}):", top_roles);
            for (role, total) in analyzer.volume_by_role(&records, top_roles) {
                println!("  {:<30} {:>14.1} t/yr", role, total);
            }

            println!("\nVolume by country:");
            for (country, total) in analyzer.volume_by_country(&records) {
                println!("  {:<30} {:>14.1} t/yr", country, total);
            }

            println!("\nTop {} companies by volume:", top_companies);
            for record in analyzer.top_companies(&records, top_companies) {
                println!(
                    "  {:<30} {:>14.1} t/yr  ({}, {})",
                    record.company,
                    record.volume.unwrap_or(0.0),
                    record.city,
                    record.country
                );
            }
        }

        Commands::Options { input } => {
            let reader = CompanyReader::new();
            let (records, _) = reader.read_companies(&input)?;
            let options = FilterOptions::from_records(&records);

            println!("Roles ({}):", options.roles.len());
            for role in &options.roles {
                println!("  {}", role);
            }
            println!("\nCountries ({}):", options.countries.len());
            for country in &options.countries {
                println!("  {}", country);
            }
            println!("\nCompanies ({}):", options.companies.len());
            for company in &options.companies {
                println!("  {}", company);
            }
        }
    }

    Ok(())
}
