//! Sextant CLI - Inspect table metadata computed from a catalog snapshot
//!
//! Usage:
//!   sextant metadata <catalog.json> --table <id|card__id> [--include-sensitive] [--digest]
//!   sextant classify <catalog.json>
//!   sextant stale <catalog.json>
//!   sextant options
//!   sextant fingerprints import|show <catalog.json>
//!
//! Examples:
//!   sextant metadata catalog.json --table 5
//!   sextant metadata catalog.json --table card__3 --digest
//!   sextant metadata catalog.json --table 5 --readable 5,6

use clap::{Parser, Subcommand};
use sextant::binning::options_table;
use sextant::classify::classify_fields;
use sextant::config::Settings;
use sextant::fingerprint::{
    fields_to_refingerprint, hydrate, FingerprintStore, FingerprintVersions,
    SqliteFingerprintStore, StoreResult,
};
use sextant::logging::init_logger;
use sextant::metadata::{assemble, metadata_digest, Catalog, MetadataRequest, ReadAccess};
use sextant::model::TableId;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "sextant")]
#[command(about = "Sextant - Table and field metadata for a visual query builder")]
#[command(version)]
struct Cli {
    /// Path to a sextant.toml (defaults to the usual search locations)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the query metadata payload for a table
    Metadata {
        /// Path to the catalog JSON
        catalog: PathBuf,

        /// Table id, or card__<id> for a saved question
        #[arg(short, long)]
        table: String,

        /// Keep sensitive fields in the output
        #[arg(long)]
        include_sensitive: bool,

        /// Print only the payload digest
        #[arg(long)]
        digest: bool,

        /// Comma-separated table ids the reader may see (default: all)
        #[arg(long, value_delimiter = ',')]
        readable: Option<Vec<i64>>,

        /// Also print external remapping suggestions for the table
        #[arg(long)]
        suggest: bool,
    },

    /// Print the inferred special type of every field
    Classify {
        /// Path to the catalog JSON
        catalog: PathBuf,
    },

    /// List fields whose fingerprints must be recomputed
    Stale {
        /// Path to the catalog JSON
        catalog: PathBuf,
    },

    /// Print the dimension option table
    Options,

    /// Manage the fingerprint store
    Fingerprints {
        #[command(subcommand)]
        action: FingerprintAction,
    },
}

#[derive(Subcommand)]
enum FingerprintAction {
    /// Copy every fingerprint in a catalog into the store
    Import {
        /// Path to the catalog JSON
        catalog: PathBuf,
    },
    /// Show stored fingerprints for the fields of a catalog
    Show {
        /// Path to the catalog JSON
        catalog: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_logger(&settings.logging.level);

    match cli.command {
        Commands::Metadata {
            catalog,
            table,
            include_sensitive,
            digest,
            readable,
            suggest,
        } => cmd_metadata(
            &settings,
            catalog,
            &table,
            include_sensitive,
            digest,
            readable,
            suggest,
        ),
        Commands::Classify { catalog } => cmd_classify(&settings, catalog),
        Commands::Stale { catalog } => cmd_stale(catalog),
        Commands::Options => print_json(&options_table()),
        Commands::Fingerprints { action } => cmd_fingerprints(&settings, action),
    }
}

fn load_catalog(path: &PathBuf) -> Option<Catalog> {
    match Catalog::load(path) {
        Ok(catalog) => Some(catalog),
        Err(e) => {
            eprintln!("Error loading catalog '{}': {}", path.display(), e);
            None
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_metadata(
    settings: &Settings,
    catalog: PathBuf,
    table: &str,
    include_sensitive: bool,
    digest: bool,
    readable: Option<Vec<i64>>,
    suggest: bool,
) -> ExitCode {
    let Some(mut catalog) = load_catalog(&catalog) else {
        return ExitCode::FAILURE;
    };

    if let Err(e) = hydrate_from_configured_store(settings, &mut catalog) {
        eprintln!("Fingerprint store error: {}", e);
        return ExitCode::FAILURE;
    }

    let table_id: TableId = match table.parse() {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let access = match readable {
        Some(ids) => ReadAccess::Tables(ids.into_iter().collect::<BTreeSet<_>>()),
        None => ReadAccess::All,
    };

    let request = MetadataRequest::from_settings(table_id, &settings.metadata)
        .with_sensitive_fields(include_sensitive || settings.metadata.include_sensitive_fields);

    let result = catalog
        .snapshot(table_id, &access)
        .and_then(|snapshot| assemble(&request, &snapshot));
    let metadata = match result {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Metadata error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if digest {
        return match metadata_digest(&metadata) {
            Ok(hash) => {
                println!("{}", hash);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error hashing metadata: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    let code = print_json(&metadata);

    if suggest {
        if let TableId::Physical(id) = table_id {
            match catalog.suggest_remappings(id, &access) {
                Ok(suggestions) => {
                    for dimension in &suggestions {
                        eprintln!(
                            "suggestion: field {} -> human readable field {:?}",
                            dimension.field_id,
                            dimension.human_readable_field_id()
                        );
                    }
                }
                Err(e) => {
                    eprintln!("Suggestion error: {}", e);
                    return ExitCode::FAILURE;
                }
            }
        }
    }

    code
}

fn cmd_classify(settings: &Settings, catalog: PathBuf) -> ExitCode {
    let Some(catalog) = load_catalog(&catalog) else {
        return ExitCode::FAILURE;
    };

    match classify_fields(&catalog.fields, &BTreeMap::new(), &settings.classifier) {
        Ok(classifications) => {
            for field in &catalog.fields {
                let Some(c) = classifications.get(&field.id) else {
                    continue;
                };
                let special = c
                    .special_type
                    .map(|s| format!("{:?}", s))
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{:>6}  {:<24} {:<24} {:?}",
                    field.id, field.name, special, c.source
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Classification error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_stale(catalog: PathBuf) -> ExitCode {
    let Some(catalog) = load_catalog(&catalog) else {
        return ExitCode::FAILURE;
    };

    let versions = FingerprintVersions::default();
    let stale = fields_to_refingerprint(&catalog.fields, &versions);
    if stale.is_empty() {
        println!("All fingerprints are current (version {}).", versions.current());
        return ExitCode::SUCCESS;
    }

    println!("Fields to re-fingerprint:");
    for field in stale {
        println!(
            "  - {} ({}, table {}, version {})",
            field.name, field.id, field.table_id, field.fingerprint_version
        );
    }
    ExitCode::SUCCESS
}

fn open_store(settings: &Settings) -> StoreResult<SqliteFingerprintStore> {
    match settings.fingerprints.resolved_store_path() {
        Ok(Some(path)) => SqliteFingerprintStore::open(path),
        Ok(None) => SqliteFingerprintStore::open_default(),
        Err(e) => {
            eprintln!("Warning: {}; using the default store", e);
            SqliteFingerprintStore::open_default()
        }
    }
}

/// Load stored fingerprints over the catalog's own when a store is configured.
fn hydrate_from_configured_store(settings: &Settings, catalog: &mut Catalog) -> StoreResult<()> {
    let path = match settings.fingerprints.resolved_store_path() {
        Ok(Some(path)) => path,
        Ok(None) => return Ok(()),
        Err(e) => {
            eprintln!("Warning: {}; using catalog fingerprints", e);
            return Ok(());
        }
    };

    let store = SqliteFingerprintStore::open(path)?;
    let hydrated = catalog.hydrate_fingerprints(&store)?;
    tracing::debug!(hydrated, "loaded fingerprints from the configured store");
    Ok(())
}

fn cmd_fingerprints(settings: &Settings, action: FingerprintAction) -> ExitCode {
    let store = match open_store(settings) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error opening fingerprint store: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match action {
        FingerprintAction::Import { catalog } => {
            let Some(catalog) = load_catalog(&catalog) else {
                return ExitCode::FAILURE;
            };
            import_fingerprints(&catalog, &store)
        }
        FingerprintAction::Show { catalog } => {
            let Some(mut catalog) = load_catalog(&catalog) else {
                return ExitCode::FAILURE;
            };
            show_fingerprints(&mut catalog, &store)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Fingerprint store error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn import_fingerprints(catalog: &Catalog, store: &dyn FingerprintStore) -> StoreResult<()> {
    let mut imported = 0;
    for field in &catalog.fields {
        if let Some(fingerprint) = &field.fingerprint {
            store.put(field.id, fingerprint, field.fingerprint_version)?;
            imported += 1;
        }
    }
    println!("Imported {} fingerprints ({} stored).", imported, store.len()?);
    Ok(())
}

fn show_fingerprints(catalog: &mut Catalog, store: &dyn FingerprintStore) -> StoreResult<()> {
    let hydrated = hydrate(&mut catalog.fields, store)?;
    println!("Loaded {} fingerprints from the store.", hydrated);
    for field in &catalog.fields {
        let Some(fingerprint) = &field.fingerprint else {
            continue;
        };
        let json = serde_json::to_string(fingerprint)?;
        println!("{:>6}  {:<24} v{}  {}", field.id, field.name, field.fingerprint_version, json);
    }
    Ok(())
}
