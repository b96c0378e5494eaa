use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use authentix_core::config::AppConfig;
use authentix_core::discovery::{DiscoveryLocation, DiscoveryPreferences};
use authentix_core::store::{FileStore, KeyValueStore};
use clap::{Args, Subcommand};

#[derive(Args)]
pub struct LocationArgs {
    /// Store file (overrides the config's store path)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub action: LocationAction,
}

#[derive(Subcommand)]
pub enum LocationAction {
    /// Print the saved guest location
    Show,
    /// Save a guest location
    Set {
        /// Postal code
        zip: String,
        /// Two-letter country code
        #[arg(long)]
        country: Option<String>,
    },
    /// Forget the guest location
    Clear,
}

pub fn run(args: &LocationArgs, config: &AppConfig) -> Result<()> {
    let path = args.store.clone().unwrap_or_else(|| config.store.path.clone());
    let mut store = FileStore::new(path.clone());
    store
        .open()
        .with_context(|| format!("Failed to open store {}", path.display()))?;
    let mut prefs = DiscoveryPreferences::new(store);

    match &args.action {
        LocationAction::Show => match prefs.guest()? {
            Some(loc) => print_location(&loc),
            None => println!("No guest location set"),
        },
        LocationAction::Set { zip, country } => {
            let Some(loc) = DiscoveryLocation::new(zip, country.as_deref()) else {
                bail!("Invalid postal code '{zip}'");
            };
            prefs.set_guest(Some(&loc))?;
            print_location(&loc);
        }
        LocationAction::Clear => {
            prefs.set_guest(None)?;
            println!("Guest location cleared");
        }
    }

    let mut store = prefs.into_store();
    store
        .close()
        .with_context(|| format!("Failed to save store {}", path.display()))?;
    Ok(())
}

fn print_location(loc: &DiscoveryLocation) {
    println!("Zip code:    {}", loc.zip_code);
    println!("Country:     {}", loc.country.as_deref().unwrap_or("-"));
}
