//! `regions` subcommands: ad hoc queries against the lookup providers.

use cementlife_core::{AppConfig, RegionId, RegionList, RegionLookup};
use cementlife_regions::RegionClient;
use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub enum RegionsCommands {
    /// List provinces
    Provinces,
    /// List districts of a province
    Districts {
        /// Province id as returned by `regions provinces`
        #[arg(long)]
        province: String,
    },
    /// List wards of a district
    Wards {
        /// District id as returned by `regions districts`
        #[arg(long)]
        district: String,
    },
}

pub(crate) async fn run(config: &AppConfig, command: RegionsCommands) -> anyhow::Result<()> {
    let client = RegionClient::from_config(&config.regions, &config.user_agent)?;
    let list = match command {
        RegionsCommands::Provinces => client.provinces().await,
        RegionsCommands::Districts { province } => {
            client.districts(&RegionId::parse(&province), None).await
        }
        RegionsCommands::Wards { district } => {
            client.wards(&RegionId::parse(&district), None).await
        }
    };
    print_list(&list);
    Ok(())
}

fn print_list(list: &RegionList) {
    let Some(source) = list.source else {
        println!("no options: both lookup endpoints failed (see log output)");
        return;
    };
    println!("{:<10}NAME", "ID");
    for entry in &list.entries {
        println!("{:<10}{}", entry.id.to_string(), entry.name);
    }
    println!("({} entries from {source:?} endpoint)", list.entries.len());
}
