//
//  marketplace-sdk
//  cli/divisions.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! `mkp divisions`: fetch and print division trees.

use anyhow::Result;
use clap::Args;
use console::style;

use crate::services::divisions::{DisabledBy, Division};

use super::{render_tree, GlobalOptions};

/// Print the division tree of a country, company or product
#[derive(Args, Debug)]
pub struct DivisionsCommand {
    /// Country code for the marketplace-wide tree
    #[arg(default_value = "FR", conflicts_with_all = ["company", "product"])]
    pub country: String,

    /// Show the divisions of a company instead (requires an API key)
    #[arg(long, conflicts_with = "product")]
    pub company: Option<u64>,

    /// Show the divisions a product is available in
    #[arg(long)]
    pub product: Option<String>,

    /// Hide disabled divisions
    #[arg(long)]
    pub enabled_only: bool,
}

impl DivisionsCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let service = client.divisions();

        let mut forest = match (&self.company, &self.product) {
            (Some(company), _) => service.company_divisions(*company).await?,
            (None, Some(product)) => service.product_divisions(product).await?,
            (None, None) => service.divisions(&self.country).await?,
        };
        tracing::debug!("Fetched {} root division(s)", forest.len());

        if self.enabled_only {
            retain_enabled(&mut forest);
        }

        if global.json {
            println!("{}", serde_json::to_string_pretty(&forest)?);
            return Ok(());
        }

        if forest.is_empty() {
            println!("{}", style("No divisions").dim());
            return Ok(());
        }
        for line in render_tree(&forest, |d| &d.children, label) {
            println!("{}", line);
        }
        Ok(())
    }
}

fn label(division: &Division) -> String {
    let mut text = format!("{}", style(&division.code).bold());
    if !division.description.is_empty() {
        text.push_str(&format!(" {}", division.description));
    }
    if !division.is_enabled {
        let by = match division.disabled_by {
            Some(DisabledBy::Admin) => " by admin",
            Some(DisabledBy::Vendor) => " by vendor",
            None => "",
        };
        text.push_str(&format!(" {}", style(format!("(disabled{})", by)).dim()));
    }
    text
}

fn retain_enabled(divisions: &mut Vec<Division>) {
    divisions.retain(|d| d.is_enabled);
    for division in divisions.iter_mut() {
        retain_enabled(&mut division.children);
    }
}
