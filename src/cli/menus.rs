//
//  marketplace-sdk
//  cli/menus.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! `mkp menus`: print CMS menus.

use anyhow::Result;
use clap::Args;
use console::style;

use crate::services::cms::MenuItem;

use super::{render_tree, GlobalOptions};

/// Print the CMS menus
#[derive(Args, Debug)]
pub struct MenusCommand {
    /// Only print the menu with this name
    #[arg(long)]
    pub name: Option<String>,

    /// Show item URLs
    #[arg(long)]
    pub urls: bool,
}

impl MenusCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let mut menus = client.cms().menus().await?;
        if let Some(name) = &self.name {
            menus.retain(|m| m.name.eq_ignore_ascii_case(name));
        }

        if global.json {
            println!("{}", serde_json::to_string_pretty(&menus)?);
            return Ok(());
        }

        if menus.is_empty() {
            println!("{}", style("No menus").dim());
            return Ok(());
        }
        for menu in &menus {
            println!("{} {}", style(&menu.name).bold().cyan(), style(format!("#{}", menu.id)).dim());
            for line in render_tree(&menu.items, |i| &i.children, |i| self.label(i)) {
                println!("  {}", line);
            }
        }
        Ok(())
    }

    fn label(&self, item: &MenuItem) -> String {
        let mut text = item.name.clone();
        if self.urls && !item.url.is_empty() {
            text.push_str(&format!(" {}", style(&item.url).dim()));
        }
        if item.target_blank {
            text.push_str(" ↗");
        }
        text
    }
}
