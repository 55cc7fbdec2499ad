//
//  marketplace-sdk
//  cli/login.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! `mkp login`: exchange credentials for an API key.
//!
//! The key is printed, not stored. Export it as `MKP_API_KEY` for the other
//! commands.

use anyhow::Result;
use clap::Args;
use console::style;

use super::GlobalOptions;

/// Exchange login and password for an API key
#[derive(Args, Debug)]
pub struct LoginCommand {
    /// Account email
    pub email: String,

    /// Account password
    #[arg(long, env = "MKP_PASSWORD", hide_env_values = true)]
    pub password: String,
}

impl LoginCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let credential = client.authenticate(&self.email, &self.password).await?;

        if global.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "apiKey": credential.token(),
                    "userId": credential.user_id(),
                }))?
            );
            return Ok(());
        }

        eprintln!("{} Logged in as {}", style("✓").green(), self.email);
        println!("export MKP_API_KEY={}", credential.token());
        Ok(())
    }
}
