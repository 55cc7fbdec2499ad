//
//  marketplace-sdk
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod api;
mod divisions;
mod login;
mod menus;
mod tree;

pub use api::ApiCommand;
pub use divisions::DivisionsCommand;
pub use login::LoginCommand;
pub use menus::MenusCommand;
pub use tree::render_tree;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::api::ApiClient;
use crate::auth::Credential;
use crate::config::{ClientConfig, DEFAULT_BASE_URL};

/// mkp - Poke at a marketplace API from the command line
#[derive(Parser, Debug)]
#[command(
    name = "mkp",
    version,
    about = "Poke at a marketplace API from the command line",
    long_about = "mkp is a developer tool built on the marketplace SDK.\n\n\
                  It makes raw API calls and prints division and menu trees.",
    propagate_version = true,
    after_help = "Use 'mkp <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone)]
pub struct GlobalOptions {
    /// API base URL
    #[arg(long, global = true, env = "MKP_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// API key sent as `Authorization: token <key>`
    #[arg(long, global = true, env = "MKP_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Content language (Accept-Language)
    #[arg(long, global = true, env = "MKP_LANGUAGE")]
    pub language: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value = "30")]
    pub timeout: u64,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

impl GlobalOptions {
    /// Builds a client from the global options, authenticated when an API
    /// key was given.
    pub fn client(&self) -> Result<ApiClient> {
        let mut config = ClientConfig::new(&self.base_url)
            .with_context(|| format!("Invalid base URL: {}", self.base_url))?
            .with_timeout(Duration::from_secs(self.timeout));
        if let Some(language) = &self.language {
            config = config.with_language(language.as_str());
        }

        let client = ApiClient::new(config)?;
        if let Some(key) = self.api_key.as_deref().filter(|k| !k.is_empty()) {
            client.set_credential(Some(Credential::new(key)));
        }
        Ok(client)
    }
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Make a raw API request
    Api(ApiCommand),

    /// Print the division tree of a country, company or product
    #[command(visible_alias = "div")]
    Divisions(DivisionsCommand),

    /// Print the CMS menus
    Menus(MenusCommand),

    /// Exchange login and password for an API key
    Login(LoginCommand),

    /// Print version information
    Version,
}
