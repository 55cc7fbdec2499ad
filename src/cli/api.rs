//
//  marketplace-sdk
//  cli/api.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Direct API access command
//!
//! Sends one request through the SDK pipeline, so the token header,
//! User-Agent and error translation are exactly what library users get.
//!
//! ## Examples
//!
//! ```bash
//! # Division tree source data
//! mkp api GET divisions/FR
//!
//! # Add to a basket with a form body
//! mkp api POST basket/b-123/add --form -F declinationId=42_0 -F quantity=2
//!
//! # Walk every page of the order list
//! mkp api GET user/orders -q limit=50 --paginate
//! ```

use std::fs;

use anyhow::{bail, Result};
use clap::Args;
use console::style;
use serde_json::{Map, Value};

use crate::api::common::HeaderPagination;
use crate::api::{ApiClient, ApiResponse, Method, QueryValue, RequestOptions};

use super::GlobalOptions;

/// Upper bound on pages fetched by `--paginate`.
const MAX_PAGES: usize = 100;

/// Make direct API requests
#[derive(Args, Debug)]
pub struct ApiCommand {
    /// HTTP method (GET, POST, PUT, PATCH, DELETE)
    pub method: Method,

    /// Path relative to the base URL (e.g. divisions/FR)
    pub path: String,

    /// Request headers as 'Name: Value' (can be specified multiple times)
    #[arg(long, short = 'H', action = clap::ArgAction::Append)]
    pub header: Vec<String>,

    /// Body fields as key=value; values are typed as JSON, keys nest with dots
    #[arg(long, short = 'F', action = clap::ArgAction::Append)]
    pub field: Vec<String>,

    /// Raw body fields (string values only)
    #[arg(long, action = clap::ArgAction::Append)]
    pub raw_field: Vec<String>,

    /// Query parameters as key=value
    #[arg(long, short = 'q', action = clap::ArgAction::Append)]
    pub query: Vec<String>,

    /// Send fields as application/x-www-form-urlencoded instead of JSON
    #[arg(long)]
    pub form: bool,

    /// Read a JSON request body from file (- for stdin)
    #[arg(long, short = 'f', conflicts_with_all = ["field", "raw_field"])]
    pub input: Option<String>,

    /// Follow x-pagination headers and print every item
    #[arg(long)]
    pub paginate: bool,

    /// Include response status and headers in output
    #[arg(long, short = 'i')]
    pub include: bool,

    /// Suppress output (only fail on error)
    #[arg(long)]
    pub silent: bool,
}

impl ApiCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let options = self.build_options()?;

        if self.paginate {
            return self.execute_paginated(&client, options).await;
        }

        let response = client.call_raw(self.method, &self.path, options).await?;
        if self.silent {
            return Ok(());
        }
        if self.include {
            print_head(&response);
        }
        print_value(response.data.as_ref(), global.json);
        Ok(())
    }

    fn build_options(&self) -> Result<RequestOptions> {
        let mut options = RequestOptions::new();

        for query in &self.query {
            let (key, value) = split_pair(query, '=')?;
            options = options.query(key, value);
        }

        for header in &self.header {
            let (name, value) = split_pair(header, ':')?;
            options = options.header(name, value);
        }

        if let Some(input) = &self.input {
            let content = if input == "-" {
                let mut buffer = String::new();
                std::io::Read::read_to_string(&mut std::io::stdin(), &mut buffer)?;
                buffer
            } else {
                fs::read_to_string(input)?
            };
            let value: Value = serde_json::from_str(&content)?;
            return Ok(options.json(value));
        }

        if self.field.is_empty() && self.raw_field.is_empty() {
            return Ok(options);
        }

        if self.form {
            let fields = self
                .field
                .iter()
                .chain(&self.raw_field)
                .map(|f| split_pair(f, '='))
                .collect::<Result<Vec<_>>>()?;
            return Ok(options.form(fields));
        }

        let mut body = Map::new();
        for field in &self.field {
            let (key, raw) = split_pair(field, '=')?;
            set_nested_value(&mut body, &key, typed_value(&raw));
        }
        for field in &self.raw_field {
            let (key, raw) = split_pair(field, '=')?;
            set_nested_value(&mut body, &key, Value::String(raw));
        }
        Ok(options.json(Value::Object(body)))
    }

    async fn execute_paginated(
        &self,
        client: &ApiClient,
        mut options: RequestOptions,
    ) -> Result<()> {
        let mut items: Vec<Value> = Vec::new();
        let mut offset = take_offset(&mut options)?;
        let mut pagination = HeaderPagination::default();

        for page in 1..=MAX_PAGES {
            let mut page_options = options.clone();
            if let Some(offset) = offset {
                page_options = page_options.query("offset", offset);
            }

            let response = client.call_raw(self.method, &self.path, page_options).await?;
            pagination = HeaderPagination::from_headers(&response.headers);
            match response.data {
                Some(Value::Array(values)) => items.extend(values),
                other => {
                    // Not a list endpoint; nothing to page through.
                    if !self.silent {
                        print_value(other.as_ref(), false);
                    }
                    return Ok(());
                }
            }

            match pagination.next_offset() {
                Some(next) => offset = Some(next),
                None => break,
            }
            if page == MAX_PAGES {
                eprintln!("{} Stopping at {} pages", style("!").yellow(), MAX_PAGES);
            }
        }

        if self.silent {
            return Ok(());
        }
        let result = serde_json::json!({
            "items": items,
            "total": pagination.total.unwrap_or(items.len() as u64),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
        Ok(())
    }
}

/// Removes every `offset` query parameter and returns the last one, so
/// `--paginate` starts from it and sends a single `offset`.
fn take_offset(options: &mut RequestOptions) -> Result<Option<u64>> {
    let mut offset = None;
    for (key, value) in &options.query {
        if key != "offset" {
            continue;
        }
        offset = match value {
            QueryValue::Single(raw) => match raw.parse::<u64>() {
                Ok(n) => Some(n),
                Err(_) => bail!("Invalid offset '{}': expected a non-negative integer", raw),
            },
            QueryValue::Many(_) => bail!("offset takes a single value"),
        };
    }
    options.query.retain(|(key, _)| key != "offset");
    Ok(offset)
}

fn print_head(response: &ApiResponse) {
    println!("{} {}", style("HTTP").dim(), response.status);
    for (name, value) in &response.headers {
        println!("{}: {}", name, value);
    }
    println!();
}

fn print_value(value: Option<&Value>, compact: bool) {
    match value {
        None => {}
        Some(value) if compact => println!("{}", value),
        Some(value) => match serde_json::to_string_pretty(value) {
            Ok(pretty) => println!("{}", pretty),
            Err(_) => println!("{}", value),
        },
    }
}

fn split_pair(raw: &str, separator: char) -> Result<(String, String)> {
    match raw.split_once(separator) {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => bail!("Invalid format: '{}'. Expected key{}value", raw, separator),
    }
}

/// Interprets a field value as JSON where it reads like one.
fn typed_value(raw: &str) -> Value {
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "null" => Value::Null,
        _ => {
            if let Ok(n) = raw.parse::<i64>() {
                Value::from(n)
            } else if let Some(n) = raw.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
                Value::Number(n)
            } else if raw.starts_with('[') || raw.starts_with('{') {
                serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
            } else {
                Value::String(raw.to_string())
            }
        }
    }
}

fn set_nested_value(obj: &mut Map<String, Value>, key: &str, value: Value) {
    match key.split_once('.') {
        None => {
            obj.insert(key.to_string(), value);
        }
        Some((first, rest)) => {
            let nested = obj
                .entry(first.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !nested.is_object() {
                *nested = Value::Object(Map::new());
            }
            if let Value::Object(nested) = nested {
                set_nested_value(nested, rest, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{stub_client, StubTransport};
    use crate::api::{HttpResponse, RequestBody};
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use serde_json::json;

    fn parse(args: &[&str]) -> ApiCommand {
        let mut argv = vec!["mkp", "api"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Api(cmd) => cmd,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_typed_values() {
        assert_eq!(typed_value("true"), json!(true));
        assert_eq!(typed_value("3"), json!(3));
        assert_eq!(typed_value("2.5"), json!(2.5));
        assert_eq!(typed_value("[1,2]"), json!([1, 2]));
        assert_eq!(typed_value("42_0"), json!("42_0"));
        assert_eq!(typed_value("{broken"), json!("{broken"));
    }

    #[test]
    fn test_nested_fields() {
        let mut body = Map::new();
        set_nested_value(&mut body, "address.city", json!("Paris"));
        set_nested_value(&mut body, "address.zipCode", json!("75002"));
        set_nested_value(&mut body, "name", json!("Acme"));

        assert_eq!(
            Value::Object(body),
            json!({"name": "Acme", "address": {"city": "Paris", "zipCode": "75002"}})
        );
    }

    #[test]
    fn test_build_json_body() {
        let cmd = parse(&["PUT", "companies/3/divisions", "-F", "divisionsEnabled=[\"FR-69\"]"]);

        let options = cmd.build_options().unwrap();

        assert_eq!(
            options.body,
            RequestBody::Json(json!({"divisionsEnabled": ["FR-69"]}))
        );
    }

    #[test]
    fn test_build_form_body_and_query() {
        let cmd = parse(&[
            "POST",
            "basket/b-1/add",
            "--form",
            "-F",
            "declinationId=42_0",
            "--raw-field",
            "quantity=2",
            "-q",
            "lang=fr",
            "-H",
            "X-Request-Id: abc",
        ]);

        let options = cmd.build_options().unwrap();

        assert_eq!(
            options.body,
            RequestBody::Form(vec![
                ("declinationId".to_string(), "42_0".to_string()),
                ("quantity".to_string(), "2".to_string()),
            ])
        );
        assert_eq!(options.query.len(), 1);
        assert_eq!(options.headers.get("X-Request-Id").map(String::as_str), Some("abc"));
    }

    #[test]
    fn test_malformed_pairs_are_rejected() {
        assert!(split_pair("novalue", '=').is_err());
        assert!(split_pair("=value", '=').is_err());
        assert_eq!(
            split_pair("key=a=b", '=').unwrap(),
            ("key".to_string(), "a=b".to_string())
        );
    }

    #[test]
    fn test_take_offset_keeps_other_query_parameters() {
        let cmd = parse(&["GET", "user/orders", "-q", "limit=50", "-q", "offset=5"]);
        let mut options = cmd.build_options().unwrap();

        assert_eq!(take_offset(&mut options).unwrap(), Some(5));
        assert_eq!(options.query, vec![("limit".to_string(), QueryValue::from("50"))]);

        let mut bad = RequestOptions::new().query("offset", "soon");
        assert!(take_offset(&mut bad).is_err());
    }

    #[tokio::test]
    async fn test_paginate_sends_one_offset_per_request() {
        let page = |offset: &str| {
            let mut response = HttpResponse::new(200, "[{\"id\":1}]");
            response.headers.insert("x-pagination-limit".to_string(), "1".to_string());
            response.headers.insert("x-pagination-offset".to_string(), offset.to_string());
            response.headers.insert("x-pagination-total".to_string(), "7".to_string());
            response
        };
        let stub = StubTransport::with_responses(vec![page("5"), page("6")]);
        let client = stub_client(&stub);
        let cmd = parse(&[
            "GET",
            "user/orders",
            "-q",
            "offset=5",
            "-q",
            "limit=1",
            "--paginate",
            "--silent",
        ]);

        cmd.execute_paginated(&client, cmd.build_options().unwrap()).await.unwrap();

        let offsets: Vec<Vec<String>> = stub
            .requests()
            .iter()
            .map(|request| {
                request
                    .url
                    .query_pairs()
                    .filter(|(key, _)| key == "offset")
                    .map(|(_, value)| value.into_owned())
                    .collect()
            })
            .collect();
        assert_eq!(offsets, vec![vec!["5".to_string()], vec!["6".to_string()]]);
    }
}
