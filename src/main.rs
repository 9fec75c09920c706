// src/main.rs
//! `notionkit` command line: fetch Notion objects and print what the typed
//! model makes of them.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use notionkit::model::{Database, Page, User, UserKind};
use notionkit::{logging, ClientConfig, NotionClient};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CommandLineInput {
    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false, global = true)]
    verbose: bool,

    /// Bypass the response cache
    #[arg(long = "no-cache", default_value_t = false, global = true)]
    no_cache: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show a database and its schema
    Database { id: String },
    /// Show a page and its property values
    Page { id: String },
    /// List the pages of a database
    Pages {
        id: String,
        /// Maximum number of pages to list (0 = all)
        #[arg(long, default_value_t = 0)]
        max: usize,
    },
    /// Show a user
    User { id: String },
    /// Show the bot user behind the token
    Me,
}

fn print_database(db: &Database) {
    println!("{} ({})", db.title(), db.id());
    if !db.description().is_empty() {
        println!("  {}", db.description());
    }
    println!("  inline: {}", db.is_inline);
    for property in &db.properties {
        println!("  - {} [{}] {}", property.name, property.prop_type(), property.id);
    }
}

fn print_page(page: &Page) {
    println!("{} ({})", page.title(), page.id());
    for property in &page.properties {
        let value = property
            .plain_text()
            .unwrap_or_else(|| format!("<{}>", property.prop_type()));
        println!("  {}: {}", property.name, value);
    }
}

fn print_user(user: &User) {
    let name = user.name.as_deref().unwrap_or("<unnamed>");
    match &user.kind {
        UserKind::Person { email } => {
            println!("{} (person) {}", name, email.as_deref().unwrap_or(""))
        }
        UserKind::Bot { workspace_name, .. } => {
            println!("{} (bot) {}", name, workspace_name.as_deref().unwrap_or(""))
        }
    }
}

fn run(input: CommandLineInput) -> Result<()> {
    let client = NotionClient::new(None, ClientConfig::default())
        .context("Failed to create Notion client")?;
    let use_cache = !input.no_cache;

    match input.command {
        Command::Database { id } => {
            let db = client
                .retrieve_database(&id, use_cache)
                .with_context(|| format!("Failed to retrieve database {}", id))?;
            print_database(&db);
        }
        Command::Page { id } => {
            let page = client
                .retrieve_page(&id, use_cache)
                .with_context(|| format!("Failed to retrieve page {}", id))?;
            print_page(&page);
        }
        Command::Pages { id, max } => {
            for page in client.pages(&id, max) {
                let page = page.with_context(|| format!("Failed to query database {}", id))?;
                println!("{}\t{}", page.id(), page.title());
            }
        }
        Command::User { id } => {
            let user = client
                .retrieve_user(&id, use_cache)
                .with_context(|| format!("Failed to retrieve user {}", id))?;
            print_user(&user);
        }
        Command::Me => {
            let user = client
                .retrieve_me(use_cache)
                .context("Failed to retrieve the token's bot user")?;
            print_user(&user);
        }
    }

    log::debug!("Cache: {:?}", client.cache_info());
    client.close();
    Ok(())
}

fn main() {
    let input = CommandLineInput::parse();
    let level = if input.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    logging::init_console(level);

    if let Err(e) = run(input) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
