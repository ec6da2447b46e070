//! CLI commands and argument parsing

use crate::filter::FilterForm;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Catalog viewer CLI
#[derive(Parser, Debug)]
#[command(name = "catalog-viewer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Catalog API endpoint (overrides config)
    #[arg(long, global = true, env = "CATALOG_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Unique products per page (overrides config)
    #[arg(long, global = true)]
    pub page_size: Option<usize>,

    /// Give up after this many retries instead of retrying forever
    #[arg(long, global = true)]
    pub max_retries: Option<u32>,

    /// Output format
    #[arg(short, long, global = true, default_value = "cards")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show one page of products
    Page {
        /// One-based page number
        #[arg(short, long, default_value = "1")]
        page: usize,
    },

    /// Search products by name, brand or price
    Search {
        /// Product name
        #[arg(long)]
        product: Option<String>,

        /// Brand
        #[arg(long)]
        brand: Option<String>,

        /// Exact price
        #[arg(long)]
        price: Option<String>,
    },

    /// Page through the catalog interactively
    Browse,

    /// Print today's auth token
    Token,

    /// Start HTTP server mode
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable product cards
    Cards,
    /// JSON output (one view per line)
    Json,
    /// Indented JSON
    Pretty,
}

/// One line of input in browse mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    /// `n`
    Next,
    /// `p`
    Previous,
    /// `r`, reload the current page
    Reload,
    /// `s product=.. brand=.. price=..`
    Search(FilterForm),
    /// `h`
    Help,
    /// `q`
    Quit,
}

impl BrowseCommand {
    /// Parse a browse line; `None` for unknown input
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let (head, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

        match head {
            "n" | "next" => Some(Self::Next),
            "p" | "prev" => Some(Self::Previous),
            "r" | "reload" => Some(Self::Reload),
            "h" | "help" | "?" => Some(Self::Help),
            "q" | "quit" | "exit" => Some(Self::Quit),
            "s" | "search" => parse_search(rest).map(Self::Search),
            _ => None,
        }
    }
}

/// Parse `key=value` pairs; values run until the next key
fn parse_search(args: &str) -> Option<FilterForm> {
    let mut form = FilterForm::new();
    let mut current: Option<(&str, Vec<&str>)> = None;

    for word in args.split_whitespace() {
        if let Some((key, value)) = word.split_once('=') {
            if let Some((prev, words)) = current.take() {
                set_field(&mut form, prev, words.join(" "))?;
            }
            current = Some((key, vec![value]));
        } else if let Some((_, words)) = current.as_mut() {
            words.push(word);
        } else {
            return None;
        }
    }

    if let Some((key, words)) = current {
        set_field(&mut form, key, words.join(" "))?;
    }
    Some(form)
}

fn set_field(form: &mut FilterForm, key: &str, value: String) -> Option<()> {
    match key {
        "product" => form.product = Some(value),
        "brand" => form.brand = Some(value),
        "price" => form.price = Some(value),
        _ => return None,
    }
    Some(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_navigation() {
        assert_eq!(BrowseCommand::parse("n"), Some(BrowseCommand::Next));
        assert_eq!(BrowseCommand::parse(" prev "), Some(BrowseCommand::Previous));
        assert_eq!(BrowseCommand::parse("q"), Some(BrowseCommand::Quit));
        assert_eq!(BrowseCommand::parse("r"), Some(BrowseCommand::Reload));
        assert_eq!(BrowseCommand::parse("?"), Some(BrowseCommand::Help));
        assert_eq!(BrowseCommand::parse("jump"), None);
    }

    #[test]
    fn test_parse_search() {
        assert_eq!(
            BrowseCommand::parse("s brand=Acme"),
            Some(BrowseCommand::Search(FilterForm::new().brand("Acme")))
        );
        assert_eq!(
            BrowseCommand::parse("search product=gold ring price=500"),
            Some(BrowseCommand::Search(
                FilterForm::new().product("gold ring").price("500")
            ))
        );
        assert_eq!(
            BrowseCommand::parse("s"),
            Some(BrowseCommand::Search(FilterForm::new()))
        );
    }

    #[test]
    fn test_parse_search_rejects_unknown_keys() {
        assert_eq!(BrowseCommand::parse("s color=red"), None);
        assert_eq!(BrowseCommand::parse("s loose words"), None);
    }

    #[test]
    fn test_cli_parses_page() {
        let cli = Cli::try_parse_from(["catalog-viewer", "page", "--page", "3", "--page-size", "10"])
            .unwrap();
        assert_eq!(cli.page_size, Some(10));
        assert!(matches!(cli.command, Commands::Page { page: 3 }));
        assert_eq!(cli.format, OutputFormat::Cards);
    }

    #[test]
    fn test_cli_parses_search() {
        let cli = Cli::try_parse_from([
            "catalog-viewer",
            "--format",
            "json",
            "search",
            "--brand",
            "Acme",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Search {
                product,
                brand,
                price,
            } => {
                assert!(product.is_none());
                assert_eq!(brand.as_deref(), Some("Acme"));
                assert!(price.is_none());
            }
            other => panic!("Expected Search, got {other:?}"),
        }
    }
}
