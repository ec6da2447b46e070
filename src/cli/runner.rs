//! CLI runner - executes commands

use crate::auth::Authenticator;
use crate::catalog::{Catalog, CatalogView};
use crate::cli::commands::{BrowseCommand, Cli, Commands};
use crate::cli::render::render;
use crate::config::ViewerConfig;
use crate::error::{Error, Result};
use crate::filter::FilterForm;
use crate::http::{HttpClient, Transport};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

const BROWSE_HELP: &str = "\
Commands:
  n                 next page
  p                 previous page
  r                 reload the current page (leaves search results)
  s key=value ...   search by product, brand or price
  h                 this help
  q                 quit";

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Token => self.token(),
            Commands::Page { page } => self.page(*page).await,
            Commands::Search {
                product,
                brand,
                price,
            } => {
                let form = FilterForm {
                    product: product.clone(),
                    brand: brand.clone(),
                    price: price.clone(),
                };
                self.search(&form).await
            }
            Commands::Browse => self.browse().await,
            Commands::Serve { port } => {
                let catalog = self.catalog()?;
                crate::cli::serve(catalog, *port).await
            }
        }
    }

    /// Config file (or defaults) with command-line overrides applied
    pub fn load_config(&self) -> Result<ViewerConfig> {
        let mut config = match &self.cli.config {
            Some(path) => ViewerConfig::from_file(path)?,
            None => ViewerConfig::default(),
        };

        if let Some(endpoint) = &self.cli.endpoint {
            config.endpoint.clone_from(endpoint);
        }
        if let Some(page_size) = self.cli.page_size {
            config.page_size = page_size;
        }
        if let Some(retries) = self.cli.max_retries {
            config.http.max_retries = Some(retries);
        }

        config.validate()?;
        Ok(config)
    }

    fn catalog(&self) -> Result<Catalog<HttpClient>> {
        let config = self.load_config()?;
        Catalog::with_page_size(config.http_client()?, config.page_size)
    }

    fn print(&self, view: &CatalogView) {
        println!("{}", render(view, self.cli.format));
    }

    fn token(&self) -> Result<()> {
        let config = self.load_config()?;
        match Authenticator::new(&config.auth).current_token() {
            Some(token) => {
                println!("{token}");
                Ok(())
            }
            None => Err(Error::config("Auth is disabled, no token to print")),
        }
    }

    async fn page(&self, page: usize) -> Result<()> {
        if page == 0 {
            return Err(Error::invalid_config("page", "pages are numbered from 1"));
        }

        let mut catalog = self.catalog()?;
        let view = load_page(&mut catalog, page).await?;
        self.print(&view);
        Ok(())
    }

    async fn search(&self, form: &FilterForm) -> Result<()> {
        if !form.is_searchable() {
            return Err(Error::invalid_filter(
                "form",
                "enter at least 3 characters of a product or brand, or a price",
            ));
        }

        let mut catalog = self.catalog()?;
        let view = catalog.search(form).await?;
        self.print(&view);
        Ok(())
    }

    async fn browse(&self) -> Result<()> {
        let mut catalog = self.catalog()?;
        eprintln!("{BROWSE_HELP}");

        let view = catalog.current_page().await?;
        self.print(&view);

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        browse_loop(&mut catalog, &mut lines, |view| self.print(view)).await
    }
}

/// Load one-based `page`, discovering every page before it
pub async fn load_page<T: Transport>(catalog: &mut Catalog<T>, page: usize) -> Result<CatalogView> {
    let mut view = catalog.current_page().await?;
    for _ in 1..page {
        if !view.can_go_forward {
            break;
        }
        view = catalog.next_page().await?;
    }
    Ok(view)
}

/// Read browse commands until `q` or end of input
///
/// Failed loads are reported and the loop keeps going.
async fn browse_loop<T, R, F>(
    catalog: &mut Catalog<T>,
    lines: &mut tokio::io::Lines<R>,
    mut show: F,
) -> Result<()>
where
    T: Transport,
    R: AsyncBufRead + Unpin,
    F: FnMut(&CatalogView),
{
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let Some(command) = BrowseCommand::parse(&line) else {
            eprintln!("Unknown command: {}", line.trim());
            continue;
        };

        let result = match command {
            BrowseCommand::Quit => return Ok(()),
            BrowseCommand::Help => {
                eprintln!("{BROWSE_HELP}");
                continue;
            }
            BrowseCommand::Next => catalog.next_page().await,
            BrowseCommand::Previous => catalog.previous_page().await,
            BrowseCommand::Reload => catalog.current_page().await,
            BrowseCommand::Search(form) => {
                if !form.is_searchable() {
                    tracing::warn!("Search needs 3+ characters or a price");
                    continue;
                }
                catalog.search(&form).await
            }
        };

        match result {
            Ok(view) => show(&view),
            Err(e) => eprintln!("Error: {e}"),
        }
    }

    Ok(())
}
