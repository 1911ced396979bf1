//! `catalog`: terminal front-end for the catalog admin dashboard.
//!
//! Logs in against the hosted `users` table and manages categories and
//! resources. Every command runs the same headless dashboard a GUI would.

mod commands;
mod config;

use std::sync::Arc;

use catalog::confirm::{AlwaysConfirm, Confirm};
use clap::{Args, Parser, Subcommand};

use commands::app::App;
use commands::output::Output;
use commands::pages::{CategoryFields, ResourceFields};
use commands::StdinConfirm;

/// Catalog admin CLI.
#[derive(Parser, Debug)]
#[command(name = "catalog", about = "Catalog admin dashboard")]
struct Cli {
    /// Path to client config file (default: ~/.catalog/config.toml).
    #[arg(long = "config", global = true)]
    config: Option<String>,

    /// Output format: table or json.
    #[arg(long = "output", short = 'o', global = true, default_value = "table")]
    output: String,

    /// Keyword filter applied to list pages.
    #[arg(long = "search", short = 's', global = true)]
    search: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show or change the client config.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Resolve the start page (login or dashboard).
    Open,

    /// Log in with email, password and captcha.
    Login {
        #[arg(long)]
        email: Option<String>,
        /// Password (prefer the interactive prompt).
        #[arg(long)]
        password: Option<String>,
    },

    /// Forget the logged-in user.
    Logout,

    /// Master categories.
    #[command(alias = "category")]
    Categories {
        #[command(subcommand)]
        action: CategoryAction,
    },

    /// Resources.
    #[command(alias = "resource")]
    Resources {
        #[command(subcommand)]
        action: ResourceAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    Show,
    Set {
        #[arg(long)]
        service_url: Option<String>,
        #[arg(long)]
        api_key: Option<String>,
        #[arg(long)]
        session_path: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum CategoryAction {
    List,
    Add(CategoryArgs),
    Edit {
        id: i64,
        #[command(flatten)]
        fields: CategoryArgs,
    },
    Delete {
        id: i64,
        /// Skip confirmation.
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },
    /// Insert the 14 built-in categories.
    ImportDefaults,
}

#[derive(Subcommand, Debug)]
enum ResourceAction {
    List {
        /// Only resources in this category.
        #[arg(long)]
        category: Option<i64>,
    },
    Add(ResourceArgs),
    Edit {
        id: i64,
        #[command(flatten)]
        fields: ResourceArgs,
    },
    Delete {
        id: i64,
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },
}

#[derive(Args, Debug)]
struct CategoryArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    slug: Option<String>,
    #[arg(long)]
    active: Option<bool>,
}

impl From<CategoryArgs> for CategoryFields {
    fn from(a: CategoryArgs) -> Self {
        Self {
            name: a.name,
            slug: a.slug,
            active: a.active,
        }
    }
}

#[derive(Args, Debug)]
struct ResourceArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    author: Option<String>,
    #[arg(long)]
    platform: Option<String>,
    /// Image URL.
    #[arg(long)]
    image: Option<String>,
    #[arg(long)]
    overview: Option<String>,
    /// Category id.
    #[arg(long)]
    category: Option<i64>,
    #[arg(long)]
    compatibility: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    download_link: Option<String>,
    #[arg(long)]
    active: Option<bool>,
}

impl From<ResourceArgs> for ResourceFields {
    fn from(a: ResourceArgs) -> Self {
        Self {
            title: a.title,
            author: a.author,
            platform: a.platform,
            image: a.image,
            overview: a.overview,
            category: a.category,
            compatibility: a.compatibility,
            description: a.description,
            download_link: a.download_link,
            active: a.active,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout is for tables.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();
    let output = Output::parse(&cli.output)?;
    let config_path = cli
        .config
        .map(std::path::PathBuf::from)
        .unwrap_or_else(config::ClientConfig::default_path);
    let search = cli.search.as_deref();

    let open_app = |confirm: Arc<dyn Confirm>| -> anyhow::Result<App> {
        let config = config::ClientConfig::load(&config_path)?;
        App::open(&config, confirm)
    };
    let confirm_for = |yes: bool| -> Arc<dyn Confirm> {
        if yes {
            Arc::new(AlwaysConfirm)
        } else {
            Arc::new(StdinConfirm)
        }
    };

    match cli.command {
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&config_path)?,
            ConfigAction::Set {
                service_url,
                api_key,
                session_path,
            } => commands::config::set(
                service_url.as_deref(),
                api_key.as_deref(),
                session_path.as_deref(),
                &config_path,
            )?,
        },

        Commands::Open => {
            let app = open_app(Arc::new(StdinConfirm))?;
            commands::session::open(&app).await?;
        }

        Commands::Login { email, password } => {
            let app = open_app(Arc::new(StdinConfirm))?;
            commands::session::login(&app, email, password).await?;
        }

        Commands::Logout => {
            let app = open_app(Arc::new(StdinConfirm))?;
            commands::session::logout(&app).await?;
        }

        Commands::Categories { action } => match action {
            CategoryAction::List => {
                let app = open_app(Arc::new(StdinConfirm))?;
                commands::pages::list_categories(&app, search, output).await?;
            }
            CategoryAction::Add(args) => {
                let app = open_app(Arc::new(StdinConfirm))?;
                commands::pages::add_category(&app, args.into()).await?;
            }
            CategoryAction::Edit { id, fields } => {
                let app = open_app(Arc::new(StdinConfirm))?;
                commands::pages::edit_category(&app, id, fields.into()).await?;
            }
            CategoryAction::Delete { id, yes } => {
                let app = open_app(confirm_for(yes))?;
                commands::pages::delete_category(&app, id).await?;
            }
            CategoryAction::ImportDefaults => {
                let app = open_app(Arc::new(StdinConfirm))?;
                commands::pages::import_defaults(&app).await?;
            }
        },

        Commands::Resources { action } => match action {
            ResourceAction::List { category } => {
                let app = open_app(Arc::new(StdinConfirm))?;
                commands::pages::list_resources(&app, search, category, output).await?;
            }
            ResourceAction::Add(args) => {
                let app = open_app(Arc::new(StdinConfirm))?;
                commands::pages::add_resource(&app, args.into()).await?;
            }
            ResourceAction::Edit { id, fields } => {
                let app = open_app(Arc::new(StdinConfirm))?;
                commands::pages::edit_resource(&app, id, fields.into()).await?;
            }
            ResourceAction::Delete { id, yes } => {
                let app = open_app(confirm_for(yes))?;
                commands::pages::delete_resource(&app, id).await?;
            }
        },
    }

    Ok(())
}
