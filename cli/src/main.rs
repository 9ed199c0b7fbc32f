mod render;
mod transport;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use clap::{Args, Parser, Subcommand, ValueEnum};
use portal::config::{
    ClientConfig, ConfigError, DEFAULT_API_URL, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, Timeouts,
};
use portal::error::{ApiError, FieldErrors};
use portal::guard;
use portal::http::{HttpClient, Transport};
use portal::pagination::{InfiniteQuery, ListQuery};
use portal::resources::{
    self, CropPlantingQuery, FarmerQuery, NotificationQuery, Sort, SortDirection, TechnicianQuery, UserQuery,
};
use portal::session::{AuthOutcome, Session};
use portal::types::Credentials;
use serde::Serialize;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use crate::transport::ReqwestTransport;

type CliSession = Session<ReqwestTransport>;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("http client setup failed: {0}")]
    Client(#[from] reqwest::Error),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("{message}")]
    Auth { message: String, errors: FieldErrors },
    #[error("missing credentials; pass --login and --password or set AGRIBOARD_LOGIN and AGRIBOARD_PASSWORD")]
    MissingCredentials,
    #[error("not signed in")]
    NotSignedIn,
    #[error("payload must be a JSON object")]
    NotAnObject,
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "agriboard", about = "Agriboard dashboard API command-line client")]
struct Cli {
    #[arg(long, env = "AGRIBOARD_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Seconds to wait for a whole request.
    #[arg(
        long,
        env = "AGRIBOARD_REQUEST_TIMEOUT_SECS",
        default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    request_timeout: u64,

    /// Seconds to wait for the connection to open.
    #[arg(
        long,
        env = "AGRIBOARD_CONNECT_TIMEOUT_SECS",
        default_value_t = DEFAULT_CONNECT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    connect_timeout: u64,

    /// Email address or username to sign in with before the command runs.
    #[arg(long, env = "AGRIBOARD_LOGIN")]
    login: Option<String>,

    #[arg(long, env = "AGRIBOARD_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the signed-in user with roles and permissions.
    Whoami,
    /// Sign in with --login/--password and show the session.
    Login,
    Logout,
    /// Refresh the session token.
    Refresh,
    /// Evaluate the route guard for a dashboard path.
    Guard { path: String },
    /// List a paginated resource, one JSON document per line.
    List(ListArgs),
    Categories,
    User(UserCommand),
    Farmer(FarmerCommand),
    Notification(NotificationCommand),
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Resource {
    Users,
    Farmers,
    Technicians,
    CropPlantings,
    Notifications,
}

#[derive(Args, Debug)]
struct ListArgs {
    #[arg(value_enum)]
    resource: Resource,

    #[arg(long, default_value = "")]
    search: String,

    #[arg(long)]
    role: Option<String>,

    #[arg(long)]
    association: Option<String>,

    #[arg(long)]
    status: Option<String>,

    /// Category id (crop plantings).
    #[arg(long)]
    category: Option<String>,

    /// Planting date lower bound, `YYYY-MM-DD`.
    #[arg(long)]
    from: Option<String>,

    /// Planting date upper bound, `YYYY-MM-DD`.
    #[arg(long)]
    to: Option<String>,

    #[arg(long, default_value = "created_at")]
    sort_by: String,

    #[arg(long, default_value_t = false)]
    asc: bool,

    /// Stop after this many pages; all pages when omitted.
    #[arg(long)]
    pages: Option<usize>,
}

#[derive(Args, Debug)]
struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Subcommand, Debug)]
enum UserSubcommand {
    Create {
        #[arg(long)]
        data: String,
    },
    Update {
        user_id: String,
        #[arg(long)]
        data: String,
    },
    Delete {
        user_id: String,
    },
    Profile {
        user_id: String,
    },
    /// Replace the user's permissions with the given list.
    Permissions {
        user_id: String,
        permissions: Vec<String>,
    },
}

#[derive(Args, Debug)]
struct FarmerCommand {
    #[command(subcommand)]
    command: FarmerSubcommand,
}

#[derive(Subcommand, Debug)]
enum FarmerSubcommand {
    Create {
        #[arg(long)]
        data: String,
    },
}

#[derive(Args, Debug)]
struct NotificationCommand {
    #[command(subcommand)]
    command: NotificationSubcommand,
}

#[derive(Subcommand, Debug)]
enum NotificationSubcommand {
    Read { notification_id: String },
    ReadAll,
    Delete { notification_id: String },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = client_config(&cli)?;
    let client = HttpClient::new(ReqwestTransport::new(&config)?);
    let session = Session::new(client, |path: &str| tracing::debug!(path, "session navigated"));

    let result = run(&cli, &session).await;
    if let Err(CliError::Auth { errors, .. }) = &result {
        for (field, messages) in errors {
            for message in messages {
                eprintln!("{field}: {message}");
            }
        }
    }
    result
}

fn client_config(cli: &Cli) -> Result<ClientConfig, ConfigError> {
    let mut config = ClientConfig::new(&cli.api_url)?;
    config.timeouts = Timeouts { request_secs: cli.request_timeout, connect_secs: cli.connect_timeout };
    Ok(config)
}

/// Credentials from --login/--password; an `@` selects email sign-in.
fn credentials(cli: &Cli) -> Option<Credentials> {
    let login = cli.login.as_deref().map(str::trim).filter(|l| !l.is_empty())?;
    let password = cli.password.as_deref().filter(|p| !p.is_empty())?;
    Some(if login.contains('@') {
        Credentials::email(login, password)
    } else {
        Credentials::login(login, password)
    })
}

fn auth_result(outcome: AuthOutcome) -> Result<(), CliError> {
    match outcome {
        AuthOutcome::Success(_) => Ok(()),
        AuthOutcome::Failure { message, errors } => Err(CliError::Auth { message, errors }),
    }
}

/// Sign in when credentials were given, otherwise pick up whatever session
/// the API reports.
async fn establish(cli: &Cli, session: &CliSession) -> Result<(), CliError> {
    match credentials(cli) {
        Some(credentials) => auth_result(session.login(&credentials).await),
        None => {
            session.init().await;
            Ok(())
        }
    }
}

async fn run(cli: &Cli, session: &CliSession) -> Result<(), CliError> {
    if let Command::Login = cli.command {
        let credentials = credentials(cli).ok_or(CliError::MissingCredentials)?;
        auth_result(session.login(&credentials).await)?;
        println!("{}", render::describe_session(&session.snapshot()));
        return Ok(());
    }

    establish(cli, session).await?;
    let client = session.client();
    match &cli.command {
        // Handled before the session is established.
        Command::Login => Ok(()),
        Command::Whoami => {
            println!("{}", render::describe_session(&session.snapshot()));
            Ok(())
        }
        Command::Logout => {
            if !session.is_authenticated() {
                return Err(CliError::NotSignedIn);
            }
            session.logout().await?;
            println!("signed out");
            Ok(())
        }
        Command::Refresh => {
            auth_result(session.refresh_token().await)?;
            println!("{}", render::describe_session(&session.snapshot()));
            Ok(())
        }
        Command::Guard { path } => {
            let navigation = guard::resolve_path(session, path).await;
            println!("{}", render::describe_navigation(&navigation));
            Ok(())
        }
        Command::List(args) => run_list(client, args).await,
        Command::Categories => print_json(&resources::categories(client).await?),
        Command::User(user) => run_user(client, &user.command).await,
        Command::Farmer(farmer) => match &farmer.command {
            FarmerSubcommand::Create { data } => {
                print_json(&resources::create_farmer(client, parse_object(data)?).await?)
            }
        },
        Command::Notification(notification) => run_notification(client, &notification.command).await,
    }
}

async fn run_user<T: Transport>(client: &HttpClient<T>, command: &UserSubcommand) -> Result<(), CliError> {
    let value = match command {
        UserSubcommand::Create { data } => resources::create_user(client, parse_object(data)?).await?,
        UserSubcommand::Update { user_id, data } => {
            resources::update_user(client, user_id, parse_object(data)?).await?
        }
        UserSubcommand::Delete { user_id } => resources::delete_user(client, user_id).await?,
        UserSubcommand::Profile { user_id } => resources::user_profile(client, user_id).await?,
        UserSubcommand::Permissions { user_id, permissions } => {
            resources::update_user_permissions(client, user_id, permissions).await?
        }
    };
    print_json(&value)
}

async fn run_notification<T: Transport>(
    client: &HttpClient<T>,
    command: &NotificationSubcommand,
) -> Result<(), CliError> {
    let value = match command {
        NotificationSubcommand::Read { notification_id } => {
            resources::mark_notification_read(client, notification_id).await?
        }
        NotificationSubcommand::ReadAll => resources::mark_all_notifications_read(client).await?,
        NotificationSubcommand::Delete { notification_id } => {
            resources::delete_notification(client, notification_id).await?
        }
    };
    print_json(&value)
}

async fn run_list<T: Transport>(client: &HttpClient<T>, args: &ListArgs) -> Result<(), CliError> {
    let rendered = match args.resource {
        Resource::Users => render::json_lines(&collect_pages(client, user_query(args), args.pages).await?)?,
        Resource::Farmers => render::json_lines(&collect_pages(client, farmer_query(args), args.pages).await?)?,
        Resource::Technicians => {
            let query = TechnicianQuery { search: args.search.clone() };
            render::json_lines(&collect_pages(client, query, args.pages).await?)?
        }
        Resource::CropPlantings => {
            render::json_lines(&collect_pages(client, crop_planting_query(args), args.pages).await?)?
        }
        Resource::Notifications => {
            render::json_lines(&collect_pages(client, NotificationQuery, args.pages).await?)?
        }
    };
    if !rendered.is_empty() {
        println!("{rendered}");
    }
    Ok(())
}

/// Walk the listing page by page until the last page or `max_pages`.
async fn collect_pages<Q, T>(client: &HttpClient<T>, query: Q, max_pages: Option<usize>) -> Result<Vec<Q::Item>, ApiError>
where
    Q: ListQuery,
    Q::Item: Clone,
    T: Transport,
{
    let mut listing = InfiniteQuery::new(query);
    let mut fetched = 0;
    while max_pages.is_none_or(|max| fetched < max) && listing.fetch_next_page(client).await {
        fetched += 1;
        if let Some(err) = listing.error() {
            return Err(err.clone());
        }
    }
    tracing::debug!(endpoint = listing.query().endpoint(), pages = fetched, "listing collected");
    Ok(listing.items().cloned().collect())
}

fn sort(args: &ListArgs) -> Sort {
    let direction = if args.asc { SortDirection::Asc } else { SortDirection::Desc };
    Sort { by: args.sort_by.clone(), direction }
}

fn user_query(args: &ListArgs) -> UserQuery {
    UserQuery { search: args.search.clone(), role: args.role.clone(), sort: sort(args) }
}

fn farmer_query(args: &ListArgs) -> FarmerQuery {
    FarmerQuery { search: args.search.clone(), association: args.association.clone(), sort: sort(args) }
}

fn crop_planting_query(args: &ListArgs) -> CropPlantingQuery {
    CropPlantingQuery {
        search: args.search.clone(),
        status: args.status.clone(),
        category: args.category.clone(),
        date_from: args.from.clone(),
        date_to: args.to.clone(),
        sort: sort(args),
    }
}

fn parse_object(data: &str) -> Result<Value, CliError> {
    let value = serde_json::from_str::<Value>(data)?;
    if value.is_object() { Ok(value) } else { Err(CliError::NotAnObject) }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
