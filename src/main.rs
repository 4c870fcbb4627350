//! Command-line front end for the AI gateway admin console.
//!
//! Each command is a console page: it mounts, passes the route guard, fetches
//! its data through the authenticated API client and prints it as JSON.

use std::future::Future;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use gateway_console::api::{ApiClient, ApiRequest, ApiResult, Session};
use gateway_console::auth::{AuthApi, Credentials, GuardOutcome, Identity, Location, LoginRedirect, RouteGuard};
use gateway_console::config::{self, validation::validate_config, ConfigError, ConsoleConfig};
use gateway_console::dashboard::{breakers, providers, queue, requests, tokens, usage};
use gateway_console::fetch::{Banner, FetchState, LoadOutcome, PollExit, Poller, Resource};
use gateway_console::lifecycle::{signals, Mount};
use gateway_console::observability::logging;

const ENV_SESSION: &str = "GATEWAY_SESSION";
const ENV_PASSWORD: &str = "GATEWAY_PASSWORD";

const EXIT_FAILED: u8 = 1;
const EXIT_SIGNED_OUT: u8 = 2;
const EXIT_INTERRUPTED: u8 = 130;

#[derive(Parser)]
#[command(name = "gateway-console")]
#[command(about = "Admin console for the AI gateway", long_about = None)]
struct Cli {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Backend base URL (overrides the config file and GATEWAY_API_URL)
    #[arg(short, long)]
    url: Option<String>,

    /// Session cookie value (defaults to GATEWAY_SESSION)
    #[arg(short, long)]
    session: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and print the session value to export
    Login {
        #[arg(long)]
        email: String,
        /// Password (defaults to GATEWAY_PASSWORD)
        #[arg(long)]
        password: Option<String>,
        /// Query string of the login location you were sent to
        #[arg(long)]
        redirect: Option<String>,
    },
    /// End the current session
    Logout,
    #[command(flatten)]
    Page(PageCommand),
}

/// Commands that open a page behind the route guard.
#[derive(Subcommand)]
enum PageCommand {
    /// Show the signed-in user
    Whoami,
    /// Circuit breaker states per provider
    Breakers {
        #[command(subcommand)]
        action: Option<BreakerAction>,
    },
    /// Provider health
    Providers,
    /// Request queue statistics, or queued jobs with --status/--limit
    Queue {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// API tokens
    Tokens {
        #[command(subcommand)]
        action: Option<TokenAction>,
    },
    /// Usage and cost for a billing period
    Usage {
        #[arg(long)]
        period: Option<String>,
    },
    /// Month-end cost forecast
    Forecast,
    /// Inference request log
    Requests {
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
        #[arg(long)]
        provider: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },
    /// GET any backend API path
    Get { path: String },
    /// Refresh a page until Ctrl-C
    Watch {
        page: WatchPage,
        /// Seconds between refreshes
        #[arg(long)]
        interval: Option<u64>,
    },
}

#[derive(Subcommand)]
enum BreakerAction {
    /// Force a provider's breaker closed
    Reset { provider: String },
}

#[derive(Subcommand)]
enum TokenAction {
    /// Create a token and print its secret once
    Create {
        name: String,
        #[arg(long)]
        scope: Vec<String>,
        #[arg(long)]
        expires_in_days: Option<u32>,
    },
    /// Revoke a token by id
    Revoke { id: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum WatchPage {
    Breakers,
    Providers,
    Queue,
    Forecast,
}

impl PageCommand {
    /// Console location the page lives at.
    fn location(&self) -> &'static str {
        match self {
            PageCommand::Whoami => "/account",
            PageCommand::Breakers { .. } | PageCommand::Watch { page: WatchPage::Breakers, .. } => "/breakers",
            PageCommand::Providers | PageCommand::Watch { page: WatchPage::Providers, .. } => "/providers",
            PageCommand::Queue { .. } | PageCommand::Watch { page: WatchPage::Queue, .. } => "/queue",
            PageCommand::Tokens { .. } => "/tokens",
            PageCommand::Usage { .. } => "/usage",
            PageCommand::Forecast | PageCommand::Watch { page: WatchPage::Forecast, .. } => "/forecast",
            PageCommand::Requests { .. } => "/requests",
            PageCommand::Get { .. } => "/explorer",
        }
    }
}

/// Everything a page needs to talk to the backend.
struct Console {
    config: ConsoleConfig,
    client: ApiClient,
    auth: AuthApi,
    session: Session,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = config::load(cli.config.as_deref())?;
    if let Some(url) = cli.url {
        config.api.base_url = url;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }
    logging::init(&config.observability);

    let client = ApiClient::new(&config.api)?;
    let auth = AuthApi::new(client.clone(), config.auth.clone());
    let session = match cli
        .session
        .or_else(|| std::env::var(ENV_SESSION).ok())
        .filter(|token| !token.trim().is_empty())
    {
        Some(token) => auth.restore_session(token.trim()),
        None => Session::new(),
    };

    tracing::debug!(base_url = %client.base_url(), "Console starting");

    let console = Console {
        config,
        client,
        auth,
        session,
    };

    match cli.command {
        Commands::Login {
            email,
            password,
            redirect,
        } => console.login(email, password, redirect).await,
        Commands::Logout => console.logout().await,
        Commands::Page(page) => console.open(page).await,
    }
}

impl Console {
    async fn login(
        &self,
        email: String,
        password: Option<String>,
        redirect: Option<String>,
    ) -> Result<ExitCode, Box<dyn std::error::Error>> {
        let password = password
            .or_else(|| std::env::var(ENV_PASSWORD).ok())
            .ok_or("a password is required: pass --password or set GATEWAY_PASSWORD")?;
        let credentials = Credentials { email, password };

        let identity = match self.auth.login(&self.session, &credentials).await {
            Ok(identity) => identity,
            Err(e) => {
                eprintln!("{}", Banner::from_error(&e));
                return Ok(ExitCode::from(EXIT_FAILED));
            }
        };

        eprintln!(
            "Signed in to {} ({}) as {}",
            self.config.branding.product_name,
            self.config.branding.tagline,
            identity.display_name()
        );
        match self.auth.session_token(&self.session) {
            Some(token) => println!("export {ENV_SESSION}={token}"),
            None => eprintln!(
                "warning: the backend did not set a `{}` cookie",
                self.config.auth.session_cookie
            ),
        }
        if let Some(query) = redirect {
            eprintln!("Continue at {}", LoginRedirect::return_target(&query));
        }
        Ok(ExitCode::SUCCESS)
    }

    /// Logging out needs no guard: an already expired session is fine.
    async fn logout(&self) -> Result<ExitCode, Box<dyn std::error::Error>> {
        match self.auth.logout(&self.session).await {
            Ok(()) => {
                eprintln!("Signed out of {}", self.config.branding.product_name);
                println!("unset {ENV_SESSION}");
                Ok(ExitCode::SUCCESS)
            }
            Err(e) if e.is_auth() => {
                eprintln!("Session already ended");
                println!("unset {ENV_SESSION}");
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                eprintln!("{}", Banner::from_error(&e));
                Ok(ExitCode::from(EXIT_FAILED))
            }
        }
    }

    /// Mount the page behind the route guard and render it.
    async fn open(&self, page: PageCommand) -> Result<ExitCode, Box<dyn std::error::Error>> {
        let location = Location::parse(page.location()).unwrap_or_else(Location::root);
        let mount = Mount::new();
        tokio::spawn(signals::unmount_on_ctrl_c(mount.clone()));

        let guard = RouteGuard::new(self.auth.clone(), self.config.auth.login_path.clone(), location);
        let exit = match guard.protect(&self.session, &mount, Identity::clone).await {
            GuardOutcome::Render(identity) => self.render(page, identity, &mount).await,
            GuardOutcome::Redirect(redirect) => {
                eprintln!(
                    "Not signed in; {} needs a session. Sign in at {}:\n  gateway-console login --email <email> --redirect '{}'",
                    redirect.return_to(),
                    redirect.href(),
                    redirect.href().split_once('?').map_or("", |(_, q)| q)
                );
                Ok(ExitCode::from(EXIT_SIGNED_OUT))
            }
            GuardOutcome::Abandoned => Ok(ExitCode::from(EXIT_INTERRUPTED)),
        };

        mount.unmount();
        exit
    }

    async fn render(
        &self,
        page: PageCommand,
        identity: Identity,
        mount: &Mount,
    ) -> Result<ExitCode, Box<dyn std::error::Error>> {
        let (client, session) = (&self.client, &self.session);

        match page {
            PageCommand::Whoami => {
                eprintln!(
                    "{} · {}",
                    self.config.branding.product_name, self.config.branding.tagline
                );
                print_json(&identity)?;
                Ok(ExitCode::SUCCESS)
            }
            PageCommand::Breakers { action: None } => show(mount, breakers::list(client, session)).await,
            PageCommand::Breakers {
                action: Some(BreakerAction::Reset { provider }),
            } => show(mount, breakers::reset(client, session, &provider)).await,
            PageCommand::Providers => {
                show_with(mount, providers::list(client, session), |list| {
                    let down = providers::unhealthy(list);
                    if !down.is_empty() {
                        eprintln!("warning: unhealthy providers: {}", down.join(", "));
                    }
                })
                .await
            }
            PageCommand::Queue {
                status: None,
                limit: None,
            } => show(mount, queue::stats(client, session)).await,
            PageCommand::Queue { status, limit } => {
                show(mount, queue::jobs(client, session, status.as_deref(), limit)).await
            }
            PageCommand::Tokens { action: None } => show(mount, tokens::list(client, session)).await,
            PageCommand::Tokens {
                action:
                    Some(TokenAction::Create {
                        name,
                        scope,
                        expires_in_days,
                    }),
            } => {
                let new = tokens::NewToken {
                    name,
                    scopes: scope,
                    expires_in_days,
                };
                show(mount, tokens::create(client, session, &new)).await
            }
            PageCommand::Tokens {
                action: Some(TokenAction::Revoke { id }),
            } => show(mount, tokens::revoke(client, session, &id)).await,
            PageCommand::Usage { period } => {
                show_with(mount, usage::summary(client, session, period.as_deref()), |summary| {
                    eprintln!(
                        "{}: {} tokens, ${:.2}",
                        summary.period,
                        summary.total_tokens(),
                        summary.total_cost_usd
                    );
                })
                .await
            }
            PageCommand::Forecast => {
                show_with(mount, usage::forecast(client, session), |forecast| {
                    if forecast.over_budget() {
                        eprintln!(
                            "warning: projected ${:.2} exceeds the ${:.2} budget",
                            forecast.projected_month_usd,
                            forecast.budget_usd.unwrap_or_default()
                        );
                    }
                })
                .await
            }
            PageCommand::Requests {
                limit,
                offset,
                provider,
                status,
            } => {
                let filter = requests::RequestFilter {
                    limit,
                    offset,
                    provider,
                    status,
                };
                show(mount, requests::list(client, session, &filter)).await
            }
            PageCommand::Get { path } => {
                show(
                    mount,
                    client.send::<serde_json::Value>(session, ApiRequest::get(path)),
                )
                .await
            }
            PageCommand::Watch { page, interval } => {
                let secs = interval.unwrap_or(self.config.polling.interval_secs).max(1);
                let poller = Poller::new(Duration::from_secs(secs));
                match page {
                    WatchPage::Breakers => watch(mount, poller, || breakers::list(client, session)).await,
                    WatchPage::Providers => watch(mount, poller, || providers::list(client, session)).await,
                    WatchPage::Queue => watch(mount, poller, || queue::stats(client, session)).await,
                    WatchPage::Forecast => watch(mount, poller, || usage::forecast(client, session)).await,
                }
            }
        }
    }
}

/// Load one page resource and print it.
async fn show<T, Fut>(mount: &Mount, fetch: Fut) -> Result<ExitCode, Box<dyn std::error::Error>>
where
    T: Clone + Serialize,
    Fut: Future<Output = ApiResult<T>>,
{
    show_with(mount, fetch, |_| {}).await
}

/// Like [`show`], then hand the loaded data to `notes` for stderr hints.
async fn show_with<T, Fut, N>(
    mount: &Mount,
    fetch: Fut,
    notes: N,
) -> Result<ExitCode, Box<dyn std::error::Error>>
where
    T: Clone + Serialize,
    Fut: Future<Output = ApiResult<T>>,
    N: FnOnce(&T),
{
    let resource = Resource::new(mount.clone());
    let outcome = resource.load(fetch).await;
    let state = resource.snapshot();

    match outcome {
        LoadOutcome::Loaded => {
            if let Some(data) = &state.data {
                print_json(data)?;
                notes(data);
            }
            Ok(ExitCode::SUCCESS)
        }
        LoadOutcome::Failed => {
            let auth_failure = state.error.as_ref().is_some_and(Banner::is_auth);
            if let Some(banner) = &state.error {
                eprintln!("{banner}");
            }
            Ok(ExitCode::from(if auth_failure { EXIT_SIGNED_OUT } else { EXIT_FAILED }))
        }
        // A single load on a fresh resource is never overtaken.
        LoadOutcome::Abandoned | LoadOutcome::Superseded => Ok(ExitCode::from(EXIT_INTERRUPTED)),
    }
}

/// Poll a page resource until Ctrl-C or the session is rejected.
async fn watch<T, F, Fut>(
    mount: &Mount,
    poller: Poller,
    fetch: F,
) -> Result<ExitCode, Box<dyn std::error::Error>>
where
    T: Clone + Serialize,
    F: FnMut() -> Fut,
    Fut: Future<Output = ApiResult<T>>,
{
    let resource = Resource::new(mount.clone());
    let exit = poller.run(&resource, fetch, render_state).await;

    Ok(match exit {
        PollExit::Unmounted => ExitCode::SUCCESS,
        PollExit::SessionRejected => ExitCode::from(EXIT_SIGNED_OUT),
    })
}

fn render_state<T: Serialize>(state: &FetchState<T>) {
    if let Some(banner) = &state.error {
        eprintln!("{banner}");
    } else if let Some(data) = &state.data {
        if let Err(e) = print_json(data) {
            tracing::error!(error = %e, "Failed to render page");
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
