use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use manahr_access::{Action, DataAccessLevel, Module, Permission, Role};
use manahr_config::{AppConfig, ConfigManager};
use manahr_session::{
    visible_items, FileSnapshotRepository, InMemoryTokenProvider, RouteGuard, SessionContext, User,
};
use serde::Deserialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "manahr")]
#[command(about = "Inspect the persisted ManaHR session and evaluate access rules")]
struct Cli {
    /// Configuration file (defaults to <config dir>/manahr/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the persisted session (defaults to <data dir>/manahr)
    #[arg(long, global = true)]
    state_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the persisted session
    Show,
    /// Sign in with an identity read from a JSON file
    Login {
        /// File with `user`, `role` and `permissions`
        #[arg(short, long)]
        identity: PathBuf,
    },
    /// Sign out and clear the persisted identity
    Logout,
    /// Evaluate a single access check against the session
    Check {
        #[command(subcommand)]
        check: CheckCommand,
    },
    /// List the named capabilities the session grants
    Capabilities,
    /// Decide a navigation request
    Guard {
        /// Requested path, e.g. /payroll?month=3
        path: String,
    },
    /// List the sidebar entries the session may see
    Nav,
    /// Print the effective configuration
    Config,
}

#[derive(Subcommand)]
enum CheckCommand {
    /// Permission by name or full name, e.g. users:read
    Permission { name: String },
    /// Any permission in a module
    Module { module: String },
    /// Some permission pairing module and action
    Action { module: String, action: String },
    /// Data scope
    Data {
        #[arg(value_enum)]
        scope: Scope,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Scope {
    All,
    Team,
    Own,
}

impl From<Scope> for DataAccessLevel {
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::All => DataAccessLevel::All,
            Scope::Team => DataAccessLevel::Team,
            Scope::Own => DataAccessLevel::Own,
        }
    }
}

/// Identity accepted by `manahr login`
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IdentityFile {
    user: User,
    role: Role,
    #[serde(default)]
    permissions: Vec<Permission>,
    #[serde(default)]
    token: String,
    #[serde(default)]
    refresh_token: String,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let manager = match &cli.config {
        Some(path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let config = manager
        .load_config()
        .with_context(|| format!("loading {}", manager.config_path().display()))?;
    debug!("Configuration loaded from {:?}", manager.config_path());

    let mut session = open_session(&config, cli.state_dir.as_ref())?;

    match cli.command {
        Commands::Show => show(&session),
        Commands::Login { identity } => {
            let raw = std::fs::read_to_string(&identity)
                .with_context(|| format!("reading {}", identity.display()))?;
            let identity: IdentityFile =
                serde_json::from_str(&raw).context("parsing identity file")?;
            session.login(
                identity.user,
                identity.role,
                identity.permissions,
                identity.token,
                identity.refresh_token,
            );
            show(&session);
        }
        Commands::Logout => {
            session.logout();
            println!("Signed out");
        }
        Commands::Check { check } => {
            let granted = run_check(&session, check);
            println!("{}", if granted { "granted" } else { "denied" });
            if !granted {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Capabilities => {
            for capability in session.evaluator().capabilities() {
                println!("{:?}\t{}", capability, capability);
            }
        }
        Commands::Guard { path } => {
            let guard = RouteGuard::new(config.routes.clone());
            let decision = session.guard(&guard, &path);
            match guard.redirect_target(decision) {
                Some(target) => println!("{} -> {}", decision, target),
                None => println!("{}", decision),
            }
        }
        Commands::Nav => {
            for item in visible_items(&session.evaluator()) {
                println!("{}\t{}", item.label, item.href);
            }
        }
        Commands::Config => {
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn open_session(config: &AppConfig, state_dir: Option<&PathBuf>) -> anyhow::Result<SessionContext> {
    let repository = match state_dir {
        Some(dir) => FileSnapshotRepository::new(dir, &config.user_key),
        None => FileSnapshotRepository::with_defaults(&config.user_key)?,
    };
    debug!("Session snapshot at {:?}", repository.path());

    Ok(SessionContext::open(
        Arc::new(repository),
        Arc::new(InMemoryTokenProvider::new()),
    ))
}

fn run_check(session: &SessionContext, check: CheckCommand) -> bool {
    match check {
        CheckCommand::Permission { name } => session.has_permission(&name),
        CheckCommand::Module { module } => session.has_module(&Module::from(module)),
        CheckCommand::Action { module, action } => {
            session.has_action(&Module::from(module), &Action::from(action))
        }
        CheckCommand::Data { scope } => session.can_access_data(scope.into()),
    }
}

fn show(session: &SessionContext) {
    let Some(user) = session.user() else {
        println!("Not signed in");
        return;
    };

    println!("User:        {} <{}> ({})", user.full_name, user.email, user.id);
    if let Some(role) = session.role() {
        println!(
            "Role:        {} (level {}, data scope {})",
            role.name, role.level, role.data_access_level
        );
    }
    println!("Permissions: {}", session.permissions().len());
    for permission in session.permissions() {
        println!("  {}", permission.name);
    }
}
