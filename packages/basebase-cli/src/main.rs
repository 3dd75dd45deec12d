//! Interactive terminal sign-in for BaseBase.
//!
//! Exercises the full `basebase-auth` flow end to end: silent resume on
//! launch, request a code, verify it, show the profile, sign out. The
//! prompts are the "UI collaborator" of the session manager; all state
//! lives in [`AuthSession`].

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use console::Term;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use basebase_auth::{AuthSession, AuthState, Config, FileTokenStore, GraphqlTransport};

#[derive(Parser)]
#[command(name = "basebase", about = "Sign in to BaseBase from the terminal")]
struct Args {
    /// GraphQL endpoint of the identity service
    #[arg(long, env = "BASEBASE_ENDPOINT")]
    endpoint: Option<String>,

    /// Project the sign-in is scoped to
    #[arg(long, env = "BASEBASE_PROJECT")]
    project: String,

    /// Where to keep the session token between runs
    #[arg(long, env = "BASEBASE_TOKEN_FILE")]
    token_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,basebase_auth=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = Config::new(args.project);
    if let Some(endpoint) = args.endpoint {
        config = config.with_endpoint(endpoint);
    }

    let token_file = match args.token_file {
        Some(path) => path,
        None => default_token_file()?,
    };

    let transport = Arc::new(GraphqlTransport::new(&config)?);
    let store = Arc::new(FileTokenStore::new(token_file));
    let mut session = AuthSession::new(transport, store);

    let term = Term::stdout();
    println!("{}", "BaseBase sign-in".bright_cyan().bold());

    session.start().await?;

    loop {
        match session.state() {
            AuthState::Authenticated { user } => {
                println!();
                println!("{} {}", "Signed in as".bright_green(), user.name.bold());
                println!("  {} {}", "phone:".dimmed(), user.phone);
                if let Some(url) = &user.profile_image_url {
                    println!("  {} {}", "avatar:".dimmed(), url);
                }

                let sign_out = Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt("Sign out?")
                    .default(false)
                    .interact_on(&term)?;
                if !sign_out {
                    break;
                }
                session.sign_out().await?;
            }
            AuthState::Unauthenticated { error } => {
                if let Some(message) = error {
                    println!("{} {}", "✗".bright_red(), message);
                }

                let name: String = Input::with_theme(&ColorfulTheme::default())
                    .with_prompt("Name")
                    .interact_text_on(&term)?;
                let phone: String = Input::with_theme(&ColorfulTheme::default())
                    .with_prompt("Phone number")
                    .interact_text_on(&term)?;

                // Failures come back around with the error set on the state.
                let _ = session.request_code(&name, &phone).await;
            }
            AuthState::CodeRequested { phone, error } => {
                if let Some(message) = error {
                    println!("{} {}", "✗".bright_red(), message);
                }
                println!("A 6-digit code was sent to {}", phone.to_string().bold());

                let code: String = Input::with_theme(&ColorfulTheme::default())
                    .with_prompt("Code (leave empty to go back)")
                    .allow_empty(true)
                    .interact_text_on(&term)?;

                if code.trim().is_empty() {
                    session.back_to_phone()?;
                    continue;
                }
                let _ = session.verify_code(code.trim()).await;
            }
            AuthState::Initializing => unreachable!("start() resolves Initializing"),
        }
    }

    println!("{}", "Goodbye!".bright_blue());
    Ok(())
}

fn default_token_file() -> Result<PathBuf> {
    let home = std::env::var_os("HOME").context("HOME is not set; pass --token-file")?;
    Ok(PathBuf::from(home).join(".basebase").join("token"))
}
