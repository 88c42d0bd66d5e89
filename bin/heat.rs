//! `heat` is the command-line client for the Heat orchestration API.

use clap::Parser;
use colored::Colorize;
use heat_cli::handlers;
use heat_cli::styles::{error_label, hint_label, warning_label};
use heat_cli::{
    Cli, ClientConfig, Command, HEAT_URL_ENV, HeatClient, HeatError, HeatResult, OS_AUTH_TOKEN_ENV,
};
use tracing_subscriber::EnvFilter;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.debug);

    if let Err(e) = run(cli).await {
        print_error(&e);
        std::process::exit(1);
    }
}

/// Print an error with formatting based on its kind.
fn print_error(e: &HeatError) {
    eprintln!();
    match e {
        HeatError::Config(msg) => {
            eprintln!("  {} Invalid configuration", error_label(None));
            eprintln!();
            eprintln!("    {}", msg);
            if msg.contains(HEAT_URL_ENV) {
                eprintln!();
                eprintln!(
                    "    {}: export {}=http://<host>:8004/v1/<tenant>",
                    hint_label(),
                    HEAT_URL_ENV.bright_white()
                );
            }
        }
        HeatError::NotFound { kind, reference } => {
            eprintln!(
                "  {} {} not found: {}",
                error_label(None),
                kind,
                reference.bright_white()
            );
        }
        HeatError::Http { status, message } => {
            eprintln!(
                "  {} {}",
                error_label(Some("http")),
                format!("(HTTP {})", status).dimmed()
            );
            eprintln!();
            eprintln!("    {}", message);
            if *status == 401 {
                eprintln!();
                eprintln!(
                    "    {}: Pass --os-auth-token or set {}",
                    hint_label(),
                    OS_AUTH_TOKEN_ENV.bright_white()
                );
            }
        }
        HeatError::TemplateFetch { reference, reason } => {
            eprintln!("  {} Could not fetch template", error_label(None));
            eprintln!();
            eprintln!("    {}: {}", "Object".dimmed(), reference);
            eprintln!("    {}: {}", "Reason".dimmed(), reason);
            if reason.starts_with("HTTP 401") {
                eprintln!();
                eprintln!(
                    "    {}: Pass --os-auth-token or set {}",
                    hint_label(),
                    OS_AUTH_TOKEN_ENV.bright_white()
                );
            }
        }
        HeatError::EnvironmentFetch { url, reason } => {
            eprintln!("  {} Could not fetch environment file", error_label(None));
            eprintln!();
            eprintln!("    {}: {}", "File".dimmed(), url);
            eprintln!("    {}: {}", "Reason".dimmed(), reason);
        }
        HeatError::ReadFile { path, source } => {
            eprintln!("  {} Could not read file", error_label(None));
            eprintln!();
            eprintln!("    {}: {}", "Path".dimmed(), path.display());
            eprintln!("    {}: {}", "Reason".dimmed(), source);
        }
        _ => {
            let msg = e.to_string();
            match msg.split_once(": ") {
                Some((prefix, rest)) if prefix.ends_with(" error") => {
                    let kind = prefix.trim_end_matches(" error").to_lowercase();
                    eprintln!("  {} {}", error_label(Some(kind.as_str())), rest.dimmed());
                }
                _ => eprintln!("  {} {}", error_label(None), msg),
            }
        }
    }
    eprintln!();
}

/// Initialize tracing. Only enables logging when RUST_LOG is set or `--debug` is passed.
fn init_tracing(debug: bool) {
    let rust_log_set = std::env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.is_empty())
        .is_some();

    if !rust_log_set && !debug {
        return;
    }

    let env_filter = if debug {
        EnvFilter::new("heat_cli=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> HeatResult<()> {
    let config = ClientConfig::from_args(&cli.global)?;
    let client = HeatClient::new(&config)?;
    tracing::debug!(endpoint = client.endpoint(), "client ready");

    dispatch(&client, cli.command).await
}

async fn dispatch(client: &HeatClient, command: Command) -> HeatResult<()> {
    match command {
        Command::StackCreate(args) => handlers::stack_create(client, args).await,
        Command::StackUpdate(args) => handlers::stack_update(client, args).await,
        Command::StackDelete(args) => handlers::stack_delete(client, args).await,
        Command::StackShow(args) => handlers::stack_show(client, args).await,
        Command::StackList => handlers::stack_list(client).await,

        Command::TemplateShow(args) => handlers::template_show(client, args).await,
        Command::TemplateValidate(args) => handlers::template_validate(client, args).await,

        Command::ResourceList(args) => handlers::resource_list(client, args).await,
        Command::ResourceShow(args) => handlers::resource_show(client, args).await,
        Command::ResourceTemplate { resource, format } => {
            handlers::resource_template(client, &resource, format).await
        }
        Command::ResourceMetadata(args) => handlers::resource_metadata(client, args).await,

        Command::ResourceTypeList => handlers::resource_type_list(client).await,
        Command::ResourceTypeShow { resource_type } => {
            handlers::resource_type_show(client, &resource_type).await
        }

        Command::EventList { id, resource } => {
            handlers::event_list(client, &id, resource.as_deref()).await
        }
        Command::EventShow(args) => handlers::event_show(client, args).await,

        Command::ActionSuspend(args) => handlers::action_suspend(client, args).await,
        Command::ActionResume(args) => handlers::action_resume(client, args).await,

        Command::Deprecated(alias) => {
            let (old, new) = alias.names();
            eprintln!(
                "{}: '{}' is deprecated, use '{}' instead",
                warning_label(),
                old,
                new.bright_white()
            );
            Box::pin(dispatch(client, alias.into_current())).await
        }
    }
}
