use case_dashboard::app::{presenter, session, wiki};
use case_dashboard::config::{Command, ReportArgs};
use case_dashboard::utils::error::ErrorSeverity;
use case_dashboard::utils::{logger, validation::Validate};
use case_dashboard::{CliConfig, DashboardConfig, DashboardError, Selection};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // JSON logs for machine-readable output, compact logs otherwise
    match &cli.command {
        Command::Report(args) if args.json => logger::init_json_logger(),
        _ => logger::init_cli_logger(cli.verbose),
    }

    tracing::info!("Starting case-dashboard");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.resolve().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&cli.command, &config).await {
        tracing::error!(
            "❌ case-dashboard failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2, // retryable
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(command: &Command, config: &DashboardConfig) -> Result<(), DashboardError> {
    // wiki needs no data
    if let Command::Wiki = command {
        print!("{}", wiki::wiki_text(&session::locale_for(config)?));
        return Ok(());
    }

    let dashboard = session::load_dashboard(config).await?;

    match command {
        Command::Report(args) => report(&dashboard, args),
        Command::Roles => {
            print!("{}", presenter::render_roles(&dashboard));
            Ok(())
        }
        Command::Export(_) => {
            let path = session::export_dataset(&dashboard, config).await?;
            println!("📁 Output saved to: {}", path);
            Ok(())
        }
        Command::Wiki => Ok(()),
    }
}

fn report(dashboard: &case_dashboard::Dashboard, args: &ReportArgs) -> Result<(), DashboardError> {
    let role = match args.role.as_deref().or_else(|| dashboard.default_role()) {
        Some(role) => role.to_string(),
        None => {
            return Err(DashboardError::ValidationError {
                message: "The dataset has no roles to report on".to_string(),
            })
        }
    };

    let mut selection = Selection::for_role(role);
    selection.start = args.start;
    selection.end = args.end;

    let view = dashboard.view(&selection)?;

    if args.json {
        let payload = presenter::chart_payload(&view, dashboard.locale());
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        print!("{}", presenter::render_text(&view, dashboard.locale()));
    }
    Ok(())
}
