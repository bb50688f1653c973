use crate::infra::parse_event;
use clap::Args;
use crvs_forms::config::AppConfig;
use crvs_forms::error::AppError;
use crvs_forms::forms::bootstrap::{load_address_configuration, load_base_forms};
use crvs_forms::forms::{build_forms, decorate_all, Event};
use crvs_forms::telemetry;

#[derive(Args, Debug)]
pub(crate) struct RenderArgs {
    /// Event whose form is printed (birth, death or marriage)
    #[arg(value_parser = parse_event)]
    pub(crate) event: Event,
    /// Print on a single line instead of pretty JSON
    #[arg(long)]
    pub(crate) compact: bool,
}

/// Loads configuration and installs the subscriber before any form is built.
fn load_with_telemetry() -> Result<AppConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    Ok(config)
}

pub(crate) async fn run_render(args: RenderArgs) -> Result<(), AppError> {
    let config = load_with_telemetry()?;
    let catalog = build_forms(&config.forms).await?;
    let form = catalog
        .get(args.event)
        .ok_or(AppError::FormNotFound(args.event))?;

    let rendered = if args.compact {
        serde_json::to_string(form)?
    } else {
        serde_json::to_string_pretty(form)?
    };
    println!("{rendered}");
    Ok(())
}

pub(crate) async fn run_check() -> Result<(), AppError> {
    let config = load_with_telemetry()?;
    let base_forms = load_base_forms(&config.forms.base_dir).await?;
    let specs =
        load_address_configuration(config.forms.address_configuration.as_deref()).await?;
    let catalog = decorate_all(&base_forms, &specs, &config.forms.address_settings())?;

    println!("Form composition check");
    println!(
        "  Administrative levels: {}",
        config.forms.admin_levels.get()
    );
    println!("  Default country: {}", config.forms.default_country);
    match &config.forms.address_configuration {
        Some(path) => println!("  Address configuration: {}", path.display()),
        None => println!("  Address configuration: built-in default"),
    }
    println!("  Insertion points: {}", specs.len());

    for (event, form) in catalog.iter() {
        let total = form.fields().count();
        let authored = base_forms
            .get(&event)
            .map_or(0, |base| base.fields().count());
        println!(
            "  {event}: {} section(s), {total} field(s), {} generated",
            form.sections.len(),
            total - authored
        );
    }
    Ok(())
}
