//! Startup composition: read the base forms, decorate each event once and
//! keep the results for read-only serving.

use super::address::{
    default_address_configuration, parse_address_configuration, AddressSettings, InsertionSpec,
};
use super::decorator::decorate;
use super::domain::{Event, RegisterForm};
use super::error::FormConfigError;
use crate::config::FormsConfig;
use crate::error::AppError;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// Decorated forms keyed by event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormCatalog {
    forms: BTreeMap<Event, RegisterForm>,
}

impl FormCatalog {
    pub fn get(&self, event: Event) -> Option<&RegisterForm> {
        self.forms.get(&event)
    }

    pub fn events(&self) -> impl Iterator<Item = Event> + '_ {
        self.forms.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Event, &RegisterForm)> {
        self.forms.iter().map(|(event, form)| (*event, form))
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

/// Decorates every base form with the same configuration.
pub fn decorate_all(
    base_forms: &BTreeMap<Event, RegisterForm>,
    specs: &[InsertionSpec],
    settings: &AddressSettings,
) -> Result<FormCatalog, FormConfigError> {
    let forms = base_forms
        .iter()
        .map(|(event, base)| decorate(*event, base, specs, settings).map(|form| (*event, form)))
        .collect::<Result<BTreeMap<_, _>, _>>()?;
    Ok(FormCatalog { forms })
}

pub fn base_form_path(base_dir: &Path, event: Event) -> PathBuf {
    base_dir.join(format!("{}.json", event.as_str()))
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let raw = tokio::fs::read_to_string(path).await?;
    serde_json::from_str(&raw).map_err(|source| AppError::FormInput {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads `<event>.json` for every supported event from `base_dir`.
pub async fn load_base_forms(base_dir: &Path) -> Result<BTreeMap<Event, RegisterForm>, AppError> {
    let mut forms = BTreeMap::new();
    for event in Event::ordered() {
        let form = read_json(&base_form_path(base_dir, event)).await?;
        forms.insert(event, form);
    }
    Ok(forms)
}

/// The configured file, or the built-in configuration when none is set.
pub async fn load_address_configuration(
    path: Option<&Path>,
) -> Result<Vec<InsertionSpec>, AppError> {
    match path {
        Some(path) => {
            let raw = tokio::fs::read_to_string(path).await?;
            parse_address_configuration(&raw).map_err(|source| AppError::FormInput {
                path: path.to_path_buf(),
                source,
            })
        }
        None => Ok(default_address_configuration()),
    }
}

/// Loads inputs and builds all event forms. Fails on the first faulty
/// configuration so a half-built form is never served.
pub async fn build_forms(config: &FormsConfig) -> Result<FormCatalog, AppError> {
    let base_forms = load_base_forms(&config.base_dir).await?;
    let specs = load_address_configuration(config.address_configuration.as_deref()).await?;
    let settings = config.address_settings();

    let catalog = decorate_all(&base_forms, &specs, &settings)?;
    info!(
        events = catalog.len(),
        admin_levels = settings.admin_levels.get(),
        default_country = %settings.default_country,
        "registration forms built"
    );
    Ok(catalog)
}
