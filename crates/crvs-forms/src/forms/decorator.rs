use super::address::{build_field_set, AddressSettings, FieldPath, GeneratedFieldSet, InsertionSpec};
use super::domain::{Event, FieldDescriptor, FormGroup, RegisterForm};
use super::error::FormConfigError;
use std::collections::HashSet;
use tracing::{debug, info};

/// Returns a copy of `base` with every insertion spec for `event` applied.
///
/// Every spec's field id is parsed before any is applied, so an unknown
/// event segment fails the build for every event. Specs for other events are
/// then skipped. Any failing spec aborts the whole build; `base` is never
/// modified.
pub fn decorate(
    event: Event,
    base: &RegisterForm,
    specs: &[InsertionSpec],
    settings: &AddressSettings,
) -> Result<RegisterForm, FormConfigError> {
    let paths = specs
        .iter()
        .map(InsertionSpec::path)
        .collect::<Result<Vec<_>, _>>()?;

    let mut form = base.clone();
    let mut applied = 0usize;

    for (spec, path) in specs
        .iter()
        .zip(&paths)
        .filter(|(_, path)| path.event == event)
    {
        let inserted = apply(&mut form, event, spec, path, settings)?;
        debug!(
            event = %event,
            preceding_field_id = %spec.preceding_field_id,
            fields = inserted,
            "inserted address field sets"
        );
        applied += 1;
    }

    info!(event = %event, insertions = applied, "decorated registration form");
    Ok(form)
}

fn apply(
    form: &mut RegisterForm,
    event: Event,
    spec: &InsertionSpec,
    path: &FieldPath,
    settings: &AddressSettings,
) -> Result<usize, FormConfigError> {
    let unresolved = |segment: &'static str, value: &str| FormConfigError::UnresolvedField {
        field_id: spec.preceding_field_id.clone(),
        segment,
        value: value.to_string(),
    };

    let section = form
        .sections
        .iter_mut()
        .find(|section| section.id == path.section)
        .ok_or_else(|| unresolved("section", &path.section))?;
    let group = section
        .groups
        .iter_mut()
        .find(|group| group.id == path.group)
        .ok_or_else(|| unresolved("group", &path.group))?;
    let index = group
        .field_index(&path.field)
        .ok_or_else(|| unresolved("field", &path.field))?;

    let mut generated = GeneratedFieldSet::default();
    for configuration in &spec.configurations {
        let set = build_field_set(configuration, event, &path.section, settings)?;
        generated.fields.extend(set.fields);
        generated.preview_groups.extend(set.preview_groups);
    }
    ensure_unique_names(group, &generated.fields)?;

    let inserted = generated.fields.len();
    group
        .fields
        .splice(index + 1..index + 1, generated.fields);

    if !generated.preview_groups.is_empty() {
        let previews = group.preview_groups.get_or_insert_with(Vec::new);
        for preview in generated.preview_groups {
            if !previews.iter().any(|existing| existing.id == preview.id) {
                previews.push(preview);
            }
        }
    }

    Ok(inserted)
}

fn ensure_unique_names(group: &FormGroup, fields: &[FieldDescriptor]) -> Result<(), FormConfigError> {
    let mut seen: HashSet<&str> = group.fields.iter().map(|field| field.name.as_str()).collect();
    for field in fields {
        if !seen.insert(field.name.as_str()) {
            return Err(FormConfigError::DuplicateFieldName {
                group: group.id.clone(),
                name: field.name.clone(),
            });
        }
    }
    Ok(())
}
