//! Visibility rules for generated address fields.
//!
//! Every rule is a `hide` conditional whose expression the renderer evaluates
//! against `values` (the current section), `draftData` and the offline country
//! configuration. Entries are ordered: tier chain (shallow to deep), country
//! check, event location type, rural/urban branch.

use super::use_case::{AddressLocation, AddressUseCase, AdminLevelDepth, AdminTier};
use crate::forms::domain::{Conditional, Expression};
use crate::forms::error::FormConfigError;

/// Event location types whose address is entered by hand.
pub const ADDRESSABLE_LOCATION_TYPES: [&str; 2] = ["OTHER", "PRIVATE_HOME"];

pub const URBAN: &str = "URBAN";
pub const RURAL: &str = "RURAL";

pub fn location_conditionals(
    location: AddressLocation,
    use_case: AddressUseCase,
    admin_levels: AdminLevelDepth,
) -> Result<Vec<Conditional>, FormConfigError> {
    let mut conditionals = Vec::new();

    match location {
        AddressLocation::Country => {}
        AddressLocation::Admin(tier) => {
            if !admin_levels.includes(tier) {
                return Err(FormConfigError::TierNotConfigured {
                    location: tier.as_str(),
                    admin_levels: admin_levels.get(),
                });
            }
            push_tier_chain(&mut conditionals, use_case, tier.ancestors());
            conditionals.push(Conditional::hide(outside_default_country(use_case)));
        }
        AddressLocation::RuralOrUrban
        | AddressLocation::ConfigurableAddressLines
        | AddressLocation::Urban
        | AddressLocation::Rural => {
            push_tier_chain(&mut conditionals, use_case, admin_levels.tiers());
            conditionals.push(Conditional::hide(outside_default_country(use_case)));
        }
        AddressLocation::International => {
            conditionals.push(Conditional::hide(inside_default_country(use_case)));
        }
    }

    if let Some(expression) = location_type_not_addressable(use_case) {
        conditionals.push(Conditional::hide(expression));
    }

    match location {
        AddressLocation::Urban => conditionals.push(Conditional::hide(branch_not(use_case, URBAN))),
        AddressLocation::Rural => conditionals.push(Conditional::hide(branch_not(use_case, RURAL))),
        _ => {}
    }

    Ok(conditionals)
}

fn push_tier_chain(
    conditionals: &mut Vec<Conditional>,
    use_case: AddressUseCase,
    tiers: &[AdminTier],
) {
    conditionals.push(Conditional::hide(missing_value(use_case, "country")));
    for tier in tiers {
        conditionals.push(Conditional::hide(missing_value(use_case, tier.as_str())));
    }
}

fn value_of(use_case: AddressUseCase, base: &str) -> String {
    format!("values.{}", use_case.field_name(base))
}

pub fn missing_value(use_case: AddressUseCase, base: &str) -> Expression {
    Expression::new(format!("!{}", value_of(use_case, base)))
}

pub fn outside_default_country(use_case: AddressUseCase) -> Expression {
    Expression::new(format!(
        "!isDefaultCountry({})",
        value_of(use_case, "country")
    ))
}

pub fn inside_default_country(use_case: AddressUseCase) -> Expression {
    Expression::new(format!(
        "isDefaultCountry({})",
        value_of(use_case, "country")
    ))
}

/// `None` for use cases without a location type select.
pub fn location_type_not_addressable(use_case: AddressUseCase) -> Option<Expression> {
    if !use_case.is_location_type_gated() {
        return None;
    }
    let select = format!("values.{}", use_case.as_str());
    let checks = ADDRESSABLE_LOCATION_TYPES
        .iter()
        .map(|kind| format!("{select} !== \"{kind}\""))
        .collect::<Vec<_>>()
        .join(" && ");
    Some(Expression::new(format!("({checks})")))
}

pub fn branch_not(use_case: AddressUseCase, branch: &str) -> Expression {
    Expression::new(format!(
        "{} !== \"{branch}\"",
        value_of(use_case, "ruralOrUrban")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn depth(levels: u8) -> AdminLevelDepth {
        AdminLevelDepth::new(levels).expect("valid depth")
    }

    fn expressions(conditionals: &[Conditional]) -> Vec<&str> {
        conditionals
            .iter()
            .map(|conditional| conditional.expression.as_str())
            .collect()
    }

    #[test]
    fn primary_state_hides_without_default_country() {
        let conditionals = location_conditionals(
            AddressLocation::Admin(AdminTier::State),
            AddressUseCase::Primary,
            depth(2),
        )
        .expect("state is configured");

        assert_eq!(
            expressions(&conditionals),
            vec![
                "!values.countryPrimary",
                "!isDefaultCountry(values.countryPrimary)"
            ]
        );
    }

    #[test]
    fn place_of_death_district_chains_tiers_and_location_type() {
        let conditionals = location_conditionals(
            AddressLocation::Admin(AdminTier::District),
            AddressUseCase::PlaceOfDeath,
            depth(3),
        )
        .expect("district is configured");

        assert_eq!(
            expressions(&conditionals),
            vec![
                "!values.country",
                "!values.state",
                "!isDefaultCountry(values.country)",
                "(values.placeOfDeath !== \"OTHER\" && values.placeOfDeath !== \"PRIVATE_HOME\")",
            ]
        );
    }

    #[test]
    fn marriage_location_is_never_type_gated() {
        let conditionals = location_conditionals(
            AddressLocation::Admin(AdminTier::State),
            AddressUseCase::PlaceOfMarriage,
            depth(1),
        )
        .expect("state is configured");
        assert!(expressions(&conditionals)
            .iter()
            .all(|expression| !expression.contains("placeOfMarriage")));

        let country = location_conditionals(
            AddressLocation::Country,
            AddressUseCase::PlaceOfMarriage,
            depth(1),
        )
        .expect("country always builds");
        assert!(country.is_empty());
    }

    #[test]
    fn urban_and_rural_branches_chain_every_configured_tier() {
        let urban = location_conditionals(
            AddressLocation::Urban,
            AddressUseCase::Secondary,
            depth(3),
        )
        .expect("urban builds");
        assert_eq!(
            expressions(&urban),
            vec![
                "!values.countrySecondary",
                "!values.stateSecondary",
                "!values.districtSecondary",
                "!values.locationLevel3Secondary",
                "!isDefaultCountry(values.countrySecondary)",
                "values.ruralOrUrbanSecondary !== \"URBAN\"",
            ]
        );

        let rural = location_conditionals(
            AddressLocation::Rural,
            AddressUseCase::PlaceOfBirth,
            depth(1),
        )
        .expect("rural builds");
        assert_eq!(
            rural.last().map(|c| c.expression.as_str()),
            Some("values.ruralOrUrban !== \"RURAL\"")
        );
    }

    #[test]
    fn configurable_address_lines_follow_the_full_tier_chain() {
        let primary = location_conditionals(
            AddressLocation::ConfigurableAddressLines,
            AddressUseCase::Primary,
            depth(5),
        )
        .expect("address lines build");
        assert_eq!(
            expressions(&primary),
            vec![
                "!values.countryPrimary",
                "!values.statePrimary",
                "!values.districtPrimary",
                "!values.locationLevel3Primary",
                "!values.locationLevel4Primary",
                "!values.locationLevel5Primary",
                "!isDefaultCountry(values.countryPrimary)",
            ]
        );

        let birth = location_conditionals(
            AddressLocation::ConfigurableAddressLines,
            AddressUseCase::PlaceOfBirth,
            depth(2),
        )
        .expect("address lines build");
        assert_eq!(
            expressions(&birth),
            vec![
                "!values.country",
                "!values.state",
                "!values.district",
                "!isDefaultCountry(values.country)",
                "(values.placeOfBirth !== \"OTHER\" && values.placeOfBirth !== \"PRIVATE_HOME\")",
            ]
        );
    }

    #[test]
    fn international_inverts_country_check_without_tier_chain() {
        let conditionals = location_conditionals(
            AddressLocation::International,
            AddressUseCase::PlaceOfBirth,
            depth(5),
        )
        .expect("international builds");

        assert_eq!(
            expressions(&conditionals),
            vec![
                "isDefaultCountry(values.country)",
                "(values.placeOfBirth !== \"OTHER\" && values.placeOfBirth !== \"PRIVATE_HOME\")",
            ]
        );
    }

    #[test]
    fn tiers_beyond_configured_depth_are_rejected() {
        match location_conditionals(
            AddressLocation::Admin(AdminTier::LocationLevel4),
            AddressUseCase::Primary,
            depth(3),
        ) {
            Err(FormConfigError::TierNotConfigured {
                location,
                admin_levels,
            }) => {
                assert_eq!(location, "locationLevel4");
                assert_eq!(admin_levels, 3);
            }
            other => panic!("expected tier error, got {other:?}"),
        }
    }
}
