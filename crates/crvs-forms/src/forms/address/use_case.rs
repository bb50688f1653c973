use crate::forms::domain::Event;
use crate::forms::error::FormConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role an address plays: where an event happened, or where a person lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressUseCase {
    #[serde(rename = "placeOfBirth")]
    PlaceOfBirth,
    #[serde(rename = "placeOfDeath")]
    PlaceOfDeath,
    #[serde(rename = "placeOfMarriage")]
    PlaceOfMarriage,
    #[serde(rename = "primary", alias = "PRIMARY_ADDRESS")]
    Primary,
    #[serde(rename = "secondary", alias = "SECONDARY_ADDRESS")]
    Secondary,
}

impl AddressUseCase {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::PlaceOfBirth,
            Self::PlaceOfDeath,
            Self::PlaceOfMarriage,
            Self::Primary,
            Self::Secondary,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PlaceOfBirth => "placeOfBirth",
            Self::PlaceOfDeath => "placeOfDeath",
            Self::PlaceOfMarriage => "placeOfMarriage",
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }

    /// The event an event-location use case belongs to.
    pub const fn event(self) -> Option<Event> {
        match self {
            Self::PlaceOfBirth => Some(Event::Birth),
            Self::PlaceOfDeath => Some(Event::Death),
            Self::PlaceOfMarriage => Some(Event::Marriage),
            Self::Primary | Self::Secondary => None,
        }
    }

    pub const fn family(self) -> UseCaseFamily {
        match self {
            Self::PlaceOfBirth => UseCaseFamily::EventLocation(Event::Birth),
            Self::PlaceOfDeath => UseCaseFamily::EventLocation(Event::Death),
            Self::PlaceOfMarriage => UseCaseFamily::EventLocation(Event::Marriage),
            Self::Primary => UseCaseFamily::Person(PersonAddressType::PrimaryAddress),
            Self::Secondary => UseCaseFamily::Person(PersonAddressType::SecondaryAddress),
        }
    }

    pub const fn is_event_location(self) -> bool {
        self.event().is_some()
    }

    /// Birth and death locations are only addressed when the location type
    /// select says so; a marriage always records its full location.
    pub const fn is_location_type_gated(self) -> bool {
        matches!(self, Self::PlaceOfBirth | Self::PlaceOfDeath)
    }

    /// Suffix appended to every generated field name. Event locations live
    /// alone in their group and stay unsuffixed.
    pub fn field_suffix(self) -> String {
        if self.is_event_location() {
            String::new()
        } else {
            sentence_case(self.as_str())
        }
    }

    pub fn field_name(self, base: &str) -> String {
        format!("{base}{}", self.field_suffix())
    }
}

impl fmt::Display for AddressUseCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AddressUseCase {
    type Err = FormConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "placeOfBirth" => Ok(Self::PlaceOfBirth),
            "placeOfDeath" => Ok(Self::PlaceOfDeath),
            "placeOfMarriage" => Ok(Self::PlaceOfMarriage),
            "primary" | "PRIMARY_ADDRESS" => Ok(Self::Primary),
            "secondary" | "SECONDARY_ADDRESS" => Ok(Self::Secondary),
            other => Err(FormConfigError::UnsupportedUseCase(other.to_string())),
        }
    }
}

/// Which transformer family binds a use case to the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseCaseFamily {
    EventLocation(Event),
    Person(PersonAddressType),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PersonAddressType {
    PrimaryAddress,
    SecondaryAddress,
}

impl PersonAddressType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PrimaryAddress => "PRIMARY_ADDRESS",
            Self::SecondaryAddress => "SECONDARY_ADDRESS",
        }
    }
}

/// Upper-cases the first character and keeps the rest, `locationLevel3` to
/// `LocationLevel3`.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Upper-cases the first character, lower-cases the rest.
pub fn sentence_case(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

static ORDERED_TIERS: [AdminTier; 5] = AdminTier::ordered();

/// One administrative tier below country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AdminTier {
    State,
    District,
    LocationLevel3,
    LocationLevel4,
    LocationLevel5,
}

impl AdminTier {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::State,
            Self::District,
            Self::LocationLevel3,
            Self::LocationLevel4,
            Self::LocationLevel5,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::State => "state",
            Self::District => "district",
            Self::LocationLevel3 => "locationLevel3",
            Self::LocationLevel4 => "locationLevel4",
            Self::LocationLevel5 => "locationLevel5",
        }
    }

    /// Zero-based depth below country.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Tiers strictly shallower than this one, shallowest first.
    pub fn ancestors(self) -> &'static [AdminTier] {
        &ORDERED_TIERS[..self.index()]
    }
}

/// Number of administrative tiers configured for the country, in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdminLevelDepth(u8);

impl AdminLevelDepth {
    pub const MAX: u8 = 5;

    pub fn new(levels: u8) -> Result<Self, FormConfigError> {
        if (1..=Self::MAX).contains(&levels) {
            Ok(Self(levels))
        } else {
            Err(FormConfigError::InvalidAdminLevels(levels))
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    pub fn tiers(self) -> &'static [AdminTier] {
        &ORDERED_TIERS[..self.0 as usize]
    }

    pub fn includes(self, tier: AdminTier) -> bool {
        tier.index() < self.0 as usize
    }
}

impl TryFrom<u8> for AdminLevelDepth {
    type Error = FormConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Locations the conditional builder understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressLocation {
    Country,
    Admin(AdminTier),
    RuralOrUrban,
    Urban,
    Rural,
    International,
    ConfigurableAddressLines,
}

impl AddressLocation {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::Admin(tier) => tier.as_str(),
            Self::RuralOrUrban => "ruralOrUrban",
            Self::Urban => "urban",
            Self::Rural => "rural",
            Self::International => "international",
            Self::ConfigurableAddressLines => "configurableAddressLines",
        }
    }
}

impl fmt::Display for AddressLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AddressLocation {
    type Err = FormConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let location = match value.trim() {
            "country" => Self::Country,
            "state" => Self::Admin(AdminTier::State),
            "district" => Self::Admin(AdminTier::District),
            "locationLevel3" => Self::Admin(AdminTier::LocationLevel3),
            "locationLevel4" => Self::Admin(AdminTier::LocationLevel4),
            "locationLevel5" => Self::Admin(AdminTier::LocationLevel5),
            "ruralOrUrban" => Self::RuralOrUrban,
            "urban" => Self::Urban,
            "rural" => Self::Rural,
            "international" => Self::International,
            "configurableAddressLines" => Self::ConfigurableAddressLines,
            other => return Err(FormConfigError::UnsupportedLocation(other.to_string())),
        };
        Ok(location)
    }
}

/// Country-level inputs shared by every generator in one form build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressSettings {
    pub admin_levels: AdminLevelDepth,
    pub default_country: String,
}

impl AddressSettings {
    pub fn new(admin_levels: AdminLevelDepth, default_country: impl Into<String>) -> Self {
        Self {
            admin_levels,
            default_country: default_country.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn person_use_cases_are_sentence_case_suffixed() {
        assert_eq!(AddressUseCase::Primary.field_name("state"), "statePrimary");
        assert_eq!(
            AddressUseCase::Secondary.field_name("country"),
            "countrySecondary"
        );
        assert_eq!(AddressUseCase::PlaceOfDeath.field_name("district"), "district");
        assert_eq!(sentence_case("PRIMARY"), "Primary");
        assert_eq!(sentence_case(""), "");
    }

    #[test]
    fn use_case_parsing_accepts_legacy_constants() {
        assert_eq!(
            "PRIMARY_ADDRESS".parse::<AddressUseCase>().expect("parses"),
            AddressUseCase::Primary
        );
        match "placeOfDivorce".parse::<AddressUseCase>() {
            Err(FormConfigError::UnsupportedUseCase(value)) => assert_eq!(value, "placeOfDivorce"),
            other => panic!("expected unsupported use case, got {other:?}"),
        }
    }

    #[test]
    fn depth_is_bounded() {
        for levels in 1..=5 {
            let depth = AdminLevelDepth::new(levels).expect("in range");
            assert_eq!(depth.tiers().len(), levels as usize);
        }
        assert_eq!(
            AdminLevelDepth::new(0),
            Err(FormConfigError::InvalidAdminLevels(0))
        );
        assert_eq!(
            AdminLevelDepth::new(6),
            Err(FormConfigError::InvalidAdminLevels(6))
        );
    }

    #[test]
    fn tier_ancestors_are_strictly_shallower() {
        assert!(AdminTier::State.ancestors().is_empty());
        assert_eq!(
            AdminTier::LocationLevel3.ancestors(),
            &[AdminTier::State, AdminTier::District]
        );
    }

    #[test]
    fn location_keys_form_a_closed_set() {
        for key in [
            "country",
            "state",
            "district",
            "locationLevel3",
            "locationLevel4",
            "locationLevel5",
            "ruralOrUrban",
            "urban",
            "rural",
            "international",
            "configurableAddressLines",
        ] {
            let location: AddressLocation = key.parse().expect("known location");
            assert_eq!(location.as_str(), key);
        }
        assert_eq!(
            "province".parse::<AddressLocation>(),
            Err(FormConfigError::UnsupportedLocation("province".to_string()))
        );
    }
}
