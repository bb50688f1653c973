use super::use_case::{AddressUseCase, AdminTier};
use crate::forms::domain::MessageDescriptor;

/// Static message used for generated labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label {
    pub id: &'static str,
    pub default_message: &'static str,
    pub description: &'static str,
}

impl Label {
    pub fn descriptor(self) -> MessageDescriptor {
        MessageDescriptor::new(self.id, self.default_message, self.description)
    }
}

const fn label(id: &'static str, default_message: &'static str, description: &'static str) -> Label {
    Label {
        id,
        default_message,
        description,
    }
}

pub const COUNTRY: Label = label("form.field.label.country", "Country", "Title for the country select");
pub const RURAL_OR_URBAN: Label = label(
    "form.field.label.ruralOrUrban",
    "Urban or Rural",
    "Title for the rural or urban radio",
);
pub const URBAN: Label = label("form.field.label.urban", "Urban", "Label for the urban option");
pub const RURAL: Label = label("form.field.label.rural", "Rural", "Label for the rural option");
pub const TOWN: Label = label("form.field.label.cityUrbanOption", "Town", "Title for the town input");
pub const STREET: Label = label(
    "form.field.label.addressLine2UrbanOption",
    "Street",
    "Title for the street input",
);
pub const NUMBER: Label = label(
    "form.field.label.addressLine3UrbanOption",
    "Number",
    "Title for the house number input",
);
pub const RESIDENTIAL_AREA: Label = label(
    "form.field.label.addressLine1UrbanOption",
    "Residential Area",
    "Title for the residential area input",
);
pub const POSTCODE: Label = label(
    "form.field.label.postalCodeUrbanOption",
    "Postcode / Zip",
    "Title for the postcode input",
);
pub const VILLAGE: Label = label(
    "form.field.label.addressLine1RuralOption",
    "Village",
    "Title for the village input",
);
pub const INTERNATIONAL_STATE: Label = label(
    "form.field.label.internationalState",
    "State",
    "Title for the international state input",
);
pub const INTERNATIONAL_DISTRICT: Label = label(
    "form.field.label.internationalDistrict",
    "District",
    "Title for the international district input",
);
pub const INTERNATIONAL_CITY: Label = label(
    "form.field.label.internationalCity",
    "City / Town",
    "Title for the international city input",
);
pub const INTERNATIONAL_LINES: [Label; 3] = [
    label(
        "form.field.label.internationalAddressLine1",
        "Address Line 1",
        "Title for the first international address line",
    ),
    label(
        "form.field.label.internationalAddressLine2",
        "Address Line 2",
        "Title for the second international address line",
    ),
    label(
        "form.field.label.internationalAddressLine3",
        "Address Line 3",
        "Title for the third international address line",
    ),
];
pub const INTERNATIONAL_POSTCODE: Label = label(
    "form.field.label.internationalPostcode",
    "Postcode / Zip",
    "Title for the international postcode input",
);
pub const YES: Label = label("form.field.label.Yes", "Yes", "Label for the yes option");
pub const NO: Label = label("form.field.label.No", "No", "Label for the no option");

pub const fn tier(tier: AdminTier) -> Label {
    match tier {
        AdminTier::State => label("form.field.label.state", "Province", "Title for the state select"),
        AdminTier::District => label(
            "form.field.label.district",
            "District",
            "Title for the district select",
        ),
        AdminTier::LocationLevel3 => label(
            "form.field.label.locationLevel3",
            "Location Level 3",
            "Title for the third administrative level select",
        ),
        AdminTier::LocationLevel4 => label(
            "form.field.label.locationLevel4",
            "Location Level 4",
            "Title for the fourth administrative level select",
        ),
        AdminTier::LocationLevel5 => label(
            "form.field.label.locationLevel5",
            "Location Level 5",
            "Title for the fifth administrative level select",
        ),
    }
}

/// Heading of the review-page block summarising one address.
pub const fn preview(use_case: AddressUseCase) -> Label {
    match use_case {
        AddressUseCase::PlaceOfBirth => label(
            "form.field.label.placeOfBirthPreview",
            "Place of delivery",
            "Preview title for the place of birth address",
        ),
        AddressUseCase::PlaceOfDeath => label(
            "form.field.label.placeOfDeathPreview",
            "Place of death",
            "Preview title for the place of death address",
        ),
        AddressUseCase::PlaceOfMarriage => label(
            "form.field.label.placeOfMarriagePreview",
            "Place of marriage",
            "Preview title for the place of marriage address",
        ),
        AddressUseCase::Primary => label(
            "form.field.label.primaryAddress",
            "Usual place of residence",
            "Preview title for the primary address",
        ),
        AddressUseCase::Secondary => label(
            "form.field.label.secondaryAddress",
            "Secondary address",
            "Preview title for the secondary address",
        ),
    }
}
