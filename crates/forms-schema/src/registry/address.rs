//! Address lookups and integrations with external record systems.

use crate::registry::common::{
    display, finish, flag, guid_items, input, lookups, placeholder, AUSTRALIAN_STATES,
};
use crate::schema::{Field, FieldSpec, ObjectSchema};

fn address_input() -> Vec<Field> {
    let mut fields = input();
    fields.extend(lookups());
    fields.push(placeholder());
    fields
}

/// `pointAddress` and `geoscapeAddress`: structured Australian addresses.
pub(crate) fn australian_address() -> ObjectSchema {
    let mut fields = address_input();
    fields.push(Field::new(
        "stateTerritoryFilter",
        FieldSpec::array(FieldSpec::string().one_of(AUSTRALIAN_STATES).into_kind()),
    ));
    fields.push(Field::new(
        "addressTypeFilter",
        FieldSpec::array(FieldSpec::string().into_kind()),
    ));
    finish(fields)
}

/// `googleAddress` and `civicaStreetName`.
pub(crate) fn address() -> ObjectSchema {
    finish(address_input())
}

pub(crate) fn civica_name_record() -> ObjectSchema {
    let mut fields = input();
    fields.push(Field::new("useGeoscapeAddressing", flag()));
    for label in [
        "titleLabel",
        "familyNameLabel",
        "givenName1Label",
        "emailAddressLabel",
        "homePhoneLabel",
        "businessPhoneLabel",
        "mobilePhoneLabel",
        "faxPhoneLabel",
        "streetAddressesLabel",
        "address1Label",
        "address2Label",
        "postcodeLabel",
    ] {
        fields.push(Field::new(label, FieldSpec::string()));
    }
    for toggle in [
        "givenName1IsRequired",
        "givenName1IsHidden",
        "emailAddressIsRequired",
        "emailAddressIsHidden",
        "homePhoneIsRequired",
        "homePhoneIsHidden",
        "businessPhoneIsRequired",
        "businessPhoneIsHidden",
        "mobilePhoneIsRequired",
        "mobilePhoneIsHidden",
        "faxPhoneIsRequired",
        "faxPhoneIsHidden",
    ] {
        fields.push(Field::new(toggle, flag()));
    }
    finish(fields)
}

pub(crate) fn freshdesk_dependent_field() -> ObjectSchema {
    let mut fields = input();
    fields.push(Field::new("freshdeskFieldName", FieldSpec::string().required()));
    fields.push(Field::new("defaultValue", FieldSpec::any()));
    finish(fields)
}

/// A button that triggers a data lookup using the values of other elements.
pub(crate) fn lookup_button() -> ObjectSchema {
    let mut fields = display();
    fields.extend(lookups());
    fields.push(Field::new(
        "elementDependencies",
        FieldSpec::array(guid_items()).min_items(1).required(),
    ));
    finish(fields)
}
