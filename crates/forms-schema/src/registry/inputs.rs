//! Free-entry inputs: text, numbers, dates and identifiers.

use serde_json::json;

use crate::registry::common::{
    autocomplete_attributes, finish, flag, input, lengths, lookups, placeholder, regex,
    text_default,
};
use crate::schema::{Bound, Field, FieldSpec, ObjectSchema, StringFormat};

/// `text` and `textarea`.
pub(crate) fn text() -> ObjectSchema {
    let mut fields = input();
    fields.extend(lookups());
    fields.push(placeholder());
    fields.extend(lengths());
    fields.push(text_default());
    fields.extend(regex());
    fields.push(autocomplete_attributes());
    finish(fields)
}

pub(crate) fn email() -> ObjectSchema {
    let mut fields = input();
    fields.extend(lookups());
    fields.push(placeholder());
    fields.push(Field::new(
        "defaultValue",
        FieldSpec::string().format(StringFormat::Email),
    ));
    fields.push(autocomplete_attributes());
    finish(fields)
}

pub(crate) fn telephone() -> ObjectSchema {
    let mut fields = input();
    fields.extend(lookups());
    fields.push(placeholder());
    fields.push(Field::new("defaultValue", FieldSpec::string()));
    fields.extend(regex());
    fields.push(autocomplete_attributes());
    finish(fields)
}

pub(crate) fn barcode_scanner() -> ObjectSchema {
    let mut fields = input();
    fields.extend(lookups());
    fields.push(placeholder());
    fields.push(Field::new("defaultValue", FieldSpec::string()));
    fields.push(Field::new("restrictBarcodeTypes", flag()));
    fields.push(Field::when(
        "restrictedBarcodeTypes",
        "restrictBarcodeTypes",
        json!(true),
        FieldSpec::array(FieldSpec::string().into_kind())
            .min_items(1)
            .required(),
        FieldSpec::strip(),
    ));
    fields.extend(regex());
    finish(fields)
}

pub(crate) fn number() -> ObjectSchema {
    let mut fields = input();
    fields.extend(lookups());
    fields.push(placeholder());
    fields.push(Field::new("minNumber", FieldSpec::number()));
    fields.push(Field::new(
        "maxNumber",
        FieldSpec::number().lower(Bound::Sibling("minNumber")),
    ));
    fields.push(Field::new("isInteger", flag()));
    fields.push(Field::new(
        "defaultValue",
        FieldSpec::number()
            .integer_when("isInteger")
            .lower(Bound::Sibling("minNumber"))
            .upper(Bound::Sibling("maxNumber")),
    ));
    fields.push(Field::new("isSlider", flag()));
    fields.push(Field::when(
        "sliderIncrement",
        "isSlider",
        json!(true),
        FieldSpec::number().lower(Bound::Value(0.0)),
        FieldSpec::strip(),
    ));
    fields.push(Field::new("displayAsCurrency", flag()));
    finish(fields)
}

pub(crate) fn calculation() -> ObjectSchema {
    let mut fields = input();
    fields.push(Field::new("calculation", FieldSpec::string().allow_empty()));
    fields.push(Field::new(
        "preCalculationDisplay",
        FieldSpec::string().allow_empty(),
    ));
    fields.push(Field::new("displayAsCurrency", flag()));
    finish(fields)
}

fn temporal(format: StringFormat) -> ObjectSchema {
    let mut fields = input();
    fields.extend(lookups());
    fields.push(placeholder());
    fields.push(Field::new("fromDate", FieldSpec::string().format(format)));
    fields.push(Field::new(
        "toDate",
        FieldSpec::string().format(format).not_before("fromDate"),
    ));
    fields.push(Field::new("defaultValue", FieldSpec::string().format(format)));
    finish(fields)
}

pub(crate) fn date() -> ObjectSchema {
    temporal(StringFormat::Date)
}

pub(crate) fn datetime() -> ObjectSchema {
    temporal(StringFormat::DateTime)
}

pub(crate) fn time() -> ObjectSchema {
    let mut fields = input();
    fields.extend(lookups());
    fields.push(placeholder());
    fields.push(Field::new(
        "defaultValue",
        FieldSpec::string().format(StringFormat::Time),
    ));
    finish(fields)
}

pub(crate) fn boolean() -> ObjectSchema {
    let mut fields = input();
    fields.extend(lookups());
    fields.push(Field::new("defaultValue", flag()));
    finish(fields)
}

/// `abn` and `bsb`: Australian business and bank identifiers.
pub(crate) fn identifier() -> ObjectSchema {
    let mut fields = input();
    fields.extend(lookups());
    fields.push(placeholder());
    fields.push(Field::new("defaultValue", FieldSpec::string()));
    finish(fields)
}

pub(crate) fn location() -> ObjectSchema {
    let coordinates = ObjectSchema::new(vec![
        Field::new(
            "latitude",
            FieldSpec::number()
                .lower(Bound::Value(-90.0))
                .upper(Bound::Value(90.0))
                .required(),
        ),
        Field::new(
            "longitude",
            FieldSpec::number()
                .lower(Bound::Value(-180.0))
                .upper(Bound::Value(180.0))
                .required(),
        ),
        Field::new("zoom", FieldSpec::number().lower(Bound::Value(0.0))),
    ]);
    let mut fields = input();
    fields.extend(lookups());
    fields.push(Field::new("defaultValue", FieldSpec::object(coordinates)));
    finish(fields)
}
