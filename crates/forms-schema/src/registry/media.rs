//! Attachments, drawings and display-only content.

use serde_json::json;

use crate::registry::common::{display, finish, flag, guid_items, input, storage_type};
use crate::schema::{Bound, Field, FieldSpec, ObjectSchema, StringFormat};

fn restricted_file_types() -> Vec<Field> {
    vec![
        Field::new("restrictFileTypes", flag()),
        Field::when(
            "restrictedFileTypes",
            "restrictFileTypes",
            json!(true),
            FieldSpec::array(FieldSpec::string().into_kind())
                .min_items(1)
                .required(),
            FieldSpec::strip(),
        ),
    ]
}

pub(crate) fn camera() -> ObjectSchema {
    let mut fields = input();
    fields.push(Field::new("includeTimestampWatermark", FieldSpec::boolean()));
    fields.push(storage_type());
    finish(fields)
}

pub(crate) fn draw() -> ObjectSchema {
    let mut fields = input();
    fields.push(storage_type());
    finish(fields)
}

pub(crate) fn file() -> ObjectSchema {
    let mut fields = input();
    fields.extend(restricted_file_types());
    fields.push(Field::new(
        "maxFileSize",
        FieldSpec::number().lower(Bound::Value(0.0)),
    ));
    fields.push(storage_type());
    finish(fields)
}

pub(crate) fn files() -> ObjectSchema {
    let mut fields = input();
    fields.push(Field::new(
        "minEntries",
        FieldSpec::integer().lower(Bound::Value(0.0)),
    ));
    fields.push(Field::new(
        "maxEntries",
        FieldSpec::integer()
            .lower(Bound::Value(0.0))
            .lower(Bound::Sibling("minEntries")),
    ));
    fields.extend(restricted_file_types());
    fields.push(Field::new(
        "maxFileSize",
        FieldSpec::number().lower(Bound::Value(0.0)),
    ));
    fields.push(storage_type());
    finish(fields)
}

pub(crate) fn html() -> ObjectSchema {
    let mut fields = display();
    fields.push(Field::new("defaultValue", FieldSpec::string().required()));
    finish(fields)
}

pub(crate) fn heading() -> ObjectSchema {
    let mut fields = display();
    fields.push(Field::new(
        "headingType",
        FieldSpec::integer()
            .lower(Bound::Value(1.0))
            .upper(Bound::Value(5.0))
            .required(),
    ));
    finish(fields)
}

pub(crate) fn image() -> ObjectSchema {
    let mut fields = display();
    fields.push(Field::new(
        "defaultValue",
        FieldSpec::string().format(StringFormat::Uri).required(),
    ));
    finish(fields)
}

pub(crate) fn captcha() -> ObjectSchema {
    let mut fields = input();
    fields.push(Field::new("captchaType", FieldSpec::string().one_of(&["CHECKBOX", "INVISIBLE"])));
    finish(fields)
}

pub(crate) fn summary() -> ObjectSchema {
    let mut fields = display();
    fields.push(Field::new(
        "elementIds",
        FieldSpec::array(guid_items()).min_items(1).required(),
    ));
    finish(fields)
}

pub(crate) fn arc_gis_web_map() -> ObjectSchema {
    let mut fields = input();
    fields.push(Field::new("webMapId", FieldSpec::string().required()));
    fields.push(Field::new("showLayerPanel", flag()));
    finish(fields)
}
