//! Elements whose value is picked from options.

use serde_json::json;

use crate::registry::common::{
    autocomplete_attributes, finish, flag, input, lookups, options, storage_type,
};
use crate::schema::{Field, FieldSpec, ObjectSchema, StringFormat};

fn option_values() -> FieldSpec {
    FieldSpec::array(FieldSpec::string().into_kind())
}

pub(crate) fn select() -> ObjectSchema {
    let mut fields = input();
    fields.extend(lookups());
    fields.push(Field::new("multi", flag()));
    fields.push(Field::when(
        "defaultValue",
        "multi",
        json!(true),
        option_values(),
        FieldSpec::string(),
    ));
    fields.push(Field::when(
        "canToggleAll",
        "multi",
        json!(true),
        flag(),
        FieldSpec::strip(),
    ));
    fields.extend(options());
    fields.push(autocomplete_attributes());
    finish(fields)
}

pub(crate) fn autocomplete() -> ObjectSchema {
    let mut fields = input();
    fields.extend(lookups());
    fields.push(Field::new("defaultValue", FieldSpec::string()));
    fields.push(Field::new(
        "searchUrl",
        FieldSpec::string().format(StringFormat::Uri),
    ));
    fields.extend(options());
    fields.push(autocomplete_attributes());
    finish(fields)
}

pub(crate) fn radio() -> ObjectSchema {
    let mut fields = input();
    fields.extend(lookups());
    fields.push(Field::new("defaultValue", FieldSpec::string()));
    fields.push(Field::new("buttons", flag()));
    fields.extend(options());
    fields.push(autocomplete_attributes());
    finish(fields)
}

pub(crate) fn checkboxes() -> ObjectSchema {
    let mut fields = input();
    fields.extend(lookups());
    fields.push(Field::new("defaultValue", option_values()));
    fields.push(Field::new("buttons", flag()));
    fields.push(Field::new("canToggleAll", flag()));
    fields.extend(options());
    finish(fields)
}

pub(crate) fn compliance() -> ObjectSchema {
    let mut fields = input();
    fields.push(Field::new("defaultValue", FieldSpec::string()));
    fields.extend(options());
    fields.push(storage_type());
    finish(fields)
}
