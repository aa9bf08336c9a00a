//! Containers and references to other forms.
//!
//! Sections and pages group elements for layout; a repeatable set repeats
//! its children once per entry. Sub-form and info page references record
//! only the referenced form's id.

use crate::registry::common::{
    base, conditionally_show, finish, flag, hint, label, name, read_only,
};
use crate::schema::{Bound, ElementScope, Field, FieldSpec, ObjectSchema};

fn children() -> Field {
    Field::new(
        "elements",
        FieldSpec::elements(ElementScope::Container).required(),
    )
}

pub(crate) fn section() -> ObjectSchema {
    let mut fields = base();
    fields.push(label());
    fields.extend(hint());
    fields.extend(conditionally_show());
    fields.push(Field::new("isCollapsed", flag()));
    fields.push(children());
    finish(fields)
}

pub(crate) fn page() -> ObjectSchema {
    let mut fields = base();
    fields.push(label());
    fields.extend(conditionally_show());
    fields.push(children());
    finish(fields)
}

pub(crate) fn repeatable_set() -> ObjectSchema {
    let mut fields = base();
    fields.push(name());
    fields.push(label());
    fields.extend(hint());
    fields.push(read_only());
    fields.extend(conditionally_show());
    fields.push(Field::new(
        "minSetEntries",
        FieldSpec::integer().lower(Bound::Value(0.0)),
    ));
    fields.push(Field::new(
        "maxSetEntries",
        FieldSpec::integer()
            .lower(Bound::Value(0.0))
            .lower(Bound::Sibling("minSetEntries")),
    ));
    fields.push(Field::new("addSetEntryLabel", FieldSpec::string()));
    fields.push(Field::new("removeSetEntryLabel", FieldSpec::string()));
    fields.push(children());
    finish(fields)
}

/// `form` and `infoPage`.
pub(crate) fn form_reference() -> ObjectSchema {
    let mut fields = base();
    fields.push(name());
    fields.extend(conditionally_show());
    fields.push(Field::new("formId", FieldSpec::integer().required()));
    finish(fields)
}
