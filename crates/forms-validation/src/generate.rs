//! # Element Generation
//!
//! Builds new elements for form builders: sensible defaults, overlaid with
//! whatever the caller supplies, then normalized with undeclared fields
//! stripped and validated. The result is ready to insert into a form.

use serde_json::{json, Value};

use forms_core::{ElementId, FormsError};
use forms_schema::ElementScope;

use crate::validator::{first_violation, FormValidator};

impl FormValidator {
    /// Generate a form element. Defaults to a `text` element labelled
    /// `Question` with a fresh id.
    pub fn generate_form_element(&self, data: Option<&Value>) -> Result<Value, FormsError> {
        let defaults = json!({
            "id": ElementId::generate(),
            "type": "text",
            "name": "Question",
            "label": "Question",
            "readOnly": false,
            "required": false,
            "conditionallyShow": false,
            "requiresAllConditionallyShowPredicates": false
        });
        self.generate(defaults, data, ElementScope::Form)
    }

    /// Generate a page for a multi-page form. A page needs at least one
    /// child, so `data` must supply `elements`.
    pub fn generate_page_element(&self, data: Option<&Value>) -> Result<Value, FormsError> {
        let defaults = json!({
            "id": ElementId::generate(),
            "type": "page",
            "label": "Page 1",
            "conditionallyShow": false,
            "requiresAllConditionallyShowPredicates": false,
            "elements": []
        });
        self.generate(defaults, data, ElementScope::MultiPageForm)
    }

    fn generate(
        &self,
        mut element: Value,
        data: Option<&Value>,
        scope: ElementScope,
    ) -> Result<Value, FormsError> {
        if let (Some(target), Some(Value::Object(overlay))) = (element.as_object_mut(), data) {
            for (key, value) in overlay {
                target.insert(key.clone(), value.clone());
            }
        }
        let options = self.options().with_strip_unknown(true);
        let generated = self
            .structural()
            .validate_element_in(&element, scope, &options)
            .map_err(first_violation)?;
        tracing::debug!(
            element_type = generated["type"].as_str().unwrap_or_default(),
            "generated element"
        );
        Ok(generated)
    }
}
