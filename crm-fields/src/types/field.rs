//! Field definitions and their create/update documents.

use super::ids::{FieldId, GroupId};
use crate::validation::ValidationKind;
use serde::{Deserialize, Serialize};

/// The semantic kind of a field's value; drives rendering, not validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    #[default]
    Input,
    Textarea,
    Select,
    Check,
    Radio,
    Email,
    Phone,
    Number,
    Date,
    FirstName,
    LastName,
}

fn default_visible() -> bool {
    true
}

/// A custom field attached to a content type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: FieldId,
    pub content_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<GroupId>,
    #[serde(rename = "type", default)]
    pub type_: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationKind>,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
    #[serde(default)]
    pub is_defined_by_erxes: bool,
    #[serde(default)]
    pub order: i64,
    /// Last user to toggle visibility
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated_user_id: Option<String>,
}

/// Input for creating a field. `order` is assigned by the registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDoc {
    pub content_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<GroupId>,
    #[serde(rename = "type", default)]
    pub type_: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationKind>,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
    #[serde(default)]
    pub is_defined_by_erxes: bool,
}

impl FieldDoc {
    pub fn new(content_type: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            ..Default::default()
        }
    }

    pub fn with_content_type_id(mut self, id: impl Into<String>) -> Self {
        self.content_type_id = Some(id.into());
        self
    }

    pub fn with_group(mut self, group_id: impl Into<GroupId>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    pub fn with_type(mut self, type_: FieldType) -> Self {
        self.type_ = type_;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_validation(mut self, kind: ValidationKind) -> Self {
        self.validation = Some(kind);
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn required(mut self, is_required: bool) -> Self {
        self.is_required = is_required;
        self
    }

    pub fn visible(mut self, is_visible: bool) -> Self {
        self.is_visible = Some(is_visible);
        self
    }

    pub fn defined_by_erxes(mut self) -> Self {
        self.is_defined_by_erxes = true;
        self
    }

    /// Materialize into a field with a fresh id at `order`.
    pub(crate) fn into_field(self, order: i64) -> Field {
        Field {
            id: FieldId::new(),
            content_type: self.content_type,
            content_type_id: self.content_type_id,
            group_id: self.group_id,
            type_: self.type_,
            validation: self.validation,
            text: self.text,
            description: self.description,
            options: self.options,
            is_required: self.is_required,
            is_visible: self.is_visible.unwrap_or(true),
            is_defined_by_erxes: self.is_defined_by_erxes,
            order,
            last_updated_user_id: None,
        }
    }
}

/// The create document that would reproduce `field` under a new id.
impl From<&Field> for FieldDoc {
    fn from(field: &Field) -> Self {
        Self {
            content_type: field.content_type.clone(),
            content_type_id: field.content_type_id.clone(),
            group_id: field.group_id.clone(),
            type_: field.type_,
            validation: field.validation,
            text: field.text.clone(),
            description: field.description.clone(),
            options: field.options.clone(),
            is_required: field.is_required,
            is_visible: Some(field.is_visible),
            is_defined_by_erxes: field.is_defined_by_erxes,
        }
    }
}

/// Partial update of a field. Absent keys leave the attribute unchanged;
/// for nullable attributes an explicit `null` clears it. Identity is not
/// part of the patch and can never change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "super::double_option"
    )]
    pub content_type_id: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "super::double_option"
    )]
    pub group_id: Option<Option<GroupId>>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<FieldType>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "super::double_option"
    )]
    pub validation: Option<Option<ValidationKind>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "super::double_option"
    )]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

impl FieldPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    pub fn with_validation(mut self, kind: Option<ValidationKind>) -> Self {
        self.validation = Some(kind);
        self
    }

    pub fn with_type(mut self, type_: FieldType) -> Self {
        self.type_ = Some(type_);
        self
    }

    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_required(mut self, is_required: bool) -> Self {
        self.is_required = Some(is_required);
        self
    }

    pub fn with_order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_content_type_id(mut self, id: Option<String>) -> Self {
        self.content_type_id = Some(id);
        self
    }

    pub fn with_group(mut self, group_id: Option<GroupId>) -> Self {
        self.group_id = Some(group_id);
        self
    }

    /// Whether the patch touches content type, instance id or group.
    pub fn moves_field(&self) -> bool {
        self.content_type.is_some() || self.content_type_id.is_some() || self.group_id.is_some()
    }

    /// Apply every present attribute to `field`.
    pub fn apply(&self, field: &mut Field) {
        if let Some(content_type) = &self.content_type {
            field.content_type = content_type.clone();
        }
        if let Some(content_type_id) = &self.content_type_id {
            field.content_type_id = content_type_id.clone();
        }
        if let Some(group_id) = &self.group_id {
            field.group_id = group_id.clone();
        }
        if let Some(type_) = self.type_ {
            field.type_ = type_;
        }
        if let Some(validation) = self.validation {
            field.validation = validation;
        }
        if let Some(text) = &self.text {
            field.text = text.clone();
        }
        if let Some(description) = &self.description {
            field.description = description.clone();
        }
        if let Some(options) = &self.options {
            field.options = options.clone();
        }
        if let Some(is_required) = self.is_required {
            field.is_required = is_required;
        }
        if let Some(is_visible) = self.is_visible {
            field.is_visible = is_visible;
        }
        if let Some(order) = self.order {
            field.order = order;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_json_is_camel_case() {
        let field = FieldDoc::new("form")
            .with_content_type_id("f1")
            .with_text("Email")
            .with_validation(ValidationKind::Email)
            .into_field(3);
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["contentType"], "form");
        assert_eq!(json["contentTypeId"], "f1");
        assert_eq!(json["validation"], "email");
        assert_eq!(json["isVisible"], true);
        assert_eq!(json["isDefinedByErxes"], false);
        assert_eq!(json["order"], 3);
        assert_eq!(json["type"], "input");
    }

    #[test]
    fn patch_distinguishes_null_from_absent() {
        let mut field = FieldDoc::new("customer")
            .with_validation(ValidationKind::Number)
            .with_description("help")
            .into_field(0);

        let patch: FieldPatch = serde_json::from_str(r#"{"validation": null}"#).unwrap();
        patch.apply(&mut field);
        assert_eq!(field.validation, None);
        assert_eq!(field.description.as_deref(), Some("help"));
    }

    #[test]
    fn patch_ignores_identity() {
        let mut field = FieldDoc::new("customer").into_field(0);
        let id = field.id.clone();
        let patch: FieldPatch =
            serde_json::from_str(r#"{"id": "other", "_id": "other", "text": "Name"}"#).unwrap();
        patch.apply(&mut field);
        assert_eq!(field.id, id);
        assert_eq!(field.text, "Name");
    }
}
