//! Field groups.

use super::ids::GroupId;
use serde::{Deserialize, Serialize};

fn default_visible() -> bool {
    true
}

/// A named, ordered group of fields for a groupable content type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldGroup {
    pub id: GroupId,
    pub content_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_defined_by_erxes: bool,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
    #[serde(default)]
    pub order: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated_user_id: Option<String>,
}

/// Input for creating a group. `order` is assigned by the registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDoc {
    pub content_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_defined_by_erxes: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
}

impl GroupDoc {
    pub fn new(content_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
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

    pub(crate) fn into_group(self, order: i64) -> FieldGroup {
        FieldGroup {
            id: GroupId::new(),
            content_type: self.content_type,
            name: self.name,
            description: self.description,
            is_defined_by_erxes: self.is_defined_by_erxes,
            is_visible: self.is_visible.unwrap_or(true),
            order,
            last_updated_user_id: None,
        }
    }
}

/// Partial update of a group's mutable attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "super::double_option"
    )]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

impl GroupPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    pub fn with_order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }

    pub fn apply(&self, group: &mut FieldGroup) {
        if let Some(name) = &self.name {
            group.name = name.clone();
        }
        if let Some(description) = &self.description {
            group.description = description.clone();
        }
        if let Some(is_visible) = self.is_visible {
            group.is_visible = is_visible;
        }
        if let Some(order) = self.order {
            group.order = order;
        }
    }
}
