//! Content-type policy table.
//!
//! Each content type a field can attach to declares whether it needs an
//! instance id and whether it supports groups. Adding a content type is one
//! entry here (or in `config.yaml` under the store root).

use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::{FieldsError, Result};
use crate::types::GroupId;

/// Built-in content type names
pub mod content_types {
    pub const CUSTOMER: &str = "customer";
    pub const COMPANY: &str = "company";
    pub const FORM: &str = "form";
}

/// Rules for one content type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTypePolicy {
    pub name: String,
    /// Fields must name a specific parent instance (e.g. one form)
    #[serde(default)]
    pub requires_instance_id: bool,
    /// Fields may belong to a group and groups may target this type
    #[serde(default)]
    pub supports_grouping: bool,
    /// Parent entity display name used in not-found messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl ContentTypePolicy {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            requires_instance_id: false,
            supports_grouping: false,
            parent: None,
        }
    }

    pub fn with_instances(mut self, parent: impl Into<String>) -> Self {
        self.requires_instance_id = true;
        self.parent = Some(parent.into());
        self
    }

    pub fn with_grouping(mut self) -> Self {
        self.supports_grouping = true;
        self
    }

    /// Display name of the parent entity, falling back to the type name
    pub fn parent_name(&self) -> &str {
        self.parent.as_deref().unwrap_or(&self.name)
    }
}

/// The ordering scope of a field. Orders are unique within one scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OrderScope {
    Instance {
        content_type: String,
        content_type_id: String,
    },
    Group {
        content_type: String,
        group_id: Option<GroupId>,
    },
    ContentType {
        content_type: String,
    },
}

impl OrderScope {
    /// Whether a field with these attributes falls in this scope
    pub fn contains(
        &self,
        content_type: &str,
        content_type_id: Option<&str>,
        group_id: Option<&GroupId>,
    ) -> bool {
        match self {
            Self::Instance {
                content_type: ct,
                content_type_id: id,
            } => ct == content_type && content_type_id == Some(id.as_str()),
            Self::Group {
                content_type: ct,
                group_id: gid,
            } => ct == content_type && gid.as_ref() == group_id,
            Self::ContentType { content_type: ct } => ct == content_type,
        }
    }
}

/// Registry configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldsConfig {
    #[serde(default)]
    pub content_types: Vec<ContentTypePolicy>,
}

impl Default for FieldsConfig {
    fn default() -> Self {
        Self {
            content_types: vec![
                ContentTypePolicy::new(content_types::CUSTOMER).with_grouping(),
                ContentTypePolicy::new(content_types::COMPANY).with_grouping(),
                ContentTypePolicy::new(content_types::FORM).with_instances("Form"),
            ],
        }
    }
}

impl FieldsConfig {
    /// Parse a YAML document
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Load `path` if it exists, otherwise the built-in defaults
    pub async fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).await?;
        let config = Self::from_yaml(&content)?;
        tracing::debug!(?path, content_types = config.content_types.len(), "loaded fields config");
        Ok(config)
    }

    /// Add or replace a policy
    pub fn with_policy(mut self, policy: ContentTypePolicy) -> Self {
        self.content_types.retain(|p| p.name != policy.name);
        self.content_types.push(policy);
        self
    }

    pub fn policy(&self, content_type: &str) -> Result<&ContentTypePolicy> {
        self.content_types
            .iter()
            .find(|p| p.name == content_type)
            .ok_or_else(|| FieldsError::UnknownContentType {
                name: content_type.to_string(),
            })
    }

    /// Resolve the ordering scope for a field's placement.
    ///
    /// Fails when an instance id is required but missing.
    pub fn order_scope(
        &self,
        content_type: &str,
        content_type_id: Option<&str>,
        group_id: Option<&GroupId>,
    ) -> Result<OrderScope> {
        let policy = self.policy(content_type)?;
        if policy.requires_instance_id {
            let id = content_type_id
                .filter(|id| !id.is_empty())
                .ok_or(FieldsError::ContentTypeIdRequired)?;
            return Ok(OrderScope::Instance {
                content_type: content_type.to_string(),
                content_type_id: id.to_string(),
            });
        }
        if policy.supports_grouping {
            return Ok(OrderScope::Group {
                content_type: content_type.to_string(),
                group_id: group_id.cloned(),
            });
        }
        Ok(OrderScope::ContentType {
            content_type: content_type.to_string(),
        })
    }
}
