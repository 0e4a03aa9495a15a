//! ListGroups command

use crate::context::FieldsContext;
use crate::error::{FieldsError, Result};
use crate::operation::{Execute, ExecutionResult, Operation};
use crate::types::{Field, FieldGroup};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A group together with its fields, both in display order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupWithFields {
    #[serde(flatten)]
    pub group: FieldGroup,
    pub fields: Vec<Field>,
}

/// List the groups of a content type with their member fields
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListGroups {
    pub content_type: String,
}

impl ListGroups {
    pub fn new(content_type: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
        }
    }

    pub async fn apply(&self, ctx: &FieldsContext) -> Result<Vec<GroupWithFields>> {
        ctx.policy(&self.content_type)?;
        let mut groups: Vec<FieldGroup> = ctx
            .read_all_groups()
            .await?
            .into_iter()
            .filter(|g| g.content_type == self.content_type)
            .collect();
        groups.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));

        let mut fields = ctx.read_all_fields().await?;
        fields.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));

        Ok(groups
            .into_iter()
            .map(|group| GroupWithFields {
                fields: fields
                    .iter()
                    .filter(|f| f.group_id.as_ref() == Some(&group.id))
                    .cloned()
                    .collect(),
                group,
            })
            .collect())
    }
}

impl Operation for ListGroups {
    fn verb(&self) -> &'static str {
        "list"
    }

    fn noun(&self) -> &'static str {
        "groups"
    }

    fn description(&self) -> &'static str {
        "List field groups with their fields"
    }
}

#[async_trait]
impl Execute<FieldsContext, FieldsError> for ListGroups {
    async fn execute(&self, ctx: &FieldsContext) -> ExecutionResult<Value, FieldsError> {
        let result: Result<Value> =
            async { Ok(serde_json::to_value(self.apply(ctx).await?)?) }.await;
        ExecutionResult::unlogged(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::CreateField;
    use crate::group::CreateGroup;
    use crate::test_support::setup;
    use crate::types::{FieldDoc, GroupDoc};

    #[tokio::test]
    async fn test_groups_with_fields() {
        let store = setup().await;
        let ctx = &store.ctx;
        let basic = CreateGroup::new(GroupDoc::new("customer", "Basic"))
            .apply(ctx)
            .await
            .unwrap();
        let extra = CreateGroup::new(GroupDoc::new("customer", "Extra"))
            .apply(ctx)
            .await
            .unwrap();
        CreateGroup::new(GroupDoc::new("company", "Other"))
            .apply(ctx)
            .await
            .unwrap();
        for text in ["a", "b"] {
            CreateField::new(
                FieldDoc::new("customer")
                    .with_group(basic.id.clone())
                    .with_text(text),
            )
            .apply(ctx)
            .await
            .unwrap();
        }

        let listed = ListGroups::new("customer").apply(ctx).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].group.id, basic.id);
        assert_eq!(listed[1].group.id, extra.id);
        let texts: Vec<_> = listed[0].fields.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b"]);
        assert!(listed[1].fields.is_empty());

        let value = ListGroups::new("customer").execute(ctx).await.into_result().unwrap();
        assert_eq!(value[0]["name"], "Basic");
        assert_eq!(value[0]["fields"][1]["text"], "b");
    }
}
