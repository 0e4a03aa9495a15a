//! Integration tests for activity logging

use crm_fields::field::{CleanValue, CreateField, ListFields, RemoveField, UpdateFieldVisible};
use crm_fields::group::CreateGroup;
use crm_fields::test_support::setup;
use crm_fields::{FieldDoc, FieldsOperationProcessor, GroupDoc, OperationProcessor};

#[test_log::test(tokio::test)]
async fn test_activity_logging_end_to_end() {
    let store = setup().await;
    let ctx = &store.ctx;
    let processor = FieldsOperationProcessor::with_actor("admin[session42]");

    let group = processor
        .process(&CreateGroup::new(GroupDoc::new("customer", "Basic")), ctx)
        .await
        .unwrap();
    let group_id = group["id"].as_str().unwrap().to_string();

    let field = processor
        .process(
            &CreateField::new(
                FieldDoc::new("customer")
                    .with_group(group_id.as_str())
                    .with_text("Nickname"),
            ),
            ctx,
        )
        .await
        .unwrap();
    let field_id = field["id"].as_str().unwrap().to_string();

    // Reads are not logged
    processor.process(&ListFields::new("customer"), ctx).await.unwrap();
    processor
        .process(&CleanValue::new(field_id.as_str(), "Bob"), ctx)
        .await
        .unwrap();

    processor
        .process(
            &UpdateFieldVisible::new(field_id.as_str(), false).by("user-7"),
            ctx,
        )
        .await
        .unwrap();

    let entries = ctx.read_activity(None).await.unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].op, "toggle field");
    assert_eq!(entries[1].op, "create field");
    assert_eq!(entries[2].op, "create group");

    // The visibility toggle names its own user
    assert_eq!(entries[0].actor.as_deref(), Some("user-7"));
    assert_eq!(entries[1].actor.as_deref(), Some("admin[session42]"));
    assert_eq!(entries[2].actor.as_deref(), Some("admin[session42]"));
    assert_eq!(entries[1].output["text"], "Nickname");
}

#[test_log::test(tokio::test)]
async fn test_failed_mutation_is_logged() {
    let store = setup().await;
    let ctx = &store.ctx;
    let processor = FieldsOperationProcessor::new();

    let err = processor
        .process(&RemoveField::new("DFAFDSFDSFDSF"), ctx)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Field not found with id DFAFDSFDSFDSF");

    let entries = ctx.read_activity(Some(10)).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].op, "remove field");
    assert_eq!(
        entries[0].output["error"],
        "Field not found with id DFAFDSFDSFDSF"
    );
    assert_eq!(entries[0].actor, None);
}
