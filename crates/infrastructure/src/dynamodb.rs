use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::config::{Credentials, SharedCredentialsProvider};
use aws_sdk_dynamodb::types::{
    AttributeDefinition, AttributeValue, BillingMode, KeySchemaElement, KeyType, ReturnValue,
    ScalarAttributeType,
};
use aws_sdk_dynamodb::Client;
use domain::{NewTask, Task, TaskId, TaskUpdate};

use crate::store::{StoreError, TaskStore};

// Single-table layout: every task lives under one partition, with the
// ULID in the sort key so a query returns tasks in id order.
//   PK = "TASK", SK = "TASK#<ulid>"
const TASK_PARTITION: &str = "TASK";
const SORT_KEY_PREFIX: &str = "TASK#";

pub struct DynamoTaskStore {
    client: Client,
    table_name: String,
}

impl DynamoTaskStore {
    /// Connects to a DynamoDB endpoint and makes sure the table exists,
    /// creating it on first run. Fails eagerly so callers can refuse to
    /// start without a reachable store.
    pub async fn connect(endpoint: &str, region: &str, table_name: &str) -> Result<Self, StoreError> {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .endpoint_url(endpoint)
            .region(Region::new(region.to_string()))
            .credentials_provider(SharedCredentialsProvider::new(Credentials::new(
                "local", "local", None, None, "local",
            )))
            .load()
            .await;

        let store = Self {
            client: Client::new(&config),
            table_name: table_name.to_string(),
        };
        store.ensure_table_exists().await?;
        Ok(store)
    }

    async fn ensure_table_exists(&self) -> Result<(), StoreError> {
        match self
            .client
            .describe_table()
            .table_name(&self.table_name)
            .send()
            .await
        {
            Ok(_) => Ok(()),
            Err(err)
                if err
                    .as_service_error()
                    .map_or(false, |e| e.is_resource_not_found_exception()) =>
            {
                self.create_table()
                    .await
                    .map_err(|e| StoreError::Unavailable(e.to_string()))
            }
            Err(err) => Err(StoreError::Unavailable(err.to_string())),
        }
    }

    async fn create_table(&self) -> anyhow::Result<()> {
        self.client
            .create_table()
            .table_name(&self.table_name)
            .billing_mode(BillingMode::PayPerRequest)
            .attribute_definitions(
                AttributeDefinition::builder()
                    .attribute_name("PK")
                    .attribute_type(ScalarAttributeType::S)
                    .build()?,
            )
            .attribute_definitions(
                AttributeDefinition::builder()
                    .attribute_name("SK")
                    .attribute_type(ScalarAttributeType::S)
                    .build()?,
            )
            .key_schema(
                KeySchemaElement::builder()
                    .attribute_name("PK")
                    .key_type(KeyType::Hash)
                    .build()?,
            )
            .key_schema(
                KeySchemaElement::builder()
                    .attribute_name("SK")
                    .key_type(KeyType::Range)
                    .build()?,
            )
            .send()
            .await?;
        Ok(())
    }
}

#[async_trait]
impl TaskStore for DynamoTaskStore {
    async fn list_all(&self) -> Result<Vec<Task>, StoreError> {
        let result = self
            .client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression("PK = :pk AND begins_with(SK, :sk_prefix)")
            .expression_attribute_values(":pk", AttributeValue::S(TASK_PARTITION.to_string()))
            .expression_attribute_values(":sk_prefix", AttributeValue::S(SORT_KEY_PREFIX.to_string()))
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(result.items().iter().filter_map(item_to_task).collect())
    }

    async fn insert(&self, new_task: NewTask) -> Result<Task, StoreError> {
        let task = Task {
            id: TaskId::new(),
            title: new_task.into_title(),
            completed: false,
        };

        self.client
            .put_item()
            .table_name(&self.table_name)
            .item("PK", AttributeValue::S(TASK_PARTITION.to_string()))
            .item("SK", AttributeValue::S(format!("{SORT_KEY_PREFIX}{}", task.id)))
            .item("id", AttributeValue::S(task.id.as_str().to_string()))
            .item("title", AttributeValue::S(task.title.clone()))
            .item("completed", AttributeValue::Bool(task.completed))
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(task)
    }

    async fn update_by_id(&self, id: &TaskId, update: TaskUpdate) -> Result<Task, StoreError> {
        let mut update_parts = Vec::new();
        let mut request = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(TASK_PARTITION.to_string()))
            .key("SK", AttributeValue::S(format!("{SORT_KEY_PREFIX}{id}")))
            .condition_expression("attribute_exists(PK)")
            .return_values(ReturnValue::AllNew);

        if let Some(title) = update.title() {
            update_parts.push("title = :title");
            request = request.expression_attribute_values(":title", AttributeValue::S(title.to_string()));
        }
        if let Some(completed) = update.completed() {
            update_parts.push("completed = :completed");
            request = request.expression_attribute_values(":completed", AttributeValue::Bool(completed));
        }

        let result = request
            .update_expression(format!("SET {}", update_parts.join(", ")))
            .send()
            .await
            .map_err(|err| {
                if err
                    .as_service_error()
                    .map_or(false, |e| e.is_conditional_check_failed_exception())
                {
                    StoreError::NotFound
                } else {
                    StoreError::Unavailable(err.to_string())
                }
            })?;

        let item = result.attributes().ok_or(StoreError::NotFound)?;
        item_to_task(item)
            .ok_or_else(|| StoreError::Unavailable("Failed to parse updated item".to_string()))
    }

    async fn delete_by_id(&self, id: &TaskId) -> Result<(), StoreError> {
        let result = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(TASK_PARTITION.to_string()))
            .key("SK", AttributeValue::S(format!("{SORT_KEY_PREFIX}{id}")))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        if result.attributes().is_none() {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

fn item_to_task(item: &HashMap<String, AttributeValue>) -> Option<Task> {
    Some(Task {
        id: TaskId::parse(item.get("id")?.as_s().ok()?).ok()?,
        title: item.get("title")?.as_s().ok()?.clone(),
        completed: *item.get("completed")?.as_bool().ok()?,
    })
}
