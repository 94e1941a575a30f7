//! DynamoDB record store implementation.

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;

use itemstore_core::store::{Precondition, Record, RecordKey, RecordStore, Result};

use crate::config::Config;

use super::conversions::{
    attributes_to_key, attributes_to_record, key_to_attributes, record_to_attributes,
};
use super::error::{
    map_delete_item_error, map_get_item_error, map_put_item_error, map_scan_error,
};

/// DynamoDB-backed record store.
///
/// Addresses a table whose composite primary key is a string `PK`
/// (item id) and string `SK` (item status). Conditional writes map to
/// condition expressions on `PK`, which DynamoDB evaluates against the
/// full composite key the operation addresses.
pub struct DynamoDbRecordStore {
    client: Client,
    table_name: String,
}

impl DynamoDbRecordStore {
    /// Creates a store with the given client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Creates a store from application configuration.
    ///
    /// Uses the AWS SDK default credential chain; `endpoint_url` overrides
    /// the endpoint for DynamoDB Local.
    pub async fn from_config(config: &Config) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = loader.load().await;

        Self::new(Client::new(&sdk_config), config.table_name.clone())
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl RecordStore for DynamoDbRecordStore {
    async fn put_conditional(
        &self,
        key: RecordKey,
        record: Record,
        precondition: Option<Precondition>,
    ) -> Result<()> {
        let mut request = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(record_to_attributes(&key, &record)));

        request = match precondition {
            Some(Precondition::KeyAbsent) => {
                request.condition_expression("attribute_not_exists(PK)")
            }
            Some(Precondition::KeyExists) => request.condition_expression("attribute_exists(PK)"),
            None => request,
        };

        request
            .send()
            .await
            .map_err(|e| map_put_item_error(e, &key))?;

        Ok(())
    }

    async fn get(&self, key: &RecordKey) -> Result<Option<Record>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(key_to_attributes(key)))
            .send()
            .await
            .map_err(map_get_item_error)?;

        match result.item {
            Some(item) => Ok(Some(attributes_to_record(&item)?)),
            None => Ok(None),
        }
    }

    async fn delete_conditional(
        &self,
        key: &RecordKey,
        precondition: Option<Precondition>,
    ) -> Result<()> {
        let mut request = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .set_key(Some(key_to_attributes(key)));

        request = match precondition {
            Some(Precondition::KeyAbsent) => {
                request.condition_expression("attribute_not_exists(PK)")
            }
            Some(Precondition::KeyExists) => request.condition_expression("attribute_exists(PK)"),
            None => request,
        };

        request
            .send()
            .await
            .map_err(|e| map_delete_item_error(e, key))?;

        Ok(())
    }

    async fn scan(
        &self,
        limit: usize,
        start_after: Option<&RecordKey>,
    ) -> Result<Vec<(RecordKey, Record)>> {
        let mut request = self
            .client
            .scan()
            .table_name(&self.table_name)
            .limit(limit as i32);

        if let Some(after) = start_after {
            request = request.set_exclusive_start_key(Some(key_to_attributes(after)));
        }

        let result = request.send().await.map_err(map_scan_error)?;

        let mut rows = Vec::new();
        for item in result.items.unwrap_or_default() {
            // Rows with an unrecognized key shape (e.g. foreign data in a
            // shared table) are skipped rather than failing the page.
            let Some(key) = attributes_to_key(&item) else {
                tracing::warn!("skipping scanned row without a recognizable key");
                continue;
            };
            rows.push((key, attributes_to_record(&item)?));
        }

        Ok(rows)
    }
}
