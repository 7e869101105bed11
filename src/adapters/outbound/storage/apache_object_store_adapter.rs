use async_trait::async_trait;
use bytes::Bytes;
use object_store::{
    path::Path as ObjectPath, Attribute, Attributes, ObjectStore as ApacheObjectStore, PutOptions,
    PutPayload,
};
use std::sync::Arc;

use crate::{
    domain::{
        errors::{StorageError, StorageResult},
        value_objects::ObjectKey,
    },
    ports::storage::ObjectStore,
};

/// Adapter that implements our ObjectStore trait using Apache object_store
#[derive(Clone)]
pub struct ApacheObjectStoreAdapter {
    inner: Arc<dyn ApacheObjectStore>,
}

impl ApacheObjectStoreAdapter {
    pub fn new(store: Arc<dyn ApacheObjectStore>) -> Self {
        Self { inner: store }
    }

    fn convert_error(
        operation: &str,
        key: Option<&ObjectKey>,
        err: object_store::Error,
    ) -> StorageError {
        match (err, key) {
            (object_store::Error::NotFound { .. }, Some(key)) => {
                StorageError::ObjectNotFound { key: key.clone() }
            }
            (
                err @ (object_store::Error::PermissionDenied { .. }
                | object_store::Error::Unauthenticated { .. }),
                _,
            ) => StorageError::AccessDenied {
                operation: operation.to_string(),
                message: err.to_string(),
            },
            (err, _) => StorageError::InfrastructureError {
                message: format!("Failed to {}: {}", operation, err),
                source_message: Some(err.to_string()),
            },
        }
    }
}

#[async_trait]
impl ObjectStore for ApacheObjectStoreAdapter {
    async fn probe(&self) -> StorageResult<()> {
        self.inner
            .list_with_delimiter(None)
            .await
            .map(|_| ())
            .map_err(|e| match Self::convert_error("probe store", None, e) {
                denied @ StorageError::AccessDenied { .. } => denied,
                other => StorageError::Unreachable {
                    message: other.to_string(),
                },
            })
    }

    async fn put_object(
        &self,
        key: &ObjectKey,
        data: Bytes,
        content_type: Option<&str>,
    ) -> StorageResult<()> {
        let path = ObjectPath::from(key.as_str());
        let payload = PutPayload::from(data);

        let mut attributes = Attributes::new();
        if let Some(content_type) = content_type {
            attributes.insert(Attribute::ContentType, content_type.to_string().into());
        }
        let options = PutOptions {
            attributes,
            ..Default::default()
        };

        self.inner
            .put_opts(&path, payload, options)
            .await
            .map_err(|e| Self::convert_error("put object", Some(key), e))?;

        Ok(())
    }

    async fn get_object(&self, key: &ObjectKey) -> StorageResult<Bytes> {
        let path = ObjectPath::from(key.as_str());

        let result = self
            .inner
            .get(&path)
            .await
            .map_err(|e| Self::convert_error("get object", Some(key), e))?;

        result
            .bytes()
            .await
            .map_err(|e| Self::convert_error("read object bytes", Some(key), e))
    }

    async fn object_exists(&self, key: &ObjectKey) -> StorageResult<bool> {
        let path = ObjectPath::from(key.as_str());

        match self.inner.head(&path).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(Self::convert_error("check object existence", Some(key), e)),
        }
    }
}
