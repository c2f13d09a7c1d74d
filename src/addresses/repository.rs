//! Persistence gateway for address records
//! 地址记录的持久化网关
//!
//! `AddressRepository` is the seam between the service logic and the datastore.
//! The KV-backed implementation stores each record as JSON under `address:{id}`.
//! `AddressRepository` 是服务逻辑与数据存储之间的接口。
//! 基于KV的实现将每条记录以JSON形式存储在 `address:{id}` 下。

use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use super::error::AddressResult;
use super::model::{Address, AddressPatch, NewAddress};
use crate::storage::kv::{serialization, KvStore};

/// Datastore operations over address records / 地址记录的数据存储操作
#[async_trait]
pub trait AddressRepository: Send + Sync + Debug {
    /// Persist a new record and assign its id / 持久化新记录并分配ID
    async fn create(&self, new: NewAddress) -> AddressResult<Address>;

    /// Fetch a record by id / 根据ID获取记录
    async fn get(&self, id: &str) -> AddressResult<Option<Address>>;

    /// Fetch every record / 获取所有记录
    async fn list(&self) -> AddressResult<Vec<Address>>;

    /// Apply a partial update, `None` when the id is unknown / 应用部分更新，ID不存在时返回 `None`
    async fn update(&self, id: &str, patch: &AddressPatch) -> AddressResult<Option<Address>> {
        let key = serialization::address_key(id);
        let patch = patch.clone();

        // Merge runs inside the store's read-modify-write; a concurrent delete
        // is never undone / 合并在存储的读-改-写内执行，并发删除不会被撤销
        let written = self
            .store
            .update_with(
                &key,
                Box::new(move |current: Option<&[u8]>| {
                    let Some(bytes) = current else {
                        return Ok(None);
                    };
                    let existing: Address = serialization::deserialize(bytes)?;
                    serialization::serialize(&existing.merge(&patch)).map(Some)
                }),
            )
            .await?;

        written
            .map(|bytes| serialization::deserialize(&bytes))
            .transpose()
    }

    async fn delete(&self, id: &str) -> AddressResult<bool> {
        let key = serialization::address_key(id);
        self.store.delete(&key).await
    }
}
