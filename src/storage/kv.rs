//! Key-Value storage abstraction layer for the address service
//! 地址服务的键值存储抽象层
//!
//! This module provides a generic interface for different KV storage backends.
//! Address records are kept as JSON values under prefixed keys.
//! 该模块为不同的KV存储后端提供通用接口，地址记录以JSON值的形式保存在带前缀的键下。

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;
use std::sync::Arc;
use tokio::sync::RwLock;
#[cfg(feature = "sled")]
use tracing::warn;

use crate::addresses::error::{AddressError, AddressResult};
use crate::config::base::StorageConfig;

#[cfg(any(feature = "sled", feature = "rocksdb"))]
use crate::spawn_blocking_task;
#[cfg(feature = "sled")]
use crate::handle_sled_error;
#[cfg(feature = "rocksdb")]
use crate::handle_rocksdb_error;

/// Key type for KV operations / KV操作的键类型
pub type KvKey = String;

/// Value type for KV operations / KV操作的值类型
pub type KvValue = Vec<u8>;

/// Read-modify-write callback for [`KvStore::update_with`]; it sees the current
/// value and returns the replacement, or `None` to leave the key untouched.
/// 读-改-写回调：接收当前值并返回新值，返回 `None` 时保持键不变。
///
/// Backends built on compare-and-swap may call it more than once.
/// 基于比较交换的后端可能多次调用它。
pub type KvUpdateFn = Box<dyn Fn(Option<&[u8]>) -> AddressResult<Option<KvValue>> + Send + Sync>;

/// Prefix scan result / 前缀扫描结果
#[derive(Debug, Clone, PartialEq)]
pub struct KvPair {
    pub key: KvKey,
    pub value: KvValue,
}

/// KV storage configuration / KV存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KvStoreConfig {
    /// Storage backend type / 存储后端类型
    pub backend: String,
    /// Configuration parameters / 配置参数
    pub params: HashMap<String, String>,
}

impl KvStoreConfig {
    /// Create a new memory store config / 创建新的内存存储配置
    pub fn memory() -> Self {
        Self {
            backend: "memory".to_string(),
            params: HashMap::new(),
        }
    }

    /// Create a new Sled store config / 创建新的Sled存储配置
    #[cfg(feature = "sled")]
    pub fn sled<P: AsRef<str>>(path: P) -> Self {
        Self::memory()
            .with_backend("sled")
            .with_param("path", path.as_ref())
    }

    /// Create a new RocksDB store config / 创建新的RocksDB存储配置
    #[cfg(feature = "rocksdb")]
    pub fn rocksdb<P: AsRef<str>>(path: P) -> Self {
        Self::memory()
            .with_backend("rocksdb")
            .with_param("path", path.as_ref())
    }

    #[cfg(any(feature = "sled", feature = "rocksdb"))]
    fn with_backend(mut self, backend: &str) -> Self {
        self.backend = backend.to_string();
        self
    }

    /// Add a configuration parameter / 添加配置参数
    pub fn with_param<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Get a configuration parameter / 获取配置参数
    pub fn get_param(&self, key: &str) -> Option<&String> {
        self.params.get(key)
    }

    /// Convert from StorageConfig to KvStoreConfig / 从StorageConfig转换为KvStoreConfig
    pub fn from_storage_config(storage_config: &StorageConfig) -> Self {
        let mut params = HashMap::new();
        params.insert("path".to_string(), storage_config.path.clone());

        Self {
            backend: storage_config.backend.clone(),
            params,
        }
    }
}

impl Default for KvStoreConfig {
    fn default() -> Self {
        Self::memory()
    }
}

/// KV storage trait for different backends / 不同后端的KV存储trait
#[async_trait]
pub trait KvStore: Send + Sync + Debug {
    /// Get a value by key / 根据键获取值
    async fn get(&self, key: &KvKey) -> AddressResult<Option<KvValue>>;

    /// Put a key-value pair / 存储键值对
    async fn put(&self, key: &KvKey, value: &KvValue) -> AddressResult<()>;

    /// Delete a key, returning whether it existed / 删除键，返回该键是否存在
    async fn delete(&self, key: &KvKey) -> AddressResult<bool>;

    /// Atomically replace a value derived from the current one, returning what was written
    /// 基于当前值原子地替换值，返回写入的值
    ///
    /// No other write to `key` can land between the read and the write.
    /// 在读与写之间，不会有其他针对 `key` 的写入发生。
    async fn update_with(&self, key: &KvKey, update: KvUpdateFn) -> AddressResult<Option<KvValue>>;

    /// Scan all key-value pairs with a prefix / 扫描具有指定前缀的所有键值对
    async fn scan_prefix(&self, prefix: &str) -> AddressResult<Vec<KvPair>>;
}

/// Backends compiled into this build / 当前构建包含的存储后端
pub fn supported_backends() -> Vec<&'static str> {
    #[allow(unused_mut)]
    let mut backends = vec!["memory"];

    #[cfg(feature = "sled")]
    backends.push("sled");

    #[cfg(feature = "rocksdb")]
    backends.push("rocksdb");

    backends
}

#[cfg(any(feature = "sled", feature = "rocksdb"))]
fn required_path(config: &KvStoreConfig) -> AddressResult<&String> {
    config
        .get_param("path")
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| {
            AddressError::Storage(format!(
                "{} backend requires 'path' parameter",
                config.backend
            ))
        })
}

/// Create a KV store instance from configuration / 从配置创建KV存储实例
pub async fn create_kv_store_from_config(config: &KvStoreConfig) -> AddressResult<Arc<dyn KvStore>> {
    match config.backend.as_str() {
        "memory" => Ok(Arc::new(MemoryKvStore::new())),
        #[cfg(feature = "sled")]
        "sled" => {
            let path = required_path(config)?;
            Ok(Arc::new(SledKvStore::new(path)?))
        }
        #[cfg(feature = "rocksdb")]
        "rocksdb" => {
            let path = required_path(config)?;
            Ok(Arc::new(RocksDbKvStore::new(path)?))
        }
        other => Err(AddressError::Storage(format!(
            "Unsupported backend: {}. Supported backends: {:?}",
            other,
            supported_backends()
        ))),
    }
}

/// In-memory KV store implementation / 内存KV存储实现
#[derive(Debug)]
pub struct MemoryKvStore {
    data: Arc<RwLock<BTreeMap<KvKey, KvValue>>>,
}

impl MemoryKvStore {
    /// Create a new memory KV store / 创建新的内存KV存储
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }
}

impl Default for MemoryKvStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn get(&self, key: &KvKey) -> AddressResult<Option<KvValue>> {
        let data = self.data.read().await;
        Ok(data.get(key).cloned())
    }

    async fn put(&self, key: &KvKey, value: &KvValue) -> AddressResult<()> {
        let mut data = self.data.write().await;
        data.insert(key.clone(), value.clone());
        Ok(())
    }

    async fn delete(&self, key: &KvKey) -> AddressResult<bool> {
        let mut data = self.data.write().await;
        Ok(data.remove(key).is_some())
    }

    async fn update_with(&self, key: &KvKey, update: KvUpdateFn) -> AddressResult<Option<KvValue>> {
        let mut data = self.data.write().await;
        let Some(next) = update(data.get(key).map(|value| value.as_slice()))? else {
            return Ok(None);
        };
        data.insert(key.clone(), next.clone());
        Ok(Some(next))
    }

    async fn scan_prefix(&self, prefix: &str) -> AddressResult<Vec<KvPair>> {
        let data = self.data.read().await;
        let pairs: Vec<KvPair> = data
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| KvPair {
                key: key.clone(),
                value: value.clone(),
            })
            .collect();
        Ok(pairs)
    }
}

/// Serialization helpers for stored records / 存储记录的序列化辅助函数
pub mod serialization {
    use super::*;
    use crate::constants::ADDRESS_KEY_PREFIX;

    /// Serialize a value to bytes / 将值序列化为字节
    pub fn serialize<T: Serialize>(value: &T) -> AddressResult<KvValue> {
        serde_json::to_vec(value)
            .map_err(|e| AddressError::Storage(format!("Failed to serialize value: {}", e)))
    }

    /// Deserialize bytes to a value / 将字节反序列化为值
    pub fn deserialize<T: for<'de> Deserialize<'de>>(bytes: &[u8]) -> AddressResult<T> {
        serde_json::from_slice(bytes)
            .map_err(|e| AddressError::Storage(format!("Failed to deserialize value: {}", e)))
    }

    /// Generate key for an address record / 生成地址记录的键
    pub fn address_key(id: &str) -> KvKey {
        format!("{}{}", ADDRESS_KEY_PREFIX, id)
    }

    /// Key prefix for address records / 地址记录的键前缀
    pub fn address_prefix() -> &'static str {
        ADDRESS_KEY_PREFIX
    }
}

/// Sled KV store implementation / Sled KV存储实现
#[cfg(feature = "sled")]
#[derive(Debug)]
pub struct SledKvStore {
    db: Arc<sled::Db>,
}

#[cfg(feature = "sled")]
impl SledKvStore {
    /// Create a new Sled KV store / 创建新的Sled KV存储
    pub fn new(path: impl AsRef<std::path::Path>) -> AddressResult<Self> {
        let db = handle_sled_error!(sled::open(path), "open")?;
        Ok(Self { db: Arc::new(db) })
    }

    /// Flush after a committed write; the write stands even if the flush fails
    /// 已提交写入后刷盘；刷盘失败时写入依然有效
    fn flush_committed(db: &sled::Db, op_name: &str) {
        if let Err(e) = db.flush() {
            warn!("Sled flush after {} failed, relying on background flush: {}", op_name, e);
        }
    }
}

#[cfg(feature = "sled")]
#[async_trait]
impl KvStore for SledKvStore {
    async fn get(&self, key: &KvKey) -> AddressResult<Option<KvValue>> {
        let db = self.db.clone();
        let key = key.clone();

        spawn_blocking_task!(move || {
            handle_sled_error!(db.get(&key).map(|opt| opt.map(|ivec| ivec.to_vec())), "get")
        })
    }

    async fn put(&self, key: &KvKey, value: &KvValue) -> AddressResult<()> {
        let db = self.db.clone();
        let key = key.clone();
        let value = value.clone();

        spawn_blocking_task!(move || {
            handle_sled_error!(db.insert(&key, value), "put")?;
            Self::flush_committed(&db, "put");
            Ok(())
        })
    }

    async fn delete(&self, key: &KvKey) -> AddressResult<bool> {
        let db = self.db.clone();
        let key = key.clone();

        spawn_blocking_task!(move || {
            let existed = handle_sled_error!(db.remove(&key), "delete")?.is_some();
            if existed {
                Self::flush_committed(&db, "delete");
            }
            Ok(existed)
        })
    }

    async fn update_with(&self, key: &KvKey, update: KvUpdateFn) -> AddressResult<Option<KvValue>> {
        let db = self.db.clone();
        let key = key.clone();

        spawn_blocking_task!(move || loop {
            let current = handle_sled_error!(db.get(&key), "get")?;
            let Some(next) = update(current.as_deref())? else {
                return Ok(None);
            };
            let swapped = handle_sled_error!(
                db.compare_and_swap(&key, current, Some(next.clone())),
                "compare_and_swap"
            )?;
            if swapped.is_ok() {
                Self::flush_committed(&db, "update");
                return Ok(Some(next));
            }
            // Lost the race, re-read and recompute / 竞争失败，重新读取并计算
        })
    }

    async fn scan_prefix(&self, prefix: &str) -> AddressResult<Vec<KvPair>> {
        let db = self.db.clone();
        let prefix = prefix.to_string();

        spawn_blocking_task!(move || {
            let mut pairs = Vec::new();

            for item in db.scan_prefix(&prefix) {
                let (key, value) = handle_sled_error!(item, "iterator")?;
                if let Ok(key_str) = String::from_utf8(key.to_vec()) {
                    pairs.push(KvPair {
                        key: key_str,
                        value: value.to_vec(),
                    });
                }
            }

            Ok(pairs)
        })
    }
}

/// RocksDB-based KV store implementation / 基于RocksDB的KV存储实现
#[cfg(feature = "rocksdb")]
#[derive(Debug)]
pub struct RocksDbKvStore {
    db: Arc<rocksdb::DB>,
    // Serializes writers so read-modify-write cycles cannot interleave
    // 串行化写入者，避免读-改-写过程交错
    write_lock: Arc<std::sync::Mutex<()>>,
}

#[cfg(feature = "rocksdb")]
impl RocksDbKvStore {
    /// Create a new RocksDB store / 创建新的RocksDB存储
    pub fn new(path: impl AsRef<std::path::Path>) -> AddressResult<Self> {
        let db = handle_rocksdb_error!(rocksdb::DB::open_default(path), "open")?;
        Ok(Self {
            db: Arc::new(db),
            write_lock: Arc::new(std::sync::Mutex::new(())),
        })
    }
}

#[cfg(feature = "rocksdb")]
fn lock_writes(lock: &std::sync::Mutex<()>) -> AddressResult<std::sync::MutexGuard<'_, ()>> {
    lock.lock()
        .map_err(|e| AddressError::Storage(format!("RocksDB write lock poisoned: {}", e)))
}

#[cfg(feature = "rocksdb")]
#[async_trait]
impl KvStore for RocksDbKvStore {
    async fn get(&self, key: &KvKey) -> AddressResult<Option<KvValue>> {
        let db = self.db.clone();
        let key = key.clone();

        spawn_blocking_task!(move || handle_rocksdb_error!(db.get(key.as_bytes()), "get"))
    }

    async fn put(&self, key: &KvKey, value: &KvValue) -> AddressResult<()> {
        let db = self.db.clone();
        let key = key.clone();
        let value = value.clone();
        let write_lock = self.write_lock.clone();

        spawn_blocking_task!(move || {
            let _guard = lock_writes(&write_lock)?;
            handle_rocksdb_error!(db.put(key.as_bytes(), &value), "put")
        })
    }

    async fn delete(&self, key: &KvKey) -> AddressResult<bool> {
        let db = self.db.clone();
        let key = key.clone();
        let write_lock = self.write_lock.clone();

        spawn_blocking_task!(move || {
            let _guard = lock_writes(&write_lock)?;
            let existed = handle_rocksdb_error!(db.get(key.as_bytes()), "get")?.is_some();
            handle_rocksdb_error!(db.delete(key.as_bytes()), "delete")?;
            Ok(existed)
        })
    }

    async fn update_with(&self, key: &KvKey, update: KvUpdateFn) -> AddressResult<Option<KvValue>> {
        let db = self.db.clone();
        let key = key.clone();
        let write_lock = self.write_lock.clone();

        spawn_blocking_task!(move || {
            let _guard = lock_writes(&write_lock)?;
            let current = handle_rocksdb_error!(db.get(key.as_bytes()), "get")?;
            let Some(next) = update(current.as_deref())? else {
                return Ok(None);
            };
            handle_rocksdb_error!(db.put(key.as_bytes(), &next), "put")?;
            Ok(Some(next))
        })
    }

    async fn scan_prefix(&self, prefix: &str) -> AddressResult<Vec<KvPair>> {
        let db = self.db.clone();
        let prefix = prefix.to_string();

        spawn_blocking_task!(move || {
            let mut pairs = Vec::new();
            let iter = db.iterator(rocksdb::IteratorMode::From(
                prefix.as_bytes(),
                rocksdb::Direction::Forward,
            ));

            for item in iter {
                let (key, value) = handle_rocksdb_error!(item, "iterator")?;
                let Ok(key_str) = String::from_utf8(key.to_vec()) else {
                    continue;
                };
                if !key_str.starts_with(&prefix) {
                    break; // Keys are ordered / 键是有序的
                }
                pairs.push(KvPair {
                    key: key_str,
                    value: value.to_vec(),
                });
            }

            Ok(pairs)
        })
    }
}
