//! Storage module for geo-addresses
//!
//! This module contains the storage abstractions and implementations.
//! It provides a unified interface for different storage backends.
//!
//! geo-addresses的存储模块
//!
//! 此模块包含与存储相关的抽象和实现，为不同的存储后端提供统一的接口。

pub mod kv;

// Re-export commonly used types for convenience
// 为方便使用重新导出常用类型
pub use kv::{
    create_kv_store_from_config, serialization, supported_backends, KvKey, KvPair, KvStore,
    KvStoreConfig, KvUpdateFn, KvValue, MemoryKvStore,
};

#[cfg(feature = "sled")]
pub use kv::SledKvStore;

#[cfg(feature = "rocksdb")]
pub use kv::RocksDbKvStore;
