//! Address service: validation, persistence and proximity search
//! 地址服务：校验、持久化与邻近搜索

use std::sync::Arc;
use tracing::info;

use super::error::{AddressError, AddressResult, ValidationError};
use super::model::{Address, AddressPatch, AddressWithDistance, NewAddress, ProximityResult};
use super::repository::AddressRepository;
use super::validation::{validate_latitude, validate_longitude, ValidationConfig};
use crate::geo::within_distance;

/// Per-request service scope over a shared repository
/// 基于共享仓库的单请求服务作用域
#[derive(Debug, Clone)]
pub struct AddressService {
    repository: Arc<dyn AddressRepository>,
    rules: ValidationConfig,
}

impl AddressService {
    /// Create a new address service / 创建新的地址服务
    pub fn new(repository: Arc<dyn AddressRepository>, rules: ValidationConfig) -> Self {
        Self { repository, rules }
    }

    /// Get an address by id / 根据ID获取地址
    pub async fn get(&self, id: &str) -> AddressResult<Address> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| AddressError::not_found(id))
    }

    /// List all addresses / 列出所有地址
    pub async fn list(&self) -> AddressResult<Vec<Address>> {
        self.repository.list().await
    }

    /// Validate and persist a new address / 校验并持久化新地址
    pub async fn create(&self, new: NewAddress) -> AddressResult<Address> {
        self.rules.validate_new(&new)?;
        let address = self.repository.create(new).await?;
        info!("Created address {}", address.id);
        Ok(address)
    }

    /// Apply a partial update / 应用部分更新
    ///
    /// Supplied fields are validated before the store is touched.
    /// 在访问存储之前校验所提供的字段。
    pub async fn update(&self, id: &str, patch: AddressPatch) -> AddressResult<Address> {
        self.rules.validate_patch(&patch)?;
        let updated = self
            .repository
            .update(id, &patch)
            .await?
            .ok_or_else(|| AddressError::not_found(id))?;
        info!("Updated address {}", id);
        Ok(updated)
    }

    /// Delete an address / 删除地址
    pub async fn delete(&self, id: &str) -> AddressResult<()> {
        if !self.repository.delete(id).await? {
            return Err(AddressError::not_found(id));
        }
        info!("Deleted address {}", id);
        Ok(())
    }

    /// All addresses within `max_km` of the reference point, nearest first
    /// 距参考点 `max_km` 范围内的所有地址，按距离由近到远排列
    ///
    /// Full scan; the boundary is inclusive and a negative threshold matches nothing.
    /// 全量扫描；边界包含在内，负阈值不匹配任何记录。
    pub async fn find_within(
        &self,
        latitude: f64,
        longitude: f64,
        max_km: f64,
    ) -> AddressResult<ProximityResult> {
        validate_latitude(latitude)?;
        validate_longitude(longitude)?;
        if max_km.is_nan() {
            return Err(ValidationError::Malformed("distance must be a number".to_string()).into());
        }

        let mut addresses: Vec<AddressWithDistance> = self
            .repository
            .list()
            .await?
            .into_iter()
            .filter_map(|address| {
                within_distance(
                    (latitude, longitude),
                    (address.latitude, address.longitude),
                    max_km,
                )
                .map(|distance_km| AddressWithDistance {
                    address,
                    distance_km,
                })
            })
            .collect();
        addresses.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

        info!(
            "Found {} addresses within {} km of ({}, {})",
            addresses.len(),
            max_km,
            latitude,
            longitude
        );
        Ok(ProximityResult {
            count: addresses.len(),
            addresses,
        })
    }
}
