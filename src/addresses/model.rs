//! Address record types / 地址记录类型

use serde::{Deserialize, Serialize};

/// Stored address record / 已存储的地址记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    /// Unique identifier assigned on creation / 创建时分配的唯一标识
    pub id: String,
    /// Free-text description / 自由文本描述
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Candidate record submitted for creation / 提交创建的候选记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAddress {
    #[serde(alias = "address")]
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Partial update; absent fields keep their stored value
/// 部分更新；未提供的字段保留原值
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressPatch {
    #[serde(default, alias = "address", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl Address {
    /// Build a stored record from a candidate and its new id
    /// 由候选记录和新ID构建已存储记录
    pub fn from_new(id: impl Into<String>, new: NewAddress) -> Self {
        Self {
            id: id.into(),
            label: new.label,
            latitude: new.latitude,
            longitude: new.longitude,
        }
    }

    /// Produce a new record with the patch's fields overwritten; `id` is never changed
    /// 生成应用补丁字段后的新记录；`id` 永不改变
    pub fn merge(&self, patch: &AddressPatch) -> Address {
        Address {
            id: self.id.clone(),
            label: patch.label.clone().unwrap_or_else(|| self.label.clone()),
            latitude: patch.latitude.unwrap_or(self.latitude),
            longitude: patch.longitude.unwrap_or(self.longitude),
        }
    }
}

/// Address paired with its distance from a reference point
/// 附带与参考点距离的地址
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressWithDistance {
    #[serde(flatten)]
    pub address: Address,
    pub distance_km: f64,
}

/// Proximity query result / 邻近查询结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProximityResult {
    pub count: usize,
    pub addresses: Vec<AddressWithDistance>,
}
