//! Validation rules for address input
//! 地址输入的校验规则

use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use super::model::{AddressPatch, NewAddress};
use crate::constants::{
    DEFAULT_MAX_LABEL_LENGTH, DEFAULT_MIN_LABEL_LENGTH, MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE,
    MIN_LONGITUDE,
};

/// Label length policy, applied to create and update alike
/// 标签长度策略，创建与更新均适用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Minimum label length in characters / 标签最小长度（字符）
    pub min_label_length: usize,
    /// Maximum label length in characters / 标签最大长度（字符）
    pub max_label_length: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_label_length: DEFAULT_MIN_LABEL_LENGTH,
            max_label_length: DEFAULT_MAX_LABEL_LENGTH,
        }
    }
}

fn validate_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<f64, ValidationError> {
    // NaN fails both comparisons, so check finiteness explicitly / NaN不满足任何比较，需显式检查
    if !value.is_finite() || value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(value)
}

/// Latitude must lie in [-90, 90] / 纬度必须位于[-90, 90]
pub fn validate_latitude(value: f64) -> Result<f64, ValidationError> {
    validate_range("latitude", value, MIN_LATITUDE, MAX_LATITUDE)
}

/// Longitude must lie in [-180, 180] / 经度必须位于[-180, 180]
pub fn validate_longitude(value: f64) -> Result<f64, ValidationError> {
    validate_range("longitude", value, MIN_LONGITUDE, MAX_LONGITUDE)
}

impl ValidationConfig {
    /// Check the label length against the configured bounds
    /// 按配置范围检查标签长度
    ///
    /// Length counts characters, not bytes. An empty or whitespace-only label
    /// is rejected even when the minimum is zero.
    /// 长度按字符计算而非字节。即使最小值为零，空标签或仅含空白的标签也会被拒绝。
    pub fn validate_label<'a>(&self, label: &'a str) -> Result<&'a str, ValidationError> {
        let actual = label.chars().count();
        let min = self.min_label_length.max(1);
        if actual < min || actual > self.max_label_length {
            return Err(ValidationError::InvalidLength {
                field: "label",
                actual,
                min,
                max: self.max_label_length,
            });
        }
        if label.trim().is_empty() {
            return Err(ValidationError::Blank { field: "label" });
        }
        Ok(label)
    }

    /// Validate every field of a creation payload / 校验创建负载的所有字段
    pub fn validate_new(&self, new: &NewAddress) -> Result<(), ValidationError> {
        self.validate_label(&new.label)?;
        validate_latitude(new.latitude)?;
        validate_longitude(new.longitude)?;
        Ok(())
    }

    /// Validate only the fields a patch supplies / 仅校验补丁中提供的字段
    pub fn validate_patch(&self, patch: &AddressPatch) -> Result<(), ValidationError> {
        if let Some(label) = patch.label.as_deref() {
            self.validate_label(label)?;
        }
        if let Some(latitude) = patch.latitude {
            validate_latitude(latitude)?;
        }
        if let Some(longitude) = patch.longitude {
            validate_longitude(longitude)?;
        }
        Ok(())
    }

    /// Check that the bounds themselves are coherent / 检查范围本身是否一致
    pub fn check(&self) -> Result<(), String> {
        if self.max_label_length == 0 {
            return Err("validation.max_label_length must be greater than 0".to_string());
        }
        if self.min_label_length > self.max_label_length {
            return Err(format!(
                "validation.min_label_length ({}) exceeds validation.max_label_length ({})",
                self.min_label_length, self.max_label_length
            ));
        }
        Ok(())
    }
}
