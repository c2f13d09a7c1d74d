//! Constants used throughout the application
//! 应用程序中使用的常量

/// Mean Earth radius in kilometers / 地球平均半径（千米）
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Latitude bounds in degrees / 纬度范围（度）
pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;

/// Longitude bounds in degrees / 经度范围（度）
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// Default label length bounds, in characters / 默认标签长度范围（字符）
pub const DEFAULT_MIN_LABEL_LENGTH: usize = 10;
pub const DEFAULT_MAX_LABEL_LENGTH: usize = 255;

/// Key prefix for address records in the KV store / KV存储中地址记录的键前缀
pub const ADDRESS_KEY_PREFIX: &str = "address:";

/// Service name reported by the health endpoint / 健康检查端点报告的服务名
pub const SERVICE_NAME: &str = "geo-addresses";
