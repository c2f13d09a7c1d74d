//! Geographic helpers / 地理计算辅助
//!
//! Great-circle distance on a spherical Earth, used by the proximity query.
//! 球面地球上的大圆距离计算，供邻近查询使用。

pub mod distance;

pub use distance::{haversine_km, within_distance};
