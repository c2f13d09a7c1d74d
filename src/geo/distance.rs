//! Great-circle distance via the haversine formula
//! 基于半正矢公式的大圆距离计算

use crate::constants::EARTH_RADIUS_KM;

/// Great-circle distance in kilometers between two points given in degrees
/// 计算两点（以度为单位）之间的大圆距离（千米）
///
/// Inputs are not validated; callers pass finite, in-range coordinates.
/// 不校验输入；调用方需传入有限且在范围内的坐标。
///
/// ```
/// use geo_addresses::geo::haversine_km;
///
/// let london_paris = haversine_km(51.5074, -0.1278, 48.8566, 2.3522);
/// assert!((london_paris - 343.5).abs() < 1.0);
/// ```
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    // Clamp guards against rounding just past 1.0 for antipodal points
    // 对近似对跖点的舍入误差进行截断
    let a = ((delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Check whether a point lies within `max_km` of a reference (inclusive)
/// 判断点是否位于参考点 `max_km` 范围内（包含边界）
pub fn within_distance(reference: (f64, f64), point: (f64, f64), max_km: f64) -> Option<f64> {
    let distance = haversine_km(reference.0, reference.1, point.0, point.1);
    if distance <= max_km {
        Some(distance)
    } else {
        None
    }
}
