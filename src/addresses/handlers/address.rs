//! Address HTTP handlers
//! 地址HTTP处理器
//!
//! Each handler opens a fresh service scope from the gateway state and drops
//! it on return.
//! 每个处理器从网关状态打开新的服务作用域，并在返回时释放。

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use super::common::{json_rejection, path_rejection};
use crate::addresses::error::AddressResult;
use crate::addresses::gateway::GatewayState;
use crate::addresses::model::{Address, AddressPatch, AddressWithDistance, NewAddress};

/// Proximity query response / 邻近查询响应
#[derive(Debug, Serialize, Deserialize)]
pub struct FindWithinResponse {
    pub status: String,
    pub count: usize,
    pub addresses: Vec<AddressWithDistance>,
}

/// List all addresses / 列出所有地址
pub async fn list_addresses(State(state): State<GatewayState>) -> AddressResult<Json<Vec<Address>>> {
    let addresses = state.session().list().await?;
    info!("Listed {} addresses via HTTP", addresses.len());
    Ok(Json(addresses))
}

/// Get a specific address / 获取特定地址
pub async fn get_address(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> AddressResult<Json<Address>> {
    let address = state.session().get(&id).await?;
    Ok(Json(address))
}

/// Create a new address / 创建新地址
pub async fn create_address(
    State(state): State<GatewayState>,
    payload: Result<Json<NewAddress>, JsonRejection>,
) -> AddressResult<(StatusCode, Json<Address>)> {
    let Json(new) = payload.map_err(json_rejection)?;
    let address = state.session().create(new).await?;
    Ok((StatusCode::CREATED, Json(address)))
}

/// Update an existing address (PUT and PATCH) / 更新现有地址（PUT与PATCH）
pub async fn update_address(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    payload: Result<Json<AddressPatch>, JsonRejection>,
) -> AddressResult<Json<Address>> {
    let Json(patch) = payload.map_err(json_rejection)?;
    let address = state.session().update(&id, patch).await?;
    Ok(Json(address))
}

/// Delete an address / 删除地址
pub async fn delete_address(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> AddressResult<Json<Value>> {
    state.session().delete(&id).await?;
    Ok(Json(json!({ "status": "success" })))
}

/// Find addresses within a distance (km) of a point / 查找距某点指定距离（千米）内的地址
pub async fn find_addresses_within(
    State(state): State<GatewayState>,
    params: Result<Path<(f64, f64, f64)>, PathRejection>,
) -> AddressResult<Json<FindWithinResponse>> {
    let Path((latitude, longitude, distance)) = params.map_err(path_rejection)?;
    let result = state
        .session()
        .find_within(latitude, longitude, distance)
        .await?;

    Ok(Json(FindWithinResponse {
        status: "Addresses within given distance".to_string(),
        count: result.count,
        addresses: result.addresses,
    }))
}
