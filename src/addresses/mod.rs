//! Address service / 地址服务
//!
//! CRUD over address records plus a great-circle proximity query, exposed
//! over HTTP.
//! 地址记录的增删改查以及大圆距离邻近查询，通过HTTP对外提供。

pub mod config;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod http_gateway;
pub mod model;
pub mod repository;
pub mod routes;
pub mod service;
pub mod validation;

#[cfg(test)]
mod config_test;

pub use error::{AddressError, AddressResult, ValidationError};
pub use gateway::{create_gateway_router, GatewayState};
pub use model::{Address, AddressPatch, AddressWithDistance, NewAddress, ProximityResult};
pub use repository::{AddressRepository, KvAddressRepository};
pub use service::AddressService;
pub use validation::ValidationConfig;
