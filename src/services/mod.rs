mod gateway_service_impl;

pub use gateway_service_impl::{GatewayServiceImpl, DEFAULT_LIST_LIMIT};
