mod gateway;

pub use gateway::UploadGateway;
