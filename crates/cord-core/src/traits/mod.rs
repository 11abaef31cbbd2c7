//! Ports - interfaces the domain layer requires from infrastructure

mod gateway;

pub use gateway::ChatGateway;
