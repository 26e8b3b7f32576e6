pub mod config;
pub mod llm_clients;
pub mod notify;
pub mod repository;
pub mod storage;
pub mod tabular;
