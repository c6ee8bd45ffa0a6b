pub mod ai;
pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod recommend;
pub mod reports;
