pub mod app;
pub mod config;
pub mod db;
pub mod dto;
pub mod entity;
pub mod error;
pub mod i18n;
pub mod middleware;
pub mod models;
pub mod pricing;
pub mod repository;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
pub mod views;
