//! Core library for the Campus Clubs client.
//!
//! - `api`: typed HTTP client, request descriptors and per-resource routes
//! - `auth`: bearer token providers and the persisted session
//! - `models`: DTOs returned by the clubs/events server
//! - `config`: application configuration on disk
//! - `utils`: display formatting helpers shared by front ends

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod utils;
