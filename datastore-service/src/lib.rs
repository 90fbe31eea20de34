//! Datastore Service - a thin HTTP facade over two managed stores: a blob
//! sink for file uploads and a MongoDB collection of schemaless documents.

pub mod config;
pub mod dtos;
pub mod handlers;
pub mod services;
pub mod startup;
