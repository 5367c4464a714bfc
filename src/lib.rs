pub mod artifact;
pub mod catalog;
pub mod config;
pub mod diet;
pub mod embed;
pub mod exercise;
pub mod meditation;
pub mod render;
pub mod vector_ops;
