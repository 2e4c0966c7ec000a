//! # remark-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    AuthService, CommentService, ReactionService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, UserService, MAX_TOGGLE_ATTEMPTS,
};
