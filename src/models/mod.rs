//! Request and Response models for the gateway API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP query strings and bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{
    AddToCartRequest, CreateListRequest, DetailsQuery, NearbyQuery, SalesAllQuery, SalesQuery,
    SearchAllQuery, SearchQuery, UpdateCartRequest, UpdateListRequest,
};
pub use responses::{
    CartLine, CartResponse, CartTotalResponse, ErrorResponse, HealthResponse, MessageResponse,
    StatsResponse,
};
