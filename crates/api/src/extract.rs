//! Request extractors whose rejections use the `{"error": ...}` body.

use axum::extract::FromRequest;
use axum::extract::FromRequestParts;

use blockdesk_common::error::AppError;

/// `axum::Json` that rejects malformed bodies with `AppError::Validation`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Query` that rejects bad query strings with `AppError::Validation`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

/// `axum::extract::Path` that rejects unparsable segments with `AppError::Validation`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);
