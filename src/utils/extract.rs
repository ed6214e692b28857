//! Extractores de Axum con rechazos en formato `AppError`
//!
//! Los extractores por defecto responden texto plano sin `code`; estos
//! envuelven `Json` y `Path` para que todo error salga como JSON.

use axum::extract::{FromRequest, FromRequestParts};

use crate::utils::errors::AppError;

/// `Json<T>` cuyo rechazo es `INVALID_INPUT`
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `Path<T>` cuyo rechazo es `NOT_FOUND`
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
