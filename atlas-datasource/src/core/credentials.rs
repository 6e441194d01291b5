//! Per-request cluster scoping decoded from the `Authorization` header.
//!
//! The dashboard stores the datasource "user" and "password" as the cluster name and the
//! project id, so the header value is `Basic base64(clusterName:projectId)`. Nothing is
//! validated here: a missing or garbled header yields empty credentials and the upstream
//! API rejects the calls made with them.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::{header::AUTHORIZATION, request::Parts};
use base64::{engine::general_purpose::STANDARD, Engine};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Credentials {
    pub cluster_name: String,
    pub project_id: String,
}

impl Credentials {
    pub fn from_header(value: Option<&str>) -> Self {
        let Some(value) = value.filter(|v| !v.is_empty()) else {
            return Self::default();
        };

        let encoded = value.split(' ').nth(1).unwrap_or_default();
        let decoded = match STANDARD.decode(encoded.trim()) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                tracing::debug!("ignoring undecodable authorization header: {}", e);
                return Self::default();
            }
        };

        let mut parts = decoded.split(':');
        Self {
            cluster_name: parts.next().unwrap_or_default().to_string(),
            project_id: parts.next().unwrap_or_default().to_string(),
        }
    }
}

impl<S> FromRequestParts<S> for Credentials
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        Ok(Self::from_header(header))
    }
}
