//! DTO for the service description endpoint.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub service: &'static str,
    pub version: &'static str,
    pub endpoints: Vec<&'static str>,
}
