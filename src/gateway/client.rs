use async_trait::async_trait;
use thiserror::Error;

use crate::core::entity::{Animal, AnimalWithKeeper, Habitat, Keeper};
use crate::gateway::request::TriFilter;

/// Errors that can occur while talking to the backend.
/// Every variant is recoverable from the user's point of view.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GatewayError {
    /// 404: the requested entity does not exist.
    #[error("not found")]
    NotFound,
    /// 409: duplicate id on create, or entity still referenced on delete.
    /// Carries the server's `message` when it sent one.
    #[error("conflict: {}", .message.as_deref().unwrap_or("resource conflict"))]
    Conflict { message: Option<String> },
    /// Any other non-success status.
    #[error("API error (HTTP {status}): {message}")]
    Status { status: u16, message: String },
    /// Transport failure (connection refused, DNS, timeout).
    #[error("network error: {0}")]
    Network(String),
    /// The response body did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(String),
}

impl GatewayError {
    pub fn conflict(message: impl Into<String>) -> Self {
        GatewayError::Conflict {
            message: Some(message.into()),
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GatewayError::Decode(err.to_string())
        } else {
            GatewayError::Network(err.to_string())
        }
    }
}

/// Everything the client can ask of the zoo backend.
///
/// Implemented over HTTP by [`crate::gateway::HttpGateway`]; tests use an
/// in-memory fake.
#[async_trait]
pub trait EntityGateway: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Liveness probe.
    async fn health(&self) -> Result<(), GatewayError>;

    // Animals
    async fn list_animals(&self, filter: TriFilter) -> Result<Vec<Animal>, GatewayError>;
    async fn get_animal(&self, id: i64) -> Result<Animal, GatewayError>;
    async fn create_animal(&self, animal: &Animal) -> Result<Animal, GatewayError>;
    async fn update_animal(&self, animal: &Animal) -> Result<Animal, GatewayError>;
    async fn delete_animal(&self, id: i64) -> Result<(), GatewayError>;
    async fn animals_by_weight(&self, min_weight: f64) -> Result<Vec<Animal>, GatewayError>;
    async fn animals_by_name(&self, name: &str) -> Result<Vec<Animal>, GatewayError>;
    async fn animal_with_keeper(&self, id: i64) -> Result<AnimalWithKeeper, GatewayError>;
    async fn animals_with_keepers(&self) -> Result<Vec<AnimalWithKeeper>, GatewayError>;
    async fn assign_keeper(&self, animal_id: i64, keeper_id: i64) -> Result<(), GatewayError>;

    // Habitats
    async fn list_habitats(&self, filter: TriFilter) -> Result<Vec<Habitat>, GatewayError>;
    async fn get_habitat(&self, id: i64) -> Result<Habitat, GatewayError>;
    async fn create_habitat(&self, habitat: &Habitat) -> Result<Habitat, GatewayError>;
    async fn update_habitat(&self, habitat: &Habitat) -> Result<Habitat, GatewayError>;
    async fn delete_habitat(&self, id: i64) -> Result<(), GatewayError>;
    async fn habitat_with_animals(&self, id: i64) -> Result<Habitat, GatewayError>;
    async fn habitats_with_animals(&self) -> Result<Vec<Habitat>, GatewayError>;

    // Keepers
    async fn list_keepers(&self, filter: TriFilter) -> Result<Vec<Keeper>, GatewayError>;
    async fn get_keeper(&self, id: i64) -> Result<Keeper, GatewayError>;
    async fn create_keeper(&self, keeper: &Keeper) -> Result<Keeper, GatewayError>;
    async fn update_keeper(&self, keeper: &Keeper) -> Result<Keeper, GatewayError>;
    async fn delete_keeper(&self, id: i64) -> Result<(), GatewayError>;
    async fn keepers_by_name(&self, name: &str) -> Result<Vec<Keeper>, GatewayError>;
    async fn keepers_by_specialization(
        &self,
        specialization: &str,
    ) -> Result<Vec<Keeper>, GatewayError>;
    async fn keepers_by_experience(&self, min_years: u32) -> Result<Vec<Keeper>, GatewayError>;
}
