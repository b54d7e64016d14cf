//! `reqwest` implementation of the gateway.
//!
//! Maps the backend's REST surface one call per method. Status handling:
//!
//! | Status      | Result                                   |
//! |-------------|------------------------------------------|
//! | 2xx         | `Ok` (JSON body decoded when expected)   |
//! | 404         | `GatewayError::NotFound`                 |
//! | 409         | `GatewayError::Conflict` + body `message`|
//! | other       | `GatewayError::Status`                   |

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::core::entity::{Animal, AnimalWithKeeper, AssignKeeperRequest, Habitat, Keeper};
use crate::gateway::client::{EntityGateway, GatewayError};
use crate::gateway::request::TriFilter;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Error body shape used by the backend for 409 responses.
#[derive(Deserialize, Debug)]
struct ErrorBody {
    message: Option<String>,
}

pub struct HttpGateway {
    base_url: String,
    client: Client,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Self {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().unwrap_or_else(|e| {
            warn!("Failed to build HTTP client with timeout ({e}), using defaults");
            Client::new()
        });
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);
        self.client.request(method, url)
    }

    /// Turn a non-success status into the matching error.
    async fn check(response: Response) -> Result<Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        debug!("HTTP {} body: {}", status, body);
        Err(match status {
            StatusCode::NOT_FOUND => GatewayError::NotFound,
            StatusCode::CONFLICT => GatewayError::Conflict {
                message: serde_json::from_str::<ErrorBody>(&body)
                    .ok()
                    .and_then(|b| b.message)
                    .filter(|m| !m.trim().is_empty()),
            },
            _ => GatewayError::Status {
                status: status.as_u16(),
                message: body,
            },
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, GatewayError> {
        let response = Self::check(builder.send().await?).await?;
        Ok(response.json().await?)
    }

    async fn fetch_empty(&self, builder: RequestBuilder) -> Result<(), GatewayError> {
        Self::check(builder.send().await?).await.map(|_| ())
    }
}

#[async_trait]
impl EntityGateway for HttpGateway {
    fn name(&self) -> &str {
        "http"
    }

    async fn health(&self) -> Result<(), GatewayError> {
        self.fetch_empty(self.request(Method::GET, "/health")).await
    }

    // ========================================================================
    // Animals
    // ========================================================================

    async fn list_animals(&self, filter: TriFilter) -> Result<Vec<Animal>, GatewayError> {
        let req = self
            .request(Method::GET, "/animals")
            .query(&[("is_wild", filter.wild_param())]);
        self.fetch(req).await
    }

    async fn get_animal(&self, id: i64) -> Result<Animal, GatewayError> {
        self.fetch(self.request(Method::GET, &format!("/animals/{id}")))
            .await
    }

    async fn create_animal(&self, animal: &Animal) -> Result<Animal, GatewayError> {
        self.fetch(self.request(Method::POST, "/animals").json(animal))
            .await
    }

    async fn update_animal(&self, animal: &Animal) -> Result<Animal, GatewayError> {
        let path = format!("/animals/{}", animal.id);
        self.fetch(self.request(Method::PUT, &path).json(animal)).await
    }

    async fn delete_animal(&self, id: i64) -> Result<(), GatewayError> {
        self.fetch_empty(self.request(Method::DELETE, &format!("/animals/{id}")))
            .await
    }

    async fn animals_by_weight(&self, min_weight: f64) -> Result<Vec<Animal>, GatewayError> {
        let req = self
            .request(Method::GET, "/animals/search/by-weight")
            .query(&[("min_weight", min_weight)]);
        self.fetch(req).await
    }

    async fn animals_by_name(&self, name: &str) -> Result<Vec<Animal>, GatewayError> {
        let req = self
            .request(Method::GET, "/animals/search/by-name")
            .query(&[("name", name)]);
        self.fetch(req).await
    }

    async fn animal_with_keeper(&self, id: i64) -> Result<AnimalWithKeeper, GatewayError> {
        self.fetch(self.request(Method::GET, &format!("/animals/{id}/with-keeper")))
            .await
    }

    async fn animals_with_keepers(&self) -> Result<Vec<AnimalWithKeeper>, GatewayError> {
        self.fetch(self.request(Method::GET, "/animals/with-keepers"))
            .await
    }

    async fn assign_keeper(&self, animal_id: i64, keeper_id: i64) -> Result<(), GatewayError> {
        let req = self
            .request(Method::PUT, &format!("/animals/{animal_id}/assign-keeper"))
            .json(&AssignKeeperRequest { keeper_id });
        self.fetch_empty(req).await
    }

    // ========================================================================
    // Habitats
    // ========================================================================

    async fn list_habitats(&self, filter: TriFilter) -> Result<Vec<Habitat>, GatewayError> {
        let mut req = self.request(Method::GET, "/habitats");
        if let Some(covered) = filter.bool_param() {
            req = req.query(&[("is_covered", covered)]);
        }
        self.fetch(req).await
    }

    async fn get_habitat(&self, id: i64) -> Result<Habitat, GatewayError> {
        self.fetch(self.request(Method::GET, &format!("/habitats/{id}")))
            .await
    }

    async fn create_habitat(&self, habitat: &Habitat) -> Result<Habitat, GatewayError> {
        self.fetch(self.request(Method::POST, "/habitats").json(habitat))
            .await
    }

    async fn update_habitat(&self, habitat: &Habitat) -> Result<Habitat, GatewayError> {
        let path = format!("/habitats/{}", habitat.id);
        self.fetch(self.request(Method::PUT, &path).json(habitat)).await
    }

    async fn delete_habitat(&self, id: i64) -> Result<(), GatewayError> {
        self.fetch_empty(self.request(Method::DELETE, &format!("/habitats/{id}")))
            .await
    }

    async fn habitat_with_animals(&self, id: i64) -> Result<Habitat, GatewayError> {
        self.fetch(self.request(Method::GET, &format!("/habitats/{id}/with-animals")))
            .await
    }

    async fn habitats_with_animals(&self) -> Result<Vec<Habitat>, GatewayError> {
        self.fetch(self.request(Method::GET, "/habitats/with-animals"))
            .await
    }

    // ========================================================================
    // Keepers
    // ========================================================================

    async fn list_keepers(&self, filter: TriFilter) -> Result<Vec<Keeper>, GatewayError> {
        let mut req = self.request(Method::GET, "/keepers");
        if let Some(active) = filter.bool_param() {
            req = req.query(&[("is_active", active)]);
        }
        self.fetch(req).await
    }

    async fn get_keeper(&self, id: i64) -> Result<Keeper, GatewayError> {
        self.fetch(self.request(Method::GET, &format!("/keepers/{id}")))
            .await
    }

    async fn create_keeper(&self, keeper: &Keeper) -> Result<Keeper, GatewayError> {
        self.fetch(self.request(Method::POST, "/keepers").json(keeper))
            .await
    }

    async fn update_keeper(&self, keeper: &Keeper) -> Result<Keeper, GatewayError> {
        let path = format!("/keepers/{}", keeper.id);
        self.fetch(self.request(Method::PUT, &path).json(keeper)).await
    }

    async fn delete_keeper(&self, id: i64) -> Result<(), GatewayError> {
        self.fetch_empty(self.request(Method::DELETE, &format!("/keepers/{id}")))
            .await
    }

    async fn keepers_by_name(&self, name: &str) -> Result<Vec<Keeper>, GatewayError> {
        let req = self
            .request(Method::GET, "/keepers/search/by-name")
            .query(&[("name", name)]);
        self.fetch(req).await
    }

    async fn keepers_by_specialization(
        &self,
        specialization: &str,
    ) -> Result<Vec<Keeper>, GatewayError> {
        let req = self
            .request(Method::GET, "/keepers/search/by-specialization")
            .query(&[("specialization", specialization)]);
        self.fetch(req).await
    }

    async fn keepers_by_experience(&self, min_years: u32) -> Result<Vec<Keeper>, GatewayError> {
        let req = self
            .request(Method::GET, "/keepers/search/by-experience")
            .query(&[("min_years", min_years)]);
        self.fetch(req).await
    }
}
