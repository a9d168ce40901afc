use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use castdex_core::{CatalogClient, FetchError};
use castdex_model::{CatalogFilter, CatalogPage, PageNumber};

use crate::config::ClientConfig;
use crate::wire::PageEnvelope;

/// Catalog access over HTTP.
///
/// Only the remote-expressible predicates travel as query parameters; the
/// created-date bounds are client-side and stay out of the request.
pub struct HttpCatalogClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpCatalogClient {
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(FetchError::transport)?;

        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn fetch_page(
        &self,
        filter: &CatalogFilter,
        page: PageNumber,
    ) -> Result<CatalogPage, FetchError> {
        let query = query_params(filter, page);
        debug!(page, "fetching catalog page");

        let response = self
            .http
            .get(format!("{}/character", self.endpoint))
            .query(&query)
            .send()
            .await
            .map_err(FetchError::transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(FetchError::transport)?;
        let envelope: PageEnvelope = serde_json::from_str(&body).map_err(|e| {
            FetchError::InvalidResponse(format!("failed to parse catalog page: {e}"))
        })?;

        Ok(envelope.into_page())
    }
}

fn query_params(filter: &CatalogFilter, page: PageNumber) -> Vec<(&'static str, String)> {
    let mut params = vec![("page", page.to_string())];

    if let Some(name) = &filter.name {
        params.push(("name", name.clone()));
    }
    if let Some(status) = filter.status {
        params.push(("status", status.as_token().to_string()));
    }
    if let Some(species) = &filter.species {
        params.push(("species", species.clone()));
    }
    if let Some(gender) = filter.gender {
        params.push(("gender", gender.as_token().to_string()));
    }

    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use castdex_model::{CharacterGender, CharacterStatus};
    use time::macros::date;

    #[test]
    fn empty_filter_sends_only_the_page() {
        let params = query_params(&CatalogFilter::empty(), 1);
        assert_eq!(params, vec![("page", "1".to_string())]);
    }

    #[test]
    fn non_empty_predicates_become_query_parameters() {
        let filter = CatalogFilter::empty()
            .with_name("rick")
            .with_status(CharacterStatus::Alive)
            .with_species("Human")
            .with_gender(CharacterGender::Male);

        let params = query_params(&filter, 3);

        assert_eq!(
            params,
            vec![
                ("page", "3".to_string()),
                ("name", "rick".to_string()),
                ("status", "alive".to_string()),
                ("species", "Human".to_string()),
                ("gender", "male".to_string()),
            ]
        );
    }

    #[test]
    fn created_bounds_never_reach_the_wire() {
        let filter = CatalogFilter::empty()
            .with_created_range(Some(date!(2017 - 11 - 01)), Some(date!(2017 - 11 - 04)));

        let params = query_params(&filter, 1);
        assert_eq!(params, vec![("page", "1".to_string())]);
    }

    #[test]
    fn endpoint_trailing_slash_is_normalized() {
        let client = HttpCatalogClient::new(ClientConfig {
            endpoint: "https://catalog.example/api/".to_string(),
            timeout_ms: 1_000,
        })
        .unwrap();

        assert_eq!(client.endpoint, "https://catalog.example/api");
    }
}
