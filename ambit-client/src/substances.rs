//! Substance-related API endpoints

use ambit_core::domain::study::Studies;
use ambit_core::domain::subject::Subject;
use ambit_core::dto::bundle::OwnerSubstances;
use reqwest::Method;

use crate::AmbitHttpClient;
use crate::error::Result;

impl AmbitHttpClient {
    /// List the identifiers of every substance owned by a substance owner
    pub async fn get_owner_substances(
        &self,
        owner_id: &str,
        subject: &Subject,
    ) -> Result<Vec<String>> {
        let path = format!("substanceowner/{}/substance", owner_id);
        let response = self.request(Method::GET, &path, subject).send().await?;

        let listing: OwnerSubstances = self.handle_response(response).await?;
        Ok(listing.substance_ids())
    }

    /// Get the studies recorded for a substance
    pub async fn get_substance_studies(
        &self,
        substance_id: &str,
        subject: &Subject,
    ) -> Result<Studies> {
        let path = format!("substance/{}/study", substance_id);
        let response = self.request(Method::GET, &path, subject).send().await?;

        self.handle_response(response).await
    }
}
