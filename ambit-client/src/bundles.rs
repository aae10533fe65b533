//! Bundle-related API endpoints

use ambit_core::domain::bundle::{BundleProperties, BundleSubstances};
use ambit_core::domain::subject::Subject;
use ambit_core::domain::task::Task;
use ambit_core::dto::bundle::{AttachProperty, AttachSubstance, BundleCommand, CreateBundle};
use reqwest::Method;

use crate::AmbitHttpClient;
use crate::error::Result;

impl AmbitHttpClient {
    // =============================================================================
    // Bundle Editing
    // =============================================================================

    /// Create a new, empty bundle
    ///
    /// # Arguments
    /// * `description` - Free-text description of the bundle
    /// * `username` - Acting username
    /// * `substance_owner_id` - Owner whose substances the bundle collects
    /// * `subject` - Subject the call is made for
    ///
    /// # Returns
    /// The creation task; its result is the bundle URI
    pub async fn create_bundle(
        &self,
        description: &str,
        username: &str,
        substance_owner_id: &str,
        subject: &Subject,
    ) -> Result<Task> {
        let form = CreateBundle {
            description: description.to_string(),
            username: username.to_string(),
            substance_owner_id: substance_owner_id.to_string(),
        };

        let response = self
            .request(Method::POST, "bundle", subject)
            .form(&form)
            .send()
            .await?;

        self.handle_task_response(response).await
    }

    /// Add a substance to a bundle
    pub async fn attach_substance(
        &self,
        bundle_id: &str,
        substance_id: &str,
        subject: &Subject,
    ) -> Result<Task> {
        let form = AttachSubstance {
            substance_uri: substance_id.to_string(),
            command: BundleCommand::Add,
        };

        let path = format!("bundle/{}/substance", bundle_id);
        let response = self
            .request(Method::PUT, &path, subject)
            .form(&form)
            .send()
            .await?;

        self.handle_task_response(response).await
    }

    /// Add a property category to a bundle
    pub async fn attach_property(
        &self,
        bundle_id: &str,
        top_category: &str,
        sub_category: &str,
        subject: &Subject,
    ) -> Result<Task> {
        let form = AttachProperty {
            top_category: top_category.to_string(),
            sub_category: sub_category.to_string(),
            command: BundleCommand::Add,
        };

        let path = format!("bundle/{}/property", bundle_id);
        let response = self
            .request(Method::PUT, &path, subject)
            .form(&form)
            .send()
            .await?;

        self.handle_task_response(response).await
    }

    // =============================================================================
    // Bundle Query
    // =============================================================================

    /// List the substances of a bundle
    pub async fn get_bundle_substances(
        &self,
        bundle_id: &str,
        subject: &Subject,
    ) -> Result<BundleSubstances> {
        let path = format!("bundle/{}/substance", bundle_id);
        let response = self.request(Method::GET, &path, subject).send().await?;

        self.handle_response(response).await
    }

    /// List the property categories of a bundle
    pub async fn get_bundle_properties(
        &self,
        bundle_id: &str,
        subject: &Subject,
    ) -> Result<BundleProperties> {
        let path = format!("bundle/{}/property", bundle_id);
        let response = self.request(Method::GET, &path, subject).send().await?;

        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_create_bundle_form() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bundle"))
            .and(body_string_contains("source=jdoe"))
            .and(body_string_contains("substanceOwner=ACME"))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({
                "task": [{"id": "b-1", "status": "Queued"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = AmbitHttpClient::new(server.uri());
        let task = client
            .create_bundle("nano set", "jdoe", "ACME", &Subject::new("s"))
            .await
            .unwrap();

        assert_eq!(task.id, "b-1");
    }

    #[tokio::test]
    async fn test_attach_property_uses_put() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/bundle/42/property"))
            .and(body_string_contains("topcategory=TOX"))
            .and(body_string_contains("command=add"))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({
                "task": [{"id": "p-1", "status": "Completed", "result": "ok"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = AmbitHttpClient::new(server.uri());
        let task = client
            .attach_property("42", "TOX", "TO_ACUTE_ORAL_SECTION", &Subject::new("s"))
            .await
            .unwrap();

        assert!(task.is_terminal());
    }

    #[tokio::test]
    async fn test_attach_substance_form() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/bundle/42/substance"))
            .and(header("subjectid", "s"))
            .and(body_string_contains("substance_uri=S-7"))
            .and(body_string_contains("command=add"))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({
                "task": [{"id": "s-1", "status": "Running"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = AmbitHttpClient::new(server.uri());
        let task = client
            .attach_substance("42", "S-7", &Subject::new("s"))
            .await
            .unwrap();

        assert_eq!(task.id, "s-1");
        assert!(!task.is_terminal());
    }

    #[tokio::test]
    async fn test_get_bundle_substances() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bundle/42/substance"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "substance": [
                    {"URI": "http://host/substance/S-1", "name": "formaldehyde"},
                    {"i5uuid": "S-2"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = AmbitHttpClient::new(server.uri());
        let listing = client
            .get_bundle_substances("42", &Subject::new("s"))
            .await
            .unwrap();

        assert_eq!(listing.substance.len(), 2);
        assert_eq!(listing.substance[0].name.as_deref(), Some("formaldehyde"));
        assert_eq!(listing.substance[1].substance_id(), Some("S-2"));
    }

    #[tokio::test]
    async fn test_get_bundle_properties() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bundle/42/property"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "feature": {
                    "http://host/property/TOX/TO_ACUTE_ORAL_SECTION": {"title": "LD50"}
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = AmbitHttpClient::new(server.uri());
        let properties = client
            .get_bundle_properties("42", &Subject::new("s"))
            .await
            .unwrap();

        assert_eq!(properties.feature.len(), 1);
    }
}
