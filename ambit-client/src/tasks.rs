//! Task-related API endpoints

use ambit_core::domain::subject::Subject;
use ambit_core::domain::task::Task;
use reqwest::Method;

use crate::AmbitHttpClient;
use crate::error::Result;

impl AmbitHttpClient {
    /// Get the current status of a task
    ///
    /// # Arguments
    /// * `task_id` - The task ID
    /// * `subject` - Subject the call is made for
    ///
    /// # Returns
    /// A snapshot of the task
    pub async fn get_task(&self, task_id: &str, subject: &Subject) -> Result<Task> {
        let path = format!("task/{}", task_id);
        let response = self.request(Method::GET, &path, subject).send().await?;

        self.handle_task_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use ambit_core::domain::task::TaskStatus;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_completed_task() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/task/t-9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "task": [{
                    "id": "t-9",
                    "uri": format!("{}/task/t-9", server.uri()),
                    "status": "Completed",
                    "result": "http://host/dataset/12"
                }]
            })))
            .mount(&server)
            .await;

        let client = AmbitHttpClient::new(server.uri());
        let task = client.get_task("t-9", &Subject::new("bob")).await.unwrap();

        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.result.as_deref(), Some("http://host/dataset/12"));
    }

    #[tokio::test]
    async fn test_empty_task_envelope_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/task/t-0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "task": [] })))
            .mount(&server)
            .await;

        let client = AmbitHttpClient::new(server.uri());
        let err = client.get_task("t-0", &Subject::new("bob")).await.unwrap_err();

        assert!(matches!(err, ClientError::ParseError(_)));
    }
}
