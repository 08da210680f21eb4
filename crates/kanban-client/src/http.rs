use crate::credentials::{CredentialSource, StaticToken};
use crate::gateway::BoardGateway;
use async_trait::async_trait;
use kanban_core::{ClientConfig, KanbanError, KanbanResult};
use kanban_domain::{BoardSummary, Column, RemoteId, Task, TaskPatch};
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
struct CreateBoardRequest<'a> {
    name: &'a str,
    description: &'a str,
}

#[derive(Serialize)]
struct CreateColumnRequest<'a> {
    title: &'a str,
}

#[derive(Serialize)]
struct CreateTaskRequest<'a> {
    title: &'a str,
    description: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MoveRequest {
    target_column_id: RemoteId,
    new_position: usize,
}

/// `BoardGateway` over the service's JSON/HTTP API.
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
    credentials: Arc<dyn CredentialSource>,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>, credentials: Arc<dyn CredentialSource>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
            credentials,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(
            config.effective_api_url(),
            Arc::new(StaticToken::new(config.token.clone())),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn execute<B: Serialize + ?Sized + Sync>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> KanbanResult<Response> {
        let token = self
            .credentials
            .bearer_token()
            .ok_or(KanbanError::Unauthorized)?;

        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("{} {}", method, url);

        let mut request = self.client.request(method.clone(), &url).bearer_auth(token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!("{} {} failed: {}", method, url, e);
            KanbanError::Network(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        tracing::warn!("{} {} returned {}: {}", method, url, status, message);
        Err(KanbanError::from_status(status.as_u16(), message))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> KanbanResult<T> {
        let response = self.execute::<()>(Method::GET, path, None).await?;
        decode(response).await
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> KanbanResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let response = self.execute(method, path, Some(body)).await?;
        decode(response).await
    }

    async fn send_empty<B: Serialize + ?Sized + Sync>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> KanbanResult<()> {
        self.execute(method, path, body).await?;
        Ok(())
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> KanbanResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| KanbanError::Serialization(format!("Failed to decode response: {}", e)))
}

#[async_trait]
impl BoardGateway for HttpGateway {
    async fn list_boards(&self) -> KanbanResult<Vec<BoardSummary>> {
        self.get_json("/boards").await
    }

    async fn create_board(&self, name: &str) -> KanbanResult<BoardSummary> {
        let body = CreateBoardRequest {
            name,
            description: "",
        };
        self.send_json(Method::POST, "/boards", &body).await
    }

    async fn delete_board(&self, board_id: RemoteId) -> KanbanResult<()> {
        let path = format!("/boards/{}", board_id);
        self.send_empty::<()>(Method::DELETE, &path, None).await
    }

    async fn get_columns(&self, board_id: RemoteId) -> KanbanResult<Vec<Column>> {
        self.get_json(&format!("/boards/{}/columns", board_id)).await
    }

    async fn create_column(&self, board_id: RemoteId, title: &str) -> KanbanResult<Column> {
        let path = format!("/boards/{}/columns", board_id);
        self.send_json(Method::POST, &path, &CreateColumnRequest { title })
            .await
    }

    async fn delete_column(&self, board_id: RemoteId, column_id: RemoteId) -> KanbanResult<()> {
        let path = format!("/boards/{}/columns/{}", board_id, column_id);
        self.send_empty::<()>(Method::DELETE, &path, None).await
    }

    async fn move_column(
        &self,
        board_id: RemoteId,
        column_id: RemoteId,
        new_position: usize,
    ) -> KanbanResult<()> {
        let path = format!("/boards/{}/columns/{}/move", board_id, column_id);
        let body = MoveRequest {
            target_column_id: column_id,
            new_position,
        };
        self.send_empty(Method::PUT, &path, Some(&body)).await
    }

    async fn get_tasks(&self, column_id: RemoteId) -> KanbanResult<Vec<Task>> {
        self.get_json(&format!("/columns/{}/tasks", column_id)).await
    }

    async fn create_task(
        &self,
        column_id: RemoteId,
        title: &str,
        description: &str,
    ) -> KanbanResult<Task> {
        let path = format!("/columns/{}/tasks", column_id);
        self.send_json(Method::POST, &path, &CreateTaskRequest { title, description })
            .await
    }

    async fn delete_task(&self, column_id: RemoteId, task_id: RemoteId) -> KanbanResult<()> {
        let path = format!("/columns/{}/tasks/{}", column_id, task_id);
        self.send_empty::<()>(Method::DELETE, &path, None).await
    }

    async fn move_task(
        &self,
        source_column_id: RemoteId,
        task_id: RemoteId,
        target_column_id: RemoteId,
        new_position: usize,
    ) -> KanbanResult<()> {
        let path = format!("/columns/{}/tasks/{}/move", source_column_id, task_id);
        let body = MoveRequest {
            target_column_id,
            new_position,
        };
        self.send_empty(Method::PUT, &path, Some(&body)).await
    }

    async fn update_task(&self, task_id: RemoteId, patch: &TaskPatch) -> KanbanResult<()> {
        let path = format!("/tasks/{}", task_id);
        self.send_empty(Method::PUT, &path, Some(patch)).await
    }
}
