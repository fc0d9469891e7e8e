use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;

use crate::error::{ForumClientError, ForumClientResult};

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    error: Option<String>,
}

#[derive(Debug, Clone)]
/// Низкоуровневый HTTP-клиент поверх `reqwest`: URL, заголовки и разбор ошибок.
pub(crate) struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    pub(crate) fn new(base_url: impl Into<String>) -> ForumClientResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let request = self.client.request(method, self.endpoint(path));
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn decode_error(response: Response) -> ForumClientError {
        let status = response.status();

        let message = match response.json::<ErrorResponseDto>().await {
            Ok(body) => body.error,
            Err(_) => None,
        };
        ForumClientError::from_http_status(status, message)
    }

    async fn execute(request: RequestBuilder) -> ForumClientResult<Response> {
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }
        Ok(response)
    }

    pub(crate) async fn get_json<Q, T>(
        &self,
        path: &str,
        query: Option<&Q>,
        token: Option<&str>,
    ) -> ForumClientResult<T>
    where
        Q: Serialize,
        T: DeserializeOwned,
    {
        let mut request = self.request(Method::GET, path, token);
        if let Some(query) = query {
            request = request.query(query);
        }

        let response = Self::execute(request).await?;
        Ok(response.json::<T>().await?)
    }

    pub(crate) async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> ForumClientResult<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let request = self.request(method, path, token).json(body);

        let response = Self::execute(request).await?;
        Ok(response.json::<T>().await?)
    }

    /// Для эндпоинтов, которые отвечают текстом (регистрация, удаление).
    pub(crate) async fn send_for_text<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        token: Option<&str>,
    ) -> ForumClientResult<String>
    where
        B: Serialize,
    {
        let mut request = self.request(method, path, token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = Self::execute(request).await?;
        Ok(response.text().await?)
    }
}
