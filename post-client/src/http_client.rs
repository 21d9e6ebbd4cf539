use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::error::{PostClientError, PostClientResult};
use crate::models::{ImageFile, Post};

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PostDto {
    id: i64,
    title: String,
    text: String,
    #[serde(default)]
    image: Option<String>,
}

impl From<PostDto> for Post {
    fn from(value: PostDto) -> Self {
        Self {
            id: value.id,
            title: value.title,
            text: value.text,
            image: value.image,
        }
    }
}

#[derive(Debug, Clone)]
/// HTTP-клиент для работы с REST-ресурсом `/posts`.
pub(crate) struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    /// Создаёт новый HTTP-клиент с базовым URL сервера.
    pub(crate) fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()
            .expect("failed to build reqwest client");

        Self {
            base_url: base_url.into(),
            client,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn decode_error(response: reqwest::Response) -> PostClientError {
        let status = response.status();

        let message = match response.json::<ErrorResponseDto>().await {
            Ok(body) => body
                .error
                .unwrap_or_else(|| format!("http status {status}")),
            Err(_) => format!("http status {status}"),
        };
        PostClientError::from_http_status(status, Some(message))
    }

    /// универсальный helper для отправки multipart-форм с полями поста
    async fn send_post_form(
        &self,
        method: Method,
        path: &str,
        form: Form,
    ) -> PostClientResult<Post> {
        let url = self.endpoint(path);
        debug!(%url, "sending multipart post form");

        let response = self
            .client
            .request(method, url)
            .multipart(form)
            .send()
            .await
            .map_err(PostClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        let dto = response
            .json::<PostDto>()
            .await
            .map_err(PostClientError::from_reqwest)?;
        Ok(dto.into())
    }

    /// Возвращает все посты в порядке, выданном сервером.
    pub(crate) async fn list_posts(&self) -> PostClientResult<Vec<Post>> {
        let url = self.endpoint("/posts");
        debug!(%url, "fetching posts");

        let response = self
            .client
            .request(Method::GET, url)
            .send()
            .await
            .map_err(PostClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        let dtos = response
            .json::<Vec<PostDto>>()
            .await
            .map_err(PostClientError::from_reqwest)?;
        Ok(dtos.into_iter().map(Post::from).collect())
    }

    /// Создаёт пост. Изображение обязательно — это проверяет фасад до вызова.
    pub(crate) async fn create_post(
        &self,
        title: &str,
        text: &str,
        image: Option<&ImageFile>,
    ) -> PostClientResult<Post> {
        let form = build_post_form(title, text, image)?;
        self.send_post_form(Method::POST, "/posts", form).await
    }

    /// Обновляет пост по идентификатору.
    ///
    /// Если `image` равен `None`, поле не отправляется и сервер сохраняет
    /// прежнее изображение.
    pub(crate) async fn update_post(
        &self,
        id: i64,
        title: &str,
        text: &str,
        image: Option<&ImageFile>,
    ) -> PostClientResult<Post> {
        let form = build_post_form(title, text, image)?;
        self.send_post_form(Method::PUT, &format!("/posts/{id}"), form)
            .await
    }

    /// Удаляет пост и возвращает его идентификатор для локального удаления.
    pub(crate) async fn delete_post(&self, id: i64) -> PostClientResult<i64> {
        let url = self.endpoint(&format!("/posts/{id}"));
        debug!(%url, "deleting post");

        let response = self
            .client
            .request(Method::DELETE, url)
            .send()
            .await
            .map_err(PostClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        Ok(id)
    }
}

fn build_post_form(title: &str, text: &str, image: Option<&ImageFile>) -> PostClientResult<Form> {
    let mut form = Form::new()
        .text("title", title.to_string())
        .text("text", text.to_string());

    if let Some(image) = image {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime)
            .map_err(PostClientError::from_reqwest)?;
        form = form.part("image", part);
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_normalizes_slashes() {
        let client = HttpClient::new("http://localhost:5000/");
        let full = client.endpoint("/posts");
        assert_eq!(full, "http://localhost:5000/posts");
    }

    #[test]
    fn post_dto_maps_nullable_image() {
        let dto: PostDto =
            serde_json::from_str(r#"{"id":1,"title":"t","text":"x","image":null}"#)
                .expect("dto should parse");
        let post = Post::from(dto);
        assert_eq!(post.id, 1);
        assert!(post.image.is_none());
    }

    #[test]
    fn build_post_form_accepts_missing_image() {
        let form = build_post_form("t", "x", None);
        assert!(form.is_ok());
    }

    #[test]
    fn build_post_form_rejects_invalid_mime() {
        let image = ImageFile {
            file_name: "a.png".to_string(),
            mime: "not a mime".to_string(),
            bytes: vec![1, 2, 3],
        };
        let form = build_post_form("t", "x", Some(&image));
        assert!(form.is_err());
    }
}
