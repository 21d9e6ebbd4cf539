use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use web_sys::{File, FormData};

use crate::models::Post;

const API_BASE_URL: &str = match option_env!("POSTS_API_BASE_URL") {
    Some(value) => value,
    None => "http://127.0.0.1:5000",
};

#[derive(Debug, Clone)]
pub(crate) enum ApiError {
    Network(String),
    Http { status: u16, message: String },
    Decode(String),
}

impl core::fmt::Display for ApiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "network error: {msg}"),
            Self::Http { status, message } => write!(f, "http error {status}: {message}"),
            Self::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

fn endpoint(path: &str) -> String {
    format!(
        "{}/{}",
        API_BASE_URL.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

async fn parse_json<T: DeserializeOwned>(response: gloo_net::http::Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))
}

async fn parse_error_body(response: gloo_net::http::Response) -> ApiError {
    let status = response.status();
    let text = response
        .text()
        .await
        .unwrap_or_else(|_| "request failed".to_string());

    let fallback = match status {
        400 => "Некорректный запрос".to_string(),
        404 => "Пост не найден".to_string(),
        500..=599 => "Ошибка сервера".to_string(),
        _ => format!("HTTP ошибка {status}"),
    };

    let message = if text.trim().is_empty() { fallback } else { text };

    ApiError::Http { status, message }
}

fn post_form_data(title: &str, text: &str, image: Option<&File>) -> Result<FormData, ApiError> {
    let form = FormData::new()
        .map_err(|_| ApiError::Network("FormData недоступна в этом окружении".to_string()))?;

    form.append_with_str("title", title)
        .map_err(|_| ApiError::Network("не удалось добавить title в форму".to_string()))?;
    form.append_with_str("text", text)
        .map_err(|_| ApiError::Network("не удалось добавить text в форму".to_string()))?;

    if let Some(file) = image {
        form.append_with_blob_and_filename("image", file, &file.name())
            .map_err(|_| ApiError::Network("не удалось добавить изображение в форму".to_string()))?;
    }

    Ok(form)
}

pub(crate) async fn list_posts() -> Result<Vec<Post>, ApiError> {
    let response = Request::get(&endpoint("/posts"))
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;

    if !response.ok() {
        return Err(parse_error_body(response).await);
    }

    parse_json(response).await
}

pub(crate) async fn create_post(
    title: &str,
    text: &str,
    image: Option<&File>,
) -> Result<Post, ApiError> {
    let form = post_form_data(title, text, image)?;

    let response = Request::post(&endpoint("/posts"))
        .body(form)
        .map_err(|err| ApiError::Network(err.to_string()))?
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;

    if !response.ok() {
        return Err(parse_error_body(response).await);
    }

    parse_json(response).await
}

pub(crate) async fn update_post(
    id: i64,
    title: &str,
    text: &str,
    image: Option<&File>,
) -> Result<Post, ApiError> {
    let form = post_form_data(title, text, image)?;

    let response = Request::put(&endpoint(&format!("/posts/{id}")))
        .body(form)
        .map_err(|err| ApiError::Network(err.to_string()))?
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;

    if !response.ok() {
        return Err(parse_error_body(response).await);
    }

    parse_json(response).await
}

pub(crate) async fn delete_post(id: i64) -> Result<i64, ApiError> {
    let response = Request::delete(&endpoint(&format!("/posts/{id}")))
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;

    if !response.ok() {
        return Err(parse_error_body(response).await);
    }

    Ok(id)
}
