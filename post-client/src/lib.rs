//! Клиентская библиотека для работы с сервисом постов по HTTP.
//!
//! Состоит из двух частей:
//! - слой запросов (`reqwest`): четыре операции над ресурсом `/posts`;
//! - хранилище состояния ([`PostStore`]): локальное зеркало серверной
//!   коллекции плюс флаг загрузки и последняя ошибка списка.
//!
//! [`PostClient`] связывает их: валидирует черновик, выполняет запрос и
//! применяет результат к хранилищу. Ошибки мутаций в хранилище не попадают —
//! они возвращаются вызывающему, который обязан их показать.
#![warn(missing_docs)]

mod error;
mod http_client;
mod models;
mod store;

pub use error::{PostClientError, PostClientResult};
pub use models::{ImageFile, Post, PostDraft};
pub use store::PostStore;

use http_client::HttpClient;

#[derive(Debug, Clone)]
/// Клиент сервиса постов: слой запросов плюс синхронизируемое хранилище.
pub struct PostClient {
    http_client: HttpClient,
    store: PostStore,
}

impl PostClient {
    /// Создаёт клиент с базовым URL сервера и пустым хранилищем.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(base_url),
            store: PostStore::new(),
        }
    }

    /// Доступ на чтение к хранилищу: `{posts, loading, error}`.
    pub fn store(&self) -> &PostStore {
        &self.store
    }

    /// Загружает список постов и заменяет им содержимое хранилища.
    ///
    /// При ошибке хранилище запоминает сообщение, список остаётся прежним,
    /// а ошибка возвращается вызывающему.
    pub async fn refresh_posts(&mut self) -> PostClientResult<&[Post]> {
        self.store.list_started();
        match self.http_client.list_posts().await {
            Ok(posts) => {
                self.store.list_loaded(posts);
                Ok(self.store.posts())
            }
            Err(err) => {
                self.store.list_failed(err.to_string());
                Err(err)
            }
        }
    }

    /// Создаёт пост из черновика и добавляет ответ сервера в хранилище.
    ///
    /// Черновик валидируется до отправки: заголовок, текст и изображение
    /// обязательны. При любой ошибке хранилище не меняется.
    pub async fn create_post(&mut self, draft: &PostDraft) -> PostClientResult<Post> {
        validate_draft(draft, true)?;

        let created = self
            .http_client
            .create_post(&draft.title, &draft.text, draft.image.as_ref())
            .await?;
        self.store.apply_created(created.clone());
        Ok(created)
    }

    /// Обновляет пост по идентификатору и заменяет запись в хранилище.
    ///
    /// Изображение в черновике опционально: без него сервер сохраняет
    /// прежнее. При любой ошибке хранилище не меняется.
    pub async fn update_post(&mut self, id: i64, draft: &PostDraft) -> PostClientResult<Post> {
        validate_draft(draft, false)?;

        let updated = self
            .http_client
            .update_post(id, &draft.title, &draft.text, draft.image.as_ref())
            .await?;
        self.store.apply_updated(updated.clone());
        Ok(updated)
    }

    /// Удаляет пост по идентификатору и убирает запись из хранилища.
    pub async fn delete_post(&mut self, id: i64) -> PostClientResult<i64> {
        let deleted_id = self.http_client.delete_post(id).await?;
        self.store.apply_deleted(deleted_id);
        Ok(deleted_id)
    }
}

fn validate_draft(draft: &PostDraft, require_image: bool) -> PostClientResult<()> {
    if draft.title.trim().is_empty() {
        return Err(PostClientError::Validation("Title is required".to_string()));
    }
    if draft.text.trim().is_empty() {
        return Err(PostClientError::Validation("Text is required".to_string()));
    }
    if require_image && draft.image.is_none() {
        return Err(PostClientError::Validation(
            "Image is required when creating a new post".to_string(),
        ));
    }
    Ok(())
}
