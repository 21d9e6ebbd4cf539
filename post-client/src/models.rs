use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Публичная модель поста.
pub struct Post {
    /// Идентификатор поста (назначается сервером, неизменяемый).
    pub id: i64,
    /// Заголовок поста.
    pub title: String,
    /// Текст поста.
    pub text: String,
    /// URL изображения, сохранённого на сервере (может отсутствовать).
    pub image: Option<String>,
}

#[derive(Debug, Clone)]
/// Локально выбранное изображение для загрузки через multipart.
pub struct ImageFile {
    /// Имя файла, например `photo.png`.
    pub file_name: String,
    /// MIME-тип, например `image/png`.
    pub mime: String,
    /// Содержимое файла.
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
/// Черновик поста — валидируемые поля формы создания/редактирования.
///
/// Изображение обязательно при создании и опционально при обновлении:
/// если при обновлении оно не задано, сервер сохраняет прежнее.
pub struct PostDraft {
    /// Заголовок (не может быть пустым).
    pub title: String,
    /// Текст (не может быть пустым).
    pub text: String,
    /// Новое изображение, если выбрано.
    pub image: Option<ImageFile>,
}

impl PostDraft {
    /// Создаёт черновик без изображения.
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            image: None,
        }
    }

    /// Добавляет изображение к черновику.
    pub fn with_image(mut self, image: ImageFile) -> Self {
        self.image = Some(image);
        self
    }
}
