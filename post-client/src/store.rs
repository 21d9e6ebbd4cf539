use crate::models::Post;

#[derive(Debug, Default, Clone)]
/// Локальное зеркало серверной коллекции постов.
///
/// Хранилище создаётся пустым при старте приложения и изменяется только в
/// ответ на результаты запросов: список заменяется целиком, мутации
/// (создание/обновление/удаление) применяются точечно по `id`. Порядок
/// постов — порядок ответа сервера, без клиентской сортировки.
pub struct PostStore {
    posts: Vec<Post>,
    loading: bool,
    error: Option<String>,
}

impl PostStore {
    /// Создаёт пустое хранилище.
    pub fn new() -> Self {
        Self::default()
    }

    /// Текущий список постов.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// `true`, пока выполняется запрос списка.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Сообщение последней неудачной загрузки списка.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Начало загрузки списка: выставляет флаг и сбрасывает прошлую ошибку.
    pub fn list_started(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Успешная загрузка: коллекция заменяется ответом сервера.
    pub fn list_loaded(&mut self, posts: Vec<Post>) {
        self.posts = posts;
        self.loading = false;
    }

    /// Неудачная загрузка: ошибка сохраняется, список не трогаем.
    pub fn list_failed(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.loading = false;
    }

    /// Применяет успешно созданный пост: добавляет его в конец списка.
    pub fn apply_created(&mut self, post: Post) {
        self.posts.push(post);
    }

    /// Применяет успешно обновлённый пост: заменяет запись с тем же `id`.
    ///
    /// Если записи с таким `id` нет (например, пост удалили из другого
    /// места), обновление молча игнорируется.
    pub fn apply_updated(&mut self, post: Post) {
        if let Some(existing) = self.posts.iter_mut().find(|p| p.id == post.id) {
            *existing = post;
        }
    }

    /// Применяет успешное удаление: убирает запись по `id`.
    /// Отсутствующий `id` — no-op.
    pub fn apply_deleted(&mut self, id: i64) {
        self.posts.retain(|p| p.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post(id: i64, title: &str) -> Post {
        Post {
            id,
            title: title.to_string(),
            text: format!("text of {title}"),
            image: None,
        }
    }

    #[test]
    fn new_store_is_empty_and_idle() {
        let store = PostStore::new();
        assert!(store.posts().is_empty());
        assert!(!store.loading());
        assert!(store.error().is_none());
    }

    #[test]
    fn list_started_sets_loading_and_clears_error() {
        let mut store = PostStore::new();
        store.list_failed("boom");
        store.list_started();
        assert!(store.loading());
        assert!(store.error().is_none());
    }

    #[test]
    fn list_loaded_replaces_posts_and_stops_loading() {
        let mut store = PostStore::new();
        store.apply_created(sample_post(1, "old"));
        store.list_started();
        store.list_loaded(vec![sample_post(2, "a"), sample_post(3, "b")]);
        assert!(!store.loading());
        let ids: Vec<i64> = store.posts().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn list_failed_keeps_posts_and_records_error() {
        let mut store = PostStore::new();
        store.list_loaded(vec![sample_post(1, "a")]);
        store.list_started();
        store.list_failed("network down");
        assert!(!store.loading());
        assert_eq!(store.error(), Some("network down"));
        assert_eq!(store.posts().len(), 1);
    }

    #[test]
    fn apply_created_appends_once() {
        let mut store = PostStore::new();
        store.list_loaded(vec![sample_post(1, "a")]);
        store.apply_created(sample_post(2, "b"));
        let ids: Vec<i64> = store.posts().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn apply_updated_replaces_matching_record() {
        let mut store = PostStore::new();
        store.list_loaded(vec![sample_post(1, "a"), sample_post(2, "b")]);
        store.apply_updated(sample_post(2, "updated"));
        assert_eq!(store.posts()[1].title, "updated");
        assert_eq!(store.posts()[0].title, "a");
    }

    // Текущее поведение: обновление несуществующего id молча игнорируется.
    #[test]
    fn apply_updated_ignores_unknown_id() {
        let mut store = PostStore::new();
        store.list_loaded(vec![sample_post(1, "a")]);
        store.apply_updated(sample_post(999, "ghost"));
        assert_eq!(store.posts().len(), 1);
        assert_eq!(store.posts()[0].title, "a");
    }

    #[test]
    fn apply_deleted_removes_matching_record() {
        let mut store = PostStore::new();
        store.list_loaded(vec![sample_post(1, "a"), sample_post(2, "b")]);
        store.apply_deleted(1);
        let ids: Vec<i64> = store.posts().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn apply_deleted_is_noop_for_unknown_id() {
        let mut store = PostStore::new();
        store.list_loaded(vec![sample_post(1, "a")]);
        store.apply_deleted(42);
        assert_eq!(store.posts().len(), 1);
    }
}
