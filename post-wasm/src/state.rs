use leptos::prelude::*;

use crate::models::Post;

#[derive(Debug, Clone)]
pub(crate) struct AppState {
    pub(crate) posts: RwSignal<Vec<Post>>,
    pub(crate) error: RwSignal<Option<String>>,
    pub(crate) loading: RwSignal<bool>,
}

impl AppState {
    pub(crate) fn new() -> Self {
        Self {
            posts: RwSignal::new(Vec::new()),
            error: RwSignal::new(None),
            loading: RwSignal::new(false),
        }
    }

    pub(crate) fn set_error(&self, message: impl Into<String>) {
        self.error.set(Some(message.into()));
    }

    pub(crate) fn clear_error(&self) {
        self.error.set(None);
    }
}

pub(crate) fn apply_created(posts: &mut Vec<Post>, post: Post) {
    posts.push(post);
}

// Обновление записи, которой уже нет в списке, молча игнорируется.
pub(crate) fn apply_updated(posts: &mut [Post], post: Post) {
    if let Some(existing) = posts.iter_mut().find(|p| p.id == post.id) {
        *existing = post;
    }
}

pub(crate) fn apply_deleted(posts: &mut Vec<Post>, id: i64) {
    posts.retain(|p| p.id != id);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post(id: i64, title: &str) -> Post {
        Post {
            id,
            title: title.to_string(),
            text: "text".to_string(),
            image: None,
        }
    }

    #[test]
    fn apply_created_appends_to_the_end() {
        let mut posts = vec![sample_post(1, "a")];
        apply_created(&mut posts, sample_post(2, "b"));
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[1].id, 2);
    }

    #[test]
    fn apply_updated_replaces_matching_post() {
        let mut posts = vec![sample_post(1, "a"), sample_post(2, "b")];
        apply_updated(&mut posts, sample_post(2, "updated"));
        assert_eq!(posts[1].title, "updated");
    }

    #[test]
    fn apply_updated_ignores_missing_post() {
        let mut posts = vec![sample_post(1, "a")];
        apply_updated(&mut posts, sample_post(9, "ghost"));
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "a");
    }

    #[test]
    fn apply_deleted_removes_by_id() {
        let mut posts = vec![sample_post(1, "a"), sample_post(2, "b")];
        apply_deleted(&mut posts, 1);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, 2);
    }
}
