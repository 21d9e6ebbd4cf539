use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use web_sys::{HtmlInputElement, Url};

use crate::api;
use crate::models::Post;
use crate::state::{AppState, apply_created, apply_updated};

#[derive(Debug, Default, PartialEq)]
struct FieldErrors {
    title: Option<&'static str>,
    text: Option<&'static str>,
    image: Option<&'static str>,
}

impl FieldErrors {
    fn any(&self) -> bool {
        self.title.is_some() || self.text.is_some() || self.image.is_some()
    }
}

fn validate_form(title: &str, text: &str, has_image: bool, is_edit: bool) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if title.trim().is_empty() {
        errors.title = Some("Title is required");
    }
    if text.trim().is_empty() {
        errors.text = Some("Text is required");
    }
    if !is_edit && !has_image {
        errors.image = Some("Image is required when creating a new post");
    }

    errors
}

#[component]
pub(crate) fn PostForm(
    state: AppState,
    editing: RwSignal<Option<Post>>,
    on_done: Callback<()>,
) -> impl IntoView {
    let posts = state.posts;

    let title = RwSignal::new(String::new());
    let text = RwSignal::new(String::new());
    let image_file = RwSignal::new_local(None::<web_sys::File>);
    let preview_url = RwSignal::new(None::<String>);

    let title_error = RwSignal::new(None::<&'static str>);
    let text_error = RwSignal::new(None::<&'static str>);
    let image_error = RwSignal::new(None::<&'static str>);
    let submit_error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let file_input = NodeRef::<leptos::html::Input>::new();

    // Компонент может быть размонтирован до завершения запроса: завершение
    // проверяет флаг и не трогает сигналы мёртвой вьюхи.
    let alive = StoredValue::new(true);
    on_cleanup(move || alive.set_value(false));

    let reset_fields = move || {
        title.set(String::new());
        text.set(String::new());
        image_file.set(None);
        if let Some(old) = preview_url.get_untracked() {
            let _ = Url::revoke_object_url(&old);
        }
        preview_url.set(None);
        if let Some(input) = file_input.get_untracked() {
            input.set_value("");
        }
        title_error.set(None);
        text_error.set(None);
        image_error.set(None);
        submit_error.set(None);
    };

    // Переключение режима create/edit заполняет или очищает поля.
    // Выбранное ранее изображение сбрасывается в обоих случаях.
    Effect::new(move |_| {
        let target = editing.get();
        reset_fields();
        if let Some(post) = target {
            title.set(post.title);
            text.set(post.text);
        }
    });

    let on_image_change = move |ev: leptos::ev::Event| {
        let file = ev
            .target()
            .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));

        if let Some(file) = file {
            if let Some(old) = preview_url.get_untracked() {
                let _ = Url::revoke_object_url(&old);
            }
            preview_url.set(Url::create_object_url_with_blob(&file).ok());
            image_file.set(Some(file));
            image_error.set(None);
        }
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        submit_error.set(None);

        let title_value = title.get_untracked().trim().to_string();
        let text_value = text.get_untracked().trim().to_string();
        let file = image_file.get_untracked();
        let target = editing.get_untracked();

        let errors = validate_form(&title_value, &text_value, file.is_some(), target.is_some());
        title_error.set(errors.title);
        text_error.set(errors.text);
        image_error.set(errors.image);
        if errors.any() {
            // Валидация не прошла — запрос не отправляем.
            return;
        }

        saving.set(true);
        spawn_local(async move {
            let result = match &target {
                Some(post) => {
                    api::update_post(post.id, &title_value, &text_value, file.as_ref()).await
                }
                None => api::create_post(&title_value, &text_value, file.as_ref()).await,
            };

            if !alive.try_get_value().unwrap_or(false) {
                return;
            }

            match result {
                Ok(saved) => {
                    match target {
                        Some(_) => posts.update(|posts| apply_updated(posts, saved)),
                        None => posts.update(|posts| apply_created(posts, saved)),
                    }
                    reset_fields();
                    on_done.run(());
                }
                Err(err) => submit_error.set(Some(err.to_string())),
            }
            saving.set(false);
        });
    };

    // Изображение поста с сервера показываем в режиме редактирования,
    // пока не выбран новый файл.
    let current_image = move || {
        if preview_url.get().is_some() {
            return None;
        }
        editing.get().and_then(|post| post.image)
    };

    view! {
        <section class="post-form">
            <h2>{move || if editing.get().is_some() { "Edit Post" } else { "Create Post" }}</h2>

            <form on:submit=on_submit>
                <div class="field">
                    <input
                        placeholder="Title"
                        prop:value=move || title.get()
                        on:input=move |ev| title.set(event_target_value(&ev))
                    />
                    <Show when=move || title_error.get().is_some()>
                        <small class="field-error">
                            {move || title_error.get().unwrap_or_default()}
                        </small>
                    </Show>
                </div>

                <div class="field">
                    <textarea
                        placeholder="Text"
                        prop:value=move || text.get()
                        on:input=move |ev| text.set(event_target_value(&ev))
                    ></textarea>
                    <Show when=move || text_error.get().is_some()>
                        <small class="field-error">
                            {move || text_error.get().unwrap_or_default()}
                        </small>
                    </Show>
                </div>

                <Show when=move || current_image().is_some()>
                    <img
                        class="current-image"
                        src=move || current_image().unwrap_or_default()
                        alt="Current Post"
                    />
                </Show>

                <Show when=move || preview_url.get().is_some()>
                    <img
                        class="preview-image"
                        src=move || preview_url.get().unwrap_or_default()
                        alt="New Post Preview"
                    />
                </Show>

                <div class="field">
                    <input type="file" accept="image/*" node_ref=file_input on:change=on_image_change />
                    <Show when=move || image_error.get().is_some()>
                        <small class="field-error">
                            {move || image_error.get().unwrap_or_default()}
                        </small>
                    </Show>
                </div>

                <Show when=move || submit_error.get().is_some()>
                    <div class="submit-error">
                        {move || submit_error.get().unwrap_or_default()}
                    </div>
                </Show>

                <button type="submit" disabled=move || saving.get()>
                    {move || match (editing.get().is_some(), saving.get()) {
                        (_, true) => "Сохраняем...",
                        (true, false) => "Update Post",
                        (false, false) => "Create Post",
                    }}
                </button>
            </form>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_form_accepts_filled_create_form() {
        let errors = validate_form("A", "B", true, false);
        assert!(!errors.any());
    }

    #[test]
    fn validate_form_reports_missing_title() {
        let errors = validate_form("  ", "B", true, false);
        assert_eq!(errors.title, Some("Title is required"));
        assert!(errors.text.is_none());
    }

    #[test]
    fn validate_form_reports_missing_text() {
        let errors = validate_form("A", "", true, false);
        assert_eq!(errors.text, Some("Text is required"));
    }

    #[test]
    fn validate_form_requires_image_only_on_create() {
        let create_errors = validate_form("A", "B", false, false);
        assert_eq!(
            create_errors.image,
            Some("Image is required when creating a new post")
        );

        let edit_errors = validate_form("A", "B", false, true);
        assert!(edit_errors.image.is_none());
    }
}
