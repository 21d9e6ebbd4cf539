use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::models::Post;
use crate::state::{AppState, apply_deleted};

#[component]
pub(crate) fn PostList(
    state: AppState,
    on_edit: Callback<Post>,
    on_refresh: Callback<()>,
) -> impl IntoView {
    // Ошибки удаления не блокируют список — показываем их отдельной строкой.
    let action_error = RwSignal::new(None::<String>);

    let posts = state.posts;
    let loading = state.loading;
    let error = state.error;

    let alive = StoredValue::new(true);
    on_cleanup(move || alive.set_value(false));

    let on_delete = Callback::new(move |post_id: i64| {
        action_error.set(None);

        spawn_local(async move {
            let result = api::delete_post(post_id).await;
            if !alive.try_get_value().unwrap_or(false) {
                return;
            }

            match result {
                Ok(deleted_id) => {
                    posts.update(|posts| apply_deleted(posts, deleted_id));
                }
                Err(err) => action_error.set(Some(err.to_string())),
            }
        });
    });

    view! {
        <section class="post-list">
            <h2>"Posts"</h2>
            <button on:click=move |_| on_refresh.run(()) disabled=move || loading.get()>
                "Refresh posts"
            </button>

            <Show when=move || loading.get()>
                <p class="loading">"Загрузка..."</p>
            </Show>

            <Show when=move || action_error.get().is_some()>
                <p class="action-error">
                    <strong>"Не удалось удалить пост: "</strong>
                    {move || action_error.get().unwrap_or_default()}
                </p>
            </Show>

            // Неудачная загрузка списка заменяет сам список баннером ошибки.
            <Show
                when=move || error.get().is_none()
                fallback=move || {
                    view! {
                        <div class="error-banner">
                            <strong>"Ошибка: "</strong>
                            {move || error.get().unwrap_or_default()}
                        </div>
                    }
                }
            >
                <ul>
                    <For
                        each=move || posts.get()
                        key=|post| (post.id, post.title.clone(), post.text.clone(), post.image.clone())
                        children=move |post| {
                            let post_id = post.id;
                            let post_title = post.title.clone();
                            let post_text = post.text.clone();
                            let post_image = post.image.clone();
                            let post_for_edit = post.clone();

                            view! {
                                <li class="post">
                                    {post_image.map(|src| {
                                        let alt = post_title.clone();
                                        view! { <img class="post-image" src=src alt=alt /> }
                                    })}
                                    <strong>{post_title}</strong>
                                    <div>{post_text}</div>
                                    <small>{format!("id={post_id}")}</small>

                                    <div class="actions">
                                        <button on:click=move |_| on_edit.run(post_for_edit.clone())>
                                            "Edit"
                                        </button>
                                        <button
                                            style="margin-left: 0.5rem;"
                                            on:click=move |_| on_delete.run(post_id)
                                        >
                                            "Delete"
                                        </button>
                                    </div>
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>
        </section>
    }
}
