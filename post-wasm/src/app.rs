use leptos::prelude::*;

use crate::api;
use crate::components::post_form::PostForm;
use crate::components::post_list::PostList;
use crate::models::Post;
use crate::state::AppState;

fn load_posts(state: AppState) {
    state.loading.set(true);
    state.clear_error();

    leptos::task::spawn_local(async move {
        match api::list_posts().await {
            Ok(posts) => state.posts.set(posts),
            Err(err) => state.set_error(err.to_string()),
        }
        state.loading.set(false);
    });
}

#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new();

    // Выбранный для редактирования пост; `None` — режим создания.
    let editing = RwSignal::new(None::<Post>);

    load_posts(state.clone());

    let on_edit = Callback::new(move |post: Post| editing.set(Some(post)));
    let on_form_done = Callback::new(move |_: ()| editing.set(None));
    let on_refresh = Callback::new({
        let state = state.clone();
        move |_| load_posts(state.clone())
    });

    view! {
        <main class="page">
            <section class="container">
                <h1>"Post Management"</h1>

                <PostForm state=state.clone() editing=editing on_done=on_form_done />
                <PostList state=state.clone() on_edit=on_edit on_refresh=on_refresh />
            </section>
        </main>
    }
}
