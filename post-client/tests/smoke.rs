use std::time::{SystemTime, UNIX_EPOCH};

use post_client::{ImageFile, PostClient, PostClientError, PostDraft};

fn unique_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock must be after unix epoch")
        .as_nanos();
    format!("{nanos}")
}

fn sample_image() -> ImageFile {
    // Минимальный однопиксельный PNG.
    ImageFile {
        file_name: "pixel.png".to_string(),
        mime: "image/png".to_string(),
        bytes: vec![
            0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48,
            0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00,
            0x00, 0x1f, 0x15, 0xc4, 0x89, 0x00, 0x00, 0x00, 0x0a, 0x49, 0x44, 0x41, 0x54, 0x78,
            0x9c, 0x63, 0x00, 0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0d, 0x0a, 0x2d, 0xb4, 0x00,
            0x00, 0x00, 0x00, 0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
        ],
    }
}

#[tokio::test]
#[ignore = "requires running posts API server"]
async fn http_smoke_flow() {
    let base_url =
        std::env::var("POSTS_HTTP_URL").unwrap_or_else(|_| "http://127.0.0.1:5000".to_string());
    let mut client = PostClient::new(base_url);

    let suffix = unique_suffix();
    let title = format!("smoke title {suffix}");

    let draft = PostDraft::new(&title, "smoke text").with_image(sample_image());
    let created = client
        .create_post(&draft)
        .await
        .expect("create_post must succeed");
    assert_eq!(created.title, title);

    let posts = client
        .refresh_posts()
        .await
        .expect("refresh_posts must succeed");
    let matches = posts.iter().filter(|post| post.id == created.id).count();
    assert_eq!(matches, 1, "created post must appear exactly once");

    // Обновление без изображения: сервер сохраняет прежнее.
    let update = PostDraft::new(format!("{title} updated"), "smoke text updated");
    let updated = client
        .update_post(created.id, &update)
        .await
        .expect("update_post must succeed");
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, format!("{title} updated"));

    let in_store = client
        .store()
        .posts()
        .iter()
        .find(|post| post.id == created.id)
        .expect("updated post must stay in store")
        .clone();
    assert_eq!(in_store.text, "smoke text updated");

    let deleted_id = client
        .delete_post(created.id)
        .await
        .expect("delete_post must succeed");
    assert_eq!(deleted_id, created.id);
    assert!(
        client
            .store()
            .posts()
            .iter()
            .all(|post| post.id != created.id)
    );

    let after_delete = client.update_post(created.id, &update).await;
    assert!(matches!(after_delete, Err(PostClientError::NotFound)));
}
