use std::time::{SystemTime, UNIX_EPOCH};

use forum_client::{ForumClient, ForumClientError, PageParams, PostInput, RegisterInput};

fn unique_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock must be after unix epoch")
        .as_nanos();
    format!("{nanos}")
}

#[tokio::test]
#[ignore = "requires running HTTP server and database"]
async fn http_smoke_flow() {
    let base_url =
        std::env::var("FORUM_HTTP_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());
    let mut client = ForumClient::new(base_url).expect("client must build");

    let suffix = unique_suffix();
    let username = format!("smoke_{suffix}");
    let password = "password123";

    let message = client
        .register(&RegisterInput {
            name: "Smoke Tester".to_string(),
            username: username.clone(),
            email: format!("smoke_{suffix}@example.com"),
            password: password.to_string(),
        })
        .await
        .expect("register must succeed");
    assert_eq!(message, "User registered successfully.");

    let login = client
        .login(&username, password)
        .await
        .expect("login must succeed");
    assert_eq!(login.token_type, "Bearer");
    assert_eq!(login.username, username);
    assert!(client.get_token().is_some());

    let me = client.me().await.expect("me must succeed");
    assert_eq!(me.id, login.user_id);

    let categories = client.categories().await.expect("categories must load");
    assert_eq!(categories.len(), 10);
    let general = categories
        .iter()
        .find(|c| c.name == "General")
        .expect("General must be seeded");

    let created = client
        .create_post(&PostInput {
            title: format!("smoke title {suffix}"),
            description: "smoke description".to_string(),
            content: "smoke content".to_string(),
            category_id: None,
        })
        .await
        .expect("create_post must succeed");
    assert_eq!(created.category_id, general.id);
    assert_eq!(created.author_id, login.user_id);

    let comment = client
        .add_comment(created.id, "first!")
        .await
        .expect("add_comment must succeed");
    let edited = client
        .update_comment(created.id, comment.id, "edited")
        .await
        .expect("update_comment must succeed");
    assert_eq!(edited.body, "edited");

    let mine = client
        .my_posts(&PageParams::default())
        .await
        .expect("my_posts must succeed");
    assert!(mine.content.iter().any(|post| post.id == created.id));

    let deleted = client
        .delete_post(created.id)
        .await
        .expect("delete_post must succeed");
    assert_eq!(deleted, "Post entity deleted successfully.");

    let after_delete = client.get_post(created.id).await;
    assert!(matches!(after_delete, Err(ForumClientError::NotFound(_))));
}
