use axum::Router;
use axum::middleware;
use axum::routing::{get, post, put};

use crate::presentation::AppState;
use crate::presentation::handlers::comments::{
    create_comment, delete_comment, get_comment, list_comments, update_comment,
};
use crate::presentation::handlers::posts::{
    create_post, delete_post, get_post, list_posts, list_posts_by_category, update_post,
};
use crate::presentation::middleware::auth::jwt_auth_middleware;

// comment routes live here so `{id}` stays the single param name at this segment
pub(crate) fn router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(list_posts))
        .route("/{id}", get(get_post))
        .route("/category/{id}", get(list_posts_by_category))
        .route("/{id}/comments", get(list_comments))
        .route("/{id}/comments/{comment_id}", get(get_comment));

    let protected = Router::new()
        .route("/", post(create_post))
        .route("/{id}", put(update_post).delete(delete_post))
        .route("/{id}/comments", post(create_comment))
        .route(
            "/{id}/comments/{comment_id}",
            put(update_comment).delete(delete_comment),
        )
        .layer(middleware::from_fn_with_state(state, jwt_auth_middleware));

    public.merge(protected)
}
