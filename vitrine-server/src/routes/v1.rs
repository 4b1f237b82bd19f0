use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use crate::{
    AppState, auth,
    handlers::{albums, photos, public, upload},
};

/// All v1 API routes: public catalog reads plus the admin surface.
pub fn create_v1_router(state: AppState) -> Router<AppState> {
    Router::new()
        // Public published catalog
        .route("/albums", get(public::list_albums))
        .route("/albums/{id}/photos", get(public::list_album_photos))
        // Admin surface, Basic-auth guarded
        .nest("/admin", create_admin_routes(state))
}

fn create_admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/albums", get(albums::list_albums).post(albums::create_album))
        .route(
            "/albums/{id}",
            get(albums::get_album)
                .put(albums::update_album)
                .delete(albums::delete_album),
        )
        .route("/albums/reorder", post(albums::reorder_albums))
        .route("/albums/{id}/move", post(albums::move_album))
        .route("/albums/{id}/published", put(albums::set_published))
        .route("/albums/{id}/photos", get(albums::list_album_photos))
        .route("/albums/{id}/attach-orphans", post(albums::attach_orphans))
        .route("/photos", post(photos::create_photo))
        .route("/photos/upload", post(upload::upload_photo))
        .route("/photos/orphans", get(photos::list_orphans))
        .route("/photos/reorder", post(photos::reorder_photos))
        .route("/photos/{id}/move", post(photos::move_photo))
        .route("/photos/{id}/published", put(photos::set_published))
        .route("/photos/{id}", delete(photos::delete_photo))
        .route_layer(middleware::from_fn_with_state(state, auth::require_admin))
}
