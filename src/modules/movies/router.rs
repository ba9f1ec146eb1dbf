use axum::{Router, routing::get};

use crate::modules::movies::controller::{
    create_movie, delete_movie, get_movie, list_movies, update_movie,
};
use crate::state::AppState;

pub fn init_movies_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_movies).post(create_movie))
        .route(
            "/{id}",
            get(get_movie).patch(update_movie).delete(delete_movie),
        )
}
