use log::error;
use std::sync::Arc;
use warp::{http::StatusCode, reply, Filter, Rejection, Reply};

use super::assets;
use super::handlers;
use super::page::render_index;
use super::types::{StatusResponse, TimePayload, INTERNAL_ERROR};
use crate::error_handling::types::StorageError;
use crate::storage::TimeStorage;

/// Upper bound for JSON request bodies.
pub const MAX_BODY_BYTES: u64 = 16 * 1024;

fn time_payload() -> impl Filter<Extract = (TimePayload,), Error = Rejection> + Clone {
    warp::body::content_length_limit(MAX_BODY_BYTES).and(warp::body::json())
}

fn status_reply(result: Result<StatusResponse, StorageError>) -> reply::WithStatus<reply::Json> {
    match result {
        Ok(res) => reply::with_status(reply::json(&res), StatusCode::OK),
        Err(e) => {
            error!("Request failed: {}", e);
            reply::with_status(
                reply::json(&StatusResponse::error(INTERNAL_ERROR)),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
        }
    }
}

/// GET /
pub fn index_route(
    storage: Arc<dyn TimeStorage>,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path::end().and(warp::get()).and_then(move || {
        let storage = storage.clone();
        async move {
            let page = handlers::list_times(storage.as_ref())
                .map_err(|e| e.to_string())
                .and_then(|times| render_index(&times).map_err(|e| e.to_string()));
            match page {
                Ok(html) => Ok::<_, Rejection>(reply::with_status(
                    reply::html(html),
                    StatusCode::OK,
                )),
                Err(e) => {
                    error!("Failed to render index page: {}", e);
                    Ok::<_, Rejection>(reply::with_status(
                        reply::html(String::from(
                            "<html><body><h1>Internal Server Error</h1></body></html>",
                        )),
                        StatusCode::INTERNAL_SERVER_ERROR,
                    ))
                }
            }
        }
    })
}

/// POST /save
pub fn save_route(
    storage: Arc<dyn TimeStorage>,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path("save")
        .and(warp::path::end())
        .and(warp::post())
        .and(time_payload())
        .and_then(move |payload: TimePayload| {
            let storage = storage.clone();
            async move {
                Ok::<_, Rejection>(status_reply(handlers::save_time(
                    storage.as_ref(),
                    payload,
                )))
            }
        })
}

/// POST /delete
pub fn delete_route(
    storage: Arc<dyn TimeStorage>,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path("delete")
        .and(warp::path::end())
        .and(warp::post())
        .and(time_payload())
        .and_then(move |payload: TimePayload| {
            let storage = storage.clone();
            async move {
                Ok::<_, Rejection>(status_reply(handlers::delete_time(
                    storage.as_ref(),
                    payload,
                )))
            }
        })
}

/// GET /static/*
pub fn static_route() -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path("static")
        .and(warp::path::tail())
        .and(warp::get())
        .and_then(|tail: warp::path::Tail| async move { assets::serve_static(tail.as_str()).await })
}

/// Full route table served by [`super::WebServer`].
pub fn routes(
    storage: Arc<dyn TimeStorage>,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    index_route(storage.clone())
        .or(save_route(storage.clone()))
        .or(delete_route(storage))
        .or(static_route())
}
