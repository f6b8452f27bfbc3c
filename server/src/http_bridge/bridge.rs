use crate::app::service::ListingService;
use crate::http_bridge::model::{BlogQuery, ColorQuery, ErrorBody, FacetOptions, ListingQuery};
use log::{info, warn};
use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

fn error_reply(status: StatusCode, message: &str) -> Response {
    warp::reply::with_status(
        warp::reply::json(&ErrorBody {
            error: message.to_string(),
        }),
        status,
    )
    .into_response()
}

fn internal_error(context: &str, err: anyhow::Error) -> Response {
    warn!("{context} failed: {err:#}");
    error_reply(StatusCode::INTERNAL_SERVER_ERROR, "catalog unavailable")
}

async fn list_models(service: Arc<ListingService>) -> Result<Response, Infallible> {
    Ok(match service.models().await {
        Ok(models) => warp::reply::json(&models).into_response(),
        Err(err) => internal_error("models", err),
    })
}

async fn featured_models(service: Arc<ListingService>) -> Result<Response, Infallible> {
    Ok(match service.featured().await {
        Ok(models) => warp::reply::json(&models).into_response(),
        Err(err) => internal_error("featured", err),
    })
}

async fn model_by_id(id: String, service: Arc<ListingService>) -> Result<Response, Infallible> {
    Ok(match service.model(&id).await {
        Ok(Some(model)) => warp::reply::json(model).into_response(),
        Ok(None) => error_reply(StatusCode::NOT_FOUND, "model not found"),
        Err(err) => internal_error("model lookup", err),
    })
}

async fn model_color(
    id: String,
    query: ColorQuery,
    service: Arc<ListingService>,
) -> Result<Response, Infallible> {
    Ok(match service.color(&id, &query.hex).await {
        Ok(Some(color)) => warp::reply::json(&color).into_response(),
        Ok(None) => error_reply(StatusCode::NOT_FOUND, "model not found"),
        Err(err) => internal_error("color lookup", err),
    })
}

async fn listing(query: ListingQuery, service: Arc<ListingService>) -> Result<Response, Infallible> {
    Ok(match service.listing(&query).await {
        Ok(payload) => warp::reply::json(&payload).into_response(),
        Err(err) => internal_error("listing", err),
    })
}

/// All JSON endpoints, without binding a socket.
pub fn routes(
    service: Arc<ListingService>,
) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone {
    let service_filter = warp::any().map(move || service.clone());

    let models_route = warp::path!("models")
        .and(warp::get())
        .and(service_filter.clone())
        .and_then(list_models);

    let featured_route = warp::path!("models" / "featured")
        .and(warp::get())
        .and(service_filter.clone())
        .and_then(featured_models);

    let model_route = warp::path!("models" / String)
        .and(warp::get())
        .and(service_filter.clone())
        .and_then(model_by_id);

    let color_route = warp::path!("models" / String / "color")
        .and(warp::get())
        .and(warp::query::<ColorQuery>())
        .and(service_filter.clone())
        .and_then(model_color);

    let listing_route = warp::path!("listing")
        .and(warp::post())
        .and(warp::body::json())
        .and(service_filter.clone())
        .and_then(listing);

    let blog_route = warp::path!("blog")
        .and(warp::get())
        .and(warp::query::<BlogQuery>())
        .and(service_filter.clone())
        .map(|query: BlogQuery, service: Arc<ListingService>| {
            warp::reply::json(&service.latest_posts(query.limit)).into_response()
        });

    let facets_route = warp::path!("facets")
        .and(warp::get())
        .map(|| warp::reply::json(&FacetOptions::default()).into_response());

    let metrics_route = warp::path!("metrics")
        .and(warp::get())
        .and(service_filter)
        .map(|service: Arc<ListingService>| warp::reply::json(&service.metrics()).into_response());

    models_route
        .or(featured_route)
        .unify()
        .or(model_route)
        .unify()
        .or(color_route)
        .unify()
        .or(listing_route)
        .unify()
        .or(blog_route)
        .unify()
        .or(facets_route)
        .unify()
        .or(metrics_route)
        .unify()
}

/// Binds the HTTP bridge and returns the address plus the future that serves it.
pub fn bind(
    service: Arc<ListingService>,
    addr: SocketAddr,
) -> anyhow::Result<(SocketAddr, impl Future<Output = ()> + Send + 'static)> {
    let (bound, server) = warp::serve(routes(service))
        .try_bind_ephemeral(addr)
        .map_err(|err| anyhow::anyhow!("binding HTTP bridge to {addr}: {err}"))?;
    info!("HTTP bridge listening on {bound}");
    Ok((bound, server))
}
