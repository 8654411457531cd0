//! AWS Lambda entry point behind API Gateway
//!
//! Serves the calculator, quote and contact endpoints for the marketing site.

use lambda_http::{run, service_fn, Body, Error, Request, RequestExt, Response};
use sip_planner::api::Api;
use sip_planner::contact::LogMailer;
use sip_planner::PlannerConfig;
use std::collections::HashMap;

async fn handle(api: &Api, event: Request) -> Result<Response<Body>, Error> {
    let route = event
        .uri()
        .path()
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or("")
        .to_string();

    let query: HashMap<String, String> = event
        .query_string_parameters()
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    let response = api.handle(event.method().as_str(), &route, &query, event.body().as_ref());
    log::info!("{} {} -> {}", event.method(), event.uri().path(), response.status);

    let resp = Response::builder()
        .status(response.status)
        .header("content-type", "application/json")
        .body(Body::Text(response.body.to_string()))?;
    Ok(resp)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let config = PlannerConfig::from_env()?;
    let api = Api::new(config, Box::new(LogMailer));
    let api = &api;

    run(service_fn(move |event: Request| async move { handle(api, event).await })).await
}
