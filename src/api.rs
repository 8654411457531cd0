//! Transport-neutral request handling for the site's calculator endpoints
//!
//! The Lambda binary adapts HTTP events onto [`Api::handle`]; routing and
//! status codes live here so they can be exercised without a runtime.

use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::calculator::{yearly_schedule, GoalTarget, ProjectionResult};
use crate::config::PlannerConfig;
use crate::contact::{self, ContactError, ContactSubmission, Mailer};
use crate::format::{format_inr, format_inr_compact};
use crate::input::{normalize_amount, PlanInput};
use crate::quotes::QuoteBoard;

/// Largest request body accepted, matching the API Gateway payload limit
///
/// Attachments are base64 inside JSON, so the largest résumé that fits
/// through `POST /contact` is about 4.5 MiB.
pub const MAX_REQUEST_BODY_BYTES: usize = 6 * 1024 * 1024;

/// Status code and JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    fn ok<T: Serialize>(body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(body) => Self { status: 200, body },
            Err(err) => Self::error(500, &err.to_string()),
        }
    }

    fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: json!({ "error": message }),
        }
    }
}

fn display(result: &ProjectionResult) -> Value {
    json!({
        "invested": format_inr(result.total_contributed),
        "returns": format_inr(result.total_growth),
        "total": format_inr(result.maturity_value),
        "totalCompact": format_inr_compact(result.maturity_value),
    })
}

pub struct Api {
    config: PlannerConfig,
    quotes: QuoteBoard,
    mailer: Box<dyn Mailer>,
}

impl Api {
    pub fn new(config: PlannerConfig, mailer: Box<dyn Mailer>) -> Self {
        let quotes = config.quote_board();
        Self { config, quotes, mailer }
    }

    /// Route a request. `route` is the last path segment, e.g. `sip`.
    pub fn handle(
        &self,
        method: &str,
        route: &str,
        query: &HashMap<String, String>,
        body: &[u8],
    ) -> ApiResponse {
        log::debug!("{} /{}", method, route);
        match (method, route) {
            ("GET", "sip") => self.sip(query),
            ("GET", "goal") => self.goal(query),
            ("GET", "schedule") => self.schedule(query),
            ("GET", "quotes") => self.quotes(),
            ("POST", "contact") => self.contact(body),
            (_, "sip" | "goal" | "schedule" | "quotes" | "contact") => {
                ApiResponse::error(405, &format!("{method} not allowed on /{route}"))
            }
            _ => ApiResponse::error(404, &format!("no route for /{route}")),
        }
    }

    /// Slider ranges and steps for the calculator form
    fn sliders(&self) -> Value {
        json!({
            "amount": self.config.amount_bounds,
            "rate": self.config.rate_bounds,
            "years": self.config.years_bounds,
        })
    }

    fn plan_input(query: &HashMap<String, String>) -> PlanInput {
        let field = |name: &str| query.get(name).map(String::as_str).unwrap_or("");
        PlanInput::new(field("amount"), field("rate"), field("years"))
    }

    fn sip(&self, query: &HashMap<String, String>) -> ApiResponse {
        let plan = Self::plan_input(query).normalize_clamped(
            &self.config.amount_bounds,
            &self.config.rate_bounds,
            &self.config.years_bounds,
        );
        let result = plan.project();
        ApiResponse::ok(&json!({
            "plan": plan,
            "result": result,
            "display": display(&result),
            "sliders": self.sliders(),
        }))
    }

    fn goal(&self, query: &HashMap<String, String>) -> ApiResponse {
        // Rate and years follow the sliders; the target is free text
        let mut input = Self::plan_input(query);
        input.amount = String::new();
        let plan = input.normalize_clamped(
            &self.config.amount_bounds,
            &self.config.rate_bounds,
            &self.config.years_bounds,
        );
        let target = GoalTarget::new(normalize_amount(
            query.get("target").map(String::as_str).unwrap_or(""),
        ));
        let goal = target.solve(plan.annual_rate_percent, plan.duration_months);

        ApiResponse::ok(&json!({
            "target": target,
            "annualRatePercent": plan.annual_rate_percent,
            "durationMonths": plan.duration_months,
            "goal": goal,
            "display": {
                "monthly": format_inr(goal.required_periodic_amount),
                "projection": display(&goal.projection),
            },
            "sliders": self.sliders(),
        }))
    }

    fn schedule(&self, query: &HashMap<String, String>) -> ApiResponse {
        let plan = Self::plan_input(query).normalize_clamped(
            &self.config.amount_bounds,
            &self.config.rate_bounds,
            &self.config.years_bounds,
        );
        ApiResponse::ok(&json!({ "plan": plan, "rows": yearly_schedule(&plan) }))
    }

    fn quotes(&self) -> ApiResponse {
        match self.quotes.current() {
            Ok(snapshot) => ApiResponse::ok(&snapshot),
            Err(err) => {
                log::error!("no quotes available: {}", err);
                ApiResponse::error(503, &err.to_string())
            }
        }
    }

    fn contact(&self, body: &[u8]) -> ApiResponse {
        if body.len() > MAX_REQUEST_BODY_BYTES {
            return ApiResponse::error(
                413,
                &format!("request body is {} bytes, limit is {}", body.len(), MAX_REQUEST_BODY_BYTES),
            );
        }

        let submission: ContactSubmission = match serde_json::from_slice(body) {
            Ok(submission) => submission,
            Err(err) => return ApiResponse::error(400, &format!("malformed submission: {err}")),
        };

        match contact::submit(&submission, &self.config.contact, self.mailer.as_ref()) {
            Ok(receipt) => ApiResponse::ok(&receipt),
            Err(err @ ContactError::Delivery(_)) => {
                log::error!("{}", err);
                ApiResponse::error(502, &err.to_string())
            }
            Err(err) => ApiResponse::error(400, &err.to_string()),
        }
    }
}
