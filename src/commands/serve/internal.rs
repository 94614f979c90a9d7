//! Internal implementation of the recommendation service

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener};
use std::sync::Arc;
use std::time::Instant;

use super::microserver::{self, RequestError};
use super::ServeOptions;
use skillmatch::engine::{to_listings, to_recommendations, JobListing, Recommendation};
use skillmatch::{JobPosting, Recommender};

// === Transport-free request/response types ===
// Handlers use these, never raw-socket types. The transport adapter converts
// at the boundary.

/// HTTP request independent of transport
struct HttpRequest {
    method: String,
    path: String,
    body: Vec<u8>,
}

/// HTTP response independent of transport
struct HttpResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl HttpResponse {
    /// Create a JSON response
    fn json(status: u16, value: &impl Serialize) -> Self {
        Self {
            status,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: serde_json::to_vec(value).unwrap_or_default(),
        }
    }

    fn empty(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Add a header
    fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

// === Server state ===

/// Server state shared across request handlers
///
/// The engine and the job listing are both startup snapshots, so handlers
/// read them concurrently without locks.
pub struct ServerState {
    start_time: Instant,
    version: String,
    engine: Recommender,
    jobs: Vec<JobListing>,
}

impl ServerState {
    pub fn new(engine: Recommender, postings: &[JobPosting]) -> Self {
        Self {
            start_time: Instant::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            engine,
            jobs: to_listings(postings),
        }
    }

    fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

// === API types ===

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    uptime_secs: u64,
    active: bool,
    postings: usize,
}

/// Recommend API request
#[derive(Deserialize)]
struct RecommendRequest {
    skills: Vec<String>,
}

/// Recommend API response
#[derive(Serialize)]
struct RecommendResponse {
    recommendations: Vec<Recommendation>,
}

/// Jobs API response
#[derive(Serialize)]
struct JobsResponse<'a> {
    count: usize,
    jobs: &'a [JobListing],
}

// === Helpers ===

/// Permissive CORS, the service is called from browser frontends
fn with_cors_headers(response: HttpResponse) -> HttpResponse {
    response
        .with_header("Access-Control-Allow-Origin", "*")
        .with_header("Access-Control-Allow-Methods", "GET, POST, OPTIONS")
        .with_header("Access-Control-Allow-Headers", "*")
        .with_header("X-Content-Type-Options", "nosniff")
}

/// Consistent JSON error response
fn json_error(status: u16, message: &str) -> HttpResponse {
    HttpResponse::json(status, &serde_json::json!({"error": message}))
}

// === Transport-free handlers ===

/// Route request to handler; the query string plays no part in routing
fn route_request(request: &HttpRequest, state: &ServerState) -> HttpResponse {
    let path = request
        .path
        .split_once('?')
        .map_or(request.path.as_str(), |(path, _)| path);

    let response = match (request.method.as_str(), path) {
        ("OPTIONS", _) => HttpResponse::empty(204),
        ("GET", "/") => handle_root(),
        ("GET", "/health") => handle_health(state),
        ("GET", "/api/jobs") => handle_jobs(state),
        ("POST", "/api/recommend") => handle_recommend(request, state),
        (_, "/api/recommend") | (_, "/api/jobs") => json_error(405, "Method not allowed"),
        _ => json_error(404, "Not found"),
    };
    with_cors_headers(response)
}

/// Handle GET /
fn handle_root() -> HttpResponse {
    HttpResponse::json(
        200,
        &serde_json::json!({"message": "Job recommender service running"}),
    )
}

/// Handle GET /health
fn handle_health(state: &ServerState) -> HttpResponse {
    HttpResponse::json(
        200,
        &HealthResponse {
            status: "ok".to_string(),
            version: state.version.clone(),
            uptime_secs: state.uptime_secs(),
            active: state.engine.is_active(),
            postings: state.engine.posting_count(),
        },
    )
}

/// Handle GET /api/jobs
fn handle_jobs(state: &ServerState) -> HttpResponse {
    HttpResponse::json(
        200,
        &JobsResponse {
            count: state.jobs.len(),
            jobs: &state.jobs,
        },
    )
}

/// Handle POST /api/recommend
fn handle_recommend(request: &HttpRequest, state: &ServerState) -> HttpResponse {
    if request.body.is_empty() {
        return json_error(400, "Missing request body");
    }

    let body: RecommendRequest = match serde_json::from_slice(&request.body) {
        Ok(req) => req,
        Err(e) => return json_error(400, &format!("Invalid JSON: {}", e)),
    };

    let results = state.engine.recommend(&body.skills);
    tracing::debug!(
        skills = body.skills.len(),
        results = results.len(),
        "recommend request"
    );

    HttpResponse::json(
        200,
        &RecommendResponse {
            recommendations: to_recommendations(&results),
        },
    )
}

// === Transport: microserver accept loop ===
// One request per connection. Thread per connection.

/// Convert microserver request to internal HttpRequest
fn from_micro(req: microserver::HttpRequest) -> HttpRequest {
    HttpRequest {
        method: req.method,
        path: req.path,
        body: req.body,
    }
}

/// Convert internal HttpResponse to microserver response
fn to_micro(resp: HttpResponse) -> microserver::HttpResponse {
    microserver::HttpResponse {
        status: resp.status,
        headers: resp.headers,
        body: resp.body,
    }
}

/// Handle one connection on any Read + Write stream.
///
/// Takes `&mut` so the caller retains ownership and can call `shutdown(Write)`
/// on the concrete stream type after this returns.
fn handle_connection(stream: &mut (impl Read + Write), state: &ServerState) {
    let resp = match microserver::read_request(stream) {
        Some(Ok(req)) => route_request(&from_micro(req), state),
        Some(Err(RequestError::BadRequest(msg))) => with_cors_headers(json_error(400, &msg)),
        Some(Err(RequestError::TooLarge)) => {
            with_cors_headers(json_error(413, "Request too large"))
        }
        None => return, // clean close, no response needed
    };

    microserver::write_response(stream, &to_micro(resp));
}

/// Run the service until the process is killed
pub fn run_server(options: ServeOptions, engine: Recommender, postings: &[JobPosting]) -> Result<()> {
    let addr = format!("{}:{}", options.host, options.port);
    if options.host != "127.0.0.1" && options.host != "localhost" {
        tracing::warn!(host = %options.host, "binding beyond loopback, the service has no auth or TLS");
    }

    let listener =
        TcpListener::bind(&addr).with_context(|| format!("Failed to bind {}", addr))?;
    let state = Arc::new(ServerState::new(engine, postings));

    tracing::info!(
        %addr,
        active = state.engine.is_active(),
        postings = state.engine.posting_count(),
        "recommender service listening"
    );
    println!("Listening on http://{}", addr);
    println!(
        "   Test: curl -s -X POST http://{}/api/recommend -H 'Content-Type: application/json' -d '{{\"skills\":[\"Python\"]}}'",
        addr
    );

    accept_loop(listener, state)
}

/// Accept loop for the TCP listener
fn accept_loop(listener: TcpListener, state: Arc<ServerState>) -> ! {
    for stream in listener.incoming() {
        match stream {
            Ok(mut stream) => {
                let state = Arc::clone(&state);
                std::thread::spawn(move || {
                    handle_connection(&mut stream, &state);
                    let _ = stream.shutdown(Shutdown::Write);
                });
            }
            Err(e) => tracing::warn!(error = %e, "TCP accept error"),
        }
    }
    std::process::exit(0);
}
