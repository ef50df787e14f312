//! Shared harness for HTTP integration tests.
//!
//! Builds the production app over in-memory adapters and a clock that moves
//! forward one minute per reading, so publication timestamps are known in
//! advance.

use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::http::header::HeaderMap;
use actix_web::{test, web};
use chirp::domain::{User, UserId};
use chirp::inbound::http::health::HealthState;
use chirp::outbound::memory::{
    InMemoryEventAnnouncer, InMemoryPostRepository, InMemoryUserRepository,
};
use chirp::server::{build_app, build_http_state};
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use serde_json::Value;

/// Clock returning `start + n minutes` on its n-th reading.
pub struct SteppingClock {
    start: DateTime<Utc>,
    ticks: AtomicI32,
}

impl SteppingClock {
    pub fn new() -> Self {
        Self {
            start: Utc
                .with_ymd_and_hms(2026, 1, 1, 12, 0, 0)
                .single()
                .expect("valid start"),
            ticks: AtomicI32::new(0),
        }
    }

    /// Timestamp handed out on the `n`-th reading, counting from zero.
    pub fn reading(&self, n: i32) -> DateTime<Utc> {
        self.start + Duration::minutes(i64::from(n))
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let n = self.ticks.fetch_add(1, Ordering::SeqCst);
        self.reading(n)
    }
}

/// In-memory adapters plus the probes state.
pub struct Harness {
    pub users: Arc<InMemoryUserRepository>,
    pub posts: Arc<InMemoryPostRepository>,
    pub announcer: Arc<InMemoryEventAnnouncer>,
    pub clock: Arc<SteppingClock>,
    pub health: web::Data<HealthState>,
}

impl Harness {
    pub fn empty() -> Self {
        Self::with_users(Vec::<User>::new())
    }

    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::with_users(users)),
            posts: Arc::new(InMemoryPostRepository::new()),
            announcer: Arc::new(InMemoryEventAnnouncer::new()),
            clock: Arc::new(SteppingClock::new()),
            health: web::Data::new(HealthState::new()),
        }
    }

    pub async fn app(
        &self,
    ) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
        let state = build_http_state(
            Arc::clone(&self.users),
            Arc::clone(&self.posts),
            Arc::clone(&self.announcer),
            Arc::clone(&self.clock) as Arc<dyn Clock>,
            chirp::domain::DEFAULT_FANOUT_LIMIT,
        );
        test::init_service(build_app(web::Data::new(state), self.health.clone())).await
    }
}

/// User whose id is `<name>-id`.
pub fn user(name: &str) -> User {
    User::from_strings(format!("{name}-id"), name)
}

pub fn id(name: &str) -> UserId {
    UserId::new(format!("{name}-id")).expect("valid id")
}

/// Decoded response: status, headers and JSON body (`null` when empty).
pub struct JsonResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub async fn call_json<S>(app: &S, request: Request) -> JsonResponse
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let res = test::call_service(app, request).await;
    let status = res.status();
    let headers = res.headers().clone();
    let bytes = test::read_body(res).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    JsonResponse {
        status,
        headers,
        body,
    }
}
