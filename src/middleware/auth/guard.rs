//! Route guard: route class + identity headers → allow or redirect.
//!
//! Runs inside the identity middleware, so `x-authenticated` / `x-user-role` have already
//! been rewritten from the verified cookie by the time they are read here.

use axum::{
    Router,
    extract::Request,
    http::HeaderMap,
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
};

use crate::services::auth::identity::ADMIN_ROLE;
use crate::services::auth::propagate::{X_AUTHENTICATED, X_USER_ROLE};
use crate::services::path_filter;
use crate::services::route_table::{
    ADMIN_REDIRECT, DEFAULT_LOGIN_REDIRECT, HOME, RouteClass, classify,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    Anonymous,
    Customer,
    Admin,
}

impl SessionKind {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let authenticated = headers
            .get(X_AUTHENTICATED)
            .is_some_and(|v| v.as_bytes() == b"true");
        if !authenticated {
            return Self::Anonymous;
        }

        match headers.get(X_USER_ROLE) {
            Some(role) if role.as_bytes() == ADMIN_ROLE.as_bytes() => Self::Admin,
            _ => Self::Customer,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(&'static str),
}

pub fn decide(class: RouteClass, session: SessionKind) -> GuardDecision {
    use GuardDecision::{Allow, Redirect};

    match (class, session) {
        (RouteClass::Auth, SessionKind::Admin) => Redirect(ADMIN_REDIRECT),
        (RouteClass::Auth, SessionKind::Customer) => Redirect(HOME),

        (RouteClass::Admin, SessionKind::Admin) => Allow,
        (RouteClass::Admin, SessionKind::Customer) => Redirect(HOME),
        (RouteClass::Admin, SessionKind::Anonymous) => Redirect(DEFAULT_LOGIN_REDIRECT),

        (RouteClass::Protected, SessionKind::Anonymous) => Redirect(DEFAULT_LOGIN_REDIRECT),

        _ => Allow,
    }
}

pub fn apply<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn(guard_middleware))
}

async fn guard_middleware(req: Request, next: Next) -> Response {
    let path = req.uri().path().to_owned();
    if !path_filter::applies(&path) {
        return next.run(req).await;
    }

    let class = classify(&path);
    let session = SessionKind::from_headers(req.headers());

    match decide(class, session) {
        GuardDecision::Allow => next.run(req).await,
        GuardDecision::Redirect(target) => {
            tracing::debug!(path = %path, ?class, ?session, redirect = target, "route guard redirect");
            Redirect::temporary(target).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(authenticated: &'static str, role: Option<&'static str>) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(X_AUTHENTICATED, HeaderValue::from_static(authenticated));
        if let Some(role) = role {
            h.insert(X_USER_ROLE, HeaderValue::from_static(role));
        }
        h
    }

    #[test]
    fn session_kind_reads_headers() {
        assert_eq!(SessionKind::from_headers(&HeaderMap::new()), SessionKind::Anonymous);
        assert_eq!(
            SessionKind::from_headers(&headers("false", Some("admin"))),
            SessionKind::Anonymous
        );
        assert_eq!(
            SessionKind::from_headers(&headers("true", Some("admin"))),
            SessionKind::Admin
        );
        assert_eq!(
            SessionKind::from_headers(&headers("true", Some("user"))),
            SessionKind::Customer
        );
        assert_eq!(
            SessionKind::from_headers(&headers("true", None)),
            SessionKind::Customer
        );
    }

    #[test]
    fn anonymous_decisions() {
        let s = SessionKind::Anonymous;
        assert_eq!(decide(RouteClass::Auth, s), GuardDecision::Allow);
        assert_eq!(decide(RouteClass::Admin, s), GuardDecision::Redirect("/login"));
        assert_eq!(decide(RouteClass::Protected, s), GuardDecision::Redirect("/login"));
        assert_eq!(decide(RouteClass::Public, s), GuardDecision::Allow);
    }

    #[test]
    fn customer_decisions() {
        let s = SessionKind::Customer;
        assert_eq!(decide(RouteClass::Auth, s), GuardDecision::Redirect("/"));
        assert_eq!(decide(RouteClass::Admin, s), GuardDecision::Redirect("/"));
        assert_eq!(decide(RouteClass::Protected, s), GuardDecision::Allow);
        assert_eq!(decide(RouteClass::Public, s), GuardDecision::Allow);
    }

    #[test]
    fn admin_decisions() {
        let s = SessionKind::Admin;
        assert_eq!(decide(RouteClass::Auth, s), GuardDecision::Redirect("/admin"));
        assert_eq!(decide(RouteClass::Admin, s), GuardDecision::Allow);
        assert_eq!(decide(RouteClass::Protected, s), GuardDecision::Allow);
        assert_eq!(decide(RouteClass::Public, s), GuardDecision::Allow);
    }
}
