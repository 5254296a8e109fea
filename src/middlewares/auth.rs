use crate::error::AppError;
use crate::utils::SessionService;
use actix_web::http::Method;
use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};

// 受保护路径配置：只有管理端需要会话令牌
struct ProtectedPaths {
    prefix_paths: Vec<&'static str>,
    exempt_paths: Vec<&'static str>,
}

impl ProtectedPaths {
    fn new() -> Self {
        Self {
            // 前缀匹配的受保护路径
            prefix_paths: vec!["/api/v1/admin"],
            // 保护前缀下仍然放行的路径
            exempt_paths: vec!["/api/v1/admin/login"],
        }
    }

    fn requires_session(&self, path: &str) -> bool {
        if self
            .exempt_paths
            .iter()
            .any(|&exempt| path.starts_with(exempt))
        {
            return false;
        }

        self.prefix_paths
            .iter()
            .any(|&prefix| path.starts_with(prefix))
    }
}

pub struct AdminAuthMiddleware {
    sessions: SessionService,
}

impl AdminAuthMiddleware {
    pub fn new(sessions: SessionService) -> Self {
        Self { sessions }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AdminAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AdminAuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminAuthMiddlewareService {
            service,
            sessions: self.sessions.clone(),
            protected_paths: ProtectedPaths::new(),
        }))
    }
}

pub struct AdminAuthMiddlewareService<S> {
    service: S,
    sessions: SessionService,
    protected_paths: ProtectedPaths,
}

impl<S, B> Service<ServiceRequest> for AdminAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // 放行所有 CORS 预检请求
        if req.method() == Method::OPTIONS {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        if !self.protected_paths.requires_session(req.path()) {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        // 提取Authorization header
        let token = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        match token {
            Some(token) => match self.sessions.verify_admin_token(token) {
                Ok(_claims) => {
                    let fut = self.service.call(req);
                    Box::pin(fut)
                }
                Err(_) => {
                    let error = AppError::AuthError("Invalid session token".to_string());
                    Box::pin(async move { Err(error.into()) })
                }
            },
            None => {
                let error = AppError::AuthError("Missing session token".to_string());
                Box::pin(async move { Err(error.into()) })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_exempt() {
        let paths = ProtectedPaths::new();
        assert!(!paths.requires_session("/api/v1/admin/login"));
        assert!(paths.requires_session("/api/v1/admin/campaigns"));
        assert!(paths.requires_session("/api/v1/admin/export/winners"));
    }

    #[test]
    fn test_public_routes_pass() {
        let paths = ProtectedPaths::new();
        assert!(!paths.requires_session("/api/v1/spin"));
        assert!(!paths.requires_session("/api/v1/history"));
        assert!(!paths.requires_session("/swagger-ui/"));
    }
}
