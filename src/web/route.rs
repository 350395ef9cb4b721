//! 路由定义模块 - 领域模型
//!
//! 纯粹的业务逻辑层，不依赖 DOM 或 web_sys。
//! 定义应用的所有路由及其守卫属性。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 首页 (默认路由)
    #[default]
    Home,
    /// 登录页面
    Login,
    /// 注册页面
    SignUp,
    /// 邮箱验证码页面
    VerifyEmail,
    /// 邮箱验证成功页面
    EmailVerified,
    /// 申请重置密码页面
    ForgotPassword,
    /// 重置密码页面（token 在查询串中）
    ResetPassword,
    /// 密码重置成功页面
    PasswordReseted,
    /// 控制面板 (需要认证)
    Dashboard,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    ///
    /// 查询串不参与匹配，由各页面自行读取。
    pub fn from_path(path: &str) -> Self {
        let path = path.split('?').next().unwrap_or("/");
        match path {
            "/" => Self::Home,
            "/login" => Self::Login,
            "/signup" => Self::SignUp,
            "/verify-email" => Self::VerifyEmail,
            "/email-verified" => Self::EmailVerified,
            "/forgot-password" => Self::ForgotPassword,
            "/reset-password" => Self::ResetPassword,
            "/password-reseted" => Self::PasswordReseted,
            "/dashboard" => Self::Dashboard,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::SignUp => "/signup",
            Self::VerifyEmail => "/verify-email",
            Self::EmailVerified => "/email-verified",
            Self::ForgotPassword => "/forgot-password",
            Self::ResetPassword => "/reset-password",
            Self::PasswordReseted => "/password-reseted",
            Self::Dashboard => "/dashboard",
            Self::NotFound => "/404",
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Dashboard)
    }

    /// 定义已认证用户是否应该离开此路由（登录/注册页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::SignUp)
    }

    /// 认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 认证成功时的重定向目标
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_string_is_ignored_when_matching() {
        assert_eq!(
            AppRoute::from_path("/reset-password?token=abc"),
            AppRoute::ResetPassword
        );
        assert_eq!(
            AppRoute::from_path("/verify-email?email=a%40b.co"),
            AppRoute::VerifyEmail
        );
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
    }

    #[test]
    fn test_only_dashboard_requires_auth() {
        assert!(AppRoute::Dashboard.requires_auth());
        assert!(!AppRoute::Home.requires_auth());
        assert!(!AppRoute::ResetPassword.requires_auth());
    }
}
