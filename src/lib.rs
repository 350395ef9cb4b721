//! TuCarga 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎，注入认证信号实现守卫）
//! - `auth`: 认证状态管理
//! - `api`: 后端 REST 客户端（启动时构造一次的服务对象）
//! - `context`: 用户 / 车辆 / 用户证件三个集合状态持有者
//! - `components`: UI 组件层（页面与对话框）

mod api;
mod auth;
mod whatsapp;

mod context {
    pub mod user;
    pub mod user_items;
    pub mod vehicles;
}

mod components {
    pub mod dashboard;
    pub mod document_dialog;
    pub mod home;
    pub mod icons;
    pub mod license_dialog;
    pub mod login;
    pub mod maintenance_dialog;
    pub mod maintenance_report_dialog;
    pub mod password_reset;
    pub mod signup;
    pub mod vehicle_dialog;
    pub mod verify_email;
}

// 原生 Web API 封装模块
// 提供对 History API 的轻量级封装与带守卫的路由服务。
pub(crate) mod web {
    pub mod route;
    pub mod router;
}

use crate::auth::{AuthContext, init_auth};
use crate::components::dashboard::DashboardPage;
use crate::components::home::HomePage;
use crate::components::login::LoginPage;
use crate::components::password_reset::{
    ForgotPasswordPage, PasswordResetedPage, ResetPasswordPage,
};
use crate::components::signup::SignUpPage;
use crate::components::verify_email::{EmailVerifiedPage, VerifyEmailPage};
use crate::context::user::UserContext;
use crate::context::user_items::UserItemsContext;
use crate::context::vehicles::VehiclesContext;

use leptos::prelude::*;

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::SignUp => view! { <SignUpPage /> }.into_any(),
        AppRoute::VerifyEmail => view! { <VerifyEmailPage /> }.into_any(),
        AppRoute::EmailVerified => view! { <EmailVerifiedPage /> }.into_any(),
        AppRoute::ForgotPassword => view! { <ForgotPasswordPage /> }.into_any(),
        AppRoute::ResetPassword => view! { <ResetPasswordPage /> }.into_any(),
        AppRoute::PasswordReseted => view! { <PasswordResetedPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Página no encontrada"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建认证上下文
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // 2. 初始化认证状态（从 LocalStorage 恢复令牌）
    init_auth(&auth_ctx);

    // 3. 数据上下文：这里只构造，不加载。
    //    加载由组合层（控制面板）显式触发，保证启动顺序
    //    （用户 -> 用户证件）是显式依赖而不是效果监听。
    provide_context(UserContext::new());
    provide_context(VehiclesContext::new());
    provide_context(UserItemsContext::new());

    // 4. 获取认证状态信号，注入路由服务实现守卫（解耦）
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
