//! 路由服务模块 - 核心引擎
//!
//! 封装 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 导航流程为"请求 -> 验证(Guard) -> 处理 -> 加载"。

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

/// 获取当前浏览器路径（含查询串，供页面读取参数）
pub fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 获取当前查询串（去掉前导 `?`）
pub fn current_query() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .map(|s| s.trim_start_matches('?').to_string())
        .unwrap_or_default()
}

/// 读取查询串中的单个参数
pub fn query_param(key: &str) -> Option<String> {
    let params = web_sys::UrlSearchParams::new_with_str(&current_query()).ok()?;
    params.get(key)
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 认证检查信号由外部注入，与认证系统解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 认证状态检查（注入的信号）
    is_authenticated: Signal<bool>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>) -> Self {
        // 初始路由从当前 URL 解析
        let initial_route = AppRoute::from_path(&current_path());
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            is_authenticated,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    ///
    /// 接受带查询串的路径；守卫只看路径部分，推入 History 的是完整串。
    pub fn navigate(&self, path: &str) {
        let target_route = AppRoute::from_path(path);
        let is_auth = self.is_authenticated.get_untracked();

        // --- Step 1: 验证目标路由 ---
        if target_route.requires_auth() && !is_auth {
            web_sys::console::log_1(&"[Router] Access denied, redirecting to login.".into());
            let redirect = AppRoute::auth_failure_redirect();
            push_history_state(redirect.to_path());
            self.set_route.set(redirect);
            return;
        }

        if target_route.should_redirect_when_authenticated() && is_auth {
            web_sys::console::log_1(&"[Router] Already authenticated, redirecting.".into());
            let redirect = AppRoute::auth_success_redirect();
            push_history_state(redirect.to_path());
            self.set_route.set(redirect);
            return;
        }

        // --- Step 2: 加载页面 (更新状态) ---
        push_history_state(path);
        self.set_route.set(target_route);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target_route = AppRoute::from_path(&current_path());
            let is_auth = is_authenticated.get_untracked();

            // popstate 时也执行守卫逻辑
            if target_route.requires_auth() && !is_auth {
                let redirect = AppRoute::auth_failure_redirect();
                replace_history_state(redirect.to_path());
                set_route.set(redirect);
            } else {
                set_route.set(target_route);
            }
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 认证状态变化时的自动重定向
    ///
    /// 登录后离开登录/注册页；登出后离开受保护页面。
    /// 页面组件因此不需要各自的重定向 Effect。
    fn setup_auth_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;

        Effect::new(move |_| {
            let is_auth = is_authenticated.get();
            let route = current_route.get_untracked();

            if is_auth && route.should_redirect_when_authenticated() {
                let redirect = AppRoute::auth_success_redirect();
                push_history_state(redirect.to_path());
                set_route.set(redirect);
                web_sys::console::log_1(
                    &"[Router] Auth state changed: logged in, redirecting to dashboard.".into(),
                );
            } else if !is_auth && route.requires_auth() {
                let redirect = AppRoute::auth_failure_redirect();
                push_history_state(redirect.to_path());
                set_route.set(redirect);
                web_sys::console::log_1(
                    &"[Router] Auth state changed: logged out, redirecting to login.".into(),
                );
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);

    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

/// 导航函数（返回一个可调用的闭包）
pub fn use_navigate() -> impl Fn(&str) + Clone {
    let router = use_router();
    move |to: &str| {
        router.navigate(to);
    }
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 认证状态信号
    is_authenticated: Signal<bool>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(is_authenticated);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}
