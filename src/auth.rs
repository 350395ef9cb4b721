//! 认证模块
//!
//! 管理用户认证状态，与路由系统解耦。
//! 路由服务通过注入的认证信号来检查认证状态。
//!
//! 令牌持久化在 LocalStorage：应用启动时读入（会话恢复），
//! 登出时清除。客户端不做令牌校验——失效令牌只会在后续请求
//! 失败时暴露出来。

use crate::api::TuCargaApi;
use gloo_storage::{LocalStorage, Storage};
use leptos::prelude::*;
use tucarga_shared::STORAGE_TOKEN_KEY;

/// 认证状态
#[derive(Clone)]
pub struct AuthState {
    /// API 服务对象；令牌随登录/登出写入或清除
    pub api: TuCargaApi,
    /// 不透明的 bearer 令牌
    pub token: Option<String>,
    /// 启动时是否还在恢复会话
    pub is_loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            api: TuCargaApi::from_storage(),
            token: None,
            is_loading: true,
        }
    }
}

impl AuthState {
    /// 是否已认证（令牌存在即视为已认证）
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 认证状态（只读）
    pub state: ReadSignal<AuthState>,
    /// 设置认证状态（写入）
    pub set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(AuthState::default());
        Self { state, set_state }
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().is_authenticated())
    }

    /// 当前的 API 服务对象（携带当前令牌）
    pub fn api(&self) -> TuCargaApi {
        self.state.get_untracked().api.clone()
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 初始化认证状态
///
/// 从 LocalStorage 读取上次持久化的令牌；存在则直接恢复会话。
pub fn init_auth(ctx: &AuthContext) {
    let stored: Option<String> = LocalStorage::get(STORAGE_TOKEN_KEY).ok();
    ctx.set_state.update(|state| {
        state.api.set_token(stored.clone());
        state.token = stored;
        state.is_loading = false;
    });
}

/// 登录：持久化令牌并更新内存状态
///
/// 此后所有需要认证的请求都会携带 `Authorization: Bearer <token>`。
/// 导航由路由服务监听认证信号自动处理。
pub fn login(ctx: &AuthContext, token: String) {
    let _ = LocalStorage::set(STORAGE_TOKEN_KEY, &token);
    ctx.set_state.update(|state| {
        state.api.set_token(Some(token.clone()));
        state.token = Some(token);
    });
}

/// 注销：清除持久化令牌与内存状态
///
/// 受保护的请求此后在发出前即被客户端拒绝。
/// 注意：不需要手动导航，路由服务会监听认证状态变化并自动重定向。
pub fn logout(ctx: &AuthContext) {
    LocalStorage::delete(STORAGE_TOKEN_KEY);
    ctx.set_state.update(|state| {
        state.api.set_token(None);
        state.token = None;
    });
}
