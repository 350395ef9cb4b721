//! 用户状态模块
//!
//! 持有当前登录用户的档案。客户端视角下档案只读，
//! 仅暴露手动刷新；初始加载由组合层（控制面板）显式触发，
//! 不做轮询也不做后台刷新。

use crate::api::TuCargaApi;
use leptos::prelude::*;
use tucarga_shared::User;

/// 用户状态
#[derive(Clone, Default)]
pub struct UserState {
    pub user: Option<User>,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// 用户上下文
#[derive(Clone, Copy)]
pub struct UserContext {
    pub state: ReadSignal<UserState>,
    pub set_state: WriteSignal<UserState>,
}

impl UserContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(UserState::default());
        Self { state, set_state }
    }
}

impl Default for UserContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取用户上下文
pub fn use_user() -> UserContext {
    use_context::<UserContext>().expect("UserContext should be provided")
}

/// 刷新当前用户档案
///
/// 成功时替换状态并清除错误；失败时清空用户并记录文案。
/// 返回拿到的用户，供组合层安排后续加载（用户证件依赖用户 id）。
pub async fn refresh_user(ctx: &UserContext, api: TuCargaApi) -> Option<User> {
    ctx.set_state.update(|s| s.is_loading = true);

    let fetched = match api.fetch_me().await {
        Ok(user) => {
            ctx.set_state.update(|s| {
                s.user = Some(user.clone());
                s.error = None;
            });
            Some(user)
        }
        Err(e) => {
            web_sys::console::warn_1(&format!("[User] refresh failed: {}", e).into());
            ctx.set_state.update(|s| {
                s.user = None;
                s.error = Some(e.to_string());
            });
            None
        }
    };

    ctx.set_state.update(|s| s.is_loading = false);
    fetched
}
