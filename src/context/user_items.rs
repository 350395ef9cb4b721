//! 用户证件状态模块
//!
//! 持有不挂在车辆下的用户证件（目前只有驾驶证）。
//! 每个会话只加载一次，且必须在用户档案解析出非空用户之后；
//! 未认证时不发起请求，集合保持 None。
//!
//! 与车辆集合不同，这里不暴露手动刷新——这是沿用的已知不对称，
//! 见 DESIGN.md。

use crate::api::TuCargaApi;
use leptos::prelude::*;
use tucarga_shared::UserItem;

/// 用户证件状态
#[derive(Clone, Default)]
pub struct UserItemsState {
    /// 证件集合；未加载或加载失败时为 None
    pub items: Option<Vec<UserItem>>,
    pub is_loading: bool,
    pub error: Option<String>,
    /// 本会话是否已经尝试过加载
    loaded: bool,
}

impl UserItemsState {
    /// 查找驾驶证条目
    pub fn license(&self) -> Option<&UserItem> {
        self.items
            .as_ref()?
            .iter()
            .find(|i| i.category.to_lowercase().contains("licen"))
    }
}

/// 用户证件上下文
#[derive(Clone, Copy)]
pub struct UserItemsContext {
    pub state: ReadSignal<UserItemsState>,
    pub set_state: WriteSignal<UserItemsState>,
}

impl UserItemsContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(UserItemsState::default());
        Self { state, set_state }
    }
}

impl Default for UserItemsContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取用户证件上下文
pub fn use_user_items() -> UserItemsContext {
    use_context::<UserItemsContext>().expect("UserItemsContext should be provided")
}

/// 加载用户证件（每会话一次）
///
/// 调用方负责先解析出用户；这里再以 `loaded` 兜底保证幂等。
pub async fn load_user_items(ctx: &UserItemsContext, api: TuCargaApi, user_id: i64) {
    if ctx.state.get_untracked().loaded {
        return;
    }
    ctx.set_state.update(|s| {
        s.loaded = true;
        s.is_loading = true;
    });

    match api.fetch_user_items(user_id).await {
        Ok(items) => ctx.set_state.update(|s| {
            s.items = Some(items);
            s.error = None;
        }),
        Err(e) => {
            web_sys::console::warn_1(&format!("[UserItems] load failed: {}", e).into());
            ctx.set_state.update(|s| {
                s.items = None;
                s.error = Some(e.to_string());
            });
        }
    }

    ctx.set_state.update(|s| s.is_loading = false);
}
