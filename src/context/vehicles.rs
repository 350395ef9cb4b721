//! 车辆集合状态模块
//!
//! 持有当前用户的全部车辆（含嵌套证件项与维护记录）以及
//! "选中车辆"指针。状态迁移集中在纯逻辑结构 [`VehiclesState`] 上，
//! Leptos 信号只是它的容器，迁移规则可以在宿主机直接测试。
//!
//! 不变量：选中车辆若非空，必须是当前集合中的元素；每次刷新
//! 通过稳定 id 重新匹配来维持该不变量。

use crate::api::TuCargaApi;
use leptos::prelude::*;
use tucarga_shared::Vehicle;

/// 车辆集合状态（纯逻辑，无信号依赖）
#[derive(Clone, Default)]
pub struct VehiclesState {
    /// 车辆集合；尚未加载或加载失败时为 None
    pub vehicles: Option<Vec<Vehicle>>,
    /// 选中车辆（集合元素的克隆）
    pub selected: Option<Vehicle>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl VehiclesState {
    /// 提交一次成功的刷新结果
    ///
    /// 选中保持规则：刷新前有选中车辆时按 id 在新集合中重新匹配；
    /// 匹配不到则退回新集合的第一辆；集合为空则为 None。
    pub fn apply_fetched(&mut self, list: Vec<Vehicle>) {
        let prev_id = self.selected.as_ref().map(|v| v.id);
        self.selected = prev_id
            .and_then(|id| list.iter().find(|v| v.id == id).cloned())
            .or_else(|| list.first().cloned());
        self.vehicles = Some(list);
        self.error = None;
    }

    /// 记录一次刷新失败
    ///
    /// 集合与选中一并清空，错误以人类可读文案保留；不自动重试。
    pub fn apply_error(&mut self, message: String) {
        self.vehicles = None;
        self.selected = None;
        self.error = Some(message);
    }

    /// 按车牌同步选中
    ///
    /// 车牌不存在时为 no-op：选中保持不变，不报错。
    /// 调用方依赖这一契约——非法输入被静默忽略而不是清空选中。
    pub fn select_by_plate(&mut self, plate: &str) {
        if let Some(vehicles) = &self.vehicles {
            if let Some(vehicle) = vehicles.iter().find(|v| v.plate == plate) {
                self.selected = Some(vehicle.clone());
            }
        }
    }
}

/// 车辆集合上下文
#[derive(Clone, Copy)]
pub struct VehiclesContext {
    pub state: ReadSignal<VehiclesState>,
    pub set_state: WriteSignal<VehiclesState>,
}

impl VehiclesContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(VehiclesState::default());
        Self { state, set_state }
    }
}

impl Default for VehiclesContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取车辆集合上下文
pub fn use_vehicles() -> VehiclesContext {
    use_context::<VehiclesContext>().expect("VehiclesContext should be provided")
}

/// 刷新车辆集合
///
/// 并发触发时不去重也不取消：后到的响应覆盖先到的
/// （last-write-wins），与集合的最终一致语义一致。
pub async fn refresh_vehicles(ctx: &VehiclesContext, api: TuCargaApi) {
    ctx.set_state.update(|s| s.is_loading = true);

    match api.fetch_vehicles().await {
        Ok(list) => ctx.set_state.update(|s| s.apply_fetched(list)),
        Err(e) => {
            web_sys::console::warn_1(&format!("[Vehicles] refresh failed: {}", e).into());
            ctx.set_state.update(|s| s.apply_error(e.to_string()));
        }
    }

    ctx.set_state.update(|s| s.is_loading = false);
}

#[cfg(test)]
mod tests;
