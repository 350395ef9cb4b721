//! 维护报告对话框
//!
//! 选中车辆的三种维护记录摊平成统一表格，创建时间倒序。
//! 打开时刷新一次车辆集合，保证看到最新登记。

use crate::auth::use_auth;
use crate::components::icons::{ChevronDown, Close, Wrench};
use crate::context::vehicles::{refresh_vehicles, use_vehicles};
use leptos::prelude::*;
use leptos::task::spawn_local;
use tucarga_shared::{ReportRow, format_thousands, parse_date, report_rows};

/// 表格里的短日期（dd/mm/yyyy）
fn format_date_short(date_str: &str) -> String {
    match parse_date(date_str) {
        Some(d) => d.format("%d/%m/%Y").to_string(),
        None => "N/A".to_string(),
    }
}

#[component]
pub fn MaintenanceReportDialog(#[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let auth_ctx = use_auth();
    let vehicles_ctx = use_vehicles();
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if !dialog.open() {
                let _ = dialog.show_modal();
            }
        }
    });

    // 打开报告时拉取一次最新数据
    Effect::new(move |prev: Option<()>| {
        if prev.is_none() {
            let api = auth_ctx.api();
            spawn_local(async move {
                refresh_vehicles(&vehicles_ctx, api).await;
            });
        }
    });

    let rows = move || -> Vec<ReportRow> {
        let state = vehicles_ctx.state.get();
        state
            .selected
            .as_ref()
            .map(|v| report_rows(&v.maintenances))
            .unwrap_or_default()
    };
    let plates = move || {
        let state = vehicles_ctx.state.get();
        state
            .vehicles
            .unwrap_or_default()
            .iter()
            .map(|v| (v.plate.clone(), format!("{} {} - {}", v.make, v.year, v.plate)))
            .collect::<Vec<_>>()
    };
    let selected_plate = move || {
        vehicles_ctx
            .state
            .get()
            .selected
            .map(|v| v.plate)
            .unwrap_or_default()
    };

    let on_vehicle_change = move |ev: web_sys::Event| {
        let plate = event_target_value(&ev);
        // 未知车牌是 no-op，选中保持不变
        vehicles_ctx.set_state.update(|s| s.select_by_plate(&plate));
    };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| on_close.run(())>
            <div class="modal-box max-w-4xl">
                <div class="flex justify-between items-center mb-6">
                    <div class="flex items-center gap-4">
                        <div class="w-14 h-14 rounded-full bg-primary/20 text-primary flex items-center justify-center">
                            <Wrench attr:class="h-7 w-7" />
                        </div>
                        <h3 class="font-bold text-2xl">"Reporte mantenimiento"</h3>
                    </div>
                    <div class="flex items-center gap-3">
                        <div class="relative">
                            <select
                                class="select select-bordered rounded-full pr-10 appearance-none"
                                prop:value=selected_plate
                                on:change=on_vehicle_change
                            >
                                <For
                                    each=plates
                                    key=|(plate, _)| plate.clone()
                                    children=move |(plate, label)| {
                                        view! { <option value=plate.clone()>{label}</option> }
                                    }
                                />
                            </select>
                            <ChevronDown attr:class="h-4 w-4 absolute right-3 top-1/2 -translate-y-1/2 pointer-events-none opacity-60" />
                        </div>
                        <button
                            class="btn btn-ghost btn-circle btn-sm"
                            on:click=move |_| on_close.run(())
                        >
                            <Close attr:class="h-5 w-5" />
                        </button>
                    </div>
                </div>

                <div class="overflow-x-auto rounded-box shadow-md">
                    <table class="table table-zebra w-full">
                        <thead class="bg-primary text-primary-content">
                            <tr>
                                <th>"Descripción"</th>
                                <th>"Valor"</th>
                                <th>"Kilometraje"</th>
                                <th>"Fecha"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <Show when=move || rows().is_empty()>
                                <tr>
                                    <td colspan="4" class="text-center py-8 text-base-content/50">
                                        "No hay registros de mantenimiento para este vehículo"
                                    </td>
                                </tr>
                            </Show>
                            {move || rows()
                                .into_iter()
                                .map(|row| {
                                    let price = row
                                        .price
                                        .map(|p| format!("${}", format_thousands(p as i64)))
                                        .unwrap_or_else(|| "N/A".to_string());
                                    let mileage = row
                                        .mileage
                                        .map(|km| format!("{} km", format_thousands(km)))
                                        .unwrap_or_else(|| "N/A".to_string());
                                    view! {
                                        <tr>
                                            <td>{row.description.clone()}</td>
                                            <td>{price}</td>
                                            <td>{mileage}</td>
                                            <td>{format_date_short(&row.recorded_at)}</td>
                                        </tr>
                                    }
                                })
                                .collect::<Vec<_>>()}
                        </tbody>
                    </table>
                </div>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}
