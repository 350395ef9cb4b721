//! 维护登记对话框
//!
//! 一个对话框承载三种维护形状：机油更换、轮胎更换、其他。
//! 提交成功后立刻刷新车辆集合；失败则留在对话框内展示错误。

pub mod form_state;

use crate::auth::use_auth;
use crate::components::icons::{Close, Plus, Trash, Wrench};
use crate::context::vehicles::{refresh_vehicles, use_vehicles};
use self::form_state::MaintenanceFormState;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tucarga_shared::{MaintenanceKind, format_thousands};

#[component]
pub fn MaintenanceDialog(#[prop(into)] on_close: Callback<()>) -> impl IntoView {
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

    let form = MaintenanceFormState::new();
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let vehicle_id = move || vehicles_ctx.state.get().selected.as_ref().map(|v| v.id);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let Some(vehicle_id) = vehicle_id() else {
            set_error_msg.set(Some("No hay vehículo seleccionado".to_string()));
            return;
        };
        let req = match form.to_request(vehicle_id) {
            Ok(req) => req,
            Err(msg) => {
                set_error_msg.set(Some(msg));
                return;
            }
        };

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let api = auth_ctx.api();
        spawn_local(async move {
            match api.create_maintenance(&req).await {
                Ok(()) => {
                    refresh_vehicles(&vehicles_ctx, api).await;
                    on_close.run(());
                }
                Err(e) => {
                    set_error_msg.set(Some(e.to_string()));
                }
            }
            set_is_submitting.set(false);
        });
    };

    let kind_tab_class = move |kind: MaintenanceKind| {
        if form.kind.get() == kind {
            "tab tab-active"
        } else {
            "tab"
        }
    };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| on_close.run(())>
            <div class="modal-box max-w-2xl">
                <div class="flex justify-between items-center mb-4">
                    <div class="flex items-center gap-4">
                        <div class="w-12 h-12 rounded-full bg-primary/20 text-primary flex items-center justify-center">
                            <Wrench attr:class="h-6 w-6" />
                        </div>
                        <h3 class="font-bold text-xl">"Registrar mantenimiento"</h3>
                    </div>
                    <button
                        class="btn btn-ghost btn-circle btn-sm"
                        on:click=move |_| on_close.run(())
                    >
                        <Close attr:class="h-5 w-5" />
                    </button>
                </div>

                // 类别切换
                <div role="tablist" class="tabs tabs-boxed mb-4">
                    <a role="tab" class=move || kind_tab_class(MaintenanceKind::OilChange)
                        on:click=move |_| form.kind.set(MaintenanceKind::OilChange)
                    >
                        "Cambio de aceite"
                    </a>
                    <a role="tab" class=move || kind_tab_class(MaintenanceKind::TireChange)
                        on:click=move |_| form.kind.set(MaintenanceKind::TireChange)
                    >
                        "Cambio de llantas"
                    </a>
                    <a role="tab" class=move || kind_tab_class(MaintenanceKind::Other)
                        on:click=move |_| form.kind.set(MaintenanceKind::Other)
                    >
                        "Otro"
                    </a>
                </div>

                <form on:submit=on_submit class="space-y-4">
                    <Show when=move || error_msg.get().is_some()>
                        <div role="alert" class="alert alert-error text-sm py-2">
                            <span>{move || error_msg.get().unwrap_or_default()}</span>
                        </div>
                    </Show>

                    {move || match form.kind.get() {
                        MaintenanceKind::OilChange => view! {
                            <OilChangeSection form=form />
                        }.into_any(),
                        MaintenanceKind::TireChange => view! {
                            <TireChangeSection form=form />
                        }.into_any(),
                        MaintenanceKind::Other => view! {
                            <OtherSection form=form />
                        }.into_any(),
                    }}

                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost"
                            on:click=move |_| on_close.run(())
                        >
                            "Cancelar"
                        </button>
                        <button type="submit" disabled=move || is_submitting.get() class="btn btn-primary">
                            {move || if is_submitting.get() {
                                view! { <span class="loading loading-spinner"></span> "Guardando..." }.into_any()
                            } else {
                                "Guardar".into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}

/// 机油更换表单段
#[component]
fn OilChangeSection(form: MaintenanceFormState) -> impl IntoView {
    view! {
        <div class="grid grid-cols-2 gap-4">
            <div class="form-control">
                <label class="label"><span class="label-text">"Kilometraje actual"</span></label>
                <input type="text" required inputmode="numeric"
                    class="input input-bordered w-full"
                    prop:value=form.oil_current_mileage
                    on:input=move |ev| form.set_oil_current_mileage(event_target_value(&ev))
                />
            </div>
            <div class="form-control">
                <label class="label"><span class="label-text">"Próximo cambio (km)"</span></label>
                <input type="text" required inputmode="numeric"
                    class="input input-bordered w-full"
                    prop:value=form.oil_next_mileage
                    on:input=move |ev| form.oil_next_mileage.set(event_target_value(&ev))
                />
            </div>
            <div class="form-control">
                <label class="label"><span class="label-text">"Valor"</span></label>
                <input type="text" required inputmode="numeric" placeholder="120.000"
                    class="input input-bordered w-full"
                    prop:value=form.oil_price
                    on:input=move |ev| form.oil_price.set(
                        form_state::format_price_input(&event_target_value(&ev))
                    )
                />
            </div>
            <div class="form-control">
                <label class="label"><span class="label-text">"Centro de servicio"</span></label>
                <input type="text" placeholder="No especificado"
                    class="input input-bordered w-full"
                    prop:value=form.oil_service_center
                    on:input=move |ev| form.oil_service_center.set(event_target_value(&ev))
                />
            </div>
        </div>
    }
}

/// 轮胎更换表单段
#[component]
fn TireChangeSection(form: MaintenanceFormState) -> impl IntoView {
    let vehicles_ctx = use_vehicles();

    let on_quote_tires = move |_| {
        let state = vehicles_ctx.state.get();
        if let Some(vehicle) = state.selected.as_ref() {
            crate::whatsapp::open_whatsapp(&crate::whatsapp::tires_quote_message(&vehicle.plate));
        }
    };

    view! {
        <div class="grid grid-cols-2 gap-4">
            <div class="form-control">
                <label class="label"><span class="label-text">"Fecha del último cambio"</span></label>
                <input type="date" required
                    class="input input-bordered w-full"
                    prop:value=form.tire_last_date
                    on:input=move |ev| form.set_tire_last_date(event_target_value(&ev))
                />
            </div>
            <div class="form-control">
                <label class="label"><span class="label-text">"Próximo cambio"</span></label>
                <input type="date" required
                    class="input input-bordered w-full"
                    prop:value=form.tire_next_date
                    on:input=move |ev| form.tire_next_date.set(event_target_value(&ev))
                />
            </div>
            <div class="form-control">
                <label class="label"><span class="label-text">"Kilometraje actual (opcional)"</span></label>
                <input type="text" inputmode="numeric"
                    class="input input-bordered w-full"
                    prop:value=form.tire_current_mileage
                    on:input=move |ev| form.tire_current_mileage.set(event_target_value(&ev))
                />
            </div>
            <div class="form-control">
                <label class="label"><span class="label-text">"Centro de servicio"</span></label>
                <input type="text" placeholder="No especificado"
                    class="input input-bordered w-full"
                    prop:value=form.tire_service_center
                    on:input=move |ev| form.tire_service_center.set(event_target_value(&ev))
                />
            </div>
            <div class="col-span-2">
                <button type="button" class="btn btn-ghost btn-sm text-primary"
                    on:click=on_quote_tires
                >
                    "Cotizar llantas por WhatsApp"
                </button>
            </div>
        </div>
    }
}

/// "其他"维护表单段：动态条目列表 + 合计
#[component]
fn OtherSection(form: MaintenanceFormState) -> impl IntoView {
    view! {
        <div class="space-y-4">
            <div class="grid grid-cols-2 gap-4">
                <div class="form-control">
                    <label class="label"><span class="label-text">"Kilometraje actual (opcional)"</span></label>
                    <input type="text" inputmode="numeric"
                        class="input input-bordered w-full"
                        prop:value=form.other_current_mileage
                        on:input=move |ev| form.other_current_mileage.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-control">
                    <label class="label"><span class="label-text">"Centro de servicio"</span></label>
                    <input type="text" placeholder="No especificado"
                        class="input input-bordered w-full"
                        prop:value=form.other_service_center
                        on:input=move |ev| form.other_service_center.set(event_target_value(&ev))
                    />
                </div>
            </div>

            <For
                each={move || (0..form.other_items.get().len()).collect::<Vec<_>>()}
                key=|index| *index
                children=move |index| {
                    let description = move || {
                        form.other_items.get().get(index).map(|i| i.0.clone()).unwrap_or_default()
                    };
                    let price = move || {
                        form.other_items.get().get(index).map(|i| i.1.clone()).unwrap_or_default()
                    };
                    view! {
                        <div class="flex gap-2 items-end">
                            <div class="form-control flex-1">
                                <label class="label"><span class="label-text">"Descripción"</span></label>
                                <input type="text"
                                    class="input input-bordered w-full"
                                    prop:value=description
                                    on:input=move |ev| form.set_other_description(index, event_target_value(&ev))
                                />
                            </div>
                            <div class="form-control w-36">
                                <label class="label"><span class="label-text">"Valor"</span></label>
                                <input type="text" inputmode="numeric"
                                    class="input input-bordered w-full"
                                    prop:value=price
                                    on:input=move |ev| form.set_other_price(index, event_target_value(&ev))
                                />
                            </div>
                            <button type="button" class="btn btn-ghost btn-square text-error"
                                on:click=move |_| form.remove_other_item(index)
                            >
                                <Trash attr:class="h-4 w-4" />
                            </button>
                        </div>
                    }
                }
            />

            <div class="flex justify-between items-center">
                <button type="button" class="btn btn-ghost btn-sm gap-2"
                    on:click=move |_| form.add_other_item()
                >
                    <Plus attr:class="h-4 w-4" /> "Agregar ítem"
                </button>
                <span class="font-bold">
                    "Total: $" {move || format_thousands(form.other_total() as i64)}
                </span>
            </div>
        </div>
    }
}
