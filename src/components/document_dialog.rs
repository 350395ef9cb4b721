//! 车辆证件对话框
//!
//! 同一个组件服务四种证件类别（SOAT、技术机械检验、道路工具包、
//! 保险单）：详情视图、记录缺失时的"无信息"视图，以及新增表单。
//! 新增成功后直接刷新车辆集合（后端写后读即时一致，不做固定延时）。

use crate::auth::use_auth;
use crate::components::dashboard::status_badge_class;
use crate::components::icons::{Close, FileCheck};
use crate::context::vehicles::{refresh_vehicles, use_vehicles};
use crate::whatsapp;
use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tucarga_shared::{
    CreateVehicleItemRequest, DocumentKind, DocumentStatus, format_date_es, status_from_expiry,
};

#[component]
pub fn DocumentDetailDialog(
    kind: DocumentKind,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let vehicles_ctx = use_vehicles();
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if !dialog.open() {
                let _ = dialog.show_modal();
            }
        }
    });

    let (show_add_form, set_show_add_form) = signal(false);

    let item = move || {
        let state = vehicles_ctx.state.get();
        state
            .selected
            .as_ref()
            .and_then(|v| v.find_item(kind).cloned())
    };
    let vehicle_id = move || vehicles_ctx.state.get().selected.as_ref().map(|v| v.id);
    let plate = move || {
        vehicles_ctx
            .state
            .get()
            .selected
            .map(|v| v.plate)
            .unwrap_or_default()
    };
    // 状态在渲染时推导；记录缺失 -> SinInformacion（调用方职责）
    let status = move || match item() {
        Some(i) => status_from_expiry(i.expiry_date.as_deref(), Utc::now()),
        None => DocumentStatus::SinInformacion,
    };

    // 提醒开关只是本地状态，从不持久化
    let (remind_day, set_remind_day) = signal(false);
    let (remind_week, set_remind_week) = signal(false);
    let (remind_month, set_remind_month) = signal(false);

    let on_quote = move |_| {
        whatsapp::open_whatsapp(&whatsapp::quote_message(kind, &plate()));
    };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| on_close.run(())>
            <div class="modal-box max-w-2xl">
                // 头部
                <div class="flex justify-between items-center mb-4">
                    <div class="flex items-center gap-4">
                        <div class="w-12 h-12 rounded-full bg-primary/20 text-primary flex items-center justify-center">
                            <FileCheck attr:class="h-6 w-6" />
                        </div>
                        <h3 class="font-bold text-xl">
                            {move || if item().is_some() {
                                kind.title()
                            } else {
                                "Información no disponible"
                            }}
                        </h3>
                    </div>
                    <button
                        class="btn btn-ghost btn-circle btn-sm"
                        on:click=move |_| on_close.run(())
                    >
                        <Close attr:class="h-5 w-5" />
                    </button>
                </div>

                {move || if let Some(item) = item() {
                    view! {
                        <div class="space-y-6">
                            <div class="flex justify-between mx-4">
                                <div class="flex flex-col items-center gap-2">
                                    <span class="text-base-content/70">"Estado"</span>
                                    <span class=move || format!("badge font-bold {}", status_badge_class(status()))>
                                        {move || status().label()}
                                    </span>
                                </div>
                                <div class="flex flex-col items-center gap-2">
                                    <span class="text-base-content/70">"Vencimiento"</span>
                                    <span class="font-bold">
                                        {format_date_es(item.expiry_date.as_deref().unwrap_or_default())}
                                    </span>
                                </div>
                                <div class="flex flex-col items-center gap-2">
                                    <span class="text-base-content/70">"Expedición"</span>
                                    <span class="font-bold">{format_date_es(&item.issue_date)}</span>
                                </div>
                            </div>

                            <div class="divider my-0"></div>

                            <div class="mx-4">
                                <span class="text-base-content/70 block mb-1">{kind.identifier_label()}</span>
                                <span class="badge badge-neutral badge-outline font-mono">
                                    {item.item_identifier.clone()}
                                </span>
                            </div>

                            <div class="divider my-0"></div>

                            // 提醒开关（仅本地）
                            <div class="mx-4 space-y-3">
                                <h4 class="font-bold">"Activar recordatorio"</h4>
                                <div class="flex justify-between items-center">
                                    <span class="text-base-content/70">"1 día antes de vencer"</span>
                                    <input type="checkbox" class="toggle toggle-primary"
                                        prop:checked=remind_day
                                        on:change=move |ev| set_remind_day.set(event_target_checked(&ev))
                                    />
                                </div>
                                <div class="flex justify-between items-center">
                                    <span class="text-base-content/70">"1 semana antes de vencer"</span>
                                    <input type="checkbox" class="toggle toggle-primary"
                                        prop:checked=remind_week
                                        on:change=move |ev| set_remind_week.set(event_target_checked(&ev))
                                    />
                                </div>
                                <div class="flex justify-between items-center">
                                    <span class="text-base-content/70">"1 mes antes de vencer"</span>
                                    <input type="checkbox" class="toggle toggle-primary"
                                        prop:checked=remind_month
                                        on:change=move |ev| set_remind_month.set(event_target_checked(&ev))
                                    />
                                </div>
                            </div>

                            <div class="modal-action justify-start mx-4">
                                <button class="btn btn-primary rounded-full font-bold" on:click=on_quote>
                                    "Cotizar"
                                </button>
                            </div>
                        </div>
                    }.into_any()
                } else {
                    view! {
                        <div class="space-y-4">
                            <p>
                                "No tenemos esa información, por favor agrega la información para ver los detalles."
                            </p>
                            <Show when=move || vehicle_id().is_some()>
                                <button
                                    class="btn btn-primary rounded-full font-bold"
                                    on:click=move |_| set_show_add_form.set(true)
                                >
                                    "Agregar información"
                                </button>
                            </Show>
                        </div>
                    }.into_any()
                }}
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>

        <Show when=move || show_add_form.get() && vehicle_id().is_some()>
            <AddDocumentDialog
                kind=kind
                vehicle_id=vehicle_id().unwrap_or_default()
                on_close=move |saved: bool| {
                    set_show_add_form.set(false);
                    // 保存成功后连详情一起关闭，面板上的状态已经刷新
                    if saved {
                        on_close.run(());
                    }
                }
            />
        </Show>
    }
}

/// 新增证件表单对话框
#[component]
pub fn AddDocumentDialog(
    kind: DocumentKind,
    vehicle_id: i64,
    #[prop(into)] on_close: Callback<bool>,
) -> impl IntoView {
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

    let (issue_date, set_issue_date) = signal(String::new());
    let (expiry_date, set_expiry_date) = signal(String::new());
    let (identifier, set_identifier) = signal(String::new());
    let (loading, set_loading) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_loading.set(true);
        set_error_msg.set(None);

        let req = CreateVehicleItemRequest {
            vehicle_id,
            item_type: kind.wire_type().to_string(),
            issue_date: issue_date.get_untracked(),
            expiry_date: expiry_date.get_untracked(),
            item_identifier: identifier.get_untracked(),
        };

        let api = auth_ctx.api();
        spawn_local(async move {
            match api.create_vehicle_item(&req).await {
                Ok(()) => {
                    // 写入即读到：立刻刷新集合，不做固定延时
                    refresh_vehicles(&vehicles_ctx, api).await;
                    on_close.run(true);
                }
                Err(e) => {
                    // 失败时对话框保持打开，用户可以修正后重试
                    set_error_msg.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| on_close.run(false)>
            <div class="modal-box max-w-xl">
                <div class="flex justify-between items-center mb-4">
                    <h3 class="font-bold text-xl">"Agregar " {kind.title()}</h3>
                    <button
                        class="btn btn-ghost btn-circle btn-sm"
                        on:click=move |_| on_close.run(false)
                    >
                        <Close attr:class="h-5 w-5" />
                    </button>
                </div>

                <form on:submit=on_submit class="space-y-4">
                    <Show when=move || error_msg.get().is_some()>
                        <div role="alert" class="alert alert-error text-sm py-2">
                            <span>{move || error_msg.get().unwrap_or_default()}</span>
                        </div>
                    </Show>

                    <div class="form-control">
                        <label class="label" for="issue_date">
                            <span class="label-text">"Fecha de expedición"</span>
                        </label>
                        <input id="issue_date" required
                            type="date"
                            on:input=move |ev| set_issue_date.set(event_target_value(&ev))
                            prop:value=issue_date
                            class="input input-bordered w-full"
                        />
                    </div>
                    <div class="form-control">
                        <label class="label" for="expiry_date">
                            <span class="label-text">"Fecha de vencimiento"</span>
                        </label>
                        <input id="expiry_date" required
                            type="date"
                            on:input=move |ev| set_expiry_date.set(event_target_value(&ev))
                            prop:value=expiry_date
                            class="input input-bordered w-full"
                        />
                    </div>
                    <div class="form-control">
                        <label class="label" for="identifier">
                            <span class="label-text">{kind.identifier_label()}</span>
                        </label>
                        <input id="identifier" required
                            type="text"
                            placeholder="Ingrese el número"
                            on:input=move |ev| set_identifier.set(event_target_value(&ev))
                            prop:value=identifier
                            class="input input-bordered w-full"
                        />
                    </div>

                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost"
                            on:click=move |_| on_close.run(false)
                        >
                            "Cancelar"
                        </button>
                        <button type="submit" disabled=move || loading.get() class="btn btn-primary">
                            {move || if loading.get() {
                                view! { <span class="loading loading-spinner"></span> "Guardando..." }.into_any()
                            } else {
                                "Guardar información".into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </dialog>
    }
}
