//! 驾驶证详情对话框
//!
//! 驾驶证是用户级证件（不挂在车辆下），只读展示 + WhatsApp 报价。
//! 客户端没有新增入口，证件由后端在别处登记。

use crate::components::dashboard::status_badge_class;
use crate::components::icons::{Close, IdCard};
use crate::context::user_items::use_user_items;
use crate::whatsapp;
use chrono::Utc;
use leptos::prelude::*;
use tucarga_shared::{DocumentStatus, format_date_es, status_from_expiry};

#[component]
pub fn LicenseDetailDialog(#[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let items_ctx = use_user_items();
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if !dialog.open() {
                let _ = dialog.show_modal();
            }
        }
    });

    let license = move || items_ctx.state.get().license().cloned();
    let status = move || match license() {
        Some(item) => status_from_expiry(item.expiry_date.as_deref(), Utc::now()),
        None => DocumentStatus::SinInformacion,
    };

    let on_quote = move |_| {
        if let Some(item) = license() {
            whatsapp::open_whatsapp(&whatsapp::license_quote_message(
                &item.item_identifier,
                &item.license_category,
            ));
        }
    };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| on_close.run(())>
            <div class="modal-box max-w-2xl">
                <div class="flex justify-between items-center mb-4">
                    <div class="flex items-center gap-4">
                        <div class="w-12 h-12 rounded-full bg-primary/20 text-primary flex items-center justify-center">
                            <IdCard attr:class="h-6 w-6" />
                        </div>
                        <h3 class="font-bold text-xl">
                            {move || if license().is_some() {
                                "Licencia de conducción"
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

                {move || if let Some(item) = license() {
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

                            <div class="grid grid-cols-3 mx-4 gap-4">
                                <div>
                                    <span class="text-base-content/70 block mb-1">"Identificación"</span>
                                    <span class="badge badge-neutral badge-outline font-mono">
                                        {item.item_identifier.clone()}
                                    </span>
                                </div>
                                <div>
                                    <span class="text-base-content/70 block mb-1">"Categoría"</span>
                                    <span class="font-bold">{item.license_category.clone()}</span>
                                </div>
                                <div>
                                    <span class="text-base-content/70 block mb-1">"Servicio"</span>
                                    <span class="font-bold">{item.vehicle_type.clone()}</span>
                                </div>
                            </div>

                            <div class="modal-action justify-start mx-4">
                                <button class="btn btn-primary rounded-full font-bold" on:click=on_quote>
                                    "Cotizar licencia"
                                </button>
                            </div>
                        </div>
                    }.into_any()
                } else {
                    view! {
                        <p>
                            "No tenemos la información de tu licencia todavía."
                        </p>
                    }.into_any()
                }}
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}
