use crate::auth::{logout, use_auth};
use crate::components::document_dialog::DocumentDetailDialog;
use crate::components::icons::*;
use crate::components::license_dialog::LicenseDetailDialog;
use crate::components::maintenance_dialog::MaintenanceDialog;
use crate::components::maintenance_report_dialog::MaintenanceReportDialog;
use crate::components::vehicle_dialog::VehiclesInformationDialog;
use crate::context::user::{refresh_user, use_user};
use crate::context::user_items::{load_user_items, use_user_items};
use crate::context::vehicles::{refresh_vehicles, use_vehicles};
use crate::whatsapp;
use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tucarga_shared::{DocumentKind, DocumentStatus, status_from_expiry};

/// 当前打开的对话框
#[derive(Clone, Copy, PartialEq)]
enum ActiveDialog {
    Document(DocumentKind),
    License,
    Maintenance,
    Report,
    VehicleInfo,
}

/// 状态徽章的 daisyUI 颜色类
pub(crate) fn status_badge_class(status: DocumentStatus) -> &'static str {
    match status {
        DocumentStatus::Vigente => "badge-success",
        DocumentStatus::ProxVencer => "badge-warning",
        DocumentStatus::Vencido | DocumentStatus::SinInformacion => "badge-error",
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth_ctx = use_auth();
    let user_ctx = use_user();
    let vehicles_ctx = use_vehicles();
    let items_ctx = use_user_items();

    // 显式的启动序列：先解析用户，成功后才加载用户证件
    // （证件接口依赖用户 id）；车辆集合与之并行。
    Effect::new(move |_| {
        let state = auth_ctx.state.get();
        if !state.is_loading && state.is_authenticated() {
            let api = state.api.clone();
            let api_vehicles = state.api.clone();
            spawn_local(async move {
                if let Some(user) = refresh_user(&user_ctx, api.clone()).await {
                    load_user_items(&items_ctx, api, user.id).await;
                }
            });
            spawn_local(async move {
                refresh_vehicles(&vehicles_ctx, api_vehicles).await;
            });
        }
    });

    let active_dialog = RwSignal::new(Option::<ActiveDialog>::None);

    // 证件状态是渲染时的纯推导，从不存储。
    // 记录不存在时由这里（调用方）给出 SinInformacion。
    let vehicle_doc_status = move |kind: DocumentKind| {
        let state = vehicles_ctx.state.get();
        match state.selected.as_ref().and_then(|v| v.find_item(kind)) {
            Some(item) => status_from_expiry(item.expiry_date.as_deref(), Utc::now()),
            None => DocumentStatus::SinInformacion,
        }
    };
    let license_status = move || {
        let state = items_ctx.state.get();
        match state.license() {
            Some(item) => status_from_expiry(item.expiry_date.as_deref(), Utc::now()),
            None => DocumentStatus::SinInformacion,
        }
    };
    let maintenance_status = move || {
        let state = vehicles_ctx.state.get();
        match state.selected.as_ref() {
            Some(v) if !v.maintenances.is_empty() => DocumentStatus::Vigente,
            _ => DocumentStatus::SinInformacion,
        }
    };

    let user_name = move || {
        user_ctx
            .state
            .get()
            .user
            .map(|u| u.full_name())
            .unwrap_or_default()
    };
    let greeting_name = move || {
        user_ctx
            .state
            .get()
            .user
            .map(|u| u.name)
            .unwrap_or_else(|| "conductor".to_string())
    };
    let selected_plate = move || {
        vehicles_ctx
            .state
            .get()
            .selected
            .map(|v| v.plate)
            .unwrap_or_default()
    };
    let vehicles_error = move || vehicles_ctx.state.get().error;
    let is_loading_user = move || user_ctx.state.get().is_loading;

    let on_logout = move |_| {
        // 导航由路由服务的认证监听自动处理
        logout(&auth_ctx);
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
                // 顶栏
                <div class="navbar bg-neutral text-neutral-content rounded-box shadow-xl">
                    <div class="flex-1 gap-2">
                        <Car attr:class="text-primary h-7 w-7 ml-2" />
                        <a class="btn btn-ghost text-xl">"TuCarga"</a>
                    </div>
                    <div class="flex-none">
                        <div class="dropdown dropdown-end">
                            <div tabindex="0" role="button" class="btn btn-ghost gap-2">
                                <span class="font-semibold hidden md:inline">{user_name}</span>
                                <UserCircle attr:class="h-7 w-7 text-primary" />
                            </div>
                            <ul tabindex="0" class="dropdown-content z-[1] menu p-2 shadow bg-base-100 text-base-content rounded-box w-64">
                                <li>
                                    <a on:click=move |_| active_dialog.set(Some(ActiveDialog::VehicleInfo))>
                                        <Car attr:class="h-4 w-4" /> "Información del vehículo"
                                    </a>
                                </li>
                                <li>
                                    <a on:click=move |_| active_dialog.set(Some(ActiveDialog::Report))>
                                        <Wrench attr:class="h-4 w-4" /> "Reporte mantenimiento"
                                    </a>
                                </li>
                                <li>
                                    <a on:click=on_logout class="text-error">
                                        <LogOut attr:class="h-4 w-4" /> "Cerrar sesión"
                                    </a>
                                </li>
                            </ul>
                        </div>
                    </div>
                </div>

                // 拖车服务横幅
                <div class="hero bg-neutral text-neutral-content rounded-box shadow-xl">
                    <div class="hero-content flex-col md:flex-row justify-between w-full py-8">
                        <div>
                            <h2 class="text-2xl font-bold whitespace-pre-line">
                                "Solicita tu grúa o transporte\nde carga 24/7"
                            </h2>
                            <p class="py-2 text-neutral-content/70">
                                "En TuCarga estamos listos para asistirte en cualquier momento."
                            </p>
                        </div>
                        <button
                            class="btn btn-primary rounded-full font-bold"
                            on:click=move |_| whatsapp::open_whatsapp(&whatsapp::tow_service_message())
                        >
                            "Solicitar grúa"
                        </button>
                    </div>
                </div>

                <Show
                    when=move || !is_loading_user()
                    fallback=|| view! {
                        <div class="flex items-center justify-center py-16">
                            <span class="loading loading-spinner loading-lg text-primary"></span>
                        </div>
                    }
                >
                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body">
                            <h2 class="text-2xl font-bold">"Hola, " {greeting_name}</h2>
                            <Show when=move || !selected_plate().is_empty()>
                                <span class="badge badge-neutral font-semibold">{selected_plate}</span>
                            </Show>
                            <p class="text-base-content/70">
                                "Selecciona una de las categorías para gestionar un recordatorio"
                            </p>

                            <Show when=move || vehicles_error().is_some()>
                                <div role="alert" class="alert alert-error text-sm py-2">
                                    <span>{move || vehicles_error().unwrap_or_default()}</span>
                                </div>
                            </Show>

                            <div class="grid grid-cols-2 sm:grid-cols-3 lg:grid-cols-4 gap-4 mt-4">
                                <DocumentCard
                                    title="Seguro SOAT"
                                    status=Signal::derive(move || vehicle_doc_status(DocumentKind::Soat))
                                    on_open=move |_: ()| active_dialog.set(Some(ActiveDialog::Document(DocumentKind::Soat)))
                                >
                                    <ShieldCheck attr:class="h-8 w-8" />
                                </DocumentCard>
                                <DocumentCard
                                    title="Tecnico mecánica"
                                    status=Signal::derive(move || vehicle_doc_status(DocumentKind::Tecno))
                                    on_open=move |_: ()| active_dialog.set(Some(ActiveDialog::Document(DocumentKind::Tecno)))
                                >
                                    <FileCheck attr:class="h-8 w-8" />
                                </DocumentCard>
                                <DocumentCard
                                    title="Licencia de conducción"
                                    status=Signal::derive(license_status)
                                    on_open=move |_: ()| active_dialog.set(Some(ActiveDialog::License))
                                >
                                    <IdCard attr:class="h-8 w-8" />
                                </DocumentCard>
                                <DocumentCard
                                    title="Kit de carretera"
                                    status=Signal::derive(move || vehicle_doc_status(DocumentKind::RoadKit))
                                    on_open=move |_: ()| active_dialog.set(Some(ActiveDialog::Document(DocumentKind::RoadKit)))
                                >
                                    <LifeBuoy attr:class="h-8 w-8" />
                                </DocumentCard>
                                <DocumentCard
                                    title="Polizas de seguro"
                                    status=Signal::derive(move || vehicle_doc_status(DocumentKind::Insurance))
                                    on_open=move |_: ()| active_dialog.set(Some(ActiveDialog::Document(DocumentKind::Insurance)))
                                >
                                    <ShieldCheck attr:class="h-8 w-8" />
                                </DocumentCard>
                                <DocumentCard
                                    title="Mantenimiento"
                                    status=Signal::derive(maintenance_status)
                                    on_open=move |_: ()| active_dialog.set(Some(ActiveDialog::Maintenance))
                                >
                                    <Wrench attr:class="h-8 w-8" />
                                </DocumentCard>
                            </div>
                        </div>
                    </div>
                </Show>

                // 对话框出口
                {move || match active_dialog.get() {
                    Some(ActiveDialog::Document(kind)) => view! {
                        <DocumentDetailDialog kind=kind on_close=move |_: ()| active_dialog.set(None) />
                    }.into_any(),
                    Some(ActiveDialog::License) => view! {
                        <LicenseDetailDialog on_close=move |_: ()| active_dialog.set(None) />
                    }.into_any(),
                    Some(ActiveDialog::Maintenance) => view! {
                        <MaintenanceDialog on_close=move |_: ()| active_dialog.set(None) />
                    }.into_any(),
                    Some(ActiveDialog::Report) => view! {
                        <MaintenanceReportDialog on_close=move |_: ()| active_dialog.set(None) />
                    }.into_any(),
                    Some(ActiveDialog::VehicleInfo) => view! {
                        <VehiclesInformationDialog on_close=move |_: ()| active_dialog.set(None) />
                    }.into_any(),
                    None => view! { <></> }.into_any(),
                }}
            </div>
        </div>
    }
}

/// 证件卡片
#[component]
fn DocumentCard(
    title: &'static str,
    status: Signal<DocumentStatus>,
    #[prop(into)] on_open: Callback<()>,
    children: Children,
) -> impl IntoView {
    view! {
        <div
            class="card bg-base-100 border border-base-200 shadow-md hover:shadow-xl hover:scale-105 transition-all cursor-pointer"
            on:click=move |_| on_open.run(())
        >
            <div class="card-body items-center text-center gap-3 p-4">
                <div class="p-3 rounded-full bg-base-200 text-primary">{children()}</div>
                <h3 class="font-semibold text-sm">{title}</h3>
                <span class=move || format!("badge badge-sm font-bold {}", status_badge_class(status.get()))>
                    {move || status.get().label()}
                </span>
            </div>
        </div>
    }
}
