//! 车辆信息对话框
//!
//! 车辆选择器 + 属性面板 + 新增车辆表单。
//! 新增成功后刷新集合；后端校验失败时展示字段级消息列表。

pub mod form_state;

use crate::auth::use_auth;
use crate::components::icons::{AlertCircle, Car, ChevronDown, Close, Plus};
use crate::context::user::use_user;
use crate::context::vehicles::{refresh_vehicles, use_vehicles};
use self::form_state::{VehicleFormState, build_request};
use leptos::prelude::*;
use leptos::task::spawn_local;
use tucarga_shared::format_date_es;

#[component]
pub fn VehiclesInformationDialog(#[prop(into)] on_close: Callback<()>) -> impl IntoView {
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

    let selected = move || vehicles_ctx.state.get().selected;
    let plates = move || {
        let state = vehicles_ctx.state.get();
        state
            .vehicles
            .unwrap_or_default()
            .iter()
            .map(|v| (v.plate.clone(), format!("{}-{}", v.line, v.plate)))
            .collect::<Vec<_>>()
    };
    let selected_plate = move || selected().map(|v| v.plate).unwrap_or_default();

    let on_vehicle_change = move |ev: web_sys::Event| {
        let plate = event_target_value(&ev);
        vehicles_ctx.set_state.update(|s| s.select_by_plate(&plate));
    };

    // 属性面板的 (标签, 值) 行
    let detail_rows = move || -> Vec<(&'static str, String)> {
        match selected() {
            Some(v) => vec![
                ("Línea", v.line.clone()),
                ("Cilindraje", v.engine_displacement.to_string()),
                ("Servicio", v.service_type.clone()),
                ("Motor", v.engine_id.clone()),
                ("VIN", v.vin.clone()),
                ("Chasis", v.chassis_id.clone()),
                ("Color", v.color.clone()),
                ("Ocupantes", v.passenger_capacity.to_string()),
                ("Combustible", v.fuel_type.clone()),
                ("Fecha matrícula", format_date_es(&v.registration_date)),
            ],
            None => Vec::new(),
        }
    };
    let transit_authority = move || {
        selected()
            .map(|v| format!("Secretaría de Movilidad de {}", v.from))
            .unwrap_or_default()
    };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| on_close.run(())>
            <div class="modal-box max-w-3xl">
                <div class="flex justify-between items-center mb-6">
                    <div class="flex items-center gap-4">
                        <div class="w-12 h-12 rounded-full bg-primary/20 text-primary flex items-center justify-center">
                            <Car attr:class="h-6 w-6" />
                        </div>
                        <h3 class="font-bold text-xl">"Información del vehículo"</h3>
                    </div>
                    <button
                        class="btn btn-ghost btn-circle btn-sm"
                        on:click=move |_| on_close.run(())
                    >
                        <Close attr:class="h-5 w-5" />
                    </button>
                </div>

                <div class="form-control mb-6 max-w-xs">
                    <label class="label">
                        <span class="label-text text-base-content/70">"Selecciona un vehículo"</span>
                    </label>
                    <div class="relative">
                        <select
                            class="select select-bordered rounded-full w-full pr-10 appearance-none"
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
                        <ChevronDown attr:class="h-4 w-4 absolute right-4 top-1/2 -translate-y-1/2 pointer-events-none opacity-60" />
                    </div>
                </div>

                <div class="divider my-0"></div>

                <Show
                    when=move || selected().is_some()
                    fallback=|| view! {
                        <p class="py-6 text-base-content/50">
                            "Aún no tienes vehículos registrados."
                        </p>
                    }
                >
                    <div class="grid grid-cols-2 gap-x-12 gap-y-4 text-sm py-6">
                        {move || detail_rows()
                            .into_iter()
                            .map(|(label, value)| view! {
                                <div>
                                    <p class="text-base-content/60">{label}</p>
                                    <p class="font-semibold">{value}</p>
                                </div>
                            })
                            .collect::<Vec<_>>()}
                        <div class="col-span-2">
                            <p class="text-base-content/60">"Organismo de tránsito"</p>
                            <p class="font-semibold">{transit_authority}</p>
                        </div>
                    </div>
                </Show>

                <div class="divider my-0"></div>

                <div class="pt-4">
                    <button
                        class="btn btn-primary rounded-full font-semibold gap-2"
                        on:click=move |_| set_show_add_form.set(true)
                    >
                        <Plus attr:class="h-4 w-4" /> "Agregar vehículo"
                    </button>
                </div>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>

        <Show when=move || show_add_form.get()>
            <AddVehicleDialog on_close=move |_: ()| set_show_add_form.set(false) />
        </Show>
    }
}

/// 新增车辆表单对话框
#[component]
pub fn AddVehicleDialog(#[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let auth_ctx = use_auth();
    let user_ctx = use_user();
    let vehicles_ctx = use_vehicles();
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if !dialog.open() {
                let _ = dialog.show_modal();
            }
        }
    });

    let form = VehicleFormState::new();
    let (is_submitting, set_is_submitting) = signal(false);
    let (errors, set_errors) = signal(Vec::<String>::new());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let Some(user_id) = user_ctx.state.get_untracked().user.map(|u| u.id) else {
            set_errors.set(vec![
                "Usuario no disponible. Por favor recarga la página.".to_string(),
            ]);
            return;
        };
        let req = match build_request(&form.snapshot(), user_id) {
            Ok(req) => req,
            Err(validation_errors) => {
                set_errors.set(validation_errors);
                return;
            }
        };

        set_is_submitting.set(true);
        set_errors.set(Vec::new());

        let api = auth_ctx.api();
        spawn_local(async move {
            match api.create_vehicle(&req).await {
                Ok(_) => {
                    refresh_vehicles(&vehicles_ctx, api).await;
                    on_close.run(());
                }
                Err(e) => {
                    let details = e.details();
                    if details.is_empty() {
                        set_errors.set(vec![e.to_string()]);
                    } else {
                        set_errors.set(details.to_vec());
                    }
                }
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| on_close.run(())>
            <div class="modal-box max-w-3xl">
                <div class="flex justify-between items-center mb-4">
                    <h3 class="font-bold text-xl">"Agregar nuevo vehículo"</h3>
                    <button
                        class="btn btn-ghost btn-circle btn-sm"
                        disabled=move || is_submitting.get()
                        on:click=move |_| on_close.run(())
                    >
                        <Close attr:class="h-5 w-5" />
                    </button>
                </div>

                <Show when=move || !errors.get().is_empty()>
                    <div role="alert" class="alert alert-error text-sm py-3 mb-4">
                        <AlertCircle attr:class="h-5 w-5" />
                        <div>
                            <span class="font-semibold block mb-1">"Error de validación"</span>
                            <ul class="list-disc pl-4">
                                <For
                                    each=move || errors.get()
                                    key=|e| e.clone()
                                    children=move |e| view! { <li>{e}</li> }
                                />
                            </ul>
                        </div>
                    </div>
                </Show>

                <form on:submit=on_submit class="space-y-4">
                    <div class="grid grid-cols-2 gap-x-8 gap-y-4 text-sm">
                        <TextField label="Placa*" value=form.plate placeholder="JNN813" />
                        <TextField label="Marca*" value=form.make placeholder="Renault" />
                        <TextField label="Línea*" value=form.line placeholder="Logan" />
                        <TextField label="Año*" value=form.year placeholder="2020" />
                        <TextField label="Documento del propietario*" value=form.dni_owner placeholder="123456789" />
                        <SelectField
                            label="Tipo de documento"
                            value=form.dni_owner_type
                            options=vec![("CC", "Cédula"), ("NIT", "NIT"), ("CE", "Cédula de extranjería")]
                        />
                        <SelectField
                            label="Tipo de vehículo"
                            value=form.vehicle_type
                            options=vec![("car", "Automóvil"), ("motorcycle", "Motocicleta"), ("truck", "Camión")]
                        />
                        <TextField label="Cilindraje*" value=form.engine_displacement placeholder="1600" />
                        <SelectField
                            label="Servicio"
                            value=form.service_type
                            options=vec![("private", "Particular"), ("public", "Público")]
                        />
                        <TextField label="Número de motor" value=form.engine_id placeholder="" />
                        <TextField label="VIN" value=form.vin placeholder="" />
                        <TextField label="Chasis" value=form.chassis_id placeholder="" />
                        <TextField label="Color" value=form.color placeholder="Rojo" />
                        <TextField label="Ocupantes*" value=form.passenger_capacity placeholder="5" />
                        <SelectField
                            label="Combustible"
                            value=form.fuel_type
                            options=vec![("gasolina", "Gasolina"), ("diesel", "Diésel"), ("gas", "Gas"), ("electrico", "Eléctrico")]
                        />
                        <DateField label="Fecha de matrícula*" value=form.registration_date />
                        <TextField label="Ciudad de matrícula" value=form.from placeholder="Medellín" />
                    </div>

                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost"
                            disabled=move || is_submitting.get()
                            on:click=move |_| on_close.run(())
                        >
                            "Cancelar"
                        </button>
                        <button type="submit" disabled=move || is_submitting.get() class="btn btn-primary">
                            {move || if is_submitting.get() {
                                view! { <span class="loading loading-spinner"></span> "Guardando..." }.into_any()
                            } else {
                                "Guardar vehículo".into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </dialog>
    }
}

#[component]
fn TextField(
    label: &'static str,
    value: RwSignal<String>,
    placeholder: &'static str,
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label class="label">
                <span class="label-text text-base-content/70">{label}</span>
            </label>
            <input type="text"
                placeholder=placeholder
                class="input input-bordered w-full"
                prop:value=value
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </div>
    }
}

#[component]
fn DateField(label: &'static str, value: RwSignal<String>) -> impl IntoView {
    view! {
        <div class="form-control">
            <label class="label">
                <span class="label-text text-base-content/70">{label}</span>
            </label>
            <input type="date"
                class="input input-bordered w-full"
                prop:value=value
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </div>
    }
}

#[component]
fn SelectField(
    label: &'static str,
    value: RwSignal<String>,
    options: Vec<(&'static str, &'static str)>,
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label class="label">
                <span class="label-text text-base-content/70">{label}</span>
            </label>
            <select
                class="select select-bordered w-full"
                prop:value=value
                on:change=move |ev| value.set(event_target_value(&ev))
            >
                {options
                    .into_iter()
                    .map(|(option_value, option_label)| view! {
                        <option value=option_value selected=move || value.get() == option_value>
                            {option_label}
                        </option>
                    })
                    .collect::<Vec<_>>()}
            </select>
        </div>
    }
}
