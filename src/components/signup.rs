use crate::auth::use_auth;
use crate::components::icons::UserCircle;
use crate::web::router::use_navigate;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tucarga_shared::SignupRequest;

/// 注册页面
///
/// 注册成功后立刻发送邮箱验证码并跳转到验证页。
/// 后端校验失败时展示字段级消息列表。
#[component]
pub fn SignUpPage() -> impl IntoView {
    let auth_ctx = use_auth();
    let navigate = use_navigate();

    let (name, set_name) = signal(String::new());
    let (last_name, set_last_name) = signal(String::new());
    let (phone, set_phone) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (errors, set_errors) = signal(Vec::<String>::new());

    let nav_submit = navigate.clone();
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_errors.set(Vec::new());
        set_is_submitting.set(true);

        let req = SignupRequest {
            name: name.get_untracked(),
            last_name: last_name.get_untracked(),
            phone: phone.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
        };

        let api = auth_ctx.api();
        let navigate = nav_submit.clone();
        spawn_local(async move {
            match api.signup(&req).await {
                Ok(()) => {
                    // 验证码发送失败不阻断流程，验证页可以重发
                    if let Err(e) = api.send_verification_code(req.email.clone()).await {
                        web_sys::console::warn_1(
                            &format!("[SignUp] send code failed: {}", e).into(),
                        );
                    }
                    navigate(&format!(
                        "/verify-email?email={}",
                        urlencoding::encode(&req.email)
                    ));
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

    let nav_login = navigate;

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <UserCircle attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Crear cuenta"</h1>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || !errors.get().is_empty()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <ul class="list-disc pl-4">
                                    <For
                                        each=move || errors.get()
                                        key=|e| e.clone()
                                        children=move |e| view! { <li>{e}</li> }
                                    />
                                </ul>
                            </div>
                        </Show>

                        <div class="grid grid-cols-2 gap-4">
                            <div class="form-control">
                                <label class="label" for="name">
                                    <span class="label-text">"Nombre"</span>
                                </label>
                                <input id="name" required
                                    type="text"
                                    on:input=move |ev| set_name.set(event_target_value(&ev))
                                    prop:value=name
                                    class="input input-bordered w-full"
                                />
                            </div>
                            <div class="form-control">
                                <label class="label" for="last_name">
                                    <span class="label-text">"Apellido"</span>
                                </label>
                                <input id="last_name" required
                                    type="text"
                                    on:input=move |ev| set_last_name.set(event_target_value(&ev))
                                    prop:value=last_name
                                    class="input input-bordered w-full"
                                />
                            </div>
                        </div>

                        <div class="form-control">
                            <label class="label" for="phone">
                                <span class="label-text">"Celular"</span>
                            </label>
                            <input id="phone" required
                                type="tel"
                                placeholder="3001234567"
                                on:input=move |ev| set_phone.set(event_target_value(&ev))
                                prop:value=phone
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Correo"</span>
                            </label>
                            <input id="email" required
                                type="email"
                                placeholder="correo@ejemplo.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Contraseña"</span>
                            </label>
                            <input id="password" required
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                            />
                        </div>

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Creando cuenta..." }.into_any()
                                } else {
                                    "Crear cuenta".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2">
                            "¿Ya tienes cuenta? "
                            <a class="link link-primary" on:click=move |_| nav_login("/login")>
                                "Iniciar sesión"
                            </a>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
