use crate::auth::{self, use_auth};
use crate::components::icons::ShieldCheck;
use crate::web::router::use_navigate;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth_ctx = use_auth();
    let navigate = use_navigate();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if email.get().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("Completa todos los campos".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let api = auth_ctx.api();
        spawn_local(async move {
            match api
                .login(email.get_untracked(), password.get_untracked())
                .await
            {
                Ok(resp) => {
                    // 路由服务监听认证信号，登录成功后自动跳转到面板
                    auth::login(&auth_ctx, resp.token);
                }
                Err(e) => {
                    set_error_msg.set(Some(e.to_string()));
                }
            }
            set_is_submitting.set(false);
        });
    };

    let nav_forgot = navigate.clone();
    let nav_signup = navigate;

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <ShieldCheck attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Iniciar sesión"</h1>
                        <p class="text-base-content/70">
                            "Ingresa tus credenciales para continuar"
                        </p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Correo"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="correo@ejemplo.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Contraseña"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                            <label class="label">
                                <a
                                    class="label-text-alt link link-hover"
                                    on:click=move |_| nav_forgot("/forgot-password")
                                >
                                    "¿Olvidaste tu contraseña?"
                                </a>
                            </label>
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Ingresando..." }.into_any()
                                } else {
                                    "Iniciar sesión".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2">
                            "¿No tienes cuenta? "
                            <a class="link link-primary" on:click=move |_| nav_signup("/signup")>
                                "Crear cuenta"
                            </a>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
