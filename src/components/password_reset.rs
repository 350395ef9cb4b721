//! 密码找回流程：申请重置 -> 邮件链接重置 -> 完成

use crate::auth::use_auth;
use crate::components::icons::ShieldCheck;
use crate::web::router::{query_param, use_navigate};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 申请重置密码页面
#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let auth_ctx = use_auth();

    let (email, set_email) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (sent, set_sent) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_is_submitting.set(true);
        set_error_msg.set(None);

        let api = auth_ctx.api();
        spawn_local(async move {
            match api.forgot_password(email.get_untracked()).await {
                Ok(()) => set_sent.set(true),
                Err(e) => set_error_msg.set(Some(e.to_string())),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <h1 class="text-2xl font-bold mb-4">"Recuperar contraseña"</h1>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <Show
                        when=move || !sent.get()
                        fallback=|| view! {
                            <div class="card-body text-center">
                                <p>"Si el correo existe, recibirás un enlace para restablecer tu contraseña."</p>
                            </div>
                        }
                    >
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
                            <div class="form-control mt-6">
                                <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                    {move || if is_submitting.get() {
                                        view! { <span class="loading loading-spinner"></span> "Enviando..." }.into_any()
                                    } else {
                                        "Enviar enlace".into_any()
                                    }}
                                </button>
                            </div>
                        </form>
                    </Show>
                </div>
            </div>
        </div>
    }
}

/// 重置密码页面（token 来自邮件链接的查询串）
#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let auth_ctx = use_auth();
    let navigate = use_navigate();

    let token = query_param("token").unwrap_or_default();
    let (password, set_password) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if password.get() != confirm.get() {
            set_error_msg.set(Some("Las contraseñas no coinciden".to_string()));
            return;
        }
        if token.is_empty() {
            set_error_msg.set(Some("Enlace de recuperación inválido".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let api = auth_ctx.api();
        let token = token.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            match api.reset_password(token, password.get_untracked()).await {
                Ok(()) => navigate("/password-reseted"),
                Err(e) => set_error_msg.set(Some(e.to_string())),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <h1 class="text-2xl font-bold mb-4">"Nueva contraseña"</h1>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Contraseña"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="confirm">
                                <span class="label-text">"Confirmar contraseña"</span>
                            </label>
                            <input
                                id="confirm"
                                type="password"
                                on:input=move |ev| set_confirm.set(event_target_value(&ev))
                                prop:value=confirm
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Guardando..." }.into_any()
                                } else {
                                    "Restablecer contraseña".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}

/// 密码重置成功页面
#[component]
pub fn PasswordResetedPage() -> impl IntoView {
    let navigate = use_navigate();

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content text-center">
                <div class="max-w-md space-y-4">
                    <div class="flex justify-center text-success">
                        <ShieldCheck attr:class="h-16 w-16" />
                    </div>
                    <h1 class="text-3xl font-bold">"Contraseña actualizada"</h1>
                    <p class="text-base-content/70">
                        "Ya puedes iniciar sesión con tu nueva contraseña."
                    </p>
                    <button class="btn btn-primary" on:click=move |_| navigate("/login")>
                        "Iniciar sesión"
                    </button>
                </div>
            </div>
        </div>
    }
}
