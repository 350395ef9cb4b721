use crate::auth::use_auth;
use crate::components::icons::ShieldCheck;
use crate::web::router::{query_param, use_navigate};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 邮箱验证码页面
///
/// 邮箱地址来自查询串（注册页跳转时携带）。
#[component]
pub fn VerifyEmailPage() -> impl IntoView {
    let auth_ctx = use_auth();
    let navigate = use_navigate();

    let email = query_param("email").unwrap_or_default();
    let (code, set_code) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (is_resending, set_is_resending) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (info_msg, set_info_msg) = signal(Option::<String>::None);

    let email_submit = email.clone();
    let nav_submit = navigate.clone();
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if code.get().trim().is_empty() {
            set_error_msg.set(Some("Ingresa el código de verificación".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let api = auth_ctx.api();
        let email = email_submit.clone();
        let navigate = nav_submit.clone();
        spawn_local(async move {
            match api.verify_code(email, code.get_untracked()).await {
                Ok(()) => navigate("/email-verified"),
                Err(e) => set_error_msg.set(Some(e.to_string())),
            }
            set_is_submitting.set(false);
        });
    };

    let email_resend = email.clone();
    let on_resend = move |_| {
        set_is_resending.set(true);
        set_info_msg.set(None);
        set_error_msg.set(None);

        let api = auth_ctx.api();
        let email = email_resend.clone();
        spawn_local(async move {
            match api.send_verification_code(email).await {
                Ok(()) => set_info_msg.set(Some("Código reenviado a tu correo".to_string())),
                Err(e) => set_error_msg.set(Some(e.to_string())),
            }
            set_is_resending.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <ShieldCheck attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-2xl font-bold">"Verifica tu correo"</h1>
                        <p class="text-base-content/70">
                            "Enviamos un código a " <span class="font-semibold">{email.clone()}</span>
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
                        <Show when=move || info_msg.get().is_some()>
                            <div role="alert" class="alert alert-success text-sm py-2">
                                <span>{move || info_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="code">
                                <span class="label-text">"Código de verificación"</span>
                            </label>
                            <input
                                id="code"
                                type="text"
                                placeholder="123456"
                                on:input=move |ev| set_code.set(event_target_value(&ev))
                                prop:value=code
                                class="input input-bordered text-center tracking-[0.5em] font-mono"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Verificando..." }.into_any()
                                } else {
                                    "Verificar".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2">
                            "¿No llegó el código? "
                            <button
                                type="button"
                                class="link link-primary"
                                disabled=move || is_resending.get()
                                on:click=on_resend
                            >
                                "Reenviar"
                            </button>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}

/// 邮箱验证成功页面
#[component]
pub fn EmailVerifiedPage() -> impl IntoView {
    let navigate = use_navigate();

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content text-center">
                <div class="max-w-md space-y-4">
                    <div class="flex justify-center text-success">
                        <ShieldCheck attr:class="h-16 w-16" />
                    </div>
                    <h1 class="text-3xl font-bold">"¡Correo verificado!"</h1>
                    <p class="text-base-content/70">
                        "Tu cuenta quedó activa. Ya puedes iniciar sesión."
                    </p>
                    <button class="btn btn-primary" on:click=move |_| navigate("/login")>
                        "Iniciar sesión"
                    </button>
                </div>
            </div>
        </div>
    }
}
