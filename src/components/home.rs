//! 首页：登录 / 注册入口

use crate::components::icons::Car;
use crate::web::router::use_navigate;
use leptos::prelude::*;

#[component]
pub fn HomePage() -> impl IntoView {
    let navigate = use_navigate();
    let nav_login = navigate.clone();
    let nav_signup = navigate;

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <Car attr:class="h-10 w-10" />
                        </div>
                        <h1 class="text-3xl font-bold">"TuCarga"</h1>
                        <p class="text-base-content/70">
                            "Gestiona los documentos y el mantenimiento de tus vehículos"
                        </p>
                    </div>
                </div>

                <div class="space-y-4 w-full max-w-xs">
                    <button
                        on:click=move |_| nav_login("/login")
                        class="btn btn-primary w-full rounded-3xl font-bold"
                    >
                        "Iniciar sesión"
                    </button>
                    <button
                        on:click=move |_| nav_signup("/signup")
                        class="btn btn-neutral w-full rounded-3xl font-bold"
                    >
                        "Crear cuenta"
                    </button>
                </div>
            </div>
        </div>
    }
}
