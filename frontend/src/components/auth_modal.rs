use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use tankas_shared::forms::{LoginRequest, MIN_PASSWORD_LEN, SignupRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Signup,
    Login,
}

/// 表单提交内容
#[derive(Debug, Clone, PartialEq)]
pub enum AuthForm {
    Signup(SignupRequest),
    Login(LoginRequest),
}

#[component]
pub fn AuthModal(
    mode: AuthMode,
    /// 提交中，由父组件控制
    #[prop(into)]
    busy: Signal<bool>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_submit: Callback<AuthForm>,
) -> impl IntoView {
    let is_signup = mode == AuthMode::Signup;

    let (display_name, set_display_name) = signal(String::new());
    let (username, set_username) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_form_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }

        let password = password.get_untracked();
        if is_signup && password.chars().count() < MIN_PASSWORD_LEN {
            set_error_msg.set(Some(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
            return;
        }
        set_error_msg.set(None);

        let form = if is_signup {
            let display_name = display_name.get_untracked();
            AuthForm::Signup(SignupRequest {
                username: username.get_untracked(),
                email: email.get_untracked(),
                password,
                display_name: (!display_name.trim().is_empty()).then_some(display_name),
            })
        } else {
            AuthForm::Login(LoginRequest {
                username: username.get_untracked(),
                password,
            })
        };
        on_submit.run(form);
    };

    view! {
        <div class="modal modal-open">
            <div class="modal-box relative max-w-md">
                <button
                    class="btn btn-sm btn-circle btn-ghost absolute right-3 top-3"
                    on:click=move |_| on_close.run(())
                >
                    <span class="material-symbols-outlined">"close"</span>
                </button>

                <h2 class="text-3xl font-bold mb-6">
                    {if is_signup { "Join Tankas" } else { "Welcome Back" }}
                </h2>

                <form class="space-y-4" on:submit=on_form_submit>
                    <Show when=move || error_msg.with(Option::is_some)>
                        <div role="alert" class="alert alert-error text-sm py-2">
                            <span>{move || error_msg.get().unwrap_or_default()}</span>
                        </div>
                    </Show>

                    <Show when=move || is_signup>
                        <label class="form-control">
                            <span class="label-text mb-2">"Display Name (Optional)"</span>
                            <input
                                type="text"
                                class="input input-bordered"
                                on:input=move |ev| set_display_name.set(event_target_value(&ev))
                                prop:value=display_name
                            />
                        </label>
                    </Show>

                    <label class="form-control">
                        <span class="label-text mb-2">"Username"</span>
                        <input
                            type="text"
                            class="input input-bordered"
                            required
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                            prop:value=username
                        />
                    </label>

                    <Show when=move || is_signup>
                        <label class="form-control">
                            <span class="label-text mb-2">"Email"</span>
                            <input
                                type="email"
                                class="input input-bordered"
                                required
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                            />
                        </label>
                    </Show>

                    <label class="form-control">
                        <span class="label-text mb-2">"Password"</span>
                        <input
                            type="password"
                            class="input input-bordered"
                            required
                            minlength=MIN_PASSWORD_LEN.to_string()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            prop:value=password
                        />
                        <Show when=move || is_signup>
                            <span class="label-text-alt mt-1 text-base-content/60">
                                {format!("Minimum {} characters", MIN_PASSWORD_LEN)}
                            </span>
                        </Show>
                    </label>

                    <button class="btn btn-primary w-full mt-6" disabled=move || busy.get()>
                        {move || {
                            if busy.get() {
                                view! { <span class="loading loading-spinner"></span> "Processing..." }
                                    .into_any()
                            } else if is_signup {
                                "Sign Up".into_any()
                            } else {
                                "Log In".into_any()
                            }
                        }}
                    </button>
                </form>
            </div>
            <div class="modal-backdrop" on:click=move |_| on_close.run(())></div>
        </div>
    }
}
