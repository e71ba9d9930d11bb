//! Leptos application with routing.
//!
//! Thin shell: every behavioral contract lives in the session and account
//! crates; these components only mirror observable state into signals.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use leptos::*;
use leptos_router::*;

use jewelmart_account::{
    FlowState, MessageKind, PasswordResetFlow, ProfileViewModel, RedirectTimer, StatusMessage,
};
use jewelmart_core::{Navigator, Route as Destination};
use jewelmart_session::{nav_links, ChromeMode, ListenerDirective, NavChrome, SessionReader};

use crate::frontend::storage::BrowserSessionStore;
use crate::rest::RestIdentityStore;
use crate::StorefrontConfig;

/// Navigator over the client-side router.
#[derive(Debug, Clone, Copy, Default)]
struct RouterNavigator;

impl Navigator for RouterNavigator {
    fn navigate(&self, to: Destination) {
        leptos_router::use_navigate()(to.path(), Default::default());
    }
}

/// [`RedirectTimer`] over the browser's one-shot timers.
#[derive(Debug, Clone, Copy, Default)]
struct BrowserRedirectTimer;

impl RedirectTimer for BrowserRedirectTimer {
    async fn sleep(&self, delay: Duration) {
        gloo_timers::future::TimeoutFuture::new(delay.as_millis() as u32).await;
    }
}

fn api_url() -> String {
    // Baked in at build time for the browser bundle.
    option_env!("JEWELMART_API_URL")
        .map(ToString::to_string)
        .unwrap_or_else(|| StorefrontConfig::default().api_url)
}

/// Main application component.
#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <Navbar/>
            <Routes>
                <Route path="/" view=HomePage/>
                <Route path="/products" view=ProductsPage/>
                <Route path="/about" view=AboutPage/>
                <Route path="/contact" view=ContactPage/>
                <Route path="/policies-faq" view=PoliciesFaqPage/>
                <Route path="/login" view=LoginPage/>
                <Route path="/cart" view=CartPage/>
                <Route path="/profile" view=ProfilePage/>
                <Route path="/ForgetPassword" view=ForgetPasswordPage/>
            </Routes>
        </Router>
    }
}

/// Navbar: login-aware links plus the transparent/opaque chrome.
#[component]
fn Navbar() -> impl IntoView {
    let location = use_location();

    let reader = Rc::new(RefCell::new(SessionReader::new(BrowserSessionStore)));
    let (is_logged_in, set_is_logged_in) = create_signal(reader.borrow().is_logged_in());

    let scroll_offset = || window().scroll_y().unwrap_or(0.0);
    let initial_route = location
        .pathname
        .get_untracked()
        .parse::<Destination>()
        .unwrap_or(Destination::Home);
    let (chrome, initial_directive) = NavChrome::new(initial_route, scroll_offset());
    let chrome = Rc::new(RefCell::new(chrome));
    let (mode, set_mode) = create_signal(chrome.borrow().mode());
    let listener: Rc<RefCell<Option<leptos::leptos_dom::helpers::WindowListenerHandle>>> =
        Rc::new(RefCell::new(None));
    if initial_directive == Some(ListenerDirective::Attach) {
        *listener.borrow_mut() = Some(attach_scroll_listener(Rc::clone(&chrome), set_mode));
    }

    create_effect({
        let reader = Rc::clone(&reader);
        let chrome = Rc::clone(&chrome);
        let listener = Rc::clone(&listener);
        move |_| {
            let path = location.pathname.get();
            let route = path.parse::<Destination>().unwrap_or(Destination::Home);

            // Login state re-derives on every route change.
            set_is_logged_in.set(reader.borrow_mut().on_route_change());

            let directive = chrome.borrow_mut().on_route_change(route, scroll_offset());
            match directive {
                Some(ListenerDirective::Attach) => {
                    *listener.borrow_mut() =
                        Some(attach_scroll_listener(Rc::clone(&chrome), set_mode));
                }
                Some(ListenerDirective::Detach) => {
                    if let Some(handle) = listener.borrow_mut().take() {
                        handle.remove();
                    }
                }
                None => {}
            }
            set_mode.set(chrome.borrow().mode());
        }
    });

    let nav_class = move || match mode.get() {
        ChromeMode::Transparent => "navbar transparent",
        ChromeMode::Opaque => "navbar opaque",
    };

    view! {
        <nav class=nav_class>
            <A href="/">
                <span class="logo">"Jewel Mart"</span>
            </A>
            <div class="links">
                {move || {
                    nav_links(is_logged_in.get())
                        .into_iter()
                        .map(|link| {
                            view! {
                                <A href=link.route.path()>{link.label}</A>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </nav>
    }
}

fn attach_scroll_listener(
    chrome: Rc<RefCell<NavChrome>>,
    set_mode: WriteSignal<ChromeMode>,
) -> leptos::leptos_dom::helpers::WindowListenerHandle {
    window_event_listener(ev::scroll, move |_| {
        let offset = window().scroll_y().unwrap_or(0.0);
        chrome.borrow_mut().on_scroll(offset);
        set_mode.set(chrome.borrow().mode());
    })
}

/// Profile page component.
#[component]
fn ProfilePage() -> impl IntoView {
    let vm = Rc::new(RefCell::new(ProfileViewModel::resolve(
        BrowserSessionStore,
        RouterNavigator,
        None,
    )));

    let identity = vm.borrow().identity().clone();
    let avatar = vm.borrow().avatar_initial();
    let sections = vm.borrow().dashboard_sections();

    let on_logout = {
        let vm = Rc::clone(&vm);
        move |_| vm.borrow_mut().logout()
    };
    let on_change_password = {
        let vm = Rc::clone(&vm);
        move |_| vm.borrow().go_to_password_reset()
    };

    view! {
        <div class="profile">
            <header>
                <h2>{format!("Welcome back, {}!", identity.name)}</h2>
                <p>"Track your orders, wishlist, and more"</p>
            </header>

            <aside class="sidebar">
                <div class="avatar">{avatar.to_string()}</div>
                <h3>{identity.name.clone()}</h3>
                <p>{identity.email.clone()}</p>
                <p>{format!("Member since {}", identity.join_date)}</p>
                <p>{format!("{}% Complete", identity.profile_completion)}</p>
            </aside>

            <main>
                {sections
                    .iter()
                    .map(|section| {
                        view! {
                            <section>
                                <h4>{section.title}</h4>
                                <p>{section.empty_state}</p>
                                <button>{section.action_label}</button>
                            </section>
                        }
                    })
                    .collect_view()}

                <section class="account-settings">
                    <h4>"Account Settings"</h4>
                    <button on:click=on_change_password>"Change Password"</button>
                    <button on:click=on_logout>"Logout"</button>
                </section>
            </main>
        </div>
    }
}

/// Password reset page component.
#[component]
fn ForgetPasswordPage() -> impl IntoView {
    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let confirm_password = create_rw_signal(String::new());

    let flow = PasswordResetFlow::new(
        RestIdentityStore::new(api_url()),
        RouterNavigator,
        BrowserRedirectTimer,
    );

    let (message, set_message) = create_signal(None::<StatusMessage>);
    let (loading, set_loading) = create_signal(false);
    let (errored, set_errored) = create_signal(false);

    let submit = {
        let flow = flow.clone();
        move |_| {
            if flow.is_loading() {
                return;
            }

            spawn_local({
                let flow = flow.clone();
                let email = email.get_untracked();
                let password = password.get_untracked();
                let confirm = confirm_password.get_untracked();
                async move {
                    let _ = flow.submit(&email, &password, &confirm).await;
                }
            });

            // Mirror observable flow state into signals until the attempt
            // settles (the success message shows while the redirect is
            // still pending).
            spawn_local({
                let flow = flow.clone();
                async move {
                    loop {
                        set_message.set(flow.message());
                        set_loading.set(flow.is_loading());
                        set_errored.set(flow.fields_errored());
                        if matches!(flow.state(), FlowState::Succeeded | FlowState::Failed(_)) {
                            break;
                        }
                        gloo_timers::future::TimeoutFuture::new(50).await;
                    }
                }
            });
        }
    };

    let message_view = move || {
        message.get().map(|msg| {
            let class = match msg.kind {
                MessageKind::Error => "message error",
                MessageKind::Success => "message success",
            };
            view! { <p class=class>{msg.text}</p> }
        })
    };

    let input_class = move || if errored.get() { "input errored" } else { "input" };

    view! {
        <div class="forget-password">
            <h2>"Reset Your Password"</h2>

            {message_view}

            <form on:submit=move |ev| {
                ev.prevent_default();
                submit(ev);
            }>
                <label>"Email Address"</label>
                <input
                    type="email"
                    class=input_class
                    placeholder="you@example.com"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                    disabled=move || loading.get()
                />

                <label>"New Password"</label>
                <input
                    type="password"
                    class=input_class
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                    disabled=move || loading.get()
                />

                <label>"Confirm Password"</label>
                <input
                    type="password"
                    class=input_class
                    prop:value=move || confirm_password.get()
                    on:input=move |ev| confirm_password.set(event_target_value(&ev))
                    disabled=move || loading.get()
                />

                <button type="submit" disabled=move || loading.get()>
                    {move || if loading.get() { "Resetting..." } else { "Reset Password" }}
                </button>
            </form>

            <p>
                "Remember your password? "
                <A href="/login">"Login"</A>
            </p>
        </div>
    }
}

#[component]
fn HomePage() -> impl IntoView {
    view! {
        <main class="home">
            <h1>"Jewel Mart"</h1>
        </main>
    }
}

#[component]
fn ProductsPage() -> impl IntoView {
    view! { <main><h1>"Products"</h1></main> }
}

#[component]
fn AboutPage() -> impl IntoView {
    view! { <main><h1>"About"</h1></main> }
}

#[component]
fn ContactPage() -> impl IntoView {
    view! { <main><h1>"Contact"</h1></main> }
}

#[component]
fn PoliciesFaqPage() -> impl IntoView {
    view! { <main><h1>"Policies & FAQ"</h1></main> }
}

#[component]
fn LoginPage() -> impl IntoView {
    view! { <main><h1>"Login"</h1></main> }
}

#[component]
fn CartPage() -> impl IntoView {
    view! { <main><h1>"Cart"</h1></main> }
}
