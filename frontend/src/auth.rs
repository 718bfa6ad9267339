use yew::prelude::*;
use yew_router::prelude::*;
use gloo_net::http::Request;
use uuid::Uuid;
use web_sys::HtmlInputElement;
use shared::{models::*, KeyValueStorage, StorageError};
use crate::{Route, config::CONFIG, storage::BrowserStorage, styles::*};

const ADMIN_EMAIL: &str = "admin@astroclub.edu";
const ADMIN_PASSWORD: &str = "admin123";

/// Signed-in user shared by the whole app.
pub type UserContext = UseStateHandle<Option<CurrentUser>>;

pub fn read_user<S: KeyValueStorage>(storage: &S) -> Option<CurrentUser> {
    let raw = storage.get(CONFIG.user_storage_key).ok().flatten()?;
    serde_json::from_str(&raw).ok()
}

pub fn write_user<S: KeyValueStorage>(storage: &mut S, user: &CurrentUser) -> Result<(), StorageError> {
    let raw = serde_json::to_string(user).map_err(|e| StorageError::Encode(e.to_string()))?;
    storage.set(CONFIG.user_storage_key, &raw)
}

pub fn load_current_user() -> Option<CurrentUser> {
    read_user(&BrowserStorage::local())
}

pub fn clear_current_user() {
    BrowserStorage::local().remove(CONFIG.user_storage_key);
}

/// Stores the user, publishes it to the app and opens the contest.
pub fn complete_sign_in<C: Component>(ctx: &Context<C>, user: CurrentUser) {
    if let Err(e) = write_user(&mut BrowserStorage::local(), &user) {
        // Still signed in, but only until the page reloads.
        web_sys::console::warn_1(&format!("Could not remember signed-in user: {}", e).into());
    }
    if let Some((current, _)) = ctx.link().context::<UserContext>(Callback::noop()) {
        current.set(Some(user));
    }
    if let Some(navigator) = ctx.link().navigator() {
        navigator.push(&Route::Contest);
    }
}

pub fn input_value(node: &NodeRef) -> String {
    node.cast::<HtmlInputElement>().map(|i| i.value()).unwrap_or_default()
}

fn admin_user() -> CurrentUser {
    CurrentUser {
        id: UserId::new("admin"),
        name: "Admin User".into(),
        email: ADMIN_EMAIL.into(),
        is_admin: true,
    }
}

// Unknown emails still get in, with a throwaway identity.
fn demo_user(email: &str) -> CurrentUser {
    let name = email.split('@').next().filter(|n| !n.is_empty()).unwrap_or("Stargazer");
    CurrentUser {
        id: UserId::from(Uuid::new_v4()),
        name: name.to_string(),
        email: email.to_string(),
        is_admin: false,
    }
}

async fn login(email: String, password: String) -> Result<CurrentUser, String> {
    if email == ADMIN_EMAIL && password == ADMIN_PASSWORD {
        return Ok(admin_user());
    }

    let request = LoginRequest { email: email.clone(), password };
    let response = Request::post(&format!("{}/login", CONFIG.api_base_url))
        .json(&request)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;

    match response.status() {
        200 => response.json::<CurrentUser>().await
            .map_err(|e| format!("Failed to parse response: {}", e)),
        404 => Ok(demo_user(&email)),
        401 => Err("Invalid email or password.".into()),
        429 => Err("Too many sign-in attempts. Please try again later.".into()),
        _ => Err("Sign in failed.".into()),
    }
}

pub enum Msg {
    Submit,
    Completed(Result<CurrentUser, String>),
}

pub struct SignIn {
    email: NodeRef,
    password: NodeRef,
    submitting: bool,
    error: Option<String>,
}

impl Component for SignIn {
    type Message = Msg;
    type Properties = ();

    fn create(_: &Context<Self>) -> Self {
        Self { email: NodeRef::default(), password: NodeRef::default(), submitting: false, error: None }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Submit => {
                if self.submitting {
                    return false;
                }
                let email = input_value(&self.email).trim().to_lowercase();
                let password = input_value(&self.password);
                if email.is_empty() || password.is_empty() {
                    self.error = Some("Please enter your email and password.".into());
                    return true;
                }

                self.submitting = true;
                self.error = None;
                ctx.link().send_future(async move { Msg::Completed(login(email, password).await) });
                true
            }
            Msg::Completed(Ok(user)) => {
                self.submitting = false;
                complete_sign_in(ctx, user);
                true
            }
            Msg::Completed(Err(error)) => {
                self.submitting = false;
                self.error = Some(error);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let onsubmit = ctx.link().callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        });

        html! {
            <div class={CONTAINER_SM}>
                <h1 class={HEADING_LG}>{"Sign In"}</h1>
                <p class={combine_classes(TEXT_MUTED, "text-center mb-6")}>
                    {"Sign in to vote in the astrophotography contest."}
                </p>

                {if let Some(error) = &self.error {
                    html! { <div class={alert_style("error")}>{error}</div> }
                } else { html! {} }}

                <form {onsubmit} class="space-y-4">
                    <div class={INPUT_GROUP}>
                        <label class={TEXT_LABEL} for="email">{"Email"}</label>
                        <input id="email" type="email" ref={self.email.clone()} class={INPUT_BASE}
                            placeholder="you@astroclub.edu" disabled={self.submitting} />
                    </div>
                    <div class={INPUT_GROUP}>
                        <label class={TEXT_LABEL} for="password">{"Password"}</label>
                        <input id="password" type="password" ref={self.password.clone()} class={INPUT_BASE}
                            disabled={self.submitting} />
                    </div>
                    <button type="submit" class={button_primary(true)} disabled={self.submitting}>
                        {if self.submitting { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>

                <p class={combine_classes(TEXT_MUTED, "text-center mt-6")}>
                    {"New to the club? "}
                    <Link<Route> to={Route::SignUp} classes="text-blue-400 hover:underline">{"Create an account"}</Link<Route>>
                </p>
            </div>
        }
    }
}
