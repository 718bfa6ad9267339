use yew::prelude::*;
use yew_router::prelude::*;
use gloo_net::http::Request;
use shared::{models::*, validate_member_request, Error};
use crate::{Route, auth::{complete_sign_in, input_value}, config::CONFIG, styles::*};

/// Checks the form locally so obvious mistakes never reach the server.
pub fn signup_request(name: &str, email: &str, password: &str, confirm: &str) -> Result<CreateMemberRequest, String> {
    if password != confirm {
        return Err("Passwords do not match.".into());
    }
    let request = CreateMemberRequest {
        name: name.trim().to_string(),
        email: email.trim().to_lowercase(),
        password: password.to_string(),
    };
    validate_member_request(&request).map_err(|e| e.to_string())?;
    Ok(request)
}

async fn register(request: CreateMemberRequest) -> Result<CurrentUser, String> {
    let response = Request::post(&format!("{}/users", CONFIG.api_base_url))
        .json(&request)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;

    match response.status() {
        201 => {
            let member = response.json::<CreatedMember>().await
                .map_err(|e| format!("Failed to parse response: {}", e))?;
            Ok(CurrentUser { id: member.id.into(), name: member.name, email: member.email, is_admin: false })
        }
        400 => Err(response.json::<Error>().await
            .map(|e| e.message)
            .unwrap_or_else(|_| "Please check your details and try again.".into())),
        409 => Err("An account with this email already exists. Try signing in.".into()),
        429 => Err("Too many sign-ups from this device. Please try again later.".into()),
        _ => Err("Sign up failed. Please try again.".into()),
    }
}

pub enum Msg {
    Submit,
    Completed(Result<CurrentUser, String>),
}

pub struct SignUp {
    name: NodeRef,
    email: NodeRef,
    password: NodeRef,
    confirm: NodeRef,
    submitting: bool,
    error: Option<String>,
}

impl Component for SignUp {
    type Message = Msg;
    type Properties = ();

    fn create(_: &Context<Self>) -> Self {
        Self {
            name: NodeRef::default(),
            email: NodeRef::default(),
            password: NodeRef::default(),
            confirm: NodeRef::default(),
            submitting: false,
            error: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Submit => {
                if self.submitting {
                    return false;
                }
                let request = signup_request(
                    &input_value(&self.name),
                    &input_value(&self.email),
                    &input_value(&self.password),
                    &input_value(&self.confirm),
                );
                match request {
                    Ok(request) => {
                        self.submitting = true;
                        self.error = None;
                        ctx.link().send_future(async move { Msg::Completed(register(request).await) });
                    }
                    Err(error) => self.error = Some(error),
                }
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
        let field = |id: &'static str, label: &'static str, kind: &'static str, node: &NodeRef| html! {
            <div class={INPUT_GROUP}>
                <label class={TEXT_LABEL} for={id}>{label}</label>
                <input id={id} type={kind} ref={node.clone()} class={INPUT_BASE} disabled={self.submitting} />
            </div>
        };

        html! {
            <div class={CONTAINER_SM}>
                <h1 class={HEADING_LG}>{"Join the Club"}</h1>

                {if let Some(error) = &self.error {
                    html! { <div class={alert_style("error")}>{error}</div> }
                } else { html! {} }}

                <form {onsubmit} class="space-y-4">
                    {field("name", "Full name", "text", &self.name)}
                    {field("email", "Email", "email", &self.email)}
                    {field("password", "Password", "password", &self.password)}
                    {field("confirm", "Confirm password", "password", &self.confirm)}
                    <button type="submit" class={button_primary(true)} disabled={self.submitting}>
                        {if self.submitting { "Creating account..." } else { "Sign Up" }}
                    </button>
                </form>

                <p class={combine_classes(TEXT_MUTED, "text-center mt-6")}>
                    {"Already a member? "}
                    <Link<Route> to={Route::SignIn} classes="text-blue-400 hover:underline">{"Sign in"}</Link<Route>>
                </p>
            </div>
        }
    }
}
