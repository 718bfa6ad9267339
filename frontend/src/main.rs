use yew::prelude::*;
use yew_router::prelude::*;

mod styles;
mod config;
mod storage;
mod auth;
mod signup;
mod contest;
mod gallery;

use crate::{
    auth::{SignIn, UserContext, clear_current_user, load_current_user},
    contest::ContestPage,
    gallery::Gallery,
    signup::SignUp,
};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")] Home,
    #[at("/contest")] Contest,
    #[at("/signin")] SignIn,
    #[at("/signup")] SignUp,
}

fn nav_link_classes(active: bool) -> Classes {
    classes!(
        "text-base", "md:text-lg", "font-medium", "px-4", "py-2", "rounded-md",
        "transition-colors", "duration-200", "ease-in-out",
        "text-gray-200", "border", "border-transparent", "hover:border-blue-400", "hover:text-blue-400",
        if active {
            "text-blue-400 border-blue-400 ring-2 ring-blue-500 ring-offset-1 ring-offset-gray-900"
        } else {
            ""
        }
    )
}

#[function_component(Navigation)]
fn navigation() -> Html {
    let current_route = use_route::<Route>();
    let user = use_context::<UserContext>();
    let navigator = use_navigator();

    let session_link = match user.as_ref().and_then(|u| (**u).clone()) {
        Some(signed_in) => {
            let onclick = {
                let user = user.clone();
                Callback::from(move |_: MouseEvent| {
                    clear_current_user();
                    if let Some(user) = &user {
                        user.set(None);
                    }
                    if let Some(navigator) = &navigator {
                        navigator.push(&Route::Home);
                    }
                })
            };
            html! {
                <>
                    <span class="text-sm text-gray-400 self-center">{signed_in.name}</span>
                    <button type="button" class={nav_link_classes(false)} {onclick}>{"Sign Out"}</button>
                </>
            }
        }
        None => html! {
            <>
                <Link<Route> to={Route::SignIn} classes={nav_link_classes(current_route == Some(Route::SignIn))}>
                    {"Sign In"}
                </Link<Route>>
                <Link<Route> to={Route::SignUp} classes={nav_link_classes(current_route == Some(Route::SignUp))}>
                    {"Sign Up"}
                </Link<Route>>
            </>
        },
    };

    html! {
        <nav class="bg-gray-900 shadow-lg fixed top-0 w-full z-50">
            <div class="container mx-auto px-6 py-4 flex justify-center space-x-8">
                <Link<Route> to={Route::Home} classes={nav_link_classes(current_route == Some(Route::Home))}>
                    {"Gallery"}
                </Link<Route>>
                <Link<Route> to={Route::Contest} classes={nav_link_classes(current_route == Some(Route::Contest))}>
                    {"Photo Contest"}
                </Link<Route>>
                {session_link}
            </div>
        </nav>
    }
}

#[function_component(App)]
fn app() -> Html {
    let user = use_state(load_current_user);

    html! {
        <ContextProvider<UserContext> context={user}>
            <BrowserRouter>
                <div class="min-h-screen bg-gray-900">
                    <Navigation />
                    <div class="pt-16">
                        <Switch<Route> render={switch} />
                    </div>
                </div>
            </BrowserRouter>
        </ContextProvider<UserContext>>
    }
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <Gallery /> },
        Route::Contest => html! { <ContestPage /> },
        Route::SignIn => html! { <SignIn /> },
        Route::SignUp => html! { <SignUp /> },
    }
}

fn main() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
