use std::rc::Rc;
use yew::prelude::*;
use yew_router::prelude::*;
use shared::{filter_photos, models::Photo, CategoryFilter};
use crate::{Route, contest::{fetch_photos, format_upload_date}, styles::*};

#[derive(Clone, Default)]
pub struct GalleryState {
    photos: Vec<Photo>,
    category: CategoryFilter,
    loaded: bool,
    error: Option<String>,
}

pub enum Msg {
    PhotosReceived(Vec<Photo>),
    SelectCategory(CategoryFilter),
    Error(String),
}

impl Reducible for GalleryState {
    type Action = Msg;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            Msg::PhotosReceived(photos) => {
                next.photos = photos;
                next.loaded = true;
                next.error = None;
            }
            Msg::SelectCategory(category) => next.category = category,
            Msg::Error(error) => {
                next.loaded = true;
                next.error = Some(error);
            }
        }
        Rc::new(next)
    }
}

#[function_component]
pub fn Gallery() -> Html {
    let state = use_reducer(GalleryState::default);

    use_effect_with_deps({
        let state = state.clone();
        move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match fetch_photos().await {
                    Ok(photos) => state.dispatch(Msg::PhotosReceived(photos)),
                    Err(e) => state.dispatch(Msg::Error(e)),
                }
            });
            || ()
        }
    }, ());

    let visible = filter_photos(&state.photos, &state.category);

    html! {
        <div class={CONTAINER}>
            <h1 class={HEADING_LG}>{"Astrophotography Gallery"}</h1>
            <div class="text-center mb-8">
                <p class={combine_classes(TEXT_MUTED, "mb-4")}>
                    {"Deep sky objects, planets, wide fields and the Moon, captured by club members."}
                </p>
                <Link<Route> to={Route::Contest} classes={classes!(button_primary(false))}>
                    {"Vote in the Contest"}
                </Link<Route>>
            </div>

            {if let Some(error) = &state.error {
                html! { <div class={alert_style("error")}>{error}</div> }
            } else { html! {} }}

            <div class="flex flex-wrap gap-2 justify-center mb-6">
                {for CategoryFilter::options().map(|option| {
                    let state = state.clone();
                    html! {
                        <button type="button" class={filter_button(option == state.category)}
                            onclick={Callback::from(move |_| state.dispatch(Msg::SelectCategory(option)))}>
                            {option.label()}
                        </button>
                    }
                })}
            </div>

            {if !state.loaded {
                html! {
                    <div class="flex justify-center p-8">
                        <div class={combine_classes("animate-pulse", TEXT_MUTED)}>{"Loading photos..."}</div>
                    </div>
                }
            } else if visible.is_empty() && state.error.is_none() {
                html! { <p class={combine_classes(TEXT_MUTED, "text-center")}>{"No photos in this category yet."}</p> }
            } else { html! {} }}

            <div class={PHOTO_GRID}>
                {for visible.iter().map(|photo| html! {
                    <div class={PHOTO_CARD}>
                        <img src={photo.image_url.clone()} alt={photo.title.clone()} class="w-full h-56 object-cover" />
                        <div class="p-4 space-y-2">
                            <span class={combine_classes(TAG, "bg-blue-900 text-blue-200")}>{photo.category.name()}</span>
                            <h3 class={HEADING_SM}>{&photo.title}</h3>
                            <p class={TEXT_MUTED}>{format!("by {} · {}", photo.photographer, format_upload_date(photo.upload_date))}</p>
                            <p class="text-gray-300 text-sm">{&photo.description}</p>
                        </div>
                    </div>
                })}
            </div>
        </div>
    }
}
