use yew::prelude::*;
use yew_router::prelude::*;
use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use shared::{models::*, CategoryFilter, ContestSession, PhotoCatalog, RankedPhoto};
use crate::{Route, auth::UserContext, config::CONFIG, storage::BrowserStorage, styles::*};

const NOTICE_MILLIS: u32 = 6_000;

pub async fn fetch_photos() -> Result<Vec<Photo>, String> {
    let response = Request::get(&format!("{}/photos", CONFIG.api_base_url))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !response.ok() {
        return Err(format!("Failed to load photos ({})", response.status()));
    }
    response.json::<Vec<Photo>>().await.map_err(|_| "Failed to parse photo data".to_string())
}

pub fn format_upload_date(date: time::Date) -> String {
    format!("{} {}, {}", date.month(), date.day(), date.year())
}

#[function_component]
pub fn ContestPage() -> Html {
    let user = use_context::<UserContext>().and_then(|current| (*current).clone());
    match user {
        Some(user) => html! { <Contest {user} /> },
        None => html! { <Redirect<Route> to={Route::SignIn} /> },
    }
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub user: CurrentUser,
}

enum State {
    Loading,
    Ready(ContestSession<BrowserStorage>),
    Error(String),
}

pub enum Msg {
    PhotosLoaded(Result<Vec<Photo>, String>),
    SelectCategory(CategoryFilter),
    ToggleVote(PhotoId),
    RetrySave,
    DismissNotice,
}

pub struct Contest {
    state: State,
    category: CategoryFilter,
    notice: Option<String>,
    notice_timer: Option<Timeout>,
}

impl Contest {
    fn load(ctx: &Context<Self>) {
        ctx.link().send_future(async { Msg::PhotosLoaded(fetch_photos().await) });
    }

    fn show_notice(&mut self, ctx: &Context<Self>, notice: String) {
        self.notice = Some(notice);
        let link = ctx.link().clone();
        self.notice_timer = Some(Timeout::new(NOTICE_MILLIS, move || link.send_message(Msg::DismissNotice)));
    }
}

impl Component for Contest {
    type Message = Msg;
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        Self::load(ctx);
        Self { state: State::Loading, category: CategoryFilter::All, notice: None, notice_timer: None }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().user != old_props.user {
            self.state = State::Loading;
            self.notice = None;
            Self::load(ctx);
        }
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::PhotosLoaded(Ok(photos)) => {
                let user = ctx.props().user.clone();
                self.state = match PhotoCatalog::new(photos) {
                    Ok(catalog) => match ContestSession::sign_in(Some(user), catalog, BrowserStorage::local()) {
                        Ok(session) => State::Ready(session),
                        Err(e) => State::Error(e.to_string()),
                    },
                    Err(e) => State::Error(e.to_string()),
                };
                true
            }
            Msg::PhotosLoaded(Err(error)) => {
                self.state = State::Error(error);
                true
            }
            Msg::SelectCategory(category) => {
                let changed = self.category != category;
                self.category = category;
                changed
            }
            Msg::ToggleVote(photo_id) => {
                let State::Ready(session) = &mut self.state else { return false };
                match session.toggle_vote(&photo_id) {
                    Ok(VoteResult { persistence_warning: Some(warning), .. }) => {
                        self.show_notice(ctx, format!("Your vote counts, but it could not be saved: {}", warning));
                    }
                    Ok(_) => {}
                    Err(e) => self.show_notice(ctx, e.to_string()),
                }
                true
            }
            Msg::RetrySave => {
                let State::Ready(session) = &mut self.state else { return false };
                match session.retry_persist() {
                    Ok(()) => {
                        self.notice = None;
                        self.notice_timer = None;
                    }
                    Err(e) => self.show_notice(ctx, e.to_string()),
                }
                true
            }
            Msg::DismissNotice => {
                self.notice_timer = None;
                self.notice.take().is_some()
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        match &self.state {
            State::Loading => html! {
                <div class="flex justify-center p-8">
                    <div class={combine_classes("animate-pulse", TEXT_MUTED)}>{"Loading contest..."}</div>
                </div>
            },
            State::Error(error) => html! {
                <div class={CONTAINER}>
                    <div class={alert_style("error")}>{error}</div>
                </div>
            },
            State::Ready(session) => html! {
                <div class={CONTAINER}>
                    <h1 class={HEADING_LG}>{"Astrophotography Contest"}</h1>
                    <p class={combine_classes(TEXT_MUTED, "text-center mb-8")}>
                        {format!("Welcome, {}. Vote for as many photos as you like, except your own.", session.user().name)}
                    </p>
                    {self.render_notice(ctx, session)}
                    {render_activity(session)}
                    {render_leaderboard(session, &self.category)}
                    {self.render_filters(ctx)}
                    {self.render_photos(ctx, session)}
                </div>
            },
        }
    }
}

impl Contest {
    fn render_notice(&self, ctx: &Context<Self>, session: &ContestSession<BrowserStorage>) -> Html {
        let unsaved = session.has_unsaved_votes();
        if self.notice.is_none() && !unsaved {
            return html! {};
        }

        html! {
            <div class={combine_classes(&alert_style("warning"), FLEX_BETWEEN)}>
                <span>{self.notice.clone().unwrap_or_else(|| "Some of your votes are not saved yet.".into())}</span>
                {if unsaved {
                    html! {
                        <button type="button" class={combine_classes(BUTTON_BASE, BUTTON_MUTED)}
                            onclick={ctx.link().callback(|_| Msg::RetrySave)}>
                            {"Retry save"}
                        </button>
                    }
                } else { html! {} }}
            </div>
        }
    }

    fn render_filters(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="flex flex-wrap gap-2 justify-center mb-6">
                {for CategoryFilter::options().map(|option| {
                    let selected = option == self.category;
                    let label = option.label();
                    html! {
                        <button type="button" class={filter_button(selected)}
                            onclick={ctx.link().callback(move |_| Msg::SelectCategory(option))}>
                            {label}
                        </button>
                    }
                })}
            </div>
        }
    }

    fn render_photos(&self, ctx: &Context<Self>, session: &ContestSession<BrowserStorage>) -> Html {
        let visible = session.visible(&self.category);
        if visible.is_empty() {
            return html! { <p class={combine_classes(TEXT_MUTED, "text-center")}>{"No photos in this category yet."}</p> };
        }

        html! {
            <div class={PHOTO_GRID}>
                {for visible.iter().map(|ranked| render_photo(ctx, session, ranked))}
            </div>
        }
    }
}

fn render_activity(session: &ContestSession<BrowserStorage>) -> Html {
    let activity = session.activity();
    html! {
        <div class={combine_classes(GRID_COLS_3, "mb-8")}>
            <div class={combine_classes(STATS_CARD, STATS_CARD_INFO)}>
                <div class="text-2xl font-bold">{activity.photos_voted}</div>
                <div class="text-sm">{"Photos voted"}</div>
            </div>
            <div class={combine_classes(STATS_CARD, STATS_CARD_SUCCESS)}>
                <div class="text-2xl font-bold">{activity.submissions}</div>
                <div class="text-sm">{"Your submissions"}</div>
            </div>
            <div class={combine_classes(STATS_CARD, STATS_CARD_WARNING)}>
                <div class="text-2xl font-bold">{activity.votes_received}</div>
                <div class="text-sm">{"Votes received"}</div>
            </div>
        </div>
    }
}

fn render_leaderboard(session: &ContestSession<BrowserStorage>, category: &CategoryFilter) -> Html {
    html! {
        <div class={combine_classes(CARD, "mb-8")}>
            <h2 class={HEADING_MD}>{"Leaderboard"}</h2>
            <div class="space-y-3">
                {for session.leaderboard(category).iter().map(|ranked| html! {
                    <div class={combine_classes(CARD_SECTION, FLEX_BETWEEN)}>
                        <div class="flex items-center gap-3">
                            {render_badge(ranked)}
                            <span class="text-gray-100 font-semibold">{&ranked.photo.title}</span>
                            <span class={TEXT_MUTED}>{format!("by {}", ranked.photo.photographer)}</span>
                        </div>
                        <span class="text-gray-200 font-mono">{format!("{} votes", ranked.photo.votes())}</span>
                    </div>
                })}
            </div>
        </div>
    }
}

fn render_badge(ranked: &RankedPhoto<'_>) -> Html {
    match ranked.badge {
        Some(badge) => html! { <span class={badge_style(badge.label())}>{badge.label()}</span> },
        None => html! { <span class={combine_classes(TAG, "bg-gray-700 text-gray-300")}>{format!("#{}", ranked.position)}</span> },
    }
}

fn render_photo(ctx: &Context<Contest>, session: &ContestSession<BrowserStorage>, ranked: &RankedPhoto<'_>) -> Html {
    let photo = ranked.photo;
    let own = session.is_own_photo(photo);
    let voted = session.has_voted(&photo.id);
    let photo_id = photo.id.clone();
    let onclick = ctx.link().callback(move |_| Msg::ToggleVote(photo_id.clone()));

    let (label, style) = match (own, voted) {
        (true, _) => ("Your Photo", BUTTON_MUTED),
        (false, true) => ("Voted", BUTTON_SUCCESS),
        (false, false) => ("Vote", BUTTON_PRIMARY),
    };

    html! {
        <div class={PHOTO_CARD}>
            <img src={photo.image_url.clone()} alt={photo.title.clone()} class="w-full h-56 object-cover" />
            <div class="p-4 flex flex-col flex-1 space-y-2">
                <div class={FLEX_BETWEEN}>
                    {render_badge(ranked)}
                    <span class={combine_classes(TAG, "bg-blue-900 text-blue-200")}>{photo.category.name()}</span>
                </div>
                <h3 class={HEADING_SM}>{&photo.title}</h3>
                <p class={TEXT_MUTED}>{format!("by {} · {}", photo.photographer, format_upload_date(photo.upload_date))}</p>
                <p class="text-gray-300 text-sm flex-1">{&photo.description}</p>
                {if own {
                    html! { <span class={combine_classes(TAG, "bg-purple-700 text-white w-fit")}>{"Your Photo"}</span> }
                } else { html! {} }}
                <div class={FLEX_BETWEEN}>
                    <span class="text-gray-200 font-semibold">{format!("{} votes", photo.votes())}</span>
                    <button type="button" disabled={own} {onclick} class={combine_classes(BUTTON_BASE, style)}>
                        {label}
                    </button>
                </div>
            </div>
        </div>
    }
}
