use std::path::PathBuf;
use rocket::{routes, catchers, fs::NamedFile, Build, Rocket};
use crate::{
    catchers::{bad_request, conflict, internal_error, not_found, too_many_requests, unauthorized, unprocessable},
    cors::Cors,
    routes::{
        all_options, create_user, health, list_categories, list_photos, list_users, login,
        photo_leaderboard, AppState,
    },
};

/// Directory holding the built frontend.
pub struct StaticDir(pub PathBuf);

#[rocket::get("/<path..>", rank = 20)]
async fn spa_handler(path: PathBuf, static_dir: &rocket::State<StaticDir>) -> Option<NamedFile> {
    let file_path = static_dir.0.join(&path);
    if file_path.is_file() {
        NamedFile::open(&file_path).await.ok()
    } else {
        NamedFile::open(static_dir.0.join("index.html")).await.ok()
    }
}

pub fn build_rocket(state: AppState, cors: Cors, static_dir: PathBuf) -> Rocket<Build> {
    rocket::build()
        .attach(cors)
        .manage(state)
        .manage(StaticDir(static_dir))
        .mount(
            "/api",
            routes![
                health,
                list_photos,
                photo_leaderboard,
                list_categories,
                list_users,
                create_user,
                login,
                all_options
            ],
        )
        .mount("/", routes![spa_handler])
        .register(
            "/",
            catchers![
                bad_request,
                unauthorized,
                not_found,
                conflict,
                unprocessable,
                too_many_requests,
                internal_error
            ],
        )
}
