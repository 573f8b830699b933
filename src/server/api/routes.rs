//! A central place to register App routes.
use actix_service::ServiceFactory;
use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    web, App, Error,
};

use super::state::App as AppState;
use super::{auth, authors, books, index, publishers, stores};

#[expect(
    clippy::literal_string_with_formatting_args,
    reason = "Actix Web resource path uses `{param}` syntax which is not formatting but route pattern matching"
)]
/// Central place to register all the App routing.
///
/// Integer path parameters are matched with `\d+`, so any other segment falls
/// through to the default 404.
#[tracing::instrument(skip(app, state))]
pub fn register_app<
    U: MessageBody,
    V: ServiceFactory<
        ServiceRequest,
        Response = ServiceResponse<U>,
        Config = (),
        InitError = (),
        Error = Error,
    >,
>(
    app: App<V>,
    state: &AppState,
) -> App<V> {
    app.app_data(web::Data::new(state.clone()))
        .route("/", web::get().to(index::index))
        .service(
            web::scope("/books")
                .route("/", web::get().to(books::books_list))
                .route(r"/{id:\d+}/", web::get().to(books::book_info)),
        )
        .service(
            web::scope("/authors")
                .route("/", web::get().to(authors::authors_list))
                .route(r"/{id:\d+}/", web::get().to(authors::author_info))
                .service(
                    web::resource("/create_author")
                        .route(web::get().to(authors::edit::author_create_form))
                        .route(web::post().to(authors::edit::author_create)),
                )
                .service(
                    web::resource(r"/{pk:\d+}/update/")
                        .route(web::get().to(authors::edit::author_update_form))
                        .route(web::post().to(authors::edit::author_update)),
                )
                .service(
                    web::resource(r"/{pk:\d+}/delete/")
                        .route(web::get().to(authors::edit::author_delete_form))
                        .route(web::post().to(authors::edit::author_delete)),
                )
                .route("/pagination/", web::get().to(authors::paginated::author_list))
                .route(
                    r"/pagination/{pk:\d+}/detail/",
                    web::get().to(authors::paginated::author_detail),
                ),
        )
        .service(
            web::scope("/stores")
                .route("/", web::get().to(stores::stores_list))
                .route(r"/{id:\d+}", web::get().to(stores::stores_info)),
        )
        .service(
            web::scope("/publishers")
                .route("/", web::get().to(publishers::publishers_list))
                .route(r"/{pk:\d+}", web::get().to(publishers::publisher_info)),
        )
        .service(
            web::scope("/accounts")
                .service(
                    web::resource("/login/")
                        .route(web::get().to(auth::login::login_form))
                        .route(web::post().to(auth::login::login)),
                )
                .route("/logout/", web::post().to(auth::login::logout)),
        )
}
