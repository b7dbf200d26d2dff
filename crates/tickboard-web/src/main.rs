use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use tickboard_warehouse::Settings;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod api;

#[derive(OpenApi)]
#[openapi(paths(api::catalog::catalog, api::dashboard::dashboard))]
struct ApiDoc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info,actix_web=debug"))
        .init();

    let settings = Settings::from_env().map_err(std::io::Error::other)?;
    let addr = settings.addr.clone();
    let state = web::Data::new(api::AppState::new(settings).map_err(std::io::Error::other)?);
    log::info!("dashboard listening on http://{addr}");

    // create API documentation
    let openapi = ApiDoc::openapi();

    // run server
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            // dashboard page & api endpoints
            .configure(api::configure)
            // api documentation
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/openapi.json", openapi.clone()))
    })
    .bind(addr)?
    .run()
    .await
}
