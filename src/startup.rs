use std::{net::TcpListener, sync::Arc, time::Instant};

use actix_files::Files;
use actix_web::{
    dev::Server,
    guard,
    middleware::Logger,
    web::{self, Data},
    App, HttpServer,
};
use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    configuration::{DatabaseSettings, Settings},
    routes::{
        add_user_form, api_delete_user, api_get_user, api_get_users, api_update_user,
        create_user, edit_user_form, health_check, is_method_override_put, list_users, not_found,
        update_user, view_user,
    },
    store::{PgUserStore, UserStore},
    uploads::ImageStorage,
};

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let connection_pool = get_connection_pool(&configuration.database)?;
        sqlx::migrate!("./migrations")
            .run(&connection_pool)
            .await
            .context("Failed to migrate the database.")?;

        let images = ImageStorage::new(&configuration.application.upload_dir);
        images.ensure_dir().await?;

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(&address)
            .with_context(|| format!("Failed to bind {address}"))?;
        let port = listener.local_addr()?.port();

        let store: Arc<dyn UserStore> = Arc::new(PgUserStore::new(connection_pool));
        let server = run(
            listener,
            store,
            images,
            configuration.application.max_upload_size,
        )
        .await?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn get_connection_pool(configuration: &DatabaseSettings) -> Result<PgPool, anyhow::Error> {
    let options = configuration
        .connect_options()
        .context("Invalid database connection string.")?;
    Ok(PgPoolOptions::new()
        .max_connections(configuration.max_connections)
        .connect_lazy_with(options))
}

pub struct MaxUploadSize(pub usize);

pub struct ProcessStart(pub Instant);

pub async fn run(
    listener: TcpListener,
    store: Arc<dyn UserStore>,
    images: ImageStorage,
    max_upload_size: usize,
) -> Result<Server, anyhow::Error> {
    let store: Data<dyn UserStore> = Data::from(store);
    let upload_dir = images.dir().to_path_buf();
    let images = Data::new(images);
    let max_upload_size = Data::new(MaxUploadSize(max_upload_size));
    let started = Data::new(ProcessStart(Instant::now()));

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(Files::new("/uploads", upload_dir.clone()))
            .route("/", web::get().to(list_users))
            .route("/add", web::get().to(add_user_form))
            .route("/health", web::get().to(health_check))
            .route("/users", web::post().to(create_user))
            .route("/users/{id}/edit", web::get().to(edit_user_form))
            .service(
                web::resource("/users/{id}")
                    .route(web::get().to(view_user))
                    .route(web::put().to(update_user))
                    .route(
                        web::post()
                            .guard(guard::fn_guard(is_method_override_put))
                            .to(update_user),
                    )
                    .default_service(web::to(not_found)),
            )
            .service(
                web::scope("/api")
                    .route("/users", web::get().to(api_get_users))
                    .service(
                        web::resource("/users/{id}")
                            .route(web::get().to(api_get_user))
                            .route(web::put().to(api_update_user))
                            .route(web::delete().to(api_delete_user))
                            .default_service(web::to(not_found)),
                    ),
            )
            .default_service(web::to(not_found))
            .app_data(store.clone())
            .app_data(images.clone())
            .app_data(max_upload_size.clone())
            .app_data(started.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}
