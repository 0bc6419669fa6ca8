#![recursion_limit = "256"]

use cfg_if::cfg_if;

cfg_if! {
    if #[cfg(feature = "ssr")] {
        use axum::Router;
        use dotenv::dotenv;
        use env_logger::Env;
        use leptos::prelude::*;
        use leptos_axum::{generate_route_list, LeptosRoutes};
        use tower_http::services::ServeDir;
        use chipchat::app::{shell, App};

        #[tokio::main]
        async fn main() {
            dotenv().ok();
            env_logger::init_from_env(Env::default().default_filter_or("info"));

            let conf = get_configuration(None).unwrap();
            let leptos_options = conf.leptos_options;
            let addr = leptos_options.site_addr;
            let routes = generate_route_list(App);

            // cited documents live next to the server unless pointed elsewhere
            let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());
            log::info!("serving cited documents from {}", data_dir);

            let app = Router::new()
                .leptos_routes(&leptos_options, routes, {
                    let leptos_options = leptos_options.clone();
                    move || shell(leptos_options.clone())
                })
                .nest_service("/data", ServeDir::new(data_dir))
                .fallback(leptos_axum::file_and_error_handler(shell))
                .with_state(leptos_options);

            log::info!("listening on http://{}", &addr);

            let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
            axum::serve(listener, app.into_make_service()).await.unwrap();
        }
    } else {
        pub fn main() {
            // no client-side main function
            // unless we want this to work with e.g., Trunk for a purely client-side app
            // see lib.rs for hydration function instead
        }
    }
}
