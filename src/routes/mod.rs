pub mod health;
pub mod todos;

use actix_web::web;

use crate::auth::AuthMiddleware;
use crate::error::{json_error_handler, path_error_handler};

/// Registers every route. Callers provide `web::Data<TodoStore>` and
/// `web::Data<TokenVerifier>` as app data.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(health::root)
        .service(health::health)
        .service(
            web::scope("/api")
                .wrap(AuthMiddleware)
                .service(
                    web::scope("/todos")
                        .service(todos::list_todos)
                        .service(todos::create_todo)
                        // Literal segment before the `{id}` pattern.
                        .service(todos::list_trash)
                        .service(todos::get_todo)
                        .service(todos::update_todo)
                        .service(todos::delete_todo)
                        .service(todos::restore_todo)
                        .service(todos::permanent_delete_todo),
                ),
        );
}
