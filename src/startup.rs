use crate::helpers::JsonResponse;
use crate::routes;
use crate::services::FeedbackService;
use actix_cors::Cors;
use actix_web::{dev::Server, error, web, App, HttpServer};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub fn run(listener: TcpListener, service: FeedbackService) -> Result<Server, std::io::Error> {
    let service = web::Data::new(service);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .app_data(service.clone())
            .configure(configure)
    })
    .listen(listener)?
    .run();

    Ok(server)
}

/// Routes and extractor settings, shared by the server and the tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .service(routes::index)
        .service(routes::test_handler)
        .service(routes::health_check)
        .service(
            web::scope("/api")
                .service(
                    web::scope("/feedback")
                        .service(routes::feedback::list_handler)
                        .service(routes::feedback::schemas_handler)
                        .service(routes::feedback::feedback_handler)
                        .service(routes::feedback::hidden_handler),
                )
                .service(routes::seed_handler)
                .service(routes::seed_get_handler),
        );
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let msg: String = match &err {
            error::JsonPayloadError::Deserialize(err) => format!(
                "{{\"kind\":\"deserialize\",\"line\":{}, \"column\":{}, \"msg\":\"{}\"}}",
                err.line(),
                err.column(),
                err
            ),
            _ => format!("{{\"kind\":\"other\",\"msg\":\"{}\"}}", err),
        };
        error::InternalError::from_response(err, JsonResponse::bad_request(&msg).respond()).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let msg = err.to_string();
        error::InternalError::from_response(err, JsonResponse::bad_request(&msg).respond()).into()
    })
}
