use crate::{api::check_in, config::Config};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    cfg.service(
        web::scope(&config.api_prefix)
            .service(
                web::scope("/check-ins")
                    // /check-ins
                    .service(
                        web::resource("")
                            .wrap(build_limiter(config.rate_checkin_per_min))
                            .route(web::post().to(check_in::create_check_in)),
                    )
                    // /check-ins/checkout
                    .service(
                        web::resource("/checkout")
                            .wrap(build_limiter(config.rate_checkin_per_min))
                            .route(web::put().to(check_in::check_out)),
                    ),
            )
            .service(
                web::scope("/employees/{employee_id}")
                    // /employees/{id}/check-ins
                    .service(
                        web::resource("/check-ins")
                            .wrap(build_limiter(config.rate_read_per_min))
                            .route(web::get().to(check_in::history)),
                    )
                    // /employees/{id}/check-ins/active
                    .service(
                        web::resource("/check-ins/active")
                            .wrap(build_limiter(config.rate_read_per_min))
                            .route(web::get().to(check_in::active_check_in)),
                    )
                    // /employees/{id}/clients
                    .service(
                        web::resource("/clients")
                            .wrap(build_limiter(config.rate_read_per_min))
                            .route(web::get().to(check_in::assigned_clients)),
                    ),
            ),
    );
}
