use std::sync::Arc;

use crate::datamodel::Catalog;
use crate::server::make_app;

mod hal;

fn spawn_app() -> testserver::Server {
    let catalog = Arc::new(Catalog::builtin().unwrap());
    testserver::Server::with_router(make_app(catalog))
}
