mod url;

pub use url::{redirect_handler, shorten_handler};
pub use wormhole_worker::http::health_handler;
