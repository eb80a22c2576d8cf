//! Landing page.

use askama::Template;
use askama_web::WebTemplate;
use tower_sessions::Session;
use tracing::instrument;

use crate::{filters, models::Flash};

#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub current_path: String,
    pub flashes: Vec<Flash>,
}

/// Landing page handler. Also where a failed dashboard load lands.
#[instrument(skip_all)]
pub async fn index(session: Session) -> IndexTemplate {
    IndexTemplate {
        current_path: "/".to_string(),
        flashes: Flash::take_all(&session).await,
    }
}
