use utoipa::OpenApi;

use crate::routes::{chats, health};

#[derive(OpenApi)]
#[openapi(info(
    title = "chat-server",
    description = "Chats and their messages over REST",
    version = "0.1.0",
    contact(name = "slab-rs", url = "https://github.com/Cyberhan123/slab.rs")
))]
pub struct ApiDoc;

pub fn get_docs() -> utoipa::openapi::OpenApi {
    let mut root = ApiDoc::openapi();
    root.merge(health::HealthApi::openapi());
    root.merge(chats::ChatsApi::openapi());
    root
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn document_lists_chat_paths() {
        let doc = get_docs();
        assert!(doc.paths.paths.contains_key("/chats/"));
        assert!(doc.paths.paths.contains_key("/chats/{id}"));
        assert!(doc.paths.paths.contains_key("/chats/{id}/messages/"));
        assert!(doc.paths.paths.contains_key("/health"));
    }
}
