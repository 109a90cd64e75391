use tower_sessions::Session;

const FLASH_KEY: &str = "flash";

/// Stores a one-shot message in the session.
pub async fn set(session: &Session, message: &str) -> Result<(), tower_sessions::session::Error> {
    session.insert(FLASH_KEY, message.to_string()).await
}

/// Takes the pending message, if any, clearing it from the session.
pub async fn take(session: &Session) -> Option<String> {
    session.remove::<String>(FLASH_KEY).await.ok().flatten()
}
